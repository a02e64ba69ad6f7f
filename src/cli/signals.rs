//! Signal handling for the waiting commands and for `run`

use tokio::task::JoinHandle;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// SIGINT or SIGTERM (Ctrl-C on Windows) while `watch` or `tail` waits
pub struct ShutdownSignal {
    #[cfg(unix)]
    sigint: Signal,
    #[cfg(unix)]
    sigterm: Signal,
}

impl ShutdownSignal {
    /// Install the handlers. Must be called before waiting starts.
    #[cfg(unix)]
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self {})
    }

    /// Wait for the next shutdown request
    #[cfg(unix)]
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.sigint.recv() => tracing::debug!("Received SIGINT"),
            _ = self.sigterm.recv() => tracing::debug!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Received Ctrl-C");
        } else {
            std::future::pending::<()>().await;
        }
    }
}

/// Keeps the wrapper alive on Ctrl-C while a wrapped command runs.
///
/// The terminal delivers SIGINT to the whole foreground group, so the child
/// gets it and decides its own fate; the wrapper waits and mirrors the
/// resulting status. Dropping the guard stops listening.
pub struct InterruptGuard {
    task: JoinHandle<()>,
}

impl InterruptGuard {
    pub fn install() -> Result<Self, std::io::Error> {
        #[cfg(unix)]
        let task = {
            let mut sigint = signal(SignalKind::interrupt())?;
            tokio::spawn(async move {
                while sigint.recv().await.is_some() {
                    tracing::debug!("Interrupt received, waiting for the command to exit");
                }
            })
        };

        #[cfg(not(unix))]
        let task = tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("Ctrl-C received, waiting for the command to exit");
            }
        });

        Ok(Self { task })
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}
