//! Liveness checks for external PIDs

use crate::application::ports::Liveness;

#[cfg(unix)]
pub use unix::PidProbe;
#[cfg(windows)]
pub use windows::PidProbe;

#[cfg(unix)]
mod unix {
    use std::sync::atomic::{AtomicBool, Ordering};

    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
    use nix::unistd::Pid;

    use super::Liveness;

    /// `waitpid` for our own children, `kill(pid, 0)` for everything else
    pub struct PidProbe {
        /// Cleared once `waitpid` says the PID is not our child
        reap: AtomicBool,
    }

    impl PidProbe {
        pub fn new() -> Self {
            Self {
                reap: AtomicBool::new(true),
            }
        }

        pub fn probe(&self, pid: u32) -> Liveness {
            let Ok(raw) = i32::try_from(pid) else {
                return Liveness::Gone;
            };
            let target = Pid::from_raw(raw);

            if self.reap.load(Ordering::Relaxed) {
                match waitpid(target, Some(WaitPidFlag::WNOHANG)) {
                    Ok(WaitStatus::Exited(_, code)) => return Liveness::Exited(code),
                    Ok(WaitStatus::Signaled(_, signal, _)) => {
                        return Liveness::Exited(128 + signal as i32)
                    }
                    Ok(_) => return Liveness::Alive,
                    Err(Errno::ECHILD) => {
                        tracing::debug!(pid, "Not a child process, exit code will be unknown");
                        self.reap.store(false, Ordering::Relaxed);
                    }
                    Err(e) => {
                        tracing::debug!(pid, error = %e, "waitpid failed, disabling reaping");
                        self.reap.store(false, Ordering::Relaxed);
                    }
                }
            }

            match kill(target, None) {
                Ok(()) if is_zombie(pid) => Liveness::Gone,
                Ok(()) => Liveness::Alive,
                // Exists but belongs to another user
                Err(Errno::EPERM) => Liveness::Alive,
                Err(_) => Liveness::Gone,
            }
        }
    }

    /// A zombie that is not ours will never be reaped by us
    #[cfg(target_os = "linux")]
    fn is_zombie(pid: u32) -> bool {
        std::fs::read_to_string(format!("/proc/{}/stat", pid))
            .ok()
            .and_then(|stat| {
                // The command name is parenthesised and may contain spaces
                let after = stat.rsplit_once(')')?.1;
                after.split_whitespace().next().map(|state| state == "Z")
            })
            .unwrap_or(false)
    }

    #[cfg(not(target_os = "linux"))]
    fn is_zombie(_pid: u32) -> bool {
        false
    }
}

#[cfg(windows)]
mod windows {
    use std::sync::Mutex;

    use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, STILL_ACTIVE};
    use windows_sys::Win32::System::Threading::{
        GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
    };

    use super::Liveness;

    /// Keeps a process handle open so the exit code survives process exit
    pub struct PidProbe {
        handle: Mutex<Option<(u32, isize)>>,
    }

    impl PidProbe {
        pub fn new() -> Self {
            Self {
                handle: Mutex::new(None),
            }
        }

        fn open(pid: u32) -> Option<isize> {
            // SAFETY: OpenProcess has no preconditions; a null result means failure
            let handle = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid) };
            if handle.is_null() {
                None
            } else {
                Some(handle as isize)
            }
        }

        pub fn probe(&self, pid: u32) -> Liveness {
            let Ok(mut cached) = self.handle.lock() else {
                return Liveness::Gone;
            };
            let handle = match *cached {
                Some((cached_pid, handle)) if cached_pid == pid => handle,
                _ => match Self::open(pid) {
                    Some(handle) => {
                        *cached = Some((pid, handle));
                        handle
                    }
                    None => return Liveness::Gone,
                },
            };

            let mut code: u32 = 0;
            // SAFETY: `handle` was returned by OpenProcess and is still open
            let ok = unsafe { GetExitCodeProcess(handle as HANDLE, &mut code) };
            if ok == 0 {
                return Liveness::Gone;
            }
            if code == STILL_ACTIVE as u32 {
                Liveness::Alive
            } else {
                Liveness::Exited(code as i32)
            }
        }
    }

    impl Drop for PidProbe {
        fn drop(&mut self) {
            if let Ok(cached) = self.handle.lock() {
                if let Some((_, handle)) = *cached {
                    // SAFETY: handle is owned by this probe and closed once
                    unsafe {
                        CloseHandle(handle as HANDLE);
                    }
                }
            }
        }
    }
}
