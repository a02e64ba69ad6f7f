//! Chime infrastructure adapters
//!
//! `bell` writes BEL to the terminal. `ping` plays a short tone through
//! rodio and falls back to the bell when no audio device works.

mod bell;
mod rodio;

use async_trait::async_trait;

use crate::application::ports::{ChimeError, ChimePlayer};
use crate::domain::config::Chime;

/// Chime player for the local machine
pub struct SystemChime;

impl SystemChime {
    /// Create a new chime player
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemChime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChimePlayer for SystemChime {
    async fn play(&self, chime: Chime) -> Result<(), ChimeError> {
        match chime {
            Chime::None => Ok(()),
            Chime::Bell => bell::ring(),
            Chime::Ping => {
                // Run audio playback in blocking thread to avoid blocking the async runtime
                let played = tokio::task::spawn_blocking(rodio::play_ping_sync)
                    .await
                    .map_err(|e| ChimeError::PlaybackFailed(format!("Task join error: {}", e)))
                    .and_then(|result| result);
                match played {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        tracing::debug!(error = %e, "Ping tone failed, falling back to bell");
                        bell::ring()
                    }
                }
            }
        }
    }
}
