//! Chime port for an audible cue after delivery

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::config::Chime;

/// Errors that can occur during chime playback
#[derive(Error, Debug)]
pub enum ChimeError {
    /// Failed to play the sound
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Port trait for chime playback
#[async_trait]
pub trait ChimePlayer: Send + Sync {
    /// Play a chime. `Chime::None` is a no-op.
    async fn play(&self, chime: Chime) -> Result<(), ChimeError>;
}

/// Blanket implementation for boxed chime players
#[async_trait]
impl ChimePlayer for Box<dyn ChimePlayer> {
    async fn play(&self, chime: Chime) -> Result<(), ChimeError> {
        self.as_ref().play(chime).await
    }
}
