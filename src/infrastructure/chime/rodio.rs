//! Rodio-based ping tone
//!
//! Generates and plays a short synthesized chime.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::application::ports::ChimeError;

/// Softer amplitude for pleasant sound
const AMP: f32 = 0.3;

/// Create a gentle tone with fade in/out for a smoother sound
fn gentle_tone(freq: f32, duration_ms: u64, amplitude: f32) -> impl Source<Item = f32> + Send {
    let fade_ms = (duration_ms / 5).min(30); // 20% fade or max 30ms
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(amplitude)
}

/// Play the ping synchronously (called from spawn_blocking)
pub(super) fn play_ping_sync() -> Result<(), ChimeError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| ChimeError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| ChimeError::PlaybackFailed(e.to_string()))?;

    // Ascending fifth: A5 -> E6
    sink.append(gentle_tone(880.0, 90, AMP));
    sink.append(gentle_tone(1318.5, 160, AMP * 0.8));

    sink.sleep_until_end();
    Ok(())
}
