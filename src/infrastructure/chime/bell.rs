//! Terminal bell chime

use std::io::Write;

use crate::application::ports::ChimeError;

const BEL: &[u8] = b"\x07";

/// Write BEL to standard error
pub fn ring() -> Result<(), ChimeError> {
    ring_to(&mut std::io::stderr())
}

pub(super) fn ring_to(stream: &mut dyn Write) -> Result<(), ChimeError> {
    stream
        .write_all(BEL)
        .map_err(|e| ChimeError::PlaybackFailed(e.to_string()))?;
    stream
        .flush()
        .map_err(|e| ChimeError::PlaybackFailed(e.to_string()))
}
