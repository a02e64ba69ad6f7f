//! Focus detection port

use async_trait::async_trait;

/// Port for checking whether the user is looking at a terminal.
///
/// Implementations are best effort: any failure must read as `false` so a
/// broken detector never hides a notification.
#[async_trait]
pub trait FocusDetector: Send + Sync {
    async fn is_frontmost_terminal(&self) -> bool;
}

/// Blanket implementation for boxed detectors
#[async_trait]
impl FocusDetector for Box<dyn FocusDetector> {
    async fn is_frontmost_terminal(&self) -> bool {
        self.as_ref().is_frontmost_terminal().await
    }
}
