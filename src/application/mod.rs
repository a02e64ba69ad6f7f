//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod dispatch;
pub mod emit;
pub mod hook;
pub mod ports;
pub mod run;
pub mod tail;
pub mod watch;

// Re-export use cases
pub use dispatch::{
    DeliveryError, DeliveryResult, NotificationDispatcher, NotifierChain, DEFAULT_BACKEND_TIMEOUT,
};
pub use emit::EmitInput;
pub use hook::{HookInput, HookNotifyUseCase, HookReport};
pub use run::{RunCommandUseCase, RunInput, RunReport};
pub use tail::{TailFileUseCase, TailInput, TailReport};
pub use watch::{WatchCompletion, WatchInput, WatchProcessUseCase, WatchReport, WatchState};
