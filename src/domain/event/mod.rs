//! Event model shared by every trigger source

mod completion;
mod elapsed;
mod tail;
pub mod tool_name;

pub use completion::{Event, Outcome, SourceKind};
pub use elapsed::Elapsed;
pub use tail::{Tail, TailBuffer};
