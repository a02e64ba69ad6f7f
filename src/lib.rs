//! agent-notify - notifications for finished commands and agent tasks
//!
//! Turns a wrapped command, a watched PID, a log-file match or an agent
//! tool's hook payload into one canonical completion event, then delivers it
//! through desktop and console channels.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Events, settings, hook payload parsing, notification text
//! - **Application**: Use cases, dispatch, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notifiers, chime, focus, processes, config)
//! - **CLI**: Command-line interface, argument parsing, signal handling and logging

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
