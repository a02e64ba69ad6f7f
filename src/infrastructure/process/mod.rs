//! Process and file adapters for the run, watch and tail commands

mod follower;
mod liveness;
mod probe;
pub mod procinfo;
mod runner;

pub use follower::FileFollower;
pub use probe::SystemProcessProbe;
pub use runner::TokioCommandRunner;
