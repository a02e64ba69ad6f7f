//! Configuration sources: the TOML file and the environment

pub mod env;
mod file;

pub use file::{FileConfigStore, CONFIG_PATH_ENV};
