//! roadmap-cli
//!
//! Host side of the roadmap engine: the versioned config file, registry
//! loading from disk and the command implementations behind the `roadmap`
//! binary.

pub mod commands;
pub mod config;
