//! roadmap-engine
//!
//! Entry point for roadmap generation. Wires the canonicalizer, the rule
//! engine, the risk aggregator and the renderer over one set of static
//! registries.

pub mod error;
pub mod registries;
pub mod roadmap;
pub mod substitutions;

pub use error::RoadmapError;
pub use registries::Registries;
pub use roadmap::{Roadmap, RoadmapOutput, RoadmapRequest};
