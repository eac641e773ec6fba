//! roadmap-labs
//!
//! Lab-name canonicalization. Maps the test names and value syntaxes of
//! upstream lab extractors onto the fixed set of canonical lab ids, decoding
//! genotype results and converting units on the way.

pub mod builtin;
pub mod canonicalize;
pub mod error;
pub mod genotype;
pub mod numeric;
pub mod registry;
pub mod units;

pub use canonicalize::Canonicalizer;
pub use registry::CanonicalRegistry;
