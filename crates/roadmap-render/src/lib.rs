//! roadmap-render
//!
//! The roadmap template grammar and its renderer. A template is literal
//! text with `{{name}}` placeholders and `{{#rule}}…{{/rule}}` regions;
//! it is parsed and validated once, then rendered against the flags and
//! substitutions of a single evaluation.

pub mod error;
pub mod render;
pub mod template;

pub use render::{RenderContext, render};
pub use template::{Node, Template};
