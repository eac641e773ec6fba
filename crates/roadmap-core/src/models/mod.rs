pub mod client;
pub mod diagnostic;
pub mod hhq;
pub mod lab;
