//! verus - offline relevance signals for search results.
//!
//! Infers content age and technology currency from snippet text and result
//! URLs. No network calls; every operation is a pure function of its input,
//! a set of static tables and an injected clock.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{Annotation, AnnotationEntry, ResultInput};
pub use services::{compose, AnnotationComposer};
