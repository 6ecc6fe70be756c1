//! Annotation composition.

mod composer;

pub use composer::{compose, AnnotationComposer};
