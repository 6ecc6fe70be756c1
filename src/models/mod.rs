//! Data models for verus.

mod annotation;
mod result;

pub use annotation::{Age, Annotation, AnnotationEntry};
pub use result::{parse_results, InputError, ResultInput};
