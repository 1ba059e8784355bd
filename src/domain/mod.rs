//! Domain layer: signature descriptors, values and annotation resolution
//!
//! This layer is independent of clap and of configuration loading.

pub mod annotation;
pub mod signature;
pub mod value;

pub use annotation::{resolve_annotation, ResolvedAnnotation};
pub use signature::{Annotation, BaseType, Metadata, Parameter, Signature};
pub use value::{Kwargs, Value};
