//! Annotation resolver: split an annotation into base type and metadata

use crate::domain::signature::{Annotation, BaseType, Metadata};

/// Result of resolving an annotation.
///
/// `annotation` and `metadata` are only present for the annotated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnnotation<'a> {
    pub base: &'a BaseType,
    pub annotation: Option<&'a Annotation>,
    pub metadata: Option<&'a [Metadata]>,
}

impl ResolvedAnnotation<'_> {
    /// True when no directive accompanies the base type.
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some_and(|m| !m.is_empty())
    }
}

/// Never fails; a plain annotation (including `Empty`) is its own base type.
pub fn resolve_annotation(annotation: &Annotation) -> ResolvedAnnotation<'_> {
    match annotation {
        Annotation::Annotated { base, metadata } => ResolvedAnnotation {
            base,
            annotation: Some(annotation),
            metadata: Some(metadata.as_slice()),
        },
        Annotation::Plain(base) => ResolvedAnnotation {
            base,
            annotation: None,
            metadata: None,
        },
    }
}
