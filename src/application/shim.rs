//! Defaulting shim for internal parameters

use crate::domain::{Kwargs, Signature, Value};

/// Internal parameters without a default: they must be bound to `None` when a
/// caller leaves them out.
pub fn internal_parameters(signature: &Signature, marker: &str) -> Vec<String> {
    signature
        .all()
        .iter()
        .filter(|p| p.is_internal(marker) && !p.has_default())
        .map(|p| p.name.clone())
        .collect()
}

/// Fill every name in `internal` that is missing from `kwargs` with `None`.
/// Explicitly supplied values are left alone.
pub fn bind_missing(mut kwargs: Kwargs, internal: &[String]) -> Kwargs {
    for name in internal {
        if !kwargs.contains(name) {
            kwargs.insert(name.clone(), Value::None);
        }
    }
    kwargs
}
