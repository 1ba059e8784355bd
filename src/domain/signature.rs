//! Signature descriptors: what a bound function declares about its parameters

use std::fmt;

use crate::domain::value::Value;

/// The type a parameter is declared with, stripped of any metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BaseType {
    /// No annotation at all
    #[default]
    Empty,
    Bool,
    Str,
    Int,
    Float,
    Path,
    /// Caller-defined type, resolved by a registered handler
    Named(String),
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Empty => write!(f, "<empty>"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::Str => write!(f, "str"),
            BaseType::Int => write!(f, "int"),
            BaseType::Float => write!(f, "float"),
            BaseType::Path => write!(f, "path"),
            BaseType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Extra directive attached to a base type in the annotated form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Metadata {
    /// Restrict values to a fixed set
    Choices(Vec<String>),
    /// Inclusive integer bounds
    Range { min: i64, max: i64 },
    /// Help text for the generated argument
    Help(String),
    /// Free-form marker for custom handlers
    Tag(String),
}

impl Metadata {
    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Metadata::Choices(values.into_iter().map(Into::into).collect())
    }
}

/// A declared type annotation, possibly carrying metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    Plain(BaseType),
    Annotated {
        base: BaseType,
        metadata: Vec<Metadata>,
    },
}

impl Default for Annotation {
    fn default() -> Self {
        Annotation::Plain(BaseType::Empty)
    }
}

impl From<BaseType> for Annotation {
    fn from(base: BaseType) -> Self {
        Annotation::Plain(base)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Plain(base) => write!(f, "{}", base),
            Annotation::Annotated { base, metadata } => {
                write!(f, "Annotated[{}", base)?;
                for m in metadata {
                    write!(f, ", {:?}", m)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One parameter of a function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Annotation,
    /// `None` means the parameter has no default; `Some(Value::None)` defaults to None.
    pub default: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: Annotation::default(),
            default: None,
        }
    }

    pub fn typed(mut self, base: BaseType) -> Self {
        self.annotation = Annotation::Plain(base);
        self
    }

    pub fn annotated(mut self, base: BaseType, metadata: Vec<Metadata>) -> Self {
        self.annotation = Annotation::Annotated { base, metadata };
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_internal(&self, marker: &str) -> bool {
        self.name.starts_with(marker)
    }
}

/// Ordered parameter list of a function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    params: Vec<Parameter>,
}

impl Signature {
    pub fn new(params: Vec<Parameter>) -> Self {
        Self { params }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// All declared parameters, receiver included.
    pub fn all(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameters eligible for CLI exposure; drops the first one when it is a receiver.
    pub fn parameters(&self, skip_receiver: bool) -> &[Parameter] {
        match (skip_receiver, self.params.split_first()) {
            (true, Some((_, rest))) => rest,
            _ => &self.params,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method_signature() -> Signature {
        Signature::default()
            .param(Parameter::new("this"))
            .param(Parameter::new("path").typed(BaseType::Path))
    }

    #[test]
    fn given_receiver_flag_when_enumerating_then_first_param_is_dropped() {
        let sig = method_signature();
        let names: Vec<_> = sig.parameters(true).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["path"]);
        assert_eq!(sig.parameters(false).len(), 2);
    }

    #[test]
    fn given_empty_signature_when_skipping_receiver_then_nothing_breaks() {
        let sig = Signature::default();
        assert!(sig.parameters(true).is_empty());
    }

    #[test]
    fn test_annotation_display() {
        let a = Annotation::Annotated {
            base: BaseType::Int,
            metadata: vec![Metadata::Range { min: 1, max: 3 }],
        };
        assert_eq!(a.to_string(), "Annotated[int, Range { min: 1, max: 3 }]");
        assert_eq!(Annotation::default().to_string(), "<empty>");
    }
}
