//! Type-handler registry: map base types and metadata to clap value parsers

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::builder::{PossibleValuesParser, ValueParser};

use crate::domain::{BaseType, Metadata};

/// CLI parameter-type descriptor produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Bool,
    Int,
    Float,
    Path,
    Choice(Vec<String>),
    IntRange { min: i64, max: i64 },
}

impl ParamType {
    pub fn value_parser(&self) -> ValueParser {
        match self {
            ParamType::String => ValueParser::string(),
            ParamType::Bool => ValueParser::bool(),
            ParamType::Int => clap::value_parser!(i64).into(),
            ParamType::Float => clap::value_parser!(f64).into(),
            ParamType::Path => ValueParser::path_buf(),
            ParamType::Choice(choices) => PossibleValuesParser::new(choices.clone()).into(),
            ParamType::IntRange { min, max } => {
                clap::value_parser!(i64).range(*min..=*max).into()
            }
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "TEXT"),
            ParamType::Bool => write!(f, "BOOLEAN"),
            ParamType::Int => write!(f, "INTEGER"),
            ParamType::Float => write!(f, "FLOAT"),
            ParamType::Path => write!(f, "PATH"),
            ParamType::Choice(c) => write!(f, "[{}]", c.join("|")),
            ParamType::IntRange { min, max } => write!(f, "INTEGER RANGE {}<=x<={}", min, max),
        }
    }
}

/// Registry lookup used by the synthesizer.
pub trait TypeHandlers {
    fn resolve(&self, base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType>;

    /// An empty registry disables type checking: unknown types become untyped arguments.
    fn is_empty(&self) -> bool;
}

/// A single handler; answers `None` for types it does not know.
pub trait TypeHandler: Send + Sync {
    fn param_type(&self, base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType>;
}

impl<F> TypeHandler for F
where
    F: Fn(&BaseType, Option<&[Metadata]>) -> Option<ParamType> + Send + Sync,
{
    fn param_type(&self, base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType> {
        self(base, metadata)
    }
}

/// Plain scalar types. Metadata it does not understand is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTypeHandler;

impl TypeHandler for BasicTypeHandler {
    fn param_type(&self, base: &BaseType, _metadata: Option<&[Metadata]>) -> Option<ParamType> {
        match base {
            BaseType::Bool => Some(ParamType::Bool),
            BaseType::Str => Some(ParamType::String),
            BaseType::Int => Some(ParamType::Int),
            BaseType::Float => Some(ParamType::Float),
            BaseType::Path => Some(ParamType::Path),
            BaseType::Empty | BaseType::Named(_) => None,
        }
    }
}

/// `Choices` metadata on any base type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceHandler;

impl TypeHandler for ChoiceHandler {
    fn param_type(&self, _base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType> {
        metadata?.iter().find_map(|m| match m {
            Metadata::Choices(c) => Some(ParamType::Choice(c.clone())),
            _ => None,
        })
    }
}

/// `Range` metadata on an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeHandler;

impl TypeHandler for RangeHandler {
    fn param_type(&self, base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType> {
        if *base != BaseType::Int {
            return None;
        }
        metadata?.iter().find_map(|m| match m {
            Metadata::Range { min, max } => Some(ParamType::IntRange {
                min: *min,
                max: *max,
            }),
            _ => None,
        })
    }
}

/// Ordered handler list; the first handler that answers wins.
#[derive(Clone, Default)]
pub struct TypeHandlerRegistry {
    handlers: Vec<(String, Arc<dyn TypeHandler>)>,
}

impl TypeHandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in handlers, most specific first.
    pub fn with_defaults() -> Self {
        Self::new()
            .with("choice", ChoiceHandler)
            .with("range", RangeHandler)
            .with("basic", BasicTypeHandler)
    }

    pub fn with(mut self, name: impl Into<String>, handler: impl TypeHandler + 'static) -> Self {
        self.register(name, handler);
        self
    }

    pub fn register(&mut self, name: impl Into<String>, handler: impl TypeHandler + 'static) {
        self.handlers.push((name.into(), Arc::new(handler)));
    }

    /// Register ahead of every existing handler.
    pub fn register_first(&mut self, name: impl Into<String>, handler: impl TypeHandler + 'static) {
        self.handlers.insert(0, (name.into(), Arc::new(handler)));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl TypeHandlers for TypeHandlerRegistry {
    fn resolve(&self, base: &BaseType, metadata: Option<&[Metadata]>) -> Option<ParamType> {
        self.handlers
            .iter()
            .find_map(|(_, h)| h.param_type(base, metadata))
    }

    fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for TypeHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Value type extracted from `ArgMatches` for a descriptor.
pub(crate) fn extract_kind(param_type: Option<&ParamType>) -> ExtractKind {
    match param_type {
        Some(ParamType::Bool) => ExtractKind::Bool,
        Some(ParamType::Int) | Some(ParamType::IntRange { .. }) => ExtractKind::Int,
        Some(ParamType::Float) => ExtractKind::Float,
        Some(ParamType::Path) => ExtractKind::Path,
        Some(ParamType::String) | Some(ParamType::Choice(_)) | None => ExtractKind::Str,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExtractKind {
    Bool,
    Int,
    Float,
    Path,
    Str,
}

impl ExtractKind {
    pub(crate) fn read(
        self,
        matches: &clap::ArgMatches,
        id: &str,
    ) -> Result<Option<crate::domain::Value>, clap::parser::MatchesError> {
        use crate::domain::Value;
        Ok(match self {
            ExtractKind::Bool => matches.try_get_one::<bool>(id)?.map(|b| Value::Bool(*b)),
            ExtractKind::Int => matches.try_get_one::<i64>(id)?.map(|i| Value::Int(*i)),
            ExtractKind::Float => matches.try_get_one::<f64>(id)?.map(|f| Value::Float(*f)),
            ExtractKind::Path => matches
                .try_get_one::<PathBuf>(id)?
                .map(|p| Value::Path(p.clone())),
            ExtractKind::Str => matches
                .try_get_one::<String>(id)?
                .map(|s| Value::Str(s.clone())),
        })
    }
}
