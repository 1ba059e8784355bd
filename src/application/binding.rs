//! Decorator synthesizer: one parameter descriptor in, one binding out

use clap::{Arg, ArgAction};
use tracing::trace;

use crate::application::error::{DecorateError, DecorateResult};
use crate::application::registry::{ParamType, TypeHandlers};
use crate::config::Settings;
use crate::domain::{resolve_annotation, BaseType, Metadata, Parameter, Value};

/// How a single parameter is exposed on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Required positional argument.
    Argument {
        name: String,
        param_type: Option<ParamType>,
        help: Option<String>,
    },
    /// Named option (`--long`), possibly a flag.
    Option {
        name: String,
        long: String,
        default: Option<Value>,
        show_default: bool,
        param_type: Option<ParamType>,
        is_flag: bool,
        help: Option<String>,
    },
}

/// `foo_bar` -> `foo-bar`
pub fn cli_name(name: &str) -> String {
    name.replace('_', "-")
}

impl Binding {
    /// Parameter name the binding fills.
    pub fn name(&self) -> &str {
        match self {
            Binding::Argument { name, .. } | Binding::Option { name, .. } => name,
        }
    }

    pub fn param_type(&self) -> Option<&ParamType> {
        match self {
            Binding::Argument { param_type, .. } | Binding::Option { param_type, .. } => {
                param_type.as_ref()
            }
        }
    }

    /// Descriptor used for parsing: the resolved one, else inferred from
    /// the default's variant so an untyped `level = 3` still parses as int.
    pub fn value_type(&self) -> Option<ParamType> {
        match self {
            Binding::Option {
                param_type: None,
                default: Some(default),
                ..
            } => match default {
                Value::Bool(_) => Some(ParamType::Bool),
                Value::Int(_) => Some(ParamType::Int),
                Value::Float(_) => Some(ParamType::Float),
                Value::Path(_) => Some(ParamType::Path),
                Value::Str(_) | Value::None => None,
            },
            _ => self.param_type().cloned(),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Binding::Argument { .. })
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Binding::Option { is_flag: true, .. })
    }

    /// Build the clap argument for this binding.
    pub fn to_arg(&self) -> Arg {
        match self {
            Binding::Argument {
                name,
                param_type,
                help,
            } => {
                let mut arg = Arg::new(name.clone())
                    .required(true)
                    .action(ArgAction::Set);
                if let Some(pt) = param_type {
                    arg = arg.value_parser(pt.value_parser());
                }
                if let Some(h) = help {
                    arg = arg.help(h.clone());
                }
                arg
            }
            Binding::Option {
                name,
                long,
                default,
                show_default,
                is_flag,
                help,
                ..
            } => {
                let mut arg = Arg::new(name.clone())
                    .long(long.clone())
                    .hide_default_value(!show_default);
                if *is_flag {
                    // The flag moves the value away from its default.
                    let on = default.as_ref().and_then(Value::as_bool).unwrap_or(false);
                    arg = arg.action(if on {
                        ArgAction::SetFalse
                    } else {
                        ArgAction::SetTrue
                    });
                } else {
                    arg = arg.action(ArgAction::Set);
                    if let Some(pt) = self.value_type() {
                        arg = arg.value_parser(pt.value_parser());
                    }
                    if let Some(d) = default.as_ref().and_then(Value::to_default_string) {
                        arg = arg.default_value(d);
                    }
                }
                if let Some(h) = help {
                    arg = arg.help(h.clone());
                }
                arg
            }
        }
    }
}

fn help_text(metadata: Option<&[Metadata]>) -> Option<String> {
    metadata?.iter().find_map(|m| match m {
        Metadata::Help(h) => Some(h.clone()),
        _ => None,
    })
}

/// Decide how `param` is exposed and build its binding.
///
/// Booleans without metadata always become flags and never consult the
/// registry. Otherwise a non-empty registry must know the type.
pub fn synthesize(
    name: &str,
    param: &Parameter,
    handlers: &dyn TypeHandlers,
    settings: &Settings,
) -> DecorateResult<Binding> {
    let resolved = resolve_annotation(&param.annotation);
    let help = help_text(resolved.metadata);

    if *resolved.base == BaseType::Bool && !resolved.has_metadata() {
        trace!(param = name, "flag");
        return Ok(Binding::Option {
            name: name.to_string(),
            long: cli_name(name),
            default: param.default.clone(),
            show_default: settings.show_default,
            param_type: None,
            is_flag: true,
            help,
        });
    }

    let param_type = handlers.resolve(resolved.base, resolved.metadata);
    if param_type.is_none() && !handlers.is_empty() {
        return Err(DecorateError::UnresolvedType {
            parameter: name.to_string(),
            base: resolved.base.to_string(),
            annotation: resolved
                .annotation
                .map_or_else(|| "None".to_string(), ToString::to_string),
            metadata: format!("{:?}", resolved.metadata),
        });
    }

    let binding = match &param.default {
        None => Binding::Argument {
            name: name.to_string(),
            param_type,
            help,
        },
        Some(default) => Binding::Option {
            name: name.to_string(),
            long: cli_name(name),
            default: Some(default.clone()),
            show_default: settings.show_default,
            is_flag: *resolved.base == BaseType::Bool,
            param_type,
            help,
        },
    };
    trace!(param = name, ?binding, "synthesized");
    Ok(binding)
}
