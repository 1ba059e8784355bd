//! Derive clap arguments and options from function signatures.
//!
//! A function is described by a [`Signature`]: parameter names, annotations
//! and defaults. [`auto_decorate`] turns every public parameter into a clap
//! argument:
//!
//! - no default: required positional argument
//! - `bool` without metadata: `--flag`
//! - default: `--option` carrying that default
//!
//! Parameters starting with `_` stay off the command line; when they have no
//! default, calls through the [`BoundCommand`] receive `None` for them.
//!
//! ```
//! use autocli::{auto_decorate, BaseType, CommandFn, Kwargs, Parameter, Signature, TypeHandlerRegistry, Value};
//!
//! let sig = Signature::default()
//!     .param(Parameter::new("path").typed(BaseType::Str))
//!     .param(Parameter::new("verbose").typed(BaseType::Bool).default_value(false))
//!     .param(Parameter::new("_ctx"));
//! let f = CommandFn::new("show", sig, |kw: Kwargs| kw);
//!
//! let bound = auto_decorate(f, &TypeHandlerRegistry::with_defaults()).unwrap();
//! let kw = bound.try_run_from(["show", "a.txt", "--verbose"]).unwrap();
//! assert_eq!(kw.get("verbose"), Some(&Value::Bool(true)));
//! assert_eq!(kw.get("_ctx"), Some(&Value::None));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{
    auto_decorate, AutoDecorator, Binding, BoundCommand, CommandFn, DecorateError,
    DecorateResult, ParamType, Target, TypeHandler, TypeHandlerRegistry, TypeHandlers,
};
pub use config::Settings;
pub use domain::{Annotation, BaseType, Kwargs, Metadata, Parameter, Signature, Value};
