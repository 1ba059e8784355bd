//! Application layer: binding synthesis, type handlers and auto-decoration
//!
//! Depends on the domain layer and on clap for the produced arguments.

pub mod binding;
pub mod decorate;
pub mod error;
pub mod registry;
pub mod shim;

pub use binding::{cli_name, synthesize, Binding};
pub use decorate::{auto_decorate, decorate_with, AutoDecorator, BoundCommand, CommandFn, Target};
pub use error::{DecorateError, DecorateResult};
pub use registry::{
    BasicTypeHandler, ChoiceHandler, ParamType, RangeHandler, TypeHandler, TypeHandlerRegistry,
    TypeHandlers,
};
pub use shim::{bind_missing, internal_parameters};
