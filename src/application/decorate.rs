//! Auto-decoration: bind every eligible parameter of a function to the CLI

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, instrument};

use crate::application::binding::{synthesize, Binding};
use crate::application::error::{DecorateError, DecorateResult};
use crate::application::registry::{extract_kind, TypeHandlerRegistry, TypeHandlers};
use crate::application::shim::{bind_missing, internal_parameters};
use crate::config::Settings;
use crate::domain::{Kwargs, Signature, Value};

type Body<R> = Arc<dyn Fn(Kwargs) -> R + Send + Sync>;

/// A function together with its signature, ready to be bound.
pub struct CommandFn<R> {
    name: String,
    about: Option<String>,
    signature: Signature,
    manual: Vec<Arg>,
    skip_receiver: bool,
    body: Body<R>,
}

impl<R> CommandFn<R> {
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(Kwargs) -> R + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            about: None,
            signature,
            manual: Vec::new(),
            skip_receiver: false,
            body: Arc::new(body),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Bind a parameter by hand; auto-decoration leaves it alone.
    pub fn manual_arg(mut self, arg: Arg) -> Self {
        self.manual.push(arg);
        self
    }

    /// The first parameter is a receiver and never reaches the CLI.
    pub fn with_receiver(mut self) -> Self {
        self.skip_receiver = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Parameter names already claimed by manual bindings.
    pub fn claimed_names(&self) -> BTreeSet<String> {
        self.manual
            .iter()
            .map(|a| a.get_id().as_str().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

impl<R> fmt::Debug for CommandFn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFn")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("manual", &self.claimed_names())
            .field("skip_receiver", &self.skip_receiver)
            .finish_non_exhaustive()
    }
}

/// What can be handed to the decorator.
pub enum Target<R> {
    /// A fully built clap command. Always rejected.
    Command(Command),
    Function(CommandFn<R>),
}

impl<R> From<CommandFn<R>> for Target<R> {
    fn from(f: CommandFn<R>) -> Self {
        Target::Function(f)
    }
}

impl<R> From<Command> for Target<R> {
    fn from(c: Command) -> Self {
        Target::Command(c)
    }
}

/// A function with its generated CLI surface.
///
/// Keeps the original name, about text and signature.
pub struct BoundCommand<R> {
    name: String,
    about: Option<String>,
    signature: Signature,
    bindings: Vec<Binding>,
    manual: Vec<Arg>,
    internal: Vec<String>,
    body: Body<R>,
}

impl<R> Clone for BoundCommand<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            about: self.about.clone(),
            signature: self.signature.clone(),
            bindings: self.bindings.clone(),
            manual: self.manual.clone(),
            internal: self.internal.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

impl<R> fmt::Debug for BoundCommand<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCommand")
            .field("name", &self.name)
            .field("bindings", &self.bindings)
            .field("internal", &self.internal)
            .finish_non_exhaustive()
    }
}

impl<R> BoundCommand<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Generated bindings in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.name() == name)
    }

    /// Internal parameters that receive `None` when left out.
    pub fn internal_parameters(&self) -> &[String] {
        &self.internal
    }

    /// True when calls pass through the defaulting shim.
    pub fn is_wrapped(&self) -> bool {
        !self.internal.is_empty()
    }

    /// Build the clap command: generated args first, then manual ones.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone());
        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }
        let args: Vec<Arg> = self
            .bindings
            .iter()
            .map(Binding::to_arg)
            .chain(self.manual.iter().cloned())
            .collect();
        // A parameter named `help` takes over the name; the built-in flag goes.
        if args.iter().any(claims_help) {
            debug!(command = %self.name, "help flag disabled");
            cmd = cmd.disable_help_flag(true);
        }
        cmd.args(args)
    }

    /// Call the function, binding `None` for missing internal parameters first.
    pub fn invoke(&self, kwargs: Kwargs) -> R {
        let kwargs = if self.is_wrapped() {
            bind_missing(kwargs, &self.internal)
        } else {
            kwargs
        };
        (self.body)(kwargs)
    }

    /// Collect keyword arguments from parsed matches.
    pub fn kwargs_from_matches(&self, matches: &ArgMatches) -> DecorateResult<Kwargs> {
        let mut kwargs = Kwargs::new();
        for binding in &self.bindings {
            let name = binding.name();
            let read = if binding.is_flag() {
                matches
                    .try_get_one::<bool>(name)
                    .map(|v| v.map(|b| Value::Bool(*b)))
            } else {
                extract_kind(binding.value_type().as_ref()).read(matches, name)
            };
            let value = read.map_err(|source| DecorateError::Matches {
                name: name.to_string(),
                source,
            })?;
            kwargs.insert(name, value.unwrap_or(Value::None));
        }
        for arg in &self.manual {
            let id = arg.get_id().as_str();
            let value = manual_value(arg, matches).map_err(|source| DecorateError::Matches {
                name: id.to_string(),
                source,
            })?;
            kwargs.insert(id, value);
        }
        Ok(kwargs)
    }

    pub fn run_matches(&self, matches: &ArgMatches) -> DecorateResult<R> {
        let kwargs = self.kwargs_from_matches(matches)?;
        Ok(self.invoke(kwargs))
    }

    /// Parse `argv` (program name first) and invoke.
    pub fn try_run_from<I, T>(&self, argv: I) -> DecorateResult<R>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        self.run_matches(&matches)
    }
}

fn claims_help(arg: &Arg) -> bool {
    arg.get_id().as_str() == "help"
        || arg.get_long() == Some("help")
        || arg.get_short() == Some('h')
}

/// Manual args have no descriptor; read them by action, raw text otherwise.
fn manual_value(arg: &Arg, matches: &ArgMatches) -> Result<Value, clap::parser::MatchesError> {
    let id = arg.get_id().as_str();
    let value = match arg.get_action() {
        ArgAction::SetTrue | ArgAction::SetFalse => {
            matches.try_get_one::<bool>(id)?.map(|b| Value::Bool(*b))
        }
        ArgAction::Count => matches
            .try_get_one::<u8>(id)?
            .map(|c| Value::Int(i64::from(*c))),
        _ => matches
            .try_get_raw(id)?
            .and_then(|mut raw| raw.next())
            .map(|s| Value::Str(s.to_string_lossy().into_owned())),
    };
    Ok(value.unwrap_or(Value::None))
}

/// Binds functions using a registry and settings.
#[derive(Debug, Clone)]
pub struct AutoDecorator {
    handlers: TypeHandlerRegistry,
    settings: Settings,
}

impl Default for AutoDecorator {
    fn default() -> Self {
        Self::new(TypeHandlerRegistry::with_defaults(), Settings::default())
    }
}

impl AutoDecorator {
    pub fn new(handlers: TypeHandlerRegistry, settings: Settings) -> Self {
        Self { handlers, settings }
    }

    pub fn handlers(&self) -> &TypeHandlerRegistry {
        &self.handlers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn decorate<R>(&self, target: impl Into<Target<R>>) -> DecorateResult<BoundCommand<R>> {
        decorate_with(target.into(), &self.handlers, &self.settings)
    }
}

/// Bind `target` with default settings.
pub fn auto_decorate<R>(
    target: impl Into<Target<R>>,
    handlers: &dyn TypeHandlers,
) -> DecorateResult<BoundCommand<R>> {
    decorate_with(target.into(), handlers, &Settings::default())
}

#[instrument(level = "debug", skip_all)]
pub fn decorate_with<R>(
    target: Target<R>,
    handlers: &dyn TypeHandlers,
    settings: &Settings,
) -> DecorateResult<BoundCommand<R>> {
    let function = match target {
        Target::Command(cmd) => {
            return Err(DecorateError::AlreadyCommand {
                name: cmd.get_name().to_string(),
            })
        }
        Target::Function(f) => f,
    };

    let claimed = function.claimed_names();
    let marker = settings.internal_marker.as_str();
    let mut seen = BTreeSet::new();
    let mut bindings = Vec::new();

    for param in function.signature.parameters(function.skip_receiver) {
        if !seen.insert(param.name.clone()) {
            return Err(DecorateError::DuplicateParameter {
                name: param.name.clone(),
            });
        }
        if param.is_internal(marker) || claimed.contains(&param.name) {
            continue;
        }
        bindings.push(synthesize(&param.name, param, handlers, settings)?);
    }

    let internal = internal_parameters(&function.signature, marker);
    debug!(
        command = %function.name,
        generated = bindings.len(),
        manual = claimed.len(),
        internal = internal.len(),
        "decorated"
    );

    Ok(BoundCommand {
        name: function.name,
        about: function.about,
        signature: function.signature,
        bindings,
        manual: function.manual,
        internal,
        body: function.body,
    })
}
