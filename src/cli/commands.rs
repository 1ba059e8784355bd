//! Command dispatch

use tracing::{debug, instrument};

use crate::application::{AutoDecorator, Binding, DecorateError, TypeHandlerRegistry};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::greet::bound_greet;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Value;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.settings.as_deref())?;
    debug!(?settings, "settings loaded");
    let decorator = AutoDecorator::new(TypeHandlerRegistry::with_defaults(), settings);

    match &cli.command {
        Some(Commands::Greet { args }) => _greet(&decorator, args),
        Some(Commands::Describe) => _describe(&decorator),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                output::info(decorator.settings().to_toml()?.trim_end());
                Ok(())
            }
            ConfigCommands::Template => {
                output::info(Settings::template().trim_end());
                Ok(())
            }
        },
        None => Ok(()),
    }
}

#[instrument(skip(decorator))]
fn _greet(decorator: &AutoDecorator, args: &[String]) -> CliResult<()> {
    let bound = bound_greet(decorator)?;
    let argv = std::iter::once(bound.name().to_string()).chain(args.iter().cloned());
    match bound.try_run_from(argv) {
        Ok(out) => output::info(&out),
        // --help and --version are not failures
        Err(DecorateError::Parse(e)) if !e.use_stderr() => e.print()?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[instrument(skip(decorator))]
fn _describe(decorator: &AutoDecorator) -> CliResult<()> {
    let bound = bound_greet(decorator)?;
    output::header(&format!("{}: {}", bound.name(), bound.about().unwrap_or_default()));
    for binding in bound.bindings() {
        output::binding(&describe_binding(binding));
    }
    for name in bound.internal_parameters() {
        output::hidden(&format!("{} (internal, defaults to None)", name));
    }
    Ok(())
}

fn describe_binding(binding: &Binding) -> String {
    let ty = binding
        .value_type()
        .as_ref()
        .map_or_else(|| "untyped".to_string(), ToString::to_string);
    match binding {
        Binding::Argument { name, .. } => format!("{} <{}> (positional, required)", name, ty),
        Binding::Option {
            long,
            is_flag: true,
            default,
            ..
        } => format!(
            "--{} (flag, default: {})",
            long,
            default.as_ref().and_then(Value::as_bool).unwrap_or(false)
        ),
        Binding::Option { long, default, .. } => format!(
            "--{} <{}> (default: {})",
            long,
            ty,
            default
                .as_ref()
                .map_or_else(|| "None".to_string(), ToString::to_string)
        ),
    }
}
