//! Bundled `greet` command, bound entirely from its signature

use clap::Arg;

use crate::application::{AutoDecorator, BoundCommand, CommandFn, DecorateResult};
use crate::domain::{BaseType, Kwargs, Metadata, Parameter, Signature, Value};

pub fn greet_signature() -> Signature {
    Signature::default()
        .param(Parameter::new("name").typed(BaseType::Str))
        .param(
            Parameter::new("count")
                .annotated(
                    BaseType::Int,
                    vec![
                        Metadata::Range { min: 1, max: 5 },
                        Metadata::Help("How often to greet".into()),
                    ],
                )
                .default_value(1i64),
        )
        .param(Parameter::new("shout").typed(BaseType::Bool).default_value(false))
        .param(
            Parameter::new("style")
                .annotated(BaseType::Str, vec![Metadata::choices(["plain", "fancy"])])
                .default_value("plain"),
        )
        .param(Parameter::new("punctuation").typed(BaseType::Str).default_value("!"))
        .param(Parameter::new("_ctx"))
}

pub fn greet(kwargs: Kwargs) -> String {
    let name = kwargs.get("name").and_then(Value::as_str).unwrap_or("world");
    let count = kwargs.get("count").and_then(Value::as_int).unwrap_or(1);
    let shout = kwargs.get("shout").and_then(Value::as_bool).unwrap_or(false);
    let style = kwargs.get("style").and_then(Value::as_str).unwrap_or("plain");
    let punctuation = kwargs
        .get("punctuation")
        .and_then(Value::as_str)
        .unwrap_or("!");
    let prefix = kwargs
        .get("_ctx")
        .and_then(Value::as_str)
        .map(|ctx| format!("[{}] ", ctx))
        .unwrap_or_default();

    let mut line = match style {
        "fancy" => format!("{}~ Greetings, {} ~{}", prefix, name, punctuation),
        _ => format!("{}Hello, {}{}", prefix, name, punctuation),
    };
    if shout {
        line = line.to_uppercase();
    }
    vec![line; usize::try_from(count).unwrap_or(0)].join("\n")
}

pub fn greet_command() -> CommandFn<String> {
    CommandFn::new("greet", greet_signature(), greet)
        .about("Greet someone")
        .manual_arg(
            Arg::new("punctuation")
                .short('p')
                .long("punctuation")
                .default_value("!")
                .help("Closing punctuation"),
        )
}

pub fn bound_greet(decorator: &AutoDecorator) -> DecorateResult<BoundCommand<String>> {
    decorator.decorate(greet_command())
}
