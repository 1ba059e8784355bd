//! Integration tests for auto-decoration of function signatures.

use autocli::application::{decorate_with, Binding};
use autocli::util::testing;
use autocli::{
    auto_decorate, AutoDecorator, BaseType, CommandFn, DecorateError, Kwargs, Metadata,
    ParamType, Parameter, Settings, Signature, TypeHandlerRegistry, Value,
};
use clap::{Arg, Command};
use rstest::{fixture, rstest};

#[fixture]
fn registry() -> TypeHandlerRegistry {
    testing::init_test_setup();
    TypeHandlerRegistry::with_defaults()
}

fn echo(signature: Signature) -> CommandFn<Kwargs> {
    CommandFn::new("echo", signature, |kw| kw)
}

fn names(bindings: &[Binding]) -> Vec<&str> {
    bindings.iter().map(Binding::name).collect()
}

// ============================================================
// Examples
// ============================================================

#[rstest]
fn given_documented_examples_when_decorating_then_bindings_match(registry: TypeHandlerRegistry) {
    let sig = Signature::default()
        .param(Parameter::new("count"))
        .param(Parameter::new("verbose").typed(BaseType::Bool).default_value(false))
        .param(Parameter::new("name").typed(BaseType::Str).default_value("x"))
        .param(Parameter::new("_ctx"));

    // empty registry so the unannotated `count` stays untyped
    let bound = auto_decorate(echo(sig), &TypeHandlerRegistry::new()).unwrap();
    assert_eq!(names(bound.bindings()), vec!["count", "verbose", "name"]);
    assert_eq!(
        bound.binding("count"),
        Some(&Binding::Argument {
            name: "count".into(),
            param_type: None,
            help: None,
        })
    );
    assert!(bound.binding("verbose").unwrap().is_flag());
    assert_eq!(bound.internal_parameters(), ["_ctx".to_string()]);

    // with a registry the str option is typed
    let sig = Signature::default().param(Parameter::new("name").typed(BaseType::Str).default_value("x"));
    let bound = auto_decorate(echo(sig), &registry).unwrap();
    assert_eq!(
        bound.binding("name"),
        Some(&Binding::Option {
            name: "name".into(),
            long: "name".into(),
            default: Some(Value::Str("x".into())),
            show_default: true,
            param_type: Some(ParamType::String),
            is_flag: false,
            help: None,
        })
    );
}

#[rstest]
fn given_declaration_order_when_building_command_then_cli_order_matches(registry: TypeHandlerRegistry) {
    let sig = Signature::default()
        .param(Parameter::new("src").typed(BaseType::Path))
        .param(Parameter::new("dst").typed(BaseType::Path))
        .param(Parameter::new("block_size").typed(BaseType::Int).default_value(4096i64))
        .param(Parameter::new("sync").typed(BaseType::Bool).default_value(false));
    let bound = auto_decorate(echo(sig), &registry).unwrap();

    let cmd = bound.command();
    let ids: Vec<_> = cmd.get_arguments().map(|a| a.get_id().as_str()).collect();
    assert_eq!(ids, vec!["src", "dst", "block_size", "sync"]);

    let positionals: Vec<_> = cmd.get_positionals().map(|a| a.get_id().as_str()).collect();
    assert_eq!(positionals, vec!["src", "dst"]);

    let long: Vec<_> = cmd
        .get_arguments()
        .filter(|a| !a.is_positional())
        .filter_map(|a| a.get_long())
        .collect();
    assert_eq!(long, vec!["block-size", "sync"]);
    cmd.debug_assert();
}

// ============================================================
// Exclusions
// ============================================================

#[rstest]
fn given_receiver_when_decorating_then_first_param_is_skipped(registry: TypeHandlerRegistry) {
    let sig = Signature::default()
        .param(Parameter::new("self"))
        .param(Parameter::new("target").typed(BaseType::Str));
    let bound = auto_decorate(echo(sig.clone()).with_receiver(), &registry).unwrap();
    assert_eq!(names(bound.bindings()), vec!["target"]);

    // without the flag an unannotated receiver is just another parameter
    let err = auto_decorate(echo(sig), &registry).unwrap_err();
    assert!(matches!(err, DecorateError::UnresolvedType { ref parameter, .. } if parameter == "self"));
}

#[rstest]
fn given_manual_binding_when_decorating_then_param_gets_no_second_binding(registry: TypeHandlerRegistry) {
    let sig = Signature::default()
        .param(Parameter::new("path").typed(BaseType::Path))
        .param(Parameter::new("mode").typed(BaseType::Named("Mode".into())).default_value("r"));
    let f = echo(sig).manual_arg(Arg::new("mode").long("mode").short('m'));
    let bound = auto_decorate(f, &registry).unwrap();

    assert_eq!(names(bound.bindings()), vec!["path"]);
    let cmd = bound.command();
    let ids: Vec<_> = cmd.get_arguments().map(|a| a.get_id().as_str()).collect();
    assert_eq!(ids, vec!["path", "mode"]);
}

#[rstest]
#[case("_", vec!["visible"])]
#[case("__", vec!["_semi", "visible"])]
fn given_internal_marker_when_decorating_then_marked_params_hidden(
    registry: TypeHandlerRegistry,
    #[case] marker: &str,
    #[case] expected: Vec<&str>,
) {
    let sig = Signature::default()
        .param(Parameter::new("_semi").typed(BaseType::Str))
        .param(Parameter::new("__hidden").typed(BaseType::Str))
        .param(Parameter::new("visible").typed(BaseType::Str));
    let settings = Settings {
        internal_marker: marker.to_string(),
        ..Settings::default()
    };
    let bound = decorate_with(echo(sig).into(), &registry, &settings).unwrap();
    assert_eq!(names(bound.bindings()), expected);
}

// ============================================================
// Errors
// ============================================================

#[rstest]
fn given_full_command_when_decorating_then_already_command_error(registry: TypeHandlerRegistry) {
    let err = auto_decorate::<()>(Command::new("built"), &registry).unwrap_err();
    assert!(matches!(err, DecorateError::AlreadyCommand { ref name } if name == "built"));
    assert!(err.to_string().contains("already a full clap command"));
}

#[rstest]
fn given_unknown_annotated_type_when_decorating_then_error_names_it(registry: TypeHandlerRegistry) {
    let sig = Signature::default()
        .param(Parameter::new("ok").typed(BaseType::Int))
        .param(
            Parameter::new("color")
                .annotated(BaseType::Named("Color".into()), vec![Metadata::Tag("rgb".into())]),
        );
    let err = auto_decorate(echo(sig), &registry).unwrap_err();
    match err {
        DecorateError::UnresolvedType {
            base,
            annotation,
            metadata,
            ..
        } => {
            assert_eq!(base, "Color");
            assert!(annotation.contains("Annotated[Color"));
            assert!(metadata.contains("rgb"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_custom_handler_when_decorating_then_named_type_resolves() {
    let registry = TypeHandlerRegistry::with_defaults().with(
        "color",
        |base: &BaseType, _: Option<&[Metadata]>| match base {
            BaseType::Named(n) if n == "Color" => Some(ParamType::Choice(vec![
                "red".into(),
                "green".into(),
            ])),
            _ => None,
        },
    );
    let sig = Signature::default().param(
        Parameter::new("color")
            .typed(BaseType::Named("Color".into()))
            .default_value("red"),
    );
    let decorator = AutoDecorator::new(registry, Settings::default());
    let bound = decorator.decorate(echo(sig)).unwrap();
    let kw = bound.try_run_from(["echo", "--color", "green"]).unwrap();
    assert_eq!(kw.get("color"), Some(&Value::Str("green".into())));
    assert!(bound.try_run_from(["echo", "--color", "blue"]).is_err());
}
