use enforce::prelude::*;
use pretty_assertions::assert_eq;

fn report() -> Enforced<impl Fn(BoundArguments) -> Vec<String>> {
    enforce(
        Signature::builder("report")
            .param(Param::positional_only("title").typed(TypeHint::Str).rule(NotEmpty::new()))
            .param(Param::new("limit").typed(TypeHint::Int).with_default(10))
            .param(Param::var_positional("tags").rule(Unique::new()))
            .param(Param::keyword_only("sep").with_default(", "))
            .param(Param::var_keyword("options"))
            .build()
            .unwrap(),
        |args: BoundArguments| -> Vec<String> {
            args.iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect()
        },
    )
}

#[test]
fn binds_every_parameter_in_declaration_order() {
    let bound = report()
        .call(args!["Weekly", 5, "a", "b"; sep = "|", color = "red"])
        .unwrap();
    assert_eq!(
        bound,
        vec![
            r#"title="Weekly""#,
            "limit=5",
            r#"tags=["a", "b"]"#,
            r#"sep="|""#,
            r#"options={"color": "red"}"#,
        ]
    );
}

#[test]
fn defaults_fill_omitted_parameters() {
    let bound = report().call(args!["Weekly"]).unwrap();
    assert_eq!(bound[1], "limit=10");
    assert_eq!(bound[2], "tags=[]");
    assert_eq!(bound[3], r#"sep=", ""#);
    assert_eq!(bound[4], "options={}");
}

#[test]
fn defaults_are_validated_like_arguments() {
    let strict = enforce(
        Signature::builder("strict")
            .param(Param::new("name").with_default("").rule(NotEmpty::new()))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    assert!(strict.call(args![]).unwrap_err().is_validation());
    assert!(strict.call(args!["x"]).is_ok());
}

#[test]
fn collected_varargs_are_validated() {
    let err = report().call(args!["Weekly", 5, "a", "a"]).unwrap_err();
    assert_eq!(err.parameters(), vec!["tags"]);
}

#[test]
fn bind_errors_pass_through_unchanged() {
    let err = report().call(args![]).unwrap_err();
    assert!(err.is_bind());
    assert_eq!(err.to_string(), "report() missing required argument: 'title'");

    // With a `**options` parameter the keyword is collected there instead.
    let err = report().call(args![; title = "x"]).unwrap_err();
    assert!(matches!(
        err,
        EnforceError::Bind(BindError::MissingArgument { .. })
    ));
}

#[test]
fn positional_only_name_as_keyword_lands_in_var_keyword() {
    let bound = report().call(args!["x"; limit = 1, title = "y"]).unwrap();
    assert_eq!(bound[0], r#"title="x""#);
    assert_eq!(bound[4], r#"options={"title": "y"}"#);
}

#[test]
fn multiple_values_for_one_parameter() {
    let err = report().call(args!["x", 1; limit = 2]).unwrap_err();
    assert_eq!(err.to_string(), "report() got multiple values for argument 'limit'");
}

#[test]
fn surplus_arguments_without_variadics() {
    let strict = enforce(
        Signature::builder("pair")
            .param(Param::new("a"))
            .param(Param::new("b"))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );

    assert_eq!(
        strict.call(args![1, 2, 3]).unwrap_err().to_string(),
        "pair() takes 2 positional argument(s) but 3 were given"
    );
    assert_eq!(
        strict.call(args![1, 2; c = 3]).unwrap_err().to_string(),
        "pair() got an unexpected keyword argument 'c'"
    );
}

#[test]
fn invalid_declarations_fail_at_build_time() {
    let err = Signature::builder("broken")
        .param(Param::var_keyword("rest"))
        .param(Param::new("late"))
        .build()
        .unwrap_err();
    assert!(matches!(err, SignatureError::OutOfOrder { .. }));
}
