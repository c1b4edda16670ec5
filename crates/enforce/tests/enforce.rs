use enforce::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn max_len(limit: usize) -> impl Validator {
    from_fn("MaxLen", move |value: &Value, target: &ValidationTarget| {
        match value.size() {
            Some(n) if n <= limit => Ok(()),
            Some(_) => Err(ValidationError::new(
                "max_len",
                format!("Parameter '{}' is too long for function '{}'.", target.parameter(), target.function()),
                target,
            )
            .into()),
            None => Err(IncompatibleTypeError::new("MaxLen", Capability::Sized, value.type_name(), target).into()),
        }
    })
}

#[test]
fn first_failing_validator_wins() {
    let unique_first = enforce(
        Signature::builder("f")
            .param(Param::new("items").rule(Unique::new()).rule(max_len(2)))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    let err = unique_first.call(args![vec![1, 1, 1]]).unwrap_err();
    assert_eq!(err.to_string(), "Parameter 'items' must contain unique elements for function 'f'.");

    let length_first = enforce(
        Signature::builder("f")
            .param(Param::new("items").rule(max_len(2)).rule(Unique::new()))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    let err = length_first.call(args![vec![1, 1, 1]]).unwrap_err();
    assert_eq!(err.to_string(), "Parameter 'items' is too long for function 'f'.");
}

#[test]
fn notes_do_not_validate() {
    let wrapped = enforce(
        Signature::builder("f")
            .param(Param::new("items").note("documentation only"))
            .build()
            .unwrap(),
        |_: BoundArguments| "ran",
    );
    assert_eq!(wrapped.call(args![Value::seq(0..3)]).unwrap(), "ran");
    assert_eq!(wrapped.call(args![5]).unwrap(), "ran");
}

#[test]
fn unvalidated_parameters_do_not_stop_later_ones() {
    let wrapped = enforce(
        Signature::builder("f")
            .param(Param::new("a"))
            .param(Param::new("b").rule(NotEmpty::new()))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    let err = wrapped.call(args![1, ""]).unwrap_err();
    assert_eq!(err.parameters(), vec!["b"]);
}

#[test]
fn plain_rule_on_lazy_value_is_a_declaration_defect() {
    let wrapped = enforce(
        Signature::builder("consume")
            .param(Param::new("items").rule(max_len(3)))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    let err = wrapped.call(args![Value::seq(vec![1])]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter 'items' for function 'consume' is a lazy sequence, but validator 'MaxLen' \
         does not support validation of lazy sequences"
    );

    // An eager rule ahead of it materializes the sequence first.
    let wrapped = enforce(
        Signature::builder("consume")
            .param(Param::new("items").rule(NotEmpty::eager()).rule(max_len(3)))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    assert!(wrapped.call(args![Value::seq(vec![1])]).is_ok());
    assert!(wrapped.call(args![Value::seq(0..4)]).unwrap_err().is_validation());
}

#[test]
fn collect_all_gathers_every_parameter() {
    let config: EnforceConfig = serde_json::from_str(r#"{"failure_mode": "collect_all"}"#).unwrap();
    let wrapped = enforce(
        Signature::builder("register")
            .param(Param::new("name").rule(NotEmpty::new()))
            .param(Param::new("email").rule(NotEmpty::new()))
            .param(Param::new("tags").rule(Unique::new()))
            .config(config)
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );

    let err = wrapped.call(args!["", "", vec!["a", "a"]]).unwrap_err();
    let EnforceError::Multiple(errors) = &err else {
        panic!("expected collected errors, got {err:?}");
    };
    assert_eq!(errors.len(), 3);
    let codes: Vec<_> = errors.iter().map(|e| &*e.code).collect();
    assert_eq!(codes, vec!["not_empty", "not_empty", "unique"]);
    assert!(err.to_string().starts_with("3 parameter(s) failed validation: "));
}

#[test]
fn fail_fast_is_the_default() {
    let wrapped = enforce(
        Signature::builder("register")
            .param(Param::new("name").rule(NotEmpty::new()))
            .param(Param::new("email").rule(NotEmpty::new()))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    assert_eq!(wrapped.signature().config().failure_mode, FailureMode::FailFast);
    let err = wrapped.call(args!["", ""]).unwrap_err();
    assert!(matches!(err, EnforceError::Validation(_)));
    assert_eq!(err.parameters(), vec!["name"]);
}

#[test]
fn shared_rule_instances_serve_many_functions() {
    let rule: Arc<dyn Validator> = Arc::new(Unique::new());
    let first = enforce(
        Signature::builder("first")
            .param(Param::new("xs").shared_rule(Arc::clone(&rule)))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    let second = enforce(
        Signature::builder("second")
            .param(Param::new("ys").shared_rule(Arc::clone(&rule)))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );

    // Per-call state is fresh: earlier calls do not leak seen elements.
    assert!(first.call(args![vec![1, 2]]).is_ok());
    assert!(second.call(args![vec![1, 2]]).is_ok());
    assert!(first.call(args![vec![1, 2]]).is_ok());
    assert_eq!(
        second.call(args![vec![2, 2]]).unwrap_err().to_string(),
        "Parameter 'ys' must contain unique elements for function 'second'."
    );
}

#[test]
fn wrapped_function_keeps_its_signature() {
    let wrapped = enforce(
        Signature::builder("process")
            .param(Param::new("items").typed(TypeHint::List).rule(NotEmpty::new()).rule(Unique::new()))
            .param(Param::keyword_only("verbose").typed(TypeHint::Bool).with_default(false))
            .build()
            .unwrap(),
        |_: BoundArguments| (),
    );
    assert_eq!(wrapped.name(), "process");
    assert_eq!(
        wrapped.to_string(),
        "process(items: list [NotEmpty, Unique], *, verbose: bool = false)"
    );
    let items = wrapped.signature().param("items").unwrap();
    let names: Vec<_> = items.validators().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["NotEmpty", "Unique"]);
}
