//! Declaring rules on parameters and calling the guarded function.
//!
//! Run with `RUST_LOG=enforce=debug` to see the validation events.

use enforce::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let greet = enforce(
        Signature::builder("greet")
            .param(Param::new("name").typed(TypeHint::Str).rule(NotEmpty::new()))
            .param(Param::keyword_only("punctuation").typed(TypeHint::Str).with_default("!"))
            .build()?,
        |args: BoundArguments| {
            let name = args.get("name").and_then(Value::as_str).unwrap_or_default();
            let punctuation = args.get("punctuation").and_then(Value::as_str).unwrap_or_default();
            format!("Hello, {name}{punctuation}")
        },
    );

    println!("{greet}");
    println!("{}", greet.call(args!["Alice"])?);
    println!("{}", greet.call(args!["Bob"; punctuation = "?"])?);
    if let Err(error) = greet.call(args![""]) {
        println!("rejected: {error}");
    }

    let double = enforce(
        Signature::builder("double_unique")
            .param(
                Param::new("numbers")
                    .typed(TypeHint::List)
                    .rule(NotEmpty::new())
                    .rule(Unique::new()),
            )
            .build()?,
        |args: BoundArguments| -> Vec<i64> {
            args.get("numbers")
                .and_then(Value::as_list)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_int)
                .map(|n| n * 2)
                .collect()
        },
    );

    println!("{:?}", double.call(args![vec![1, 2, 3]])?);
    for bad in [vec![1, 2, 2], Vec::new()] {
        match double.call(args![bad]) {
            Ok(result) => println!("unexpected success: {result:?}"),
            Err(error) => println!("rejected: {error}"),
        }
    }

    let register = enforce(
        Signature::builder("register")
            .param(Param::new("username").rule(NotEmpty::new()))
            .param(Param::new("roles").rule(Unique::new()))
            .config(EnforceConfig::new().with_failure_mode(FailureMode::CollectAll))
            .build()?,
        |_: BoundArguments| (),
    );
    if let Err(EnforceError::Multiple(errors)) = register.call(args!["", vec!["admin", "admin"]]) {
        for error in &errors {
            println!("{}: {error}", error.parameter);
        }
    }

    Ok(())
}
