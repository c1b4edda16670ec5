//! Lazy arguments: deferred checks versus eager materialization.

use enforce::prelude::*;
use tracing_subscriber::EnvFilter;

fn sum(mut args: BoundArguments) -> EnforceResult<i64> {
    let mut total = 0;
    for item in args.sequence("numbers").into_iter().flatten() {
        total += item?.as_int().unwrap_or_default();
    }
    Ok(total)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let lazy_sum = enforce(
        Signature::builder("sum_numbers")
            .param(Param::new("numbers").typed(TypeHint::Sequence).rule(NotEmpty::new()).rule(Unique::new()))
            .build()?,
        sum,
    );

    println!("{lazy_sum}");
    println!("sum = {}", lazy_sum.try_call(args![Value::seq(1..=1_000_000_i64)])?);

    // The duplicate is found while the body iterates, after four pulls.
    match lazy_sum.try_call(args![Value::seq(vec![1, 2, 3, 2, 5])]) {
        Ok(total) => println!("unexpected total {total}"),
        Err(error) => println!("rejected mid-stream: {error}"),
    }

    // Emptiness is only known at end-of-stream.
    match lazy_sum.try_call(args![Value::seq(Vec::<i64>::new())]) {
        Ok(total) => println!("unexpected total {total}"),
        Err(error) => println!("rejected at end: {error}"),
    }

    let eager = enforce(
        Signature::builder("inspect")
            .param(Param::new("numbers").rule(NotEmpty::eager()))
            .build()?,
        |mut args: BoundArguments| args.take("numbers"),
    );
    if let Some(received) = eager.call(args![Value::seq(1..=5)])? {
        println!("eager body received {} ({})", received, received.type_name());
    }

    Ok(())
}
