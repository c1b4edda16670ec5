//! # enforce
//!
//! Declarative, call-time parameter validation.
//!
//! Rules are attached to a function's parameters once, in a [`Signature`].
//! [`enforce`] wraps the function body; each call binds its arguments,
//! validates them in declaration order and only then runs the body.
//!
//! ## Quick Start
//!
//! ```
//! use enforce::prelude::*;
//!
//! let process_items = enforce(
//!     Signature::builder("process_items")
//!         .param(Param::new("items").typed(TypeHint::List).rule(NotEmpty::new()).rule(Unique::new()))
//!         .build()
//!         .unwrap(),
//!     |args: BoundArguments| args.get("items").and_then(Value::size).unwrap_or(0),
//! );
//!
//! assert_eq!(process_items.call(args![vec![1, 2, 3]]).unwrap(), 3);
//! assert!(process_items.call(args![vec![1, 1]]).unwrap_err().is_validation());
//! ```
//!
//! ## Lazy sequences
//!
//! A [`Value::Seq`] argument is never materialized unless a rule asks for it
//! with `exhaust_sequences`. Lazy-aware rules instead wrap the sequence and
//! report violations as `Err` items while the body pulls elements:
//!
//! ```
//! use enforce::prelude::*;
//!
//! let total = enforce(
//!     Signature::builder("total")
//!         .param(Param::new("numbers").typed(TypeHint::Sequence).rule(Unique::new()))
//!         .build()
//!         .unwrap(),
//!     |mut args: BoundArguments| -> EnforceResult<i64> {
//!         let mut sum = 0;
//!         for item in args.sequence("numbers").into_iter().flatten() {
//!             sum += item?.as_int().unwrap_or(0);
//!         }
//!         Ok(sum)
//!     },
//! );
//!
//! assert_eq!(total.try_call(args![Value::seq(1..=4)]).unwrap(), 10);
//! assert!(total.try_call(args![Value::seq(vec![1, 2, 1])]).is_err());
//! ```
//!
//! ## Built-in Validators
//!
//! - [`NotEmpty`](validators::NotEmpty): strings, lists, maps and sequences
//!   must not be empty
//! - [`Unique`](validators::Unique): elements must not repeat
//! - [`from_fn`](validators::from_fn): any closure as a plain rule

pub mod config;
pub mod enforce;
pub mod foundation;
mod macros;
pub mod pipeline;
pub mod prelude;
pub mod signature;
pub mod validators;

pub use config::{EnforceConfig, FailureMode};
pub use self::enforce::{Enforced, enforce};
pub use foundation::{EnforceError, EnforceResult, Value};
pub use signature::{BoundArguments, CallArgs, Param, Signature};
