//! Built-in validators
//!
//! - [`NotEmpty`]: rejects empty strings, lists and maps; end-of-stream
//!   verdict on lazy sequences.
//! - [`Unique`]: rejects repeated elements; mid-stream verdict on lazy
//!   sequences.
//! - [`from_fn`]: wraps a closure as a plain validator for user-defined rules.
//!
//! Both built-ins are lazy-aware and accept an `exhaust_sequences` flag
//! (`false` by default) that drains lazy input before checking it.

pub mod custom;
pub mod not_empty;
pub mod unique;

pub use custom::{FnValidator, from_fn};
pub use not_empty::{NotEmpty, not_empty};
pub use unique::{Unique, unique};
