//! Enforcement wrapper
//!
//! [`enforce`] pairs a [`Signature`] with a function body. Every call binds
//! its arguments, runs the validation pipeline and only then invokes the
//! body with the validated [`BoundArguments`].

use crate::foundation::EnforceError;
use crate::pipeline::validate_arguments;
use crate::signature::{BoundArguments, CallArgs, Signature, bind};
use std::fmt;
use std::sync::Arc;
use tracing::debug_span;

/// A function body guarded by its declared parameter rules.
///
/// Cheap to clone when the body is; the signature is shared. All per-call
/// state is created fresh, so one instance may serve concurrent callers.
#[derive(Clone)]
pub struct Enforced<F> {
    signature: Arc<Signature>,
    body: F,
}

/// Wraps `body` so every call is validated against `signature` first.
///
/// # Examples
///
/// ```
/// use enforce::prelude::*;
///
/// let greet = enforce(
///     Signature::builder("greet")
///         .param(Param::new("name").typed(TypeHint::Str).rule(NotEmpty::new()))
///         .build()
///         .unwrap(),
///     |args: BoundArguments| format!("Hello, {}!", args.get("name").and_then(Value::as_str).unwrap_or_default()),
/// );
///
/// assert_eq!(greet.call(args!["Alice"]).unwrap(), "Hello, Alice!");
/// assert_eq!(
///     greet.call(args![""]).unwrap_err().to_string(),
///     "Parameter 'name' cannot be empty for function 'greet'."
/// );
/// ```
pub fn enforce<F>(signature: Signature, body: F) -> Enforced<F> {
    Enforced {
        signature: Arc::new(signature),
        body,
    }
}

impl<F> Enforced<F> {
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn into_inner(self) -> F {
        self.body
    }

    /// Binds and validates without invoking the body.
    ///
    /// # Errors
    ///
    /// [`EnforceError::Bind`] when the arguments do not fit the signature,
    /// otherwise whatever the validation pipeline rejects.
    pub fn check(&self, args: CallArgs) -> Result<BoundArguments, EnforceError> {
        let mut bound = bind(&self.signature, args)?;
        validate_arguments(&self.signature, &mut bound)?;
        Ok(bound)
    }

    /// Validates `args` and invokes the body.
    ///
    /// Lazy arguments reach the body wrapped; their violations surface as
    /// `Err` items while the body iterates them.
    ///
    /// # Errors
    ///
    /// Any bind or validation failure. The body is not invoked in that case.
    pub fn call<T>(&self, args: CallArgs) -> Result<T, EnforceError>
    where
        F: Fn(BoundArguments) -> T,
    {
        let span = debug_span!("enforced_call", function = %self.signature.name());
        let _enter = span.enter();

        let bound = self.check(args)?;
        Ok((self.body)(bound))
    }

    /// Like [`call`](Self::call), for a body that returns its own `Result`.
    ///
    /// # Errors
    ///
    /// Bind and validation failures converted into `E`, or the body's error.
    pub fn try_call<T, E>(&self, args: CallArgs) -> Result<T, E>
    where
        F: Fn(BoundArguments) -> Result<T, E>,
        E: From<EnforceError>,
    {
        let span = debug_span!("enforced_call", function = %self.signature.name());
        let _enter = span.enter();

        let bound = self.check(args)?;
        (self.body)(bound)
    }
}

impl<F> fmt::Display for Enforced<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.signature, f)
    }
}

impl<F> fmt::Debug for Enforced<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enforced")
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}
