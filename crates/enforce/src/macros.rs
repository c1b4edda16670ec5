//! Macros for building call arguments.

/// Builds a [`CallArgs`](crate::signature::CallArgs) from positional values
/// and, after a `;`, `name = value` keyword pairs.
///
/// Every value goes through `Into<Value>`.
///
/// # Examples
///
/// ```
/// use enforce::args;
/// use enforce::foundation::Value;
///
/// let call = args![1, "two"; limit = 3, label = "x"];
/// assert_eq!(call.positional(), &[Value::from(1), Value::from("two")]);
/// assert_eq!(call.keyword().get("limit"), Some(&Value::from(3)));
///
/// let keywords_only = args![; verbose = true];
/// assert!(keywords_only.positional().is_empty());
/// assert!(args![].keyword().is_empty());
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)? $(; $($key:ident = $kv:expr),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut call = $crate::signature::CallArgs::new();
        $( call.push_arg($value); )*
        $( $( call.insert_kwarg(stringify!($key), $kv); )* )?
        call
    }};
}
