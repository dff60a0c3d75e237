//! crates/logging/src/macros.rs
//! Construction macros.

/// Build a [`Meta`](crate::Meta) map from `key => value` pairs.
///
/// Values go through [`Value::from`](crate::Value), so strings, numbers,
/// booleans and existing JSON values are all accepted. Later keys overwrite
/// earlier ones.
///
/// # Example
/// ```
/// use logging::{Value, meta};
///
/// let meta = meta! { "user" => "ada", "attempt" => 3, "retry" => true };
/// assert_eq!(meta["user"], Value::from("ada"));
/// assert_eq!(meta.len(), 3);
/// assert!(meta! {}.is_empty());
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Meta::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut meta = $crate::Meta::new();
        $(
            meta.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        meta
    }};
}
