//! crates/logging/src/message.rs
//! Log messages and error-like normalization.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt::Write as _;

use serde_json::Value;

/// Meta key that carries the trace of an error-like message.
pub const STACK_KEY: &str = "stack";

const MESSAGE_FIELD: &str = "message";

/// A message handed to [`Client::log`](crate::Client::log).
///
/// Messages are usually text, but any JSON value is accepted. Errors are
/// captured with [`Message::error`], which records the error's description
/// and a textual trace built from its source chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// An arbitrary value, logged verbatim unless it is error-like.
    Value(Value),
    /// A captured error.
    Error {
        /// The error's `Display` output.
        description: String,
        /// The error followed by its causes and, when captured, a backtrace.
        stack: String,
    },
}

impl Message {
    /// Captures `error` as a message.
    ///
    /// The stack lists the error and every `source()` below it, one per line,
    /// followed by a backtrace when `RUST_BACKTRACE` enables capturing.
    ///
    /// ```
    /// use logging::Message;
    ///
    /// let error = std::io::Error::other("disk unplugged");
    /// let message = Message::error(&error);
    /// assert!(message.is_error_like());
    /// ```
    pub fn error<E>(error: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let description = error.to_string();
        let mut stack = description.clone();
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(stack, "\n    caused by: {cause}");
            source = cause.source();
        }
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(stack, "\n{backtrace}");
        }
        Self::Error { description, stack }
    }

    /// Reports whether the message is error-like.
    ///
    /// Captured errors always are. A JSON object is error-like when it has
    /// both a `message` and a `stack` member, whatever their values.
    #[must_use]
    pub fn is_error_like(&self) -> bool {
        match self {
            Self::Error { .. } => true,
            Self::Value(Value::Object(object)) => {
                object.contains_key(MESSAGE_FIELD) && object.contains_key(STACK_KEY)
            }
            Self::Value(_) => false,
        }
    }

    /// Splits the message into the event message and the optional trace.
    pub(crate) fn normalize(self) -> (Value, Option<Value>) {
        match self {
            Self::Error { description, stack } => {
                (Value::String(description), Some(Value::String(stack)))
            }
            Self::Value(Value::Object(mut object))
                if object.contains_key(MESSAGE_FIELD) && object.contains_key(STACK_KEY) =>
            {
                let stack = object.remove(STACK_KEY);
                let message = object.remove(MESSAGE_FIELD).unwrap_or(Value::Null);
                (message, stack)
            }
            Self::Value(value) => (value, None),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Value(Value::from(text))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self::Value(Value::String(text.clone()))
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn text_is_not_error_like() {
        let message = Message::from("plain");
        assert!(!message.is_error_like());
        assert_eq!(message.normalize(), (json!("plain"), None));
    }

    #[test]
    fn captured_error_uses_description_and_chain() {
        let message = Message::error(&Outer(Inner));
        let (text, stack) = message.normalize();

        assert_eq!(text, json!("request failed"));
        let stack = stack.expect("stack captured");
        let stack = stack.as_str().expect("stack is text");
        assert!(stack.starts_with("request failed\n    caused by: connection reset"));
    }

    #[test]
    fn dyn_errors_can_be_captured() {
        let boxed: Box<dyn StdError + Send + Sync> = "boxed failure".into();
        let message = Message::error(&*boxed);
        assert!(matches!(
            message,
            Message::Error { ref description, .. } if description == "boxed failure"
        ));
    }

    #[test]
    fn object_with_message_and_stack_is_error_like() {
        let message = Message::from(json!({
            "message": "bad input",
            "stack": "at parse (input.rs:1)",
            "code": 7,
        }));
        assert!(message.is_error_like());

        let (text, stack) = message.normalize();
        assert_eq!(text, json!("bad input"));
        assert_eq!(stack, Some(json!("at parse (input.rs:1)")));
    }

    #[test]
    fn null_members_still_count_as_present() {
        let message = Message::from(json!({ "message": null, "stack": null }));
        assert!(message.is_error_like());
        assert_eq!(message.normalize(), (Value::Null, Some(Value::Null)));
    }

    #[test]
    fn object_missing_stack_is_logged_verbatim() {
        let value = json!({ "message": "only a message" });
        let message = Message::from(value.clone());
        assert!(!message.is_error_like());
        assert_eq!(message.normalize(), (value, None));
    }
}
