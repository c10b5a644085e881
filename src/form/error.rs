use thiserror::Error;

/// A field's text could not be turned into a value of its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pointer}: {message}")]
pub struct FieldCoercionError {
    pub pointer: String,
    pub message: String,
}

/// One problem reported by the form on submit.
///
/// `pointer` is a JSON pointer into the submitted data; an empty pointer
/// refers to the settings object itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", display_pointer(.pointer))]
pub struct FormError {
    pub pointer: String,
    pub message: String,
}

impl FormError {
    pub fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}

impl From<FieldCoercionError> for FormError {
    fn from(err: FieldCoercionError) -> Self {
        Self {
            pointer: err.pointer,
            message: err.message,
        }
    }
}

fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "<root>" } else { pointer }
}
