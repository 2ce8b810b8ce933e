use std::collections::HashMap;

use thiserror::Error;

/// One failed check: the field path it applies to and the message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Structured validation failure carrying the checks in the order they ran.
#[derive(Error, Debug, Clone)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Flatten the ordered entries into a field -> message map for form
    /// display. Later entries overwrite earlier ones for the same path;
    /// fields without errors are simply absent.
    pub fn field_messages(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .fold(HashMap::new(), |mut acc, error| {
                acc.insert(error.path.clone(), error.message.clone());
                acc
            })
    }
}
