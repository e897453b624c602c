use std::fmt;

use crate::core::value::Value;

/// The editor variant responsible for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Object,
    List,
    Bool,
    Date,
    Number,
    Regex,
    Text,
}

/// Map a value to its editor variant. Pure; fails for kinds without an
/// editor (currently only `null`).
pub fn resolve_editor(value: &Value) -> Result<EditorKind, UnsupportedTypeError> {
    match value {
        Value::Object(_) => Ok(EditorKind::Object),
        Value::List(_) => Ok(EditorKind::List),
        Value::Bool(_) => Ok(EditorKind::Bool),
        Value::Date(_) => Ok(EditorKind::Date),
        Value::Number(_) => Ok(EditorKind::Number),
        Value::Regex(_) => Ok(EditorKind::Regex),
        Value::Text(_) => Ok(EditorKind::Text),
        Value::None => Err(UnsupportedTypeError::new(value.kind_name())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTypeError {
    kind: String,
}

impl UnsupportedTypeError {
    pub(crate) fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl fmt::Display for UnsupportedTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No editor available for type: {}", self.kind)
    }
}

impl std::error::Error for UnsupportedTypeError {}
