use indexmap::IndexMap;

use crate::core::date::CalendarDate;
use crate::core::regex_value::RegexValue;

/// A structured document value. `Object` keys keep insertion order.
///
/// `None` is representable (JSON null round-trips through it) but has no
/// editor: dispatching it fails with [`UnsupportedTypeError`].
///
/// [`UnsupportedTypeError`]: crate::core::dispatch::UnsupportedTypeError
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(CalendarDate),
    Regex(RegexValue),
    Object(IndexMap<String, Value>),
    List(Vec<Value>),
}

/// The kinds a fresh entry can be created as, in the order the add-entry
/// form offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    List,
    Bool,
    Date,
    Number,
    Object,
    Regex,
    Text,
}

impl ValueKind {
    pub const ALL: [ValueKind; 7] = [
        ValueKind::List,
        ValueKind::Bool,
        ValueKind::Date,
        ValueKind::Number,
        ValueKind::Object,
        ValueKind::Regex,
        ValueKind::Text,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "array",
            Self::Bool => "boolean",
            Self::Date => "date",
            Self::Number => "number",
            Self::Object => "object",
            Self::Regex => "regexp",
            Self::Text => "string",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Fresh default value for an entry of this kind.
    pub fn default_value(self) -> Value {
        match self {
            Self::List => Value::List(Vec::new()),
            Self::Bool => Value::Bool(false),
            Self::Date => Value::Date(CalendarDate::today()),
            Self::Number => Value::Number(0.0),
            Self::Object => Value::Object(IndexMap::new()),
            Self::Regex => Value::Regex(RegexValue::empty()),
            Self::Text => Value::Text(String::new()),
        }
    }
}

impl Value {
    /// Lower-case kind name, as shown in dispatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Date(_) => "date",
            Self::Regex(_) => "regexp",
            Self::Object(_) => "object",
            Self::List(_) => "array",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::List(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Render a number the way the editor displays and re-seeds drafts from it:
/// integral values print without a fraction.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
