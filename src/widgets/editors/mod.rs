pub mod add_entry;
pub mod boolean;
pub mod container;
pub mod date;
pub mod list;
pub mod number;
pub mod object;
pub mod regex;
pub mod text;
pub mod tree;

pub use add_entry::AddEntry;
pub use boolean::BoolEditor;
pub use date::DateEditor;
pub use list::ListEditor;
pub use number::NumberEditor;
pub use object::ObjectEditor;
pub use regex::RegexEditor;
pub use text::TextEditor;
pub use tree::TreeEditor;

use crate::core::dispatch::{EditorKind, UnsupportedTypeError};
use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, InteractionResult, RenderContext};

pub(crate) fn brace_style() -> Style {
    Style::new().color(Color::White)
}

/// One editor per value, dispatched structurally on the value's tag. The
/// set is closed: adding a kind means adding a variant here and an arm to
/// every match below.
#[derive(Debug)]
pub enum Editor {
    Object(ObjectEditor),
    List(ListEditor),
    Bool(BoolEditor),
    Date(DateEditor),
    Number(NumberEditor),
    Regex(RegexEditor),
    Text(TextEditor),
}

impl Editor {
    /// Instantiate the editor for `value`, recursively for containers.
    /// Unsupported kinds anywhere in the tree fail the whole construction.
    pub fn for_value(id: String, value: &Value) -> Result<Self, UnsupportedTypeError> {
        Ok(match value {
            Value::Object(map) => Self::Object(ObjectEditor::new(id, map)?),
            Value::List(items) => Self::List(ListEditor::new(id, items)?),
            Value::Bool(b) => Self::Bool(BoolEditor::new(id, *b)),
            Value::Date(date) => Self::Date(DateEditor::new(id, *date)),
            Value::Number(n) => Self::Number(NumberEditor::new(id, *n)),
            Value::Regex(re) => Self::Regex(RegexEditor::new(id, re.clone())),
            Value::Text(s) => Self::Text(TextEditor::new(id, s.clone())),
            Value::None => return Err(UnsupportedTypeError::new(value.kind_name())),
        })
    }

    pub fn kind(&self) -> EditorKind {
        match self {
            Self::Object(_) => EditorKind::Object,
            Self::List(_) => EditorKind::List,
            Self::Bool(_) => EditorKind::Bool,
            Self::Date(_) => EditorKind::Date,
            Self::Number(_) => EditorKind::Number,
            Self::Regex(_) => EditorKind::Regex,
            Self::Text(_) => EditorKind::Text,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Object(ed) => ed.id(),
            Self::List(ed) => ed.id(),
            Self::Bool(ed) => ed.id(),
            Self::Date(ed) => ed.id(),
            Self::Number(ed) => ed.id(),
            Self::Regex(ed) => ed.id(),
            Self::Text(ed) => ed.id(),
        }
    }

    /// The last-committed value this editor (and its children) represent.
    pub fn committed(&self) -> Value {
        match self {
            Self::Object(ed) => ed.committed(),
            Self::List(ed) => ed.committed(),
            Self::Bool(ed) => ed.committed(),
            Self::Date(ed) => ed.committed(),
            Self::Number(ed) => ed.committed(),
            Self::Regex(ed) => ed.committed(),
            Self::Text(ed) => ed.committed(),
        }
    }

    /// Re-sync from a new committed value. A kind change replaces the
    /// editor instance in place, keeping its id (same slot, new variant).
    pub fn sync(&mut self, value: &Value) -> Result<bool, UnsupportedTypeError> {
        match (self, value) {
            (Self::Object(ed), Value::Object(map)) => ed.sync(map),
            (Self::List(ed), Value::List(items)) => ed.sync(items),
            (Self::Bool(ed), Value::Bool(b)) => Ok(ed.sync(*b)),
            (Self::Date(ed), Value::Date(date)) => Ok(ed.sync(*date)),
            (Self::Number(ed), Value::Number(n)) => Ok(ed.sync(*n)),
            (Self::Regex(ed), Value::Regex(re)) => Ok(ed.sync(re)),
            (Self::Text(ed), Value::Text(s)) => Ok(ed.sync(s)),
            (editor, value) => {
                *editor = Self::for_value(editor.id().to_string(), value)?;
                Ok(true)
            }
        }
    }

    /// Route a key event to the editor addressed by `target`. Containers
    /// wrap any patch the child returns with the child's key or index, so
    /// the composed patch reaching the root addresses the full path.
    pub fn route_key(&mut self, target: &str, key: KeyEvent) -> InteractionResult {
        match self {
            Self::Object(ed) => ed.route_key(target, key),
            Self::List(ed) => ed.route_key(target, key),
            Self::Bool(ed) if ed.id() == target => ed.on_key(key),
            Self::Date(ed) if ed.id() == target => ed.on_key(key),
            Self::Number(ed) if ed.id() == target => ed.on_key(key),
            Self::Regex(ed) if ed.id() == target => ed.on_key(key),
            Self::Text(ed) if ed.id() == target => ed.on_key(key),
            _ => InteractionResult::ignored(),
        }
    }

    pub fn draw(&self, ctx: &RenderContext, editing: bool) -> DrawOutput {
        match self {
            Self::Object(ed) => ed.draw(ctx, editing),
            Self::List(ed) => ed.draw(ctx, editing),
            Self::Bool(ed) => DrawOutput {
                lines: vec![ed.spans(ctx, editing)],
            },
            Self::Date(ed) => DrawOutput {
                lines: vec![ed.spans(ctx, editing)],
            },
            Self::Number(ed) => DrawOutput {
                lines: vec![ed.spans(ctx, editing)],
            },
            Self::Regex(ed) => DrawOutput {
                lines: vec![ed.spans(ctx, editing)],
            },
            Self::Text(ed) => DrawOutput {
                lines: vec![ed.spans(ctx, editing)],
            },
        }
    }

    /// Pre-order walk of interactable editor ids; empty in read-only mode.
    pub fn collect_focus_ids(&self, editing: bool, out: &mut Vec<String>) {
        match self {
            Self::Object(ed) => ed.collect_focus_ids(editing, out),
            Self::List(ed) => ed.collect_focus_ids(editing, out),
            leaf => {
                if editing {
                    out.push(leaf.id().to_string());
                }
            }
        }
    }

    /// Is any add-entry form open somewhere under this editor?
    pub fn any_adding(&self) -> bool {
        match self {
            Self::Object(ed) => ed.any_adding(),
            Self::List(ed) => ed.any_adding(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::Editor;
    use crate::core::dispatch::EditorKind;
    use crate::core::value::Value;

    #[test]
    fn for_value_dispatches_recursively() {
        let mut inner = IndexMap::new();
        inner.insert("flag".to_string(), Value::Bool(true));
        let mut map = IndexMap::new();
        map.insert("inner".to_string(), Value::Object(inner));
        map.insert("items".to_string(), Value::List(vec![Value::Number(1.0)]));
        let value = Value::Object(map.clone());

        let editor = Editor::for_value("doc__root".to_string(), &value).expect("editor");
        assert_eq!(editor.kind(), EditorKind::Object);
        assert_eq!(editor.committed(), value);
    }

    #[test]
    fn a_null_anywhere_fails_construction() {
        let value = Value::List(vec![Value::Number(1.0), Value::None]);
        let err = Editor::for_value("doc__root".to_string(), &value)
            .expect_err("null should fail");
        assert_eq!(err.to_string(), "No editor available for type: null");
    }

    #[test]
    fn kind_change_swaps_the_variant_but_keeps_the_id() {
        let mut editor =
            Editor::for_value("doc__root__0".to_string(), &Value::Number(1.0)).expect("editor");
        assert!(editor.sync(&Value::Text("now a string".to_string())).expect("sync"));
        assert_eq!(editor.kind(), EditorKind::Text);
        assert_eq!(editor.id(), "doc__root__0");
    }
}
