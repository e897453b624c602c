use crate::core::dispatch::UnsupportedTypeError;
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::editors::Editor;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, RenderContext, ValueChange, WidgetAction,
};

/// The host-facing tree editor. Owns the draft copy of the root value and
/// the editing flag; every other editor below it is a pass-through driven
/// by inbound value and editing mode.
///
/// Bubbled patches are applied here before the host is notified, so a
/// `ValueChanged` action always carries a consistent whole-tree snapshot.
///
/// Re-render contract: interaction results request a render only when the
/// editing flag changes, the draft value changes, focus moves, or an
/// add-entry form opens or closes; `set_value` with an equal value is a
/// complete no-op.
pub struct TreeEditor {
    base: WidgetBase,
    root: Editor,
    value: Value,
    editing: Option<bool>,
    focus: Vec<String>,
    focus_idx: usize,
}

impl TreeEditor {
    /// Fails if the tree contains a kind no editor exists for.
    pub fn new(id: impl Into<String>, value: Value) -> Result<Self, UnsupportedTypeError> {
        let base = WidgetBase::new(id, "");
        let root = Editor::for_value(format!("{}__root", base.id()), &value)?;
        let mut this = Self {
            base,
            root,
            value,
            editing: None,
            focus: Vec::new(),
            focus_idx: 0,
        };
        this.rebuild_focus();
        Ok(this)
    }

    /// Supplying the flag at all makes the editor editable; the flag's
    /// value controls whether edit mode is currently on.
    pub fn with_editing(mut self, editing: bool) -> Self {
        self.editing = Some(editing);
        self.rebuild_focus();
        self
    }

    pub fn editable(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing == Some(true)
    }

    pub fn set_editing(&mut self, editing: bool) -> bool {
        if self.editing == Some(editing) {
            return false;
        }
        self.editing = Some(editing);
        self.rebuild_focus();
        true
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Inbound value from the owner. An equal value is a no-op; a different
    /// one resets the tree (each editor re-seeds its draft only where its
    /// own committed value actually changed).
    pub fn set_value(&mut self, value: Value) -> Result<bool, UnsupportedTypeError> {
        if value == self.value {
            return Ok(false);
        }
        self.root.sync(&value)?;
        self.value = value;
        self.rebuild_focus();
        Ok(true)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.get(self.focus_idx).map(String::as_str)
    }

    fn rebuild_focus(&mut self) {
        let previous = self.focus.get(self.focus_idx).cloned();
        self.focus.clear();
        if self.is_editing() {
            self.root.collect_focus_ids(true, &mut self.focus);
        }
        self.focus_idx = previous
            .and_then(|id| self.focus.iter().position(|candidate| *candidate == id))
            .unwrap_or(0)
            .min(self.focus.len().saturating_sub(1));
    }

    fn move_focus(&mut self, delta: isize) -> InteractionResult {
        if self.focus.is_empty() {
            return InteractionResult::ignored();
        }
        let len = self.focus.len() as isize;
        let next = (self.focus_idx as isize + delta).rem_euclid(len) as usize;
        if next == self.focus_idx {
            return InteractionResult::consumed();
        }
        self.focus_idx = next;
        InteractionResult::handled()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.is_editing() {
            return InteractionResult::ignored();
        }

        // Focus navigation, unless an add form has the keyboard.
        if key.modifiers == KeyModifiers::NONE && !self.root.any_adding() {
            match key.code {
                KeyCode::Up => return self.move_focus(-1),
                KeyCode::Down => return self.move_focus(1),
                _ => {}
            }
        }

        let Some(target) = self.focused_id().map(str::to_string) else {
            return InteractionResult::ignored();
        };
        let mut result = self.root.route_key(&target, key);

        let mut committed = false;
        let mut actions = Vec::with_capacity(result.actions.len());
        for action in std::mem::take(&mut result.actions) {
            match action {
                WidgetAction::Patched { patch } => {
                    if patch.apply(&mut self.value).is_ok() {
                        committed = true;
                    }
                }
                other => actions.push(other),
            }
        }
        if committed {
            // Push the new committed values back down, then notify the
            // owner with the fully applied tree.
            if self.root.sync(&self.value).is_err() {
                return result;
            }
            self.rebuild_focus();
            actions.push(WidgetAction::ValueChanged {
                change: ValueChange::new(self.base.id(), self.value.clone()),
            });
            result.request_render = true;
        }
        result.actions = actions;
        result
    }
}

impl Drawable for TreeEditor {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let child_ctx = RenderContext {
            focused_id: if focused && self.is_editing() {
                self.focused_id().map(str::to_string)
            } else {
                None
            },
            terminal_size: ctx.terminal_size,
        };
        let mut out = self.root.draw(&child_ctx, self.is_editing());
        if focused && self.is_editing() {
            let hint = if self.root.any_adding() {
                "  Enter confirm  Esc cancel  Tab field  ←→ type"
            } else {
                "  ↑↓ move  + add  Space toggle  type to edit"
            };
            out.lines.push(vec![
                Span::styled(hint, Style::new().color(Color::DarkGrey)).no_wrap(),
            ]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::TreeEditor;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::widgets::traits::{Drawable, RenderContext, WidgetAction};

    fn sample() -> Value {
        let mut address = IndexMap::new();
        address.insert("city".to_string(), Value::Text("Oslo".to_string()));
        let mut map = IndexMap::new();
        map.insert("name".to_string(), Value::Text("ada".to_string()));
        map.insert("admin".to_string(), Value::Bool(false));
        map.insert(
            "scores".to_string(),
            Value::List(vec![
                Value::Number(10.0),
                Value::Number(20.0),
                Value::Number(30.0),
            ]),
        );
        map.insert("address".to_string(), Value::Object(address));
        Value::Object(map)
    }

    fn ctx() -> RenderContext {
        RenderContext::new(TerminalSize {
            width: 80,
            height: 24,
        })
        .with_focus("doc")
    }

    fn editor() -> TreeEditor {
        TreeEditor::new("doc", sample())
            .expect("editor")
            .with_editing(true)
    }

    fn focus_on(editor: &mut TreeEditor, suffix_path: &str) {
        for _ in 0..editor.focus.len() {
            if editor.focused_id() == Some(suffix_path) {
                return;
            }
            editor.on_key(KeyEvent::plain(KeyCode::Down));
        }
        panic!("no focus target {suffix_path}");
    }

    fn value_changes(actions: &[WidgetAction]) -> Vec<Value> {
        actions
            .iter()
            .filter_map(|action| match action {
                WidgetAction::ValueChanged { change } => Some(change.value.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn non_editing_trees_ignore_keys() {
        let mut tree = TreeEditor::new("doc", sample()).expect("editor");
        let result = tree.on_key(KeyEvent::char('+'));
        assert!(!result.handled);
        assert!(result.actions.is_empty());
    }

    #[test]
    fn set_value_with_an_equal_value_is_a_no_op() {
        let mut tree = editor();
        assert!(!tree.set_value(sample()).expect("sync"));
        assert!(tree.set_value(Value::Object(IndexMap::new())).expect("sync"));
    }

    #[test]
    fn setting_the_same_editing_flag_changes_nothing() {
        let mut tree = editor();
        let focused = tree.focused_id().map(str::to_string);
        assert!(!tree.set_editing(true));
        assert_eq!(tree.focused_id(), focused.as_deref());
        assert!(tree.set_editing(false));
        assert!(tree.focused_id().is_none());
    }

    #[test]
    fn editing_a_nested_leaf_notifies_with_the_whole_tree() {
        let mut tree = editor();
        // Focus order: root, name, admin, scores, 10, 20, 30, address, city.
        let targets: Vec<String> = tree.focus.clone();
        // scores[2] is the seventh focusable.
        focus_on(&mut tree, &targets[6]);

        // "30" -> "305"
        let result = tree.on_key(KeyEvent::char('5'));
        let changes = value_changes(&result.actions);
        assert_eq!(changes.len(), 1);

        let scores = changes[0].as_object().expect("object")["scores"]
            .as_list()
            .expect("list");
        assert_eq!(scores[2], Value::Number(305.0));
        assert_eq!(scores[0], Value::Number(10.0));
        assert_eq!(tree.value(), &changes[0]);
    }

    #[test]
    fn toggling_a_boolean_commits_through_the_tree() {
        let mut tree = editor();
        let targets: Vec<String> = tree.focus.clone();
        focus_on(&mut tree, &targets[2]);

        let result = tree.on_key(KeyEvent::char(' '));
        let changes = value_changes(&result.actions);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].as_object().expect("object")["admin"],
            Value::Bool(true)
        );
    }

    #[test]
    fn adding_to_the_root_object_inserts_the_default() {
        let mut tree = editor();
        tree.on_key(KeyEvent::char('+'));
        for ch in "foo".chars() {
            tree.on_key(KeyEvent::char(ch));
        }
        // Select the boolean type (array -> boolean).
        tree.on_key(KeyEvent::plain(KeyCode::Tab));
        tree.on_key(KeyEvent::plain(KeyCode::Right));
        let result = tree.on_key(KeyEvent::plain(KeyCode::Enter));

        let changes = value_changes(&result.actions);
        assert_eq!(changes.len(), 1);
        let map = changes[0].as_object().expect("object");
        assert_eq!(map.keys().last().map(String::as_str), Some("foo"));
        assert_eq!(map["foo"], Value::Bool(false));
    }

    #[test]
    fn duplicate_root_keys_never_reach_the_owner() {
        let mut tree = editor();
        tree.on_key(KeyEvent::char('+'));
        for ch in "name".chars() {
            tree.on_key(KeyEvent::char(ch));
        }
        let result = tree.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(value_changes(&result.actions).is_empty());
    }

    #[test]
    fn invalid_leaf_input_leaves_the_tree_untouched() {
        let mut tree = editor();
        let targets: Vec<String> = tree.focus.clone();
        // name (a string leaf) is targets[1]; scores numbers start at 4.
        focus_on(&mut tree, &targets[4]);

        let before = tree.value().clone();
        // "10" -> "10x": not a number.
        let result = tree.on_key(KeyEvent::char('x'));
        assert!(value_changes(&result.actions).is_empty());
        assert_eq!(tree.value(), &before);
    }

    #[test]
    fn scalar_roots_work_with_bare_patches() {
        let mut tree = TreeEditor::new("doc", Value::Text("hi".to_string()))
            .expect("editor")
            .with_editing(true);
        let result = tree.on_key(KeyEvent::char('!'));
        let changes = value_changes(&result.actions);
        assert_eq!(changes, vec![Value::Text("hi!".to_string())]);
    }

    #[test]
    fn read_only_draw_shows_values_without_affordances() {
        let tree = TreeEditor::new("doc", sample()).expect("editor");
        let out = tree.draw(&ctx());
        let text: Vec<String> = out
            .lines
            .iter()
            .map(|line| crate::ui::span::line_text(line))
            .collect();
        assert_eq!(text[0], "{");
        assert!(text.iter().any(|line| line.contains("name: ada")));
        assert!(!text.iter().any(|line| line.contains("[+]") || line.contains("+")));
    }

    #[test]
    fn editing_draw_shows_the_add_affordance() {
        let tree = editor();
        let out = tree.draw(&ctx());
        let first = crate::ui::span::line_text(&out.lines[0]);
        assert!(first.contains("{"));
        assert!(first.contains("[+]"));
    }

    #[test]
    fn focus_wraps_around() {
        let mut tree = editor();
        let first = tree.focused_id().expect("focus").to_string();
        tree.on_key(KeyEvent::plain(KeyCode::Up));
        let last = tree.focused_id().expect("focus").to_string();
        assert_ne!(first, last);
        tree.on_key(KeyEvent::plain(KeyCode::Down));
        assert_eq!(tree.focused_id(), Some(first.as_str()));
    }
}
