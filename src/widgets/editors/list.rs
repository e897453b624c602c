use crate::core::dispatch::UnsupportedTypeError;
use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::editors::container::{ContainerState, labeled_rows, routes_to, wrap_patches};
use crate::widgets::editors::{Editor, brace_style};
use crate::widgets::traits::{DrawOutput, InteractionResult, RenderContext};

/// Ordered container. Indices are positions, not identities, but child
/// editor instances are stable across splices (see `sync`).
#[derive(Debug)]
pub struct ListEditor {
    state: ContainerState,
    children: Vec<Editor>,
}

impl ListEditor {
    pub fn new(id: impl Into<String>, items: &[Value]) -> Result<Self, UnsupportedTypeError> {
        let mut state = ContainerState::new(id);
        let mut children = Vec::with_capacity(items.len());
        for value in items {
            let child_id = state.child_id();
            children.push(Editor::for_value(child_id, value)?);
        }
        Ok(Self { state, children })
    }

    pub fn id(&self) -> &str {
        self.state.id()
    }

    pub fn committed(&self) -> Value {
        Value::List(self.children.iter().map(Editor::committed).collect())
    }

    pub fn any_adding(&self) -> bool {
        self.state.adding() || self.children.iter().any(Editor::any_adding)
    }

    /// Resolve an add-form candidate: empty means append, otherwise a
    /// numeric string no greater than the current length.
    fn index_for(&self, text: &str) -> Option<usize> {
        if text.is_empty() {
            return Some(self.children.len());
        }
        if !text.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        let index = text.parse::<usize>().ok()?;
        (index <= self.children.len()).then_some(index)
    }

    /// Reconcile against a new committed list. The common prefix and suffix
    /// keep their editor instances untouched; an equal-length middle window
    /// syncs pairwise; only a true splice rebuilds the window. This gives
    /// rows a stable identity across inserts even though indices shift.
    pub fn sync(&mut self, items: &[Value]) -> Result<bool, UnsupportedTypeError> {
        let old: Vec<Value> = self.children.iter().map(Editor::committed).collect();
        if old == items {
            return Ok(false);
        }

        let mut prefix = 0;
        while prefix < old.len().min(items.len()) && old[prefix] == items[prefix] {
            prefix += 1;
        }
        let mut suffix = 0;
        while suffix < (old.len() - prefix).min(items.len() - prefix)
            && old[old.len() - 1 - suffix] == items[items.len() - 1 - suffix]
        {
            suffix += 1;
        }

        let tail = self.children.split_off(old.len() - suffix);
        let mut middle = self.children.split_off(prefix);
        let replacement = &items[prefix..items.len() - suffix];
        if middle.len() == replacement.len() {
            for (editor, value) in middle.iter_mut().zip(replacement) {
                editor.sync(value)?;
            }
            self.children.append(&mut middle);
        } else {
            for value in replacement {
                let child_id = self.state.child_id();
                self.children.push(Editor::for_value(child_id, value)?);
            }
        }
        self.children.extend(tail);
        Ok(true)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.state.adding() {
            return match key.code {
                KeyCode::Char('+') => {
                    let default = self.children.len().to_string();
                    self.state.open_add("index", Some(default))
                }
                _ => InteractionResult::ignored(),
            };
        }
        match key.code {
            KeyCode::Enter => self.confirm_add(),
            KeyCode::Esc => self.state.close_add(),
            _ => self
                .state
                .add_entry_mut()
                .map(|entry| entry.on_key(key))
                .unwrap_or_default(),
        }
    }

    fn confirm_add(&mut self) -> InteractionResult {
        let Some(entry) = self.state.add_entry() else {
            return InteractionResult::ignored();
        };
        let Some(index) = self.index_for(entry.candidate_text()) else {
            return InteractionResult::consumed();
        };
        let value = entry.candidate_kind().default_value();
        let mut result = self.state.close_add();
        result.merge(InteractionResult::with_patch(Patch::insert(index, value)));
        result
    }

    pub fn route_key(&mut self, target: &str, key: KeyEvent) -> InteractionResult {
        if target == self.state.id() {
            return self.on_key(key);
        }
        for (index, child) in self.children.iter_mut().enumerate() {
            if routes_to(child.id(), target) {
                let mut result = child.route_key(target, key);
                wrap_patches(&mut result, |patch| patch.at_index(index));
                return result;
            }
        }
        InteractionResult::ignored()
    }

    pub fn collect_focus_ids(&self, editing: bool, out: &mut Vec<String>) {
        if editing {
            out.push(self.state.id().to_string());
        }
        for child in &self.children {
            child.collect_focus_ids(editing, out);
        }
    }

    pub fn draw(&self, ctx: &RenderContext, editing: bool) -> DrawOutput {
        let mut lines = Vec::with_capacity(self.children.len() + 2);

        let mut open = vec![Span::styled("[", brace_style()).no_wrap()];
        if editing {
            open.push(Span::new(" ").no_wrap());
            if let Some(entry) = self.state.add_entry() {
                let invalid = self.index_for(entry.candidate_text()).is_none();
                open.extend(entry.spans(self.state.is_focused(ctx), invalid));
            } else {
                open.push(self.state.add_affordance(self.state.is_focused(ctx)));
            }
        }
        lines.push(open);

        let index_style = Style::new().color(Color::DarkGrey);
        for (index, child) in self.children.iter().enumerate() {
            let label = vec![
                Span::new("  ").no_wrap(),
                Span::styled(format!("{index}: "), index_style).no_wrap(),
            ];
            lines.extend(labeled_rows(label, child.draw(ctx, editing).lines));
        }

        lines.push(vec![Span::styled("]", brace_style()).no_wrap()]);
        DrawOutput { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::ListEditor;
    use crate::core::patch::Patch;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::WidgetAction;

    fn numbers(ns: &[f64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Number(*n)).collect()
    }

    fn editor(items: &[Value]) -> ListEditor {
        ListEditor::new("doc__root", items).expect("editor")
    }

    fn open_with_index(editor: &mut ListEditor, index: &str) {
        editor.on_key(KeyEvent::char('+'));
        // The form is seeded with the append index; clear it first.
        while !editor
            .state
            .add_entry()
            .map(|entry| entry.candidate_text().is_empty())
            .unwrap_or(true)
        {
            editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        }
        for ch in index.chars() {
            editor.on_key(KeyEvent::char(ch));
        }
    }

    fn confirm(editor: &mut ListEditor) -> Vec<WidgetAction> {
        editor.on_key(KeyEvent::plain(KeyCode::Enter)).actions
    }

    #[test]
    fn adding_at_an_interior_index_emits_a_splice() {
        let mut editor = editor(&numbers(&[10.0, 20.0, 30.0]));
        open_with_index(&mut editor, "1");
        let actions = confirm(&mut editor);

        let [WidgetAction::Patched { patch }] = actions.as_slice() else {
            panic!("expected a single patch action");
        };
        assert_eq!(*patch, Patch::insert(1, Value::List(Vec::new())));
    }

    #[test]
    fn an_index_past_the_length_is_rejected() {
        let mut editor = editor(&numbers(&[10.0, 20.0, 30.0]));
        open_with_index(&mut editor, "5");
        assert!(confirm(&mut editor).is_empty());
        assert!(editor.any_adding());
    }

    #[test]
    fn the_length_itself_is_a_valid_index() {
        let mut editor = editor(&numbers(&[10.0, 20.0, 30.0]));
        open_with_index(&mut editor, "3");
        let actions = confirm(&mut editor);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn an_empty_index_appends() {
        let mut editor = editor(&numbers(&[10.0, 20.0, 30.0]));
        open_with_index(&mut editor, "");
        let actions = confirm(&mut editor);

        let [WidgetAction::Patched { patch }] = actions.as_slice() else {
            panic!("expected a single patch action");
        };
        assert_eq!(*patch, Patch::insert(3, Value::List(Vec::new())));
    }

    #[test]
    fn non_numeric_indices_are_rejected() {
        let mut editor = editor(&numbers(&[10.0]));
        open_with_index(&mut editor, "x");
        assert!(confirm(&mut editor).is_empty());
    }

    #[test]
    fn the_form_is_seeded_with_the_append_index() {
        let mut editor = editor(&numbers(&[10.0, 20.0]));
        editor.on_key(KeyEvent::char('+'));
        let entry = editor.state.add_entry().expect("form open");
        assert_eq!(entry.candidate_text(), "2");
    }

    #[test]
    fn splice_sync_keeps_surviving_instances() {
        let mut editor = editor(&numbers(&[10.0, 20.0, 30.0]));
        let mut ids_before = Vec::new();
        editor.collect_focus_ids(true, &mut ids_before);

        // 99 inserted at index 1.
        let next = numbers(&[10.0, 99.0, 20.0, 30.0]);
        assert!(editor.sync(&next).expect("sync"));
        assert_eq!(editor.committed(), Value::List(next.clone()));

        let mut ids_after = Vec::new();
        editor.collect_focus_ids(true, &mut ids_after);
        // [container, 10, 20, 30] -> [container, 10, 99, 20, 30]
        assert_eq!(ids_after.len(), 5);
        assert_eq!(ids_after[1], ids_before[1]);
        assert_eq!(ids_after[3], ids_before[2]);
        assert_eq!(ids_after[4], ids_before[3]);

        assert!(!editor.sync(&next).expect("sync"));
    }

    #[test]
    fn equal_length_change_syncs_in_place() {
        let mut editor = editor(&numbers(&[1.0, 2.0, 3.0]));
        let mut ids_before = Vec::new();
        editor.collect_focus_ids(true, &mut ids_before);

        let next = numbers(&[1.0, 5.0, 3.0]);
        assert!(editor.sync(&next).expect("sync"));

        let mut ids_after = Vec::new();
        editor.collect_focus_ids(true, &mut ids_after);
        // The edited row keeps its instance too.
        assert_eq!(ids_before, ids_after);
    }
}
