use indexmap::IndexMap;

use crate::core::dispatch::UnsupportedTypeError;
use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::editors::container::{ContainerState, labeled_rows, routes_to, wrap_patches};
use crate::widgets::editors::{Editor, brace_style};
use crate::widgets::traits::{DrawOutput, InteractionResult, RenderContext};

/// Keyed container. One child editor per key, in the map's insertion order.
#[derive(Debug)]
pub struct ObjectEditor {
    state: ContainerState,
    children: Vec<(String, Editor)>,
}

impl ObjectEditor {
    pub fn new(
        id: impl Into<String>,
        map: &IndexMap<String, Value>,
    ) -> Result<Self, UnsupportedTypeError> {
        let mut state = ContainerState::new(id);
        let mut children = Vec::with_capacity(map.len());
        for (key, value) in map {
            let child_id = state.child_id();
            children.push((key.clone(), Editor::for_value(child_id, value)?));
        }
        Ok(Self { state, children })
    }

    pub fn id(&self) -> &str {
        self.state.id()
    }

    pub fn committed(&self) -> Value {
        Value::Object(
            self.children
                .iter()
                .map(|(key, child)| (key.clone(), child.committed()))
                .collect(),
        )
    }

    pub fn any_adding(&self) -> bool {
        self.state.adding() || self.children.iter().any(|(_, child)| child.any_adding())
    }

    fn key_is_valid(&self, key: &str) -> bool {
        !key.is_empty() && !self.children.iter().any(|(existing, _)| existing == key)
    }

    /// Bring the children in line with a new committed map, reusing editor
    /// instances for keys that survive.
    pub fn sync(&mut self, map: &IndexMap<String, Value>) -> Result<bool, UnsupportedTypeError> {
        let mut previous = std::mem::take(&mut self.children);
        let mut changed = false;
        for (key, value) in map {
            if let Some(pos) = previous.iter().position(|(existing, _)| existing == key) {
                let (existing, mut editor) = previous.remove(pos);
                // Position 0 means the relative order is intact.
                changed |= pos != 0;
                changed |= editor.sync(value)?;
                self.children.push((existing, editor));
            } else {
                let child_id = self.state.child_id();
                self.children
                    .push((key.clone(), Editor::for_value(child_id, value)?));
                changed = true;
            }
        }
        changed |= !previous.is_empty();
        Ok(changed)
    }

    /// Keys addressed at the container itself: the add-form lifecycle.
    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.state.adding() {
            return match key.code {
                KeyCode::Char('+') => self.state.open_add("prop name", None),
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
        let key = entry.candidate_text().to_string();
        if !self.key_is_valid(&key) {
            // Rejected: the form stays open and the invalid style shows.
            return InteractionResult::consumed();
        }
        let value = entry.candidate_kind().default_value();
        let mut result = self.state.close_add();
        result.merge(InteractionResult::with_patch(
            Patch::set(value).at_key(key),
        ));
        result
    }

    pub fn route_key(&mut self, target: &str, key: KeyEvent) -> InteractionResult {
        if target == self.state.id() {
            return self.on_key(key);
        }
        for (child_key, child) in &mut self.children {
            if routes_to(child.id(), target) {
                let mut result = child.route_key(target, key);
                let wrap_key = child_key.clone();
                wrap_patches(&mut result, |patch| patch.at_key(wrap_key.clone()));
                return result;
            }
        }
        InteractionResult::ignored()
    }

    pub fn collect_focus_ids(&self, editing: bool, out: &mut Vec<String>) {
        if editing {
            out.push(self.state.id().to_string());
        }
        for (_, child) in &self.children {
            child.collect_focus_ids(editing, out);
        }
    }

    pub fn draw(&self, ctx: &RenderContext, editing: bool) -> DrawOutput {
        let mut lines = Vec::with_capacity(self.children.len() + 2);

        let mut open = vec![Span::styled("{", brace_style()).no_wrap()];
        if editing {
            open.push(Span::new(" ").no_wrap());
            if let Some(entry) = self.state.add_entry() {
                let invalid = !self.key_is_valid(entry.candidate_text());
                open.extend(entry.spans(self.state.is_focused(ctx), invalid));
            } else {
                open.push(self.state.add_affordance(self.state.is_focused(ctx)));
            }
        }
        lines.push(open);

        let key_style = Style::new().color(Color::White).bold();
        for (key, child) in &self.children {
            let label = vec![
                Span::new("  ").no_wrap(),
                Span::styled(key.clone(), key_style).no_wrap(),
                Span::styled(": ", key_style).no_wrap(),
            ];
            lines.extend(labeled_rows(label, child.draw(ctx, editing).lines));
        }

        lines.push(vec![Span::styled("}", brace_style()).no_wrap()]);
        DrawOutput { lines }
    }
}
