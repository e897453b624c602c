use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::CheckboxInput;
use crate::widgets::traits::{InteractionResult, RenderContext};

/// Boolean leaf. Draft and committed value coincide, so a toggle commits
/// immediately.
#[derive(Debug)]
pub struct BoolEditor {
    base: WidgetBase,
    control: CheckboxInput,
}

impl BoolEditor {
    pub fn new(id: impl Into<String>, checked: bool) -> Self {
        let base = WidgetBase::new(id, "");
        let control = CheckboxInput::new(format!("{}__box", base.id())).with_checked(checked);
        Self { base, control }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn committed(&self) -> Value {
        Value::Bool(self.control.checked())
    }

    pub fn sync(&mut self, checked: bool) -> bool {
        if checked == self.control.checked() {
            return false;
        }
        self.control.set_checked(checked);
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let mut result = self.control.on_key(key);
        if result.handled {
            result.merge(InteractionResult::with_patch(Patch::set(Value::Bool(
                self.control.checked(),
            ))));
        }
        result
    }

    pub fn spans(&self, ctx: &RenderContext, editing: bool) -> Vec<Span> {
        if !editing {
            return vec![
                Span::styled(
                    self.control.checked().to_string(),
                    Style::new().color(Color::Yellow),
                )
                .no_wrap(),
            ];
        }
        vec![self.control.span(self.base.is_focused(ctx))]
    }
}

#[cfg(test)]
mod tests {
    use super::BoolEditor;
    use crate::core::patch::Patch;
    use crate::core::value::Value;
    use crate::terminal::KeyEvent;
    use crate::widgets::traits::WidgetAction;

    #[test]
    fn toggling_commits_immediately() {
        let mut editor = BoolEditor::new("b", false);
        let result = editor.on_key(KeyEvent::char(' '));

        assert_eq!(editor.committed(), Value::Bool(true));
        let [WidgetAction::Patched { patch }] = result.actions.as_slice() else {
            panic!("expected a single patch action");
        };
        assert_eq!(*patch, Patch::set(Value::Bool(true)));
    }

    #[test]
    fn unrelated_keys_emit_nothing() {
        let mut editor = BoolEditor::new("b", true);
        let result = editor.on_key(KeyEvent::char('x'));
        assert!(result.actions.is_empty());
        assert_eq!(editor.committed(), Value::Bool(true));
    }

    #[test]
    fn sync_is_a_no_op_for_equal_values() {
        let mut editor = BoolEditor::new("b", true);
        assert!(!editor.sync(true));
        assert!(editor.sync(false));
        assert_eq!(editor.committed(), Value::Bool(false));
    }
}
