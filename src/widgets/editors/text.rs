use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::TextInput;
use crate::widgets::traits::{InteractionResult, RenderContext};

/// String leaf. No invalid state exists, so every buffer change commits.
#[derive(Debug)]
pub struct TextEditor {
    base: WidgetBase,
    input: TextInput,
}

impl TextEditor {
    pub fn new(id: impl Into<String>, text: String) -> Self {
        let base = WidgetBase::new(id, "");
        let input = TextInput::new(format!("{}__input", base.id())).with_text(text);
        Self { base, input }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn committed(&self) -> Value {
        Value::Text(self.input.text().to_string())
    }

    pub fn sync(&mut self, text: &str) -> bool {
        if text == self.input.text() {
            return false;
        }
        self.input.set_text(text);
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let before = self.input.text().to_string();
        let mut result = self.input.on_key(key);
        if self.input.text() != before {
            result.merge(InteractionResult::with_patch(Patch::set(Value::Text(
                self.input.text().to_string(),
            ))));
        }
        result
    }

    pub fn spans(&self, ctx: &RenderContext, editing: bool) -> Vec<Span> {
        let style = Style::new().color(Color::Green);
        if !editing {
            return vec![Span::styled(self.input.text(), style).no_wrap()];
        }
        self.input.spans(self.base.is_focused(ctx), style)
    }
}

#[cfg(test)]
mod tests {
    use super::TextEditor;
    use crate::core::patch::Patch;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::WidgetAction;

    #[test]
    fn every_keystroke_commits() {
        let mut editor = TextEditor::new("t", "hi".to_string());
        let result = editor.on_key(KeyEvent::char('!'));

        let [WidgetAction::Patched { patch }] = result.actions.as_slice() else {
            panic!("expected a single patch action");
        };
        assert_eq!(*patch, Patch::set(Value::Text("hi!".to_string())));
    }

    #[test]
    fn cursor_movement_commits_nothing() {
        let mut editor = TextEditor::new("t", "hi".to_string());
        let result = editor.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(result.actions.is_empty());
    }

    #[test]
    fn backspace_commits_the_shortened_text() {
        let mut editor = TextEditor::new("t", "hi".to_string());
        let result = editor.on_key(KeyEvent::plain(KeyCode::Backspace));

        assert_eq!(editor.committed(), Value::Text("h".to_string()));
        assert_eq!(result.actions.len(), 1);
    }
}
