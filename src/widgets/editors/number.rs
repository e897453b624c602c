use crate::core::patch::Patch;
use crate::core::value::{Value, format_number};
use crate::terminal::KeyEvent;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::TextInput;
use crate::widgets::traits::{InteractionResult, RenderContext};

const NOT_A_NUMBER: &str = "Not a number";

/// Number leaf. The draft is raw text; only finite parses commit.
#[derive(Debug)]
pub struct NumberEditor {
    base: WidgetBase,
    input: TextInput,
    committed: f64,
    error: Option<String>,
}

impl NumberEditor {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        let base = WidgetBase::new(id, "");
        let input = TextInput::new(format!("{}__input", base.id())).with_text(format_number(value));
        Self {
            base,
            input,
            committed: value,
            error: None,
        }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn committed(&self) -> Value {
        Value::Number(self.committed)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-seed the draft from a new committed value; a no-op when equal.
    pub fn sync(&mut self, value: f64) -> bool {
        if value == self.committed {
            return false;
        }
        self.committed = value;
        self.input.set_text(format_number(value));
        self.error = None;
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let before = self.input.text().to_string();
        let mut result = self.input.on_key(key);
        if self.input.text() == before {
            return result;
        }
        match self.input.text().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => {
                self.error = None;
                result.merge(InteractionResult::with_patch(Patch::set(Value::Number(
                    parsed,
                ))));
            }
            _ => {
                self.error = Some(NOT_A_NUMBER.to_string());
                result.request_render = true;
            }
        }
        result
    }

    pub fn spans(&self, ctx: &RenderContext, editing: bool) -> Vec<Span> {
        let style = Style::new().color(Color::Cyan);
        if !editing {
            return vec![Span::styled(self.input.text(), style).no_wrap()];
        }
        let mut spans = self.input.spans(self.base.is_focused(ctx), style);
        if let Some(error) = &self.error {
            spans.push(
                Span::styled(format!(" ✗ {error}"), Style::new().color(Color::Red).bold())
                    .no_wrap(),
            );
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::NumberEditor;
    use crate::core::patch::Patch;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::WidgetAction;

    fn type_text(editor: &mut NumberEditor, text: &str) -> Vec<Patch> {
        let mut patches = Vec::new();
        for ch in text.chars() {
            for action in editor.on_key(KeyEvent::char(ch)).actions {
                let WidgetAction::Patched { patch } = action else {
                    panic!("expected patch action");
                };
                patches.push(patch);
            }
        }
        patches
    }

    #[test]
    fn valid_input_emits_the_parsed_number() {
        let mut editor = NumberEditor::new("n", 0.0);
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        let patches = type_text(&mut editor, "3.14");

        assert_eq!(patches.last(), Some(&Patch::set(Value::Number(3.14))));
        assert!(editor.error().is_none());

        // The committed value follows once the root applies the patch.
        assert_eq!(editor.committed(), Value::Number(0.0));
        assert!(editor.sync(3.14));
        assert_eq!(editor.committed(), Value::Number(3.14));
    }

    #[test]
    fn garbage_shows_the_error_and_keeps_the_committed_value() {
        let mut editor = NumberEditor::new("n", 42.0);
        let patches = type_text(&mut editor, "abc");

        assert!(patches.is_empty());
        assert_eq!(editor.error(), Some("Not a number"));
        assert_eq!(editor.committed(), Value::Number(42.0));
    }

    #[test]
    fn empty_draft_does_not_commit() {
        let mut editor = NumberEditor::new("n", 7.0);
        let result = editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert!(result.actions.is_empty());
        assert_eq!(editor.error(), Some("Not a number"));
        assert_eq!(editor.committed(), Value::Number(7.0));
    }

    #[test]
    fn infinite_parses_are_rejected() {
        let mut editor = NumberEditor::new("n", 0.0);
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        let patches = type_text(&mut editor, "inf");
        assert!(patches.is_empty());
        assert_eq!(editor.error(), Some("Not a number"));
    }

    #[test]
    fn sync_reseeds_the_draft_and_clears_the_error() {
        let mut editor = NumberEditor::new("n", 1.0);
        type_text(&mut editor, "x");
        assert!(editor.error().is_some());

        assert!(editor.sync(2.5));
        assert!(editor.error().is_none());
        assert_eq!(editor.committed(), Value::Number(2.5));
        assert!(!editor.sync(2.5));
    }
}
