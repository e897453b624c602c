use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::InteractionResult;

/// A single-line text buffer with a character cursor. Used compositionally:
/// owners route keys in and pull styled spans out.
#[derive(Debug)]
pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, ""),
            value: String::new(),
            cursor: 0,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.cursor = text_edit::char_count(&self.value);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                InteractionResult::handled()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    /// Styled spans for the buffer. When focused, the character under the
    /// cursor renders as an inverse cell.
    pub fn spans(&self, focused: bool, style: Style) -> Vec<Span> {
        if !focused {
            if self.value.is_empty()
                && let Some(placeholder) = &self.placeholder
            {
                return vec![
                    Span::styled(placeholder.clone(), Style::new().color(Color::DarkGrey))
                        .no_wrap(),
                ];
            }
            return vec![Span::styled(self.value.clone(), style).no_wrap()];
        }

        let cursor = text_edit::clamp_cursor(self.cursor, &self.value);
        let chars: Vec<char> = self.value.chars().collect();
        let before: String = chars[..cursor].iter().collect();
        let at: String = chars
            .get(cursor)
            .map(|ch| ch.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if cursor < chars.len() {
            chars[cursor + 1..].iter().collect()
        } else {
            String::new()
        };

        let cursor_style = Style::new().color(Color::Black).background(Color::White);
        let mut out = Vec::new();
        if !before.is_empty() {
            out.push(Span::styled(before, style).no_wrap());
        }
        out.push(Span::styled(at, cursor_style).no_wrap());
        if !after.is_empty() {
            out.push(Span::styled(after, style).no_wrap());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::ui::style::Style;

    #[test]
    fn typing_builds_the_buffer() {
        let mut input = TextInput::new("t");
        for ch in "abc".chars() {
            input.on_key(KeyEvent::char(ch));
        }
        assert_eq!(input.text(), "abc");

        input.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn set_text_moves_the_cursor_to_the_end() {
        let mut input = TextInput::new("t");
        input.set_text("hello");
        input.on_key(KeyEvent::char('!'));
        assert_eq!(input.text(), "hello!");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = TextInput::new("t").with_text("ac");
        input.on_key(KeyEvent::plain(KeyCode::Left));
        input.on_key(KeyEvent::char('b'));
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn focused_spans_include_a_cursor_cell() {
        let input = TextInput::new("t").with_text("hi");
        let spans = input.spans(true, Style::default());
        // Buffer text plus the end-of-line cursor cell.
        assert_eq!(line_text(&spans), "hi ");
    }
}
