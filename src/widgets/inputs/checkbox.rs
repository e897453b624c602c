use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::InteractionResult;

#[derive(Debug)]
pub struct CheckboxInput {
    base: WidgetBase,
    checked: bool,
}

impl CheckboxInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, ""),
            checked: false,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Space toggles; everything else is ignored.
    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') => {
                self.checked = !self.checked;
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    pub fn span(&self, focused: bool) -> Span {
        let (symbol, style) = if self.checked {
            ("[✓]", Style::new().color(Color::Green))
        } else {
            ("[ ]", Style::new().color(Color::Red))
        };
        let style = if focused { style.bold() } else { style };
        Span::styled(symbol, style).no_wrap()
    }
}

#[cfg(test)]
mod tests {
    use super::CheckboxInput;
    use crate::terminal::KeyEvent;

    #[test]
    fn space_toggles() {
        let mut checkbox = CheckboxInput::new("c").with_checked(true);
        let result = checkbox.on_key(KeyEvent::char(' '));
        assert!(result.handled);
        assert!(!checkbox.checked());

        checkbox.on_key(KeyEvent::char(' '));
        assert!(checkbox.checked());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut checkbox = CheckboxInput::new("c");
        let result = checkbox.on_key(KeyEvent::char('x'));
        assert!(!result.handled);
        assert!(!checkbox.checked());
    }
}
