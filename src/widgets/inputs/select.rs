use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::InteractionResult;

#[derive(Debug)]
pub struct SelectInput {
    base: WidgetBase,
    options: Vec<String>,
    selected: usize,
}

impl SelectInput {
    pub fn new(id: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: WidgetBase::new(id, ""),
            options,
            selected: 0,
        }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn selected_text(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn move_left(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        self.selected = (self.selected + len - 1) % len;
        true
    }

    fn move_right(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        self.selected = (self.selected + 1) % self.options.len();
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => {
                if self.move_left() {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if self.move_right() {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            _ => InteractionResult::ignored(),
        }
    }

    pub fn span(&self, focused: bool) -> Span {
        let style = if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::new().color(Color::DarkGrey)
        };
        Span::styled(format!("‹ {} ›", self.selected_text()), style).no_wrap()
    }
}
