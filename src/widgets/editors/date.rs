use crate::core::date::CalendarDate;
use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::TextInput;
use crate::widgets::traits::{InteractionResult, RenderContext};

const INVALID_DATE: &str = "Invalid Date";

/// Date leaf. The draft is a `YYYY-MM-DD` text buffer; only strings that
/// name a real calendar date commit.
#[derive(Debug)]
pub struct DateEditor {
    base: WidgetBase,
    input: TextInput,
    committed: CalendarDate,
    error: Option<String>,
}

impl DateEditor {
    pub fn new(id: impl Into<String>, value: CalendarDate) -> Self {
        let base = WidgetBase::new(id, "");
        let input = TextInput::new(format!("{}__input", base.id())).with_text(value.to_string());
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
        Value::Date(self.committed)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn sync(&mut self, value: CalendarDate) -> bool {
        if value == self.committed {
            return false;
        }
        self.committed = value;
        self.input.set_text(value.to_string());
        self.error = None;
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let before = self.input.text().to_string();
        let mut result = self.input.on_key(key);
        if self.input.text() == before {
            return result;
        }
        match CalendarDate::parse(self.input.text()) {
            Some(parsed) => {
                self.error = None;
                result.merge(InteractionResult::with_patch(Patch::set(Value::Date(
                    parsed,
                ))));
            }
            None => {
                self.error = Some(INVALID_DATE.to_string());
                result.request_render = true;
            }
        }
        result
    }

    pub fn spans(&self, ctx: &RenderContext, editing: bool) -> Vec<Span> {
        let style = Style::new().color(Color::Blue);
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
