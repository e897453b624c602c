use crate::core::value::ValueKind;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::inputs::{SelectInput, TextInput};
use crate::widgets::traits::InteractionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddEntryField {
    Key,
    Kind,
}

/// Inline form containers open to create a new child: a key/index field and
/// a type selector. The owning container validates the candidate and decides
/// whether a confirm goes through; Enter/Esc are intercepted there too.
#[derive(Debug)]
pub struct AddEntry {
    key_input: TextInput,
    kind_select: SelectInput,
    field: AddEntryField,
    touched: bool,
}

impl AddEntry {
    pub fn new(id: &str, placeholder: &str, default_text: Option<String>) -> Self {
        let mut key_input =
            TextInput::new(format!("{id}__key")).with_placeholder(placeholder);
        if let Some(text) = default_text {
            key_input.set_text(text);
        }
        let kind_select = SelectInput::new(
            format!("{id}__type"),
            ValueKind::ALL.iter().map(|kind| kind.label().to_string()).collect(),
        );
        Self {
            key_input,
            kind_select,
            field: AddEntryField::Key,
            touched: false,
        }
    }

    pub fn candidate_text(&self) -> &str {
        self.key_input.text()
    }

    pub fn candidate_kind(&self) -> ValueKind {
        ValueKind::from_label(self.kind_select.selected_text()).unwrap_or(ValueKind::List)
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.field = match self.field {
                AddEntryField::Key => AddEntryField::Kind,
                AddEntryField::Kind => AddEntryField::Key,
            };
            return InteractionResult::handled();
        }
        match self.field {
            AddEntryField::Key => {
                let before = self.key_input.text().to_string();
                let result = self.key_input.on_key(key);
                if self.key_input.text() != before {
                    self.touched = true;
                }
                result
            }
            AddEntryField::Kind => self.kind_select.on_key(key),
        }
    }

    /// `invalid` is the container's live verdict on the candidate; the
    /// indicator only shows once the field has been touched.
    pub fn spans(&self, focused: bool, invalid: bool) -> Vec<Span> {
        let key_style = if self.touched && invalid {
            Style::new().color(Color::Red)
        } else {
            Style::new().color(Color::White)
        };
        let mut spans = self
            .key_input
            .spans(focused && self.field == AddEntryField::Key, key_style);
        spans.push(Span::new(" ").no_wrap());
        spans.push(
            self.kind_select
                .span(focused && self.field == AddEntryField::Kind),
        );
        spans
    }
}
