use crate::core::patch::Patch;
use crate::core::regex_value::{RegexValue, compile_check};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::inputs::{CheckboxInput, TextInput};
use crate::widgets::traits::{InteractionResult, RenderContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegexField {
    Source,
    Global,
    IgnoreCase,
    Multiline,
}

impl RegexField {
    fn next(self) -> Self {
        match self {
            Self::Source => Self::Global,
            Self::Global => Self::IgnoreCase,
            Self::IgnoreCase => Self::Multiline,
            Self::Multiline => Self::Source,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Source => Self::Multiline,
            Self::Global => Self::Source,
            Self::IgnoreCase => Self::Global,
            Self::Multiline => Self::IgnoreCase,
        }
    }
}

/// Regular-expression leaf: a source buffer plus g/i/m flag checkboxes.
/// Every field change recompiles; only compilable drafts commit.
#[derive(Debug)]
pub struct RegexEditor {
    base: WidgetBase,
    source: TextInput,
    global: CheckboxInput,
    ignore_case: CheckboxInput,
    multiline: CheckboxInput,
    field: RegexField,
    committed: RegexValue,
    error: Option<String>,
}

impl RegexEditor {
    pub fn new(id: impl Into<String>, value: RegexValue) -> Self {
        let base = WidgetBase::new(id, "");
        let id = base.id().to_string();
        Self {
            source: TextInput::new(format!("{id}__source")).with_text(value.source()),
            global: CheckboxInput::new(format!("{id}__g")).with_checked(value.global),
            ignore_case: CheckboxInput::new(format!("{id}__i")).with_checked(value.ignore_case),
            multiline: CheckboxInput::new(format!("{id}__m")).with_checked(value.multiline),
            field: RegexField::Source,
            committed: value,
            error: None,
            base,
        }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn committed(&self) -> Value {
        Value::Regex(self.committed.clone())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn draft_flags(&self) -> String {
        let mut flags = String::new();
        if self.global.checked() {
            flags.push('g');
        }
        if self.ignore_case.checked() {
            flags.push('i');
        }
        if self.multiline.checked() {
            flags.push('m');
        }
        flags
    }

    pub fn sync(&mut self, value: &RegexValue) -> bool {
        if *value == self.committed {
            return false;
        }
        self.committed = value.clone();
        self.source.set_text(value.source());
        self.global.set_checked(value.global);
        self.ignore_case.set_checked(value.ignore_case);
        self.multiline.set_checked(value.multiline);
        self.error = None;
        true
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Tab => {
                self.field = self.field.next();
                return InteractionResult::handled();
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                return InteractionResult::handled();
            }
            _ => {}
        }

        let before = (self.source.text().to_string(), self.draft_flags());
        let mut result = match self.field {
            RegexField::Source => self.source.on_key(key),
            RegexField::Global => self.global.on_key(key),
            RegexField::IgnoreCase => self.ignore_case.on_key(key),
            RegexField::Multiline => self.multiline.on_key(key),
        };
        if (self.source.text().to_string(), self.draft_flags()) == before {
            return result;
        }

        match compile_check(
            self.source.text(),
            self.ignore_case.checked(),
            self.multiline.checked(),
        ) {
            Ok(()) => {
                self.error = None;
                // Compile already succeeded, so construction cannot fail.
                if let Ok(re) = RegexValue::new(
                    self.source.text(),
                    self.global.checked(),
                    self.ignore_case.checked(),
                    self.multiline.checked(),
                ) {
                    result.merge(InteractionResult::with_patch(Patch::set(Value::Regex(re))));
                }
            }
            Err(message) => {
                self.error = Some(message);
                result.request_render = true;
            }
        }
        result
    }

    pub fn spans(&self, ctx: &RenderContext, editing: bool) -> Vec<Span> {
        let style = Style::new().color(Color::Magenta);
        if !editing {
            return vec![
                Span::styled(
                    format!("/{}/{}", self.source.text(), self.draft_flags()),
                    style,
                )
                .no_wrap(),
            ];
        }

        let focused = self.base.is_focused(ctx);
        let dim = Style::new().color(Color::DarkGrey);
        let mut spans = vec![Span::styled("/", style).no_wrap()];
        spans.extend(
            self.source
                .spans(focused && self.field == RegexField::Source, style),
        );
        spans.push(Span::styled("/", style).no_wrap());
        for (label, control, field) in [
            ("g", &self.global, RegexField::Global),
            ("i", &self.ignore_case, RegexField::IgnoreCase),
            ("m", &self.multiline, RegexField::Multiline),
        ] {
            spans.push(Span::styled(format!(" {label}"), dim).no_wrap());
            spans.push(control.span(focused && self.field == field));
        }
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
    use super::RegexEditor;
    use crate::core::regex_value::RegexValue;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::WidgetAction;

    fn last_regex(actions: &[WidgetAction]) -> Option<RegexValue> {
        actions.iter().rev().find_map(|action| {
            let WidgetAction::Patched { patch } = action else {
                return None;
            };
            let crate::core::patch::Patch::Set(Value::Regex(re)) = patch else {
                return None;
            };
            Some(re.clone())
        })
    }

    #[test]
    fn source_edit_with_global_flag_commits_a_literal() {
        let mut editor = RegexEditor::new("r", RegexValue::empty());
        editor.on_key(KeyEvent::char('a'));
        let result = editor.on_key(KeyEvent::char('+'));
        let re = last_regex(&result.actions).expect("should emit");
        assert_eq!(re.source(), "a+");

        // Tab to the g flag and toggle it on.
        editor.on_key(KeyEvent::plain(KeyCode::Tab));
        let result = editor.on_key(KeyEvent::char(' '));
        let re = last_regex(&result.actions).expect("should emit");
        assert_eq!(re.to_string(), "/a+/g");
    }

    #[test]
    fn unbalanced_source_surfaces_the_engine_error() {
        let mut editor = RegexEditor::new("r", RegexValue::empty());
        let result = editor.on_key(KeyEvent::char('('));

        assert!(last_regex(&result.actions).is_none());
        assert!(editor.error().is_some());
        assert_eq!(editor.committed(), Value::Regex(RegexValue::empty()));
    }

    #[test]
    fn flag_toggle_on_a_broken_source_still_withholds() {
        let mut editor = RegexEditor::new("r", RegexValue::empty());
        editor.on_key(KeyEvent::char('('));

        editor.on_key(KeyEvent::plain(KeyCode::Tab));
        let result = editor.on_key(KeyEvent::char(' '));
        assert!(last_regex(&result.actions).is_none());
        assert!(editor.error().is_some());
    }

    #[test]
    fn tab_cycles_and_backtab_reverses() {
        let mut editor = RegexEditor::new("r", RegexValue::empty());
        editor.on_key(KeyEvent::plain(KeyCode::Tab));
        // Space now toggles the g flag instead of typing into the source.
        let result = editor.on_key(KeyEvent::char(' '));
        let re = last_regex(&result.actions).expect("should emit");
        assert!(re.global);
        assert_eq!(editor.committed(), Value::Regex(RegexValue::empty()));

        editor.on_key(KeyEvent::plain(KeyCode::BackTab));
        editor.on_key(KeyEvent::char('x'));
        // Back on the source field.
        let value = editor.sync(&RegexValue::empty());
        assert!(!value);
    }
}
