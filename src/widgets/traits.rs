use crate::core::patch::Patch;
use crate::core::value::Value;
use crate::terminal::TerminalSize;
use crate::ui::span::SpanLine;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub focused_id: Option<String>,
    pub terminal_size: TerminalSize,
}

impl RenderContext {
    pub fn new(terminal_size: TerminalSize) -> Self {
        Self {
            focused_id: None,
            terminal_size,
        }
    }

    pub fn with_focus(mut self, focused_id: impl Into<String>) -> Self {
        self.focused_id = Some(focused_id.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

// ---------------------------------------------------------------------------
// Drawable: the host-facing component surface
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// Actions & interaction results
// ---------------------------------------------------------------------------

/// Whole-tree notification delivered to the host after a committed edit.
#[derive(Debug, Clone)]
pub struct ValueChange {
    pub target: String,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: impl Into<String>, value: Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// Actions emitted by editors in `InteractionResult`.
///
/// `Patched` flows upward between editors (each container wraps the patch
/// with the child's key) and never escapes the top level: the tree editor
/// applies it and replaces it with `ValueChanged`.
#[derive(Debug, Clone)]
pub enum WidgetAction {
    Patched { patch: Patch },
    ValueChanged { change: ValueChange },
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn with_patch(patch: Patch) -> Self {
        Self::with_action(WidgetAction::Patched { patch })
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}
