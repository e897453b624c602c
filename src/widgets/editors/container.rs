use crate::core::patch::Patch;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::editors::add_entry::AddEntry;
use crate::widgets::traits::{InteractionResult, RenderContext, WidgetAction};

/// The container contract shared by the object and list editors, composed
/// into both rather than inherited: the add-form lifecycle and stable child
/// id allocation. Top-level duties (draft ownership, patch application) live
/// in the tree editor, the only place they can apply.
#[derive(Debug)]
pub struct ContainerState {
    base: WidgetBase,
    add_entry: Option<AddEntry>,
    next_child: usize,
}

impl ContainerState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, ""),
            add_entry: None,
            next_child: 0,
        }
    }

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        self.base.is_focused(ctx)
    }

    /// Child ids are allocated once and never reused, so a child keeps its
    /// identity across splices and re-syncs.
    pub fn child_id(&mut self) -> String {
        let id = format!("{}__{}", self.base.id(), self.next_child);
        self.next_child += 1;
        id
    }

    pub fn adding(&self) -> bool {
        self.add_entry.is_some()
    }

    pub fn add_entry(&self) -> Option<&AddEntry> {
        self.add_entry.as_ref()
    }

    pub fn add_entry_mut(&mut self) -> Option<&mut AddEntry> {
        self.add_entry.as_mut()
    }

    pub fn open_add(&mut self, placeholder: &str, default_text: Option<String>) -> InteractionResult {
        self.add_entry = Some(AddEntry::new(self.base.id(), placeholder, default_text));
        InteractionResult::handled()
    }

    pub fn close_add(&mut self) -> InteractionResult {
        self.add_entry = None;
        InteractionResult::handled()
    }

    /// The add affordance shown on the opening bracket row while no form is
    /// open.
    pub fn add_affordance(&self, focused: bool) -> Span {
        if focused {
            Span::styled("[+]", Style::new().color(Color::Cyan)).no_wrap()
        } else {
            Span::styled("+", Style::new().color(Color::DarkGrey)).no_wrap()
        }
    }
}

/// Does `target` address `child_id` or something underneath it? Child ids
/// extend their parent's id with `__<n>`, so a separator check is enough.
pub fn routes_to(child_id: &str, target: &str) -> bool {
    target == child_id
        || (target.starts_with(child_id) && target[child_id.len()..].starts_with("__"))
}

/// Wrap every bubbling patch in `result` one level deeper.
pub fn wrap_patches(result: &mut InteractionResult, wrap: impl Fn(Patch) -> Patch) {
    for action in &mut result.actions {
        if let WidgetAction::Patched { patch } = action {
            *patch = wrap(patch.clone());
        }
    }
}

/// Prefix a drawn child block with its row label; continuation lines get a
/// plain indent so nested structure stays aligned.
pub fn labeled_rows(label: Vec<Span>, child_lines: Vec<Vec<Span>>) -> Vec<Vec<Span>> {
    let mut rows = Vec::with_capacity(child_lines.len().max(1));
    let mut lines = child_lines.into_iter();
    let mut first = label;
    if let Some(line) = lines.next() {
        first.extend(line);
    }
    rows.push(first);
    for line in lines {
        let mut indented = vec![Span::new("  ").no_wrap()];
        indented.extend(line);
        rows.push(indented);
    }
    rows
}
