pub mod core;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::date::CalendarDate;
pub use crate::core::dispatch::{EditorKind, UnsupportedTypeError, resolve_editor};
pub use crate::core::patch::{Patch, PatchError};
pub use crate::core::regex_value::RegexValue;
pub use crate::core::value::{Value, ValueKind};
pub use crate::widgets::editors::TreeEditor;
pub use crate::widgets::traits::{
    Drawable, InteractionResult, RenderContext, ValueChange, WidgetAction,
};
