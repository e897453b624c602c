pub mod checkbox;
pub mod select;
pub mod text;
pub mod text_edit;

pub use checkbox::CheckboxInput;
pub use select::SelectInput;
pub use text::TextInput;
