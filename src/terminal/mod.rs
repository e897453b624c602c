pub mod backend;
pub mod terminal;

pub use backend::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
pub use terminal::Terminal;
