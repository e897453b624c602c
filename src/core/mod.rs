pub mod date;
pub mod dispatch;
pub mod json;
pub mod patch;
pub mod regex_value;
pub mod value;
