pub mod json;
pub mod select;
pub mod table;

pub use select::TerminalPrompter;
