pub mod chat_export;
pub mod sheets;

pub use chat_export::read_chat_export;
pub use sheets::{SheetsAuth, SheetsClient, SheetsError, SpreadsheetSource};
