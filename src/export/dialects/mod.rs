//! One formatter per export dialect.

mod google_docs;
mod rich_text;
mod slack;
mod whatsapp;

pub use google_docs::GoogleDocsFormatter;
pub use rich_text::RichTextFormatter;
pub use slack::SlackFormatter;
pub use whatsapp::WhatsAppFormatter;
