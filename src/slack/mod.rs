//! Slack-facing message formatting

pub mod message_formatter;

// Re-export main types for convenience
pub use message_formatter::{FormattedMessage, format_today_message};
