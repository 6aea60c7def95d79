//! `/today` - a Slack slash command that answers with the caller's Todoist
//! tasks due today.
//!
//! Single-Lambda architecture: the API Lambda verifies the Slack request
//! signature, checks the caller against an allow-list, fetches active (and,
//! when a project is configured, completed) tasks from Todoist, and returns
//! an ephemeral Block Kit message synchronously. There is no queue, no
//! persistence, and no background processing.
//!
//! # Example
//!
//! ```no_run
//! use today::core::config::AppConfig;
//! use today::api::handler::handle_request;
//!
//! #[tokio::main]
//! async fn main() {
//!     today::setup_logging();
//!
//!     let config = AppConfig::from_env().expect("configuration");
//!     let payload = serde_json::json!({
//!         "headers": {
//!             "X-Slack-Signature": "v0=...",
//!             "X-Slack-Request-Timestamp": "1700000000"
//!         },
//!         "body": "user_id=U123&command=%2Ftoday"
//!     });
//!
//!     let response = handle_request(&config, &payload).await;
//!     println!("{response}");
//! }
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod slack;
pub mod todoist;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs integration. Call once at the start of the Lambda process.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
