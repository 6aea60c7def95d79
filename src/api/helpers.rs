//! Response envelope builders.
//!
//! Slack only renders the body of 2xx responses to the end user, so every
//! user-facing outcome (including soft denials and upstream failures) rides
//! a 200; only signature failures and configuration errors use other codes.

use serde_json::{Value, json};

/// Returns a 200 OK response with an ephemeral Slack message.
#[must_use]
pub fn ok_ephemeral(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "body": json!({ "response_type": "ephemeral", "text": text }).to_string()
    })
}

/// Returns a 200 OK response with an ephemeral message carrying blocks.
#[must_use]
pub fn ok_ephemeral_with_blocks(text: &str, blocks: &[Value]) -> Value {
    json!({
        "statusCode": 200,
        "body": json!({
            "response_type": "ephemeral",
            "text": text,
            "blocks": blocks
        })
        .to_string()
    })
}

/// Returns a 401 response for requests that fail signature verification.
#[must_use]
pub fn unauthorized(text: &str) -> Value {
    json!({
        "statusCode": 401,
        "body": json!({ "text": text }).to_string()
    })
}

/// Returns a 500 response for missing or invalid server configuration.
#[must_use]
pub fn server_error(text: &str) -> Value {
    json!({
        "statusCode": 500,
        "body": json!({ "text": text }).to_string()
    })
}
