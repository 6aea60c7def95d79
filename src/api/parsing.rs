use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TodayError;

/// Fields Slack sends with a slash command invocation. Only `user_id` is
/// required downstream; the rest are kept for logging and future use.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlashCommandEvent {
    pub user_id: String,
    pub user_name: String,
    pub channel_id: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
}

/// Decode one url-encoded form component. `+` means space in form bodies,
/// so it is translated before percent-decoding (a literal plus arrives as
/// `%2B` and survives).
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let plus_decoded = input.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {e}"))
}

/// Parse the url-encoded slash command body into a `SlashCommandEvent`.
pub fn parse_form_data(form_data: &str) -> Result<SlashCommandEvent, TodayError> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| TodayError::Parse(format!("Failed to decode key: {e}")))?;
            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| TodayError::Parse(format!("Failed to decode value: {e}")))?;
            map.insert(key, value);
        }
    }

    Ok(SlashCommandEvent {
        user_id: map.remove("user_id").unwrap_or_default(),
        user_name: map.remove("user_name").unwrap_or_default(),
        channel_id: map.remove("channel_id").unwrap_or_default(),
        command: map.remove("command").unwrap_or_default(),
        text: map.remove("text").unwrap_or_default(),
        response_url: map.remove("response_url").unwrap_or_default(),
    })
}

/// Case-insensitive header lookup on the Lambda proxy event's header map.
pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Extract the raw request body from the proxy event, unwrapping base64
/// when the gateway flags it. Signature verification runs over the
/// unwrapped bytes, which is what Slack signed.
pub fn extract_body(payload: &Value) -> Result<String, TodayError> {
    let body = payload
        .get("body")
        .and_then(Value::as_str)
        .ok_or_else(|| TodayError::Parse("Missing request body".to_string()))?;

    if payload.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
        let bytes = BASE64
            .decode(body)
            .map_err(|e| TodayError::Parse(format!("Invalid base64 body: {e}")))?;
        return String::from_utf8(bytes)
            .map_err(|e| TodayError::Parse(format!("Body is not UTF-8: {e}")));
    }
    Ok(body.to_string())
}
