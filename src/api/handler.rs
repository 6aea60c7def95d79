//! API Lambda handler for the `/today` slash command.
//!
//! Pipeline per invocation:
//! - load configuration (missing secrets are a 500)
//! - extract headers and body, verify the Slack signature (failures are a 401)
//! - parse the slash command and authorize the caller against the allow-list
//! - fetch today's tasks from Todoist and format the response

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing, signature};
use crate::core::config::AppConfig;
use crate::slack::message_formatter::format_today_message;
use crate::todoist::TodoistClient;

const INVALID_SIGNATURE_TEXT: &str = "Invalid request signature";
const CONFIG_ERROR_TEXT: &str = "Server configuration error";
const UPSTREAM_ERROR_TEXT: &str = "Couldn't reach the task service. Please try again later.";

/// Lambda entrypoint. Configuration failures are mapped to a 500 envelope
/// here; everything else is handled by `handle_request`.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Config error: {}", e);
            return Ok(helpers::server_error(CONFIG_ERROR_TEXT));
        }
    };

    Ok(handle_request(&config, &event.payload).await)
}

/// Request pipeline with explicit configuration, separated from the Lambda
/// plumbing so tests can drive it directly.
pub async fn handle_request(config: &AppConfig, payload: &Value) -> Value {
    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return helpers::unauthorized(INVALID_SIGNATURE_TEXT);
    };

    let body = match parsing::extract_body(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to extract request body: {}", e);
            return helpers::unauthorized(INVALID_SIGNATURE_TEXT);
        }
    };

    if let Err(response) = verify_request(&body, headers, config) {
        return response;
    }

    let command = match parsing::parse_form_data(&body) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to parse slash command body: {}", e);
            return helpers::ok_ephemeral("Sorry, I couldn't read that command.");
        }
    };

    if !config.is_allowed(&command.user_id) {
        info!(user_id = %command.user_id, "Caller not on the allow-list");
        return helpers::ok_ephemeral(&format!(
            "You don't have access to /today yet. Contact {} to get set up.",
            config.access_contact
        ));
    }

    info!(user_id = %command.user_id, channel_id = %command.channel_id, "Fetching today's tasks");

    let client = TodoistClient::from_config(config);
    let (tasks, completed) = match client.fetch_today(config).await {
        Ok(result) => result,
        Err(e) => {
            error!("Upstream task fetch failed: {}", e);
            return helpers::ok_ephemeral(UPSTREAM_ERROR_TEXT);
        }
    };

    let message = format_today_message(&tasks, &completed, config.timezone);
    helpers::ok_ephemeral_with_blocks(&message.text, &message.blocks)
}

fn verify_request(body: &str, headers: &Value, config: &AppConfig) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::unauthorized(INVALID_SIGNATURE_TEXT));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::unauthorized(INVALID_SIGNATURE_TEXT));
    };

    if !signature::verify_signature(body, timestamp, sig, &config.slack_signing_secret) {
        error!("Slack signature verification failed");
        return Err(helpers::unauthorized(INVALID_SIGNATURE_TEXT));
    }

    Ok(())
}
