use std::collections::HashSet;
use std::env;

use chrono_tz::Tz;

use crate::errors::TodayError;

/// Runtime configuration, resolved per invocation from the deployment
/// environment. A missing required secret is a typed configuration error
/// that the handler maps to HTTP 500.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub todoist_api_token: String,
    pub slack_signing_secret: String,
    /// Slack user ids permitted to run the command.
    pub allowed_user_ids: HashSet<String>,
    /// Project scope for the due-today filter; also enables the
    /// completed-tasks fetch when set.
    pub project: Option<String>,
    /// Timezone used for "today" boundaries and clock rendering.
    pub timezone: Tz,
    /// Shown to callers who are not on the allow-list.
    pub access_contact: String,
    /// Endpoint overrides; production leaves these unset and uses the
    /// public API hosts.
    pub rest_base_url: Option<String>,
    pub sync_base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, TodayError> {
        let timezone = match env::var("TODAY_TIMEZONE") {
            Ok(name) => name.parse::<Tz>().map_err(|_| {
                TodayError::Config(format!("TODAY_TIMEZONE: unknown timezone '{name}'"))
            })?,
            Err(_) => Tz::UTC,
        };

        Ok(Self {
            todoist_api_token: env::var("TODOIST_API_TOKEN")
                .map_err(|e| TodayError::Config(format!("TODOIST_API_TOKEN: {e}")))?,
            slack_signing_secret: env::var("SLACK_SIGNING_SECRET")
                .map_err(|e| TodayError::Config(format!("SLACK_SIGNING_SECRET: {e}")))?,
            allowed_user_ids: parse_user_ids(&env::var("ALLOWED_USER_IDS").unwrap_or_default()),
            project: env::var("TODOIST_PROJECT").ok().filter(|p| !p.is_empty()),
            timezone,
            access_contact: env::var("ACCESS_CONTACT")
                .unwrap_or_else(|_| "your workspace admin".to_string()),
            rest_base_url: env::var("TODOIST_REST_BASE_URL").ok(),
            sync_base_url: env::var("TODOIST_SYNC_BASE_URL").ok(),
        })
    }

    #[must_use]
    pub fn is_allowed(&self, user_id: &str) -> bool {
        self.allowed_user_ids.contains(user_id)
    }
}

fn parse_user_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
