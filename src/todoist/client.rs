use chrono::{Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::models::{CompletedTask, Task};
use crate::errors::TodayError;
use crate::todoist::models::{
    ApiTask, CompletedResponse, Project, normalize_completed, normalize_task,
};

const REST_BASE_URL: &str = "https://api.todoist.com/rest/v2";
const SYNC_BASE_URL: &str = "https://api.todoist.com/sync/v9";

const BOUND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Thin client over the Todoist REST and sync endpoints. One instance per
/// invocation; no retries, no connection reuse across invocations.
pub struct TodoistClient {
    http: Client,
    token: String,
    rest_base_url: String,
    sync_base_url: String,
}

impl TodoistClient {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            http: Client::new(),
            token: token.to_string(),
            rest_base_url: REST_BASE_URL.to_string(),
            sync_base_url: SYNC_BASE_URL.to_string(),
        }
    }

    /// Build a client from configuration, honoring endpoint overrides.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let mut client = Self::new(&config.todoist_api_token);
        if let Some(rest) = &config.rest_base_url {
            client.rest_base_url = rest.clone();
        }
        if let Some(sync) = &config.sync_base_url {
            client.sync_base_url = sync.clone();
        }
        client
    }

    /// Point the client at a different host (used by tests).
    #[must_use]
    pub fn with_base_urls(mut self, rest: &str, sync: &str) -> Self {
        self.rest_base_url = rest.to_string();
        self.sync_base_url = sync.to_string();
        self
    }

    /// Fetch everything the today view needs. When a project is configured,
    /// the active fetch and the completed-tasks fetch run concurrently and a
    /// failure of either aborts the whole request.
    pub async fn fetch_today(
        &self,
        config: &AppConfig,
    ) -> Result<(Vec<Task>, Vec<CompletedTask>), TodayError> {
        let filter = match &config.project {
            Some(project) => format!("due today & #{project}"),
            None => "due today".to_string(),
        };

        match &config.project {
            Some(project) => {
                let (tasks, completed) = futures::try_join!(
                    self.get_active_tasks(&filter, config.timezone),
                    self.fetch_completed_today(project, config.timezone),
                )?;
                Ok((tasks, completed))
            }
            None => {
                let tasks = self.get_active_tasks(&filter, config.timezone).await?;
                Ok((tasks, Vec::new()))
            }
        }
    }

    pub async fn get_active_tasks(&self, filter: &str, tz: Tz) -> Result<Vec<Task>, TodayError> {
        let url = format!(
            "{}/tasks?filter={}",
            self.rest_base_url,
            urlencoding::encode(filter)
        );
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            error!(status = %response.status(), "Active task fetch returned non-success status");
            return Err(TodayError::Upstream(format!(
                "task fetch failed with status {}",
                response.status()
            )));
        }

        let tasks: Vec<ApiTask> = response.json().await?;
        info!(count = tasks.len(), "Fetched active tasks");
        Ok(tasks.into_iter().map(|t| normalize_task(t, tz)).collect())
    }

    /// Resolve the configured project name to its id. An unknown name is an
    /// upstream error, not an empty result.
    pub async fn resolve_project_id(&self, name: &str) -> Result<String, TodayError> {
        let url = format!("{}/projects", self.rest_base_url);
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            error!(status = %response.status(), "Project list fetch returned non-success status");
            return Err(TodayError::Upstream(format!(
                "project fetch failed with status {}",
                response.status()
            )));
        }

        let projects: Vec<Project> = response.json().await?;
        projects
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
            .ok_or_else(|| TodayError::Upstream(format!("project '{name}' not found")))
    }

    pub async fn get_completed_tasks(
        &self,
        since: &str,
        until: &str,
        project_id: &str,
        tz: Tz,
    ) -> Result<Vec<CompletedTask>, TodayError> {
        let url = format!(
            "{}/completed/get_all?since={}&until={}&project_id={}",
            self.sync_base_url,
            urlencoding::encode(since),
            urlencoding::encode(until),
            urlencoding::encode(project_id)
        );
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            error!(status = %response.status(), "Completed task fetch returned non-success status");
            return Err(TodayError::Upstream(format!(
                "completed fetch failed with status {}",
                response.status()
            )));
        }

        let body: CompletedResponse = response.json().await?;
        info!(count = body.items.len(), "Fetched completed tasks");
        Ok(body
            .items
            .into_iter()
            .map(|i| normalize_completed(i, tz))
            .collect())
    }

    async fn fetch_completed_today(
        &self,
        project: &str,
        tz: Tz,
    ) -> Result<Vec<CompletedTask>, TodayError> {
        let project_id = self.resolve_project_id(project).await?;
        let (since, until) = today_bounds(tz);
        self.get_completed_tasks(&since, &until, &project_id, tz)
            .await
    }
}

/// [midnight, midnight+24h) of the current date in `tz`, formatted for the
/// sync endpoint.
#[must_use]
pub fn today_bounds(tz: Tz) -> (String, String) {
    today_bounds_for(Utc::now().with_timezone(&tz).date_naive())
}

#[must_use]
pub fn today_bounds_for(date: NaiveDate) -> (String, String) {
    let start = date.and_time(NaiveTime::MIN);
    let end = (date + Days::new(1)).and_time(NaiveTime::MIN);
    (
        start.format(BOUND_FORMAT).to_string(),
        end.format(BOUND_FORMAT).to_string(),
    )
}
