//! Target tracker client
//!
//! Issue listing goes through the strategy chain in [`super::strategy`]
//! because tracker deployments differ in which listing endpoints they expose.
//! Creates and updates embed the correlation marker and refuse display-only
//! categories. The duplicate probe is fail-open: a transient probe failure
//! must not block all creation, so any error reads as "no duplicate".

use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::json;

use super::strategy::{run_chain, FetchChainError, FetchStrategy};
use super::{trim_body, ClientError};
use crate::config::SyncConfig;
use crate::models::{SourceTask, TargetIssue};
use crate::sync::correlate;
use crate::sync::mapping;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fields requested when listing issues
const ISSUE_FIELDS: &str = "id,summary,description,created,updated,\
                            customFields(name,value(name,localizedName)),project(shortName)";

/// Error signature the tracker returns when the Subsystem field is not
/// configured for the project; triggers the reduced-field retry
const SUBSYSTEM_FIELD_ERROR: &str = "incompatible-issue-custom-field-name-Subsystem";

/// Blocking client for the target issue tracker
#[derive(Debug, Clone)]
pub struct TargetClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    project: String,
}

/// A project visible to the configured token
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    /// Internal project id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Short key used in queries and issue creation
    #[serde(rename = "shortName", default)]
    pub short_name: String,
}

#[derive(Deserialize)]
struct WireIssue {
    id: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "customFields", default)]
    custom_fields: Vec<WireField>,
    #[serde(default)]
    project: WireProject,
}

#[derive(Deserialize)]
struct WireField {
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

#[derive(Deserialize, Default)]
struct WireProject {
    #[serde(rename = "shortName", default)]
    short_name: String,
}

/// Pull a display value out of a custom-field value node
fn field_display_value(value: &serde_json::Value) -> Option<String> {
    // localizedName is more reliable than name when both are present
    let from_obj = |v: &serde_json::Value| {
        v.get("localizedName")
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                v.get("name")
                    .and_then(serde_json::Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .map(String::from)
    };
    match value {
        serde_json::Value::Object(_) => from_obj(value),
        serde_json::Value::Array(items) => items.first().and_then(from_obj),
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

impl WireIssue {
    fn state(&self) -> String {
        self.custom_fields
            .iter()
            .find(|f| f.name == "State")
            .map_or_else(
                || "Unknown".to_string(),
                |f| {
                    if f.value.is_null() {
                        "No State".to_string()
                    } else {
                        field_display_value(&f.value).unwrap_or_else(|| "Unknown".to_string())
                    }
                },
            )
    }

    fn subsystem(&self) -> Option<String> {
        self.custom_fields
            .iter()
            .find(|f| f.name == "Subsystem")
            .and_then(|f| field_display_value(&f.value))
    }

    fn into_issue(self) -> TargetIssue {
        let state = self.state();
        let subsystem = self.subsystem();
        TargetIssue {
            id: self.id,
            summary: self.summary,
            description: self.description.unwrap_or_default(),
            state,
            subsystem,
            project: self.project.short_name,
        }
    }
}

impl TargetClient {
    /// Build a client from configuration
    pub fn new(config: &SyncConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("boardsync/{}", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ClientError::from_reqwest(&e))?;
        Ok(Self {
            http,
            base_url: config.target_base_url.trim_end_matches('/').to_string(),
            token: config.target_token.clone(),
            project: config.target_project.clone(),
        })
    }

    /// Fetch the issue snapshot through the ordered strategy chain
    pub fn fetch_issues(&self) -> Result<Vec<TargetIssue>, FetchChainError> {
        let query = QueryFetch { client: self };
        let list_all = ListAllFetch { client: self };
        let scoped = ProjectScopedFetch { client: self };
        run_chain(&[&query, &list_all, &scoped])
    }

    /// Check whether an issue with this exact title already exists
    ///
    /// Fail-open by design: any transport error returns `false`, preferring a
    /// possible duplicate over blocking all creation on a transient failure.
    #[must_use]
    pub fn exists_by_title(&self, title: &str) -> bool {
        let query = encode_query(&format!("project: {} summary: {title}", self.project));
        let url = format!(
            "{}/api/issues?fields=id,summary&query={query}&top=5",
            self.base_url
        );

        let result = self
            .http
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send();

        let response = match result {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("duplicate probe got HTTP {}, treating as no duplicate", r.status());
                return false;
            },
            Err(e) => {
                debug!("duplicate probe failed ({e}), treating as no duplicate");
                return false;
            },
        };

        let candidates: Vec<WireIssue> = match response.json() {
            Ok(c) => c,
            Err(e) => {
                debug!("duplicate probe decode failed ({e}), treating as no duplicate");
                return false;
            },
        };

        candidates.iter().any(|c| c.summary.eq_ignore_ascii_case(title))
    }

    /// Create an issue for a source task
    ///
    /// Refuses display-only categories; embeds the correlation marker in the
    /// description and sets State plus Subsystem (from the first mapped tag).
    pub fn create_issue(&self, task: &SourceTask) -> Result<(), ClientError> {
        let category = mapping::categorize(&task.section);
        let Some(state) = category.state_name() else {
            return Err(ClientError::DisplayOnly(category));
        };

        let mut payload = json!({
            "$type": "Issue",
            "summary": task.name,
            "description": issue_description(task),
            "project": {
                "$type": "Project",
                "shortName": self.project,
            },
        });
        payload["customFields"] = custom_fields(state, task.tags.first());

        let url = format!("{}/api/issues", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), trim_body(&body)));
        }
        Ok(())
    }

    /// Update an issue to match a source task
    ///
    /// Same display-only guard as create. When the tracker rejects the
    /// Subsystem field, the update is retried once with the reduced field set
    /// (state only) rather than failing outright.
    pub fn update_issue(&self, issue_id: &str, task: &SourceTask) -> Result<(), ClientError> {
        let category = mapping::categorize(&task.section);
        let Some(state) = category.state_name() else {
            return Err(ClientError::DisplayOnly(category));
        };

        match self.post_update(issue_id, task, state, task.tags.first()) {
            Err(ClientError::Status(_, body)) if body.contains(SUBSYSTEM_FIELD_ERROR) => {
                info!("issue {issue_id}: Subsystem field not available, retrying state-only");
                self.post_update(issue_id, task, state, None)
            },
            other => other,
        }
    }

    fn post_update(
        &self,
        issue_id: &str,
        task: &SourceTask,
        state: &str,
        tag: Option<&String>,
    ) -> Result<(), ClientError> {
        let mut payload = json!({
            "$type": "Issue",
            "summary": task.name,
            "description": issue_description(task),
        });
        payload["customFields"] = custom_fields(state, tag);

        let url = format!("{}/api/issues/{issue_id}", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), trim_body(&body)));
        }
        Ok(())
    }

    /// Resolve and validate the configured project key
    ///
    /// Returns the project's short name; tries the admin endpoint first, then
    /// the plain projects endpoint for deployments that restrict admin access.
    pub fn verify_project(&self) -> Result<String, ClientError> {
        let admin_url = format!(
            "{}/api/admin/projects?fields=id,name,shortName&top=50",
            self.base_url
        );
        match self.find_project(&admin_url) {
            Ok(short_name) => Ok(short_name),
            Err(err) => {
                warn!("admin projects endpoint failed ({err}), trying alternative");
                let alt_url = format!("{}/api/projects?fields=id,name,shortName", self.base_url);
                self.find_project(&alt_url)
            },
        }
    }

    /// List projects visible to the configured token
    pub fn list_projects(&self) -> Result<Vec<ProjectInfo>, ClientError> {
        let url = format!(
            "{}/api/admin/projects?fields=id,name,shortName&top=50",
            self.base_url
        );
        self.get_projects(&url)
    }

    fn find_project(&self, url: &str) -> Result<String, ClientError> {
        let projects = self.get_projects(url)?;
        projects
            .iter()
            .find(|p| p.id == self.project || p.short_name == self.project)
            .map(|p| p.short_name.clone())
            .ok_or_else(|| {
                ClientError::NotFound(format!(
                    "project '{}' not among {} visible projects",
                    self.project,
                    projects.len()
                ))
            })
    }

    fn get_projects(&self, url: &str) -> Result<Vec<ProjectInfo>, ClientError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header("Cache-Control", "no-cache")
            .send()
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), trim_body(&body)));
        }
        response.json().map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn get_issues(&self, url: &str) -> Result<Vec<TargetIssue>, ClientError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header("Cache-Control", "no-cache")
            .send()
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), trim_body(&body)));
        }

        let wire: Vec<WireIssue> = response
            .json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(wire.into_iter().map(WireIssue::into_issue).collect())
    }
}

/// Issue description: task notes plus the correlation marker
fn issue_description(task: &SourceTask) -> String {
    format!("{}\n\n{}", task.notes, correlate::format_marker(&task.gid))
}

/// Build the customFields payload node
fn custom_fields(state: &str, tag: Option<&String>) -> serde_json::Value {
    let mut fields = vec![json!({
        "$type": "StateIssueCustomField",
        "name": "State",
        "value": {
            "$type": "StateBundleElement",
            "name": state,
        },
    })];

    if let Some(tag) = tag {
        let subsystem = mapping::map_tag_to_subsystem(tag);
        fields.push(json!({
            "$type": "MultiOwnedIssueCustomField",
            "name": "Subsystem",
            "value": [{
                "$type": "OwnedBundleElement",
                "name": subsystem,
            }],
        }));
    }

    serde_json::Value::Array(fields)
}

/// Percent-encode spaces for tracker query strings
fn encode_query(query: &str) -> String {
    query.replace(' ', "%20")
}

/// Strategy 1: query-filtered search scoped to the project
struct QueryFetch<'a> {
    client: &'a TargetClient,
}

impl FetchStrategy for QueryFetch<'_> {
    fn name(&self) -> &'static str {
        "query"
    }

    fn fetch(&self) -> Result<Vec<TargetIssue>, ClientError> {
        let query = encode_query(&format!("project: {}", self.client.project));
        let url = format!(
            "{}/api/issues?fields={ISSUE_FIELDS}&query={query}&top=200",
            self.client.base_url
        );
        self.client.get_issues(&url)
    }
}

/// Strategy 2: unfiltered listing with client-side project filter
struct ListAllFetch<'a> {
    client: &'a TargetClient,
}

impl FetchStrategy for ListAllFetch<'_> {
    fn name(&self) -> &'static str {
        "list-all"
    }

    fn fetch(&self) -> Result<Vec<TargetIssue>, ClientError> {
        let url = format!(
            "{}/api/issues?fields={ISSUE_FIELDS}&top=200",
            self.client.base_url
        );
        let issues = self.client.get_issues(&url)?;
        Ok(issues
            .into_iter()
            .filter(|i| i.project == self.client.project)
            .collect())
    }
}

/// Strategy 3: project-scoped sub-resource listing
struct ProjectScopedFetch<'a> {
    client: &'a TargetClient,
}

impl FetchStrategy for ProjectScopedFetch<'_> {
    fn name(&self) -> &'static str {
        "project-scoped"
    }

    fn fetch(&self) -> Result<Vec<TargetIssue>, ClientError> {
        let url = format!(
            "{}/api/admin/projects/{}/issues?fields={ISSUE_FIELDS}&top=200",
            self.client.base_url, self.client.project
        );
        self.client.get_issues(&url)
    }
}
