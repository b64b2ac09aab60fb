//! Source board client
//!
//! Single-endpoint snapshot fetch. The source is the system of record, so the
//! policy here is fail-closed: any failure aborts the whole pass rather than
//! accepting a partial snapshot.

use std::time::Duration;

use serde::Deserialize;

use super::{trim_body, ClientError};
use crate::config::SyncConfig;
use crate::models::SourceTask;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fields requested from the source board API
const OPT_FIELDS: &str = "gid,name,notes,completed_at,created_at,modified_at,\
                          memberships.section.gid,memberships.section.name,tags.gid,tags.name";

/// Blocking client for the source planning board
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
    project: String,
}

#[derive(Deserialize)]
struct WireEnvelope {
    data: Vec<WireTask>,
}

#[derive(Deserialize)]
struct WireTask {
    gid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    modified_at: String,
    #[serde(default)]
    memberships: Vec<WireMembership>,
    #[serde(default)]
    tags: Vec<WireTag>,
}

#[derive(Deserialize)]
struct WireMembership {
    section: WireSection,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WireSection {
    name: String,
}

#[derive(Deserialize)]
struct WireTag {
    #[serde(default)]
    name: String,
}

impl WireTask {
    fn into_task(self) -> SourceTask {
        let section = self
            .memberships
            .first()
            .map(|m| m.section.name.clone())
            .unwrap_or_default();
        let tags = self
            .tags
            .into_iter()
            .map(|t| t.name)
            .filter(|n| !n.is_empty())
            .collect();
        SourceTask {
            gid: self.gid,
            name: self.name,
            notes: self.notes,
            section,
            tags,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

impl SourceClient {
    /// Build a client from configuration
    pub fn new(config: &SyncConfig) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("boardsync/{}", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ClientError::from_reqwest(&e))?;
        Ok(Self {
            http,
            base_url: config.source_base_url.trim_end_matches('/').to_string(),
            token: config.source_token.clone(),
            project: config.source_project.clone(),
        })
    }

    /// Fetch the full task snapshot for the configured project
    pub fn fetch_tasks(&self) -> Result<Vec<SourceTask>, ClientError> {
        let url = format!(
            "{}/projects/{}/tasks?opt_fields={}",
            self.base_url, self.project, OPT_FIELDS
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| ClientError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), trim_body(&body)));
        }

        let envelope: WireEnvelope = response
            .json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(envelope.data.into_iter().map(WireTask::into_task).collect())
    }
}
