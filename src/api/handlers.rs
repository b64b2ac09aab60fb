//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take a service reference plus typed input and return
//! `Result<T, ApiError>`.

use crate::models::ActionOutcome;
use crate::service::SyncService;
use crate::suppress::SuppressScope;

use super::error::ApiError;
use super::types::{
    AnalysisData, AnalyzeRequest, AutoSyncData, AutoSyncRequest, CreateSingleRequest, HealthData,
    IgnoreData, IgnoreRequest, ReportData, StatusData, SyncRequest,
};

/// Liveness check
pub fn get_health() -> Result<HealthData, ApiError> {
    Ok(HealthData {
        status: "ok",
        version: crate::VERSION,
    })
}

/// Service status: configured projects, suppressions, auto-sync state
pub fn get_status(service: &SyncService) -> Result<StatusData, ApiError> {
    let (temporary, permanent) = service.suppression().lists();
    Ok(StatusData {
        source_project: service.config().source_project.clone(),
        target_project: service.config().target_project.clone(),
        ignored_temporarily: temporary,
        ignored_permanently: permanent,
        auto_sync: service.auto_sync_status(),
    })
}

/// Run a classification pass
pub fn analyze(service: &SyncService, req: &AnalyzeRequest) -> Result<AnalysisData, ApiError> {
    let analysis = service.analyze(&req.columns)?;
    Ok(AnalysisData {
        summary: analysis.summary(),
        analysis,
    })
}

/// Create issues for every task missing in the target
pub fn create_missing(service: &SyncService) -> Result<ReportData, ApiError> {
    Ok(service.create_missing()?.into())
}

/// Create the issue for one pending task
pub fn create_single(
    service: &SyncService,
    req: &CreateSingleRequest,
) -> Result<ActionOutcome, ApiError> {
    if req.task_id.trim().is_empty() {
        return Err(ApiError::bad_request("task_id cannot be empty"));
    }
    Ok(service.create_single(&req.task_id)?)
}

/// Apply a batch of per-task sync/ignore decisions
pub fn sync_actions(service: &SyncService, req: &SyncRequest) -> Result<ReportData, ApiError> {
    if req.actions.is_empty() {
        return Err(ApiError::bad_request("actions cannot be empty"));
    }
    Ok(service.sync_mismatched(&req.actions)?.into())
}

/// List current suppressions
pub fn list_ignored(service: &SyncService) -> Result<IgnoreData, ApiError> {
    let (temporary, permanent) = service.suppression().lists();
    Ok(IgnoreData {
        task_id: String::new(),
        changed: false,
        ignored_temporarily: temporary,
        ignored_permanently: permanent,
    })
}

/// Add or remove a suppression
pub fn modify_ignore(service: &SyncService, req: &IgnoreRequest) -> Result<IgnoreData, ApiError> {
    if req.task_id.trim().is_empty() {
        return Err(ApiError::bad_request("task_id cannot be empty"));
    }

    let changed = if req.remove {
        service.unignore(&req.task_id)?
    } else {
        let scope: SuppressScope = req.scope.parse().map_err(ApiError::bad_request)?;
        service.ignore(&req.task_id, scope)?;
        true
    };

    let (temporary, permanent) = service.suppression().lists();
    Ok(IgnoreData {
        task_id: req.task_id.clone(),
        changed,
        ignored_temporarily: temporary,
        ignored_permanently: permanent,
    })
}

/// Auto-sync controller snapshot
pub fn get_auto_sync(service: &SyncService) -> Result<AutoSyncData, ApiError> {
    Ok(AutoSyncData {
        changed: false,
        status: service.auto_sync_status(),
    })
}

/// Start or stop the auto-sync loop
pub fn control_auto_sync(
    service: &std::sync::Arc<SyncService>,
    req: &AutoSyncRequest,
) -> Result<AutoSyncData, ApiError> {
    let changed = match req.action.as_str() {
        "start" => service.start_auto_sync(),
        "stop" => service.stop_auto_sync(),
        other => {
            return Err(ApiError::bad_request(format!(
                "unknown auto-sync action '{other}' (expected start or stop)"
            )));
        },
    };
    Ok(AutoSyncData {
        changed,
        status: service.auto_sync_status(),
    })
}
