//! Tests for API module
//!
//! Tests error types, the response envelope, and handler input guards. The
//! guard tests run against a real service whose endpoints are unroutable;
//! none of them reach the network.

use boardsync::service::SyncService;
use tempfile::TempDir;

use super::common::test_config;

fn service_with_tempdir() -> (std::sync::Arc<SyncService>, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = test_config();
    config.suppression_file = dir.path().join("suppressed.json");
    (SyncService::new(config).unwrap(), dir)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use boardsync::api::ApiError;
    use boardsync::error::SyncError;

    #[test]
    fn test_error_code_not_found() {
        let err = ApiError::not_found("Task not found");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message, "Task not found");
    }

    #[test]
    fn test_error_code_bad_request() {
        let err = ApiError::bad_request("Invalid input");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_error_code_upstream() {
        let err = ApiError::upstream("tracker unreachable");
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::not_found("Resource missing");
        let display = format!("{err}");
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Resource missing"));
    }

    #[test]
    fn snapshot_failures_map_to_upstream() {
        let err: ApiError = SyncError::source_fetch("connection refused").into();
        assert_eq!(err.status_code(), 502);
        assert!(err.message.contains("source board"));
    }

    #[test]
    fn action_failures_map_to_bad_request() {
        let err: ApiError = SyncError::Action("task X is not pending creation".into()).into();
        assert_eq!(err.status_code(), 400);
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

mod response_tests {
    use boardsync::api::ApiResponse;

    #[test]
    fn test_api_response_success() {
        let resp: ApiResponse<String> = ApiResponse::success("hello".to_string());
        assert!(resp.success);
        assert_eq!(resp.data, Some("hello".to_string()));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let resp: ApiResponse<()> = ApiResponse::error("NOT_FOUND", "Task not found");
        assert!(!resp.success);
        assert!(resp.data.is_none());
        let err = resp.error.unwrap();
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "Task not found");
    }

    #[test]
    fn test_success_envelope_omits_error_field() {
        let resp: ApiResponse<u32> = ApiResponse::success(7);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"], 7);
        assert!(json.get("error").is_none());
    }
}

// =============================================================================
// HANDLER GUARDS
// =============================================================================

mod handler_tests {
    use boardsync::api::{
        self, AutoSyncRequest, CreateSingleRequest, IgnoreRequest, SyncRequest,
    };

    use super::service_with_tempdir;

    #[test]
    fn health_reports_ok() {
        let health = api::get_health().unwrap();
        assert_eq!(health.status, "ok");
        assert!(!health.version.is_empty());
    }

    #[test]
    fn status_reflects_configured_projects() {
        let (service, _dir) = service_with_tempdir();
        let status = api::get_status(&service).unwrap();
        assert_eq!(status.target_project, "PRJ");
        assert!(!status.auto_sync.running);
        assert_eq!(status.auto_sync.run_count, 0);
    }

    #[test]
    fn empty_task_id_is_rejected() {
        let (service, _dir) = service_with_tempdir();
        let req = CreateSingleRequest { task_id: "  ".to_string() };
        let err = api::create_single(&service, &req).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn empty_sync_batch_is_rejected() {
        let (service, _dir) = service_with_tempdir();
        let req = SyncRequest { actions: vec![] };
        let err = api::sync_actions(&service, &req).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn unknown_ignore_scope_is_rejected() {
        let (service, _dir) = service_with_tempdir();
        let req = IgnoreRequest {
            task_id: "S1".to_string(),
            scope: "sometimes".to_string(),
            remove: false,
        };
        let err = api::modify_ignore(&service, &req).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn ignore_add_and_remove_round_trip() {
        let (service, _dir) = service_with_tempdir();

        let added = api::modify_ignore(
            &service,
            &IgnoreRequest {
                task_id: "S1".to_string(),
                scope: "forever".to_string(),
                remove: false,
            },
        )
        .unwrap();
        assert!(added.changed);
        assert_eq!(added.ignored_permanently, vec!["S1".to_string()]);

        let removed = api::modify_ignore(
            &service,
            &IgnoreRequest {
                task_id: "S1".to_string(),
                scope: "temp".to_string(),
                remove: true,
            },
        )
        .unwrap();
        assert!(removed.changed);
        assert!(removed.ignored_permanently.is_empty());
    }

    #[test]
    fn unknown_auto_sync_action_is_rejected() {
        let (service, _dir) = service_with_tempdir();
        let req = AutoSyncRequest { action: "pause".to_string() };
        let err = api::control_auto_sync(&service, &req).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn auto_sync_status_is_idle_by_default() {
        let (service, _dir) = service_with_tempdir();
        let data = api::get_auto_sync(&service).unwrap();
        assert!(!data.changed);
        assert!(!data.status.running);
        assert!(data.status.last_run.is_none());
        assert!(data.status.next_run.is_none());
    }
}
