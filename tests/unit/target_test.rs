//! Tests for the target tracker client against a mock API
//!
//! Covers the reduced-field retry on the tracker's Subsystem rejection and
//! the fail-open duplicate probe. The mock server asserts how many requests
//! each behavior actually sends.

use boardsync::client::{ClientError, TargetClient};
use boardsync::config::SyncConfig;
use httpmock::prelude::*;

use super::common::{task, test_config};

/// Error body the tracker sends when the project has no Subsystem field
const SUBSYSTEM_REJECTION: &str = "incompatible-issue-custom-field-name-Subsystem";

fn client_for(server: &MockServer) -> TargetClient {
    let config = SyncConfig {
        target_base_url: server.base_url(),
        ..test_config()
    };
    TargetClient::new(&config).unwrap()
}

// =============================================================================
// SUBSYSTEM RETRY
// =============================================================================

mod update_tests {
    use super::*;

    #[test]
    fn subsystem_rejection_retries_once_without_the_field() {
        let server = MockServer::start();

        let rejected = server.mock(|when, then| {
            when.method(POST)
                .path("/api/issues/T-9")
                .body_includes("Subsystem");
            then.status(400).json_body(serde_json::json!({
                "error": SUBSYSTEM_REJECTION,
                "error_description": "Incompatible custom field name Subsystem",
            }));
        });
        let state_only = server.mock(|when, then| {
            when.method(POST)
                .path("/api/issues/T-9")
                .body_excludes("Subsystem");
            then.status(200);
        });

        let client = client_for(&server);
        let result = client.update_issue("T-9", &task("901", "Fix login", "Dev", &["API"]));

        assert!(result.is_ok());
        // exactly one full update and exactly one reduced retry
        rejected.assert();
        state_only.assert();
    }

    #[test]
    fn unrelated_rejection_propagates_without_retry() {
        let server = MockServer::start();

        let rejected = server.mock(|when, then| {
            when.method(POST).path("/api/issues/T-7");
            then.status(400)
                .json_body(serde_json::json!({"error": "summary is required"}));
        });

        let client = client_for(&server);
        let err = client
            .update_issue("T-7", &task("701", "Fix login", "Dev", &["API"]))
            .unwrap_err();

        assert!(matches!(err, ClientError::Status(400, _)));
        rejected.assert();
    }
}

// =============================================================================
// DUPLICATE PROBE (FAIL-OPEN)
// =============================================================================

mod probe_tests {
    use super::*;

    #[test]
    fn probe_server_error_reads_as_no_duplicate() {
        let server = MockServer::start();

        let failing = server.mock(|when, then| {
            when.method(GET).path("/api/issues");
            then.status(500).body("tracker is on fire");
        });

        let client = client_for(&server);
        assert!(!client.exists_by_title("Fix login"));
        failing.assert();
    }

    #[test]
    fn probe_transport_failure_reads_as_no_duplicate() {
        // test_config points at a closed port; the connection is refused
        let client = TargetClient::new(&test_config()).unwrap();
        assert!(!client.exists_by_title("Fix login"));
    }

    #[test]
    fn probe_matches_titles_case_insensitively() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/api/issues");
            then.status(200).json_body(serde_json::json!([
                {"id": "T-1", "summary": "Fix Login"}
            ]));
        });

        let client = client_for(&server);
        assert!(client.exists_by_title("fix login"));
        assert!(!client.exists_by_title("something else"));
    }
}
