//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.
//! Requests are served sequentially; every operation re-fetches its snapshots
//! so there is no shared mutable pass state beyond the suppression store.

use std::io::Cursor;
#[allow(unused_imports)]
use std::io::Read as _;
use std::sync::Arc;

use log::info;
use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{
    self, AnalyzeRequest, ApiError, ApiResponse, AutoSyncRequest, CreateSingleRequest,
    IgnoreRequest, SyncRequest,
};
use crate::service::SyncService;

/// Bind the server and process requests until the process exits
pub fn serve(service: &Arc<SyncService>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let server =
        Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
    info!("listening on http://{addr}");

    for mut request in server.incoming_requests() {
        info!("{} {}", request.method(), request.url());
        let response = handle_api_request(service, &mut request);
        let _ = request.respond(response);
    }
    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
///
/// This is the main routing function that maps URL paths to handlers.
pub fn handle_api_request(
    service: &Arc<SyncService>,
    request: &mut Request,
) -> Response<Cursor<Vec<u8>>> {
    let url = request.url().to_string();
    let method = request.method().clone();
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, q),
        None => (url.as_str(), ""),
    };

    match (&method, path) {
        // GET endpoints
        (&Method::Get, "/health") => handle_result(api::get_health()),
        (&Method::Get, "/status") => handle_result(api::get_status(service)),
        (&Method::Get, "/analyze" | "/sync") => {
            let req = AnalyzeRequest { columns: columns_from_query(query) };
            handle_result(api::analyze(service, &req))
        },
        (&Method::Get, "/ignore") => handle_result(api::list_ignored(service)),
        (&Method::Get, "/auto-sync") => handle_result(api::get_auto_sync(service)),

        // POST /analyze - classification pass with an explicit column list
        (&Method::Post, "/analyze") => match read_json_body::<AnalyzeRequest>(request) {
            Ok(req) => handle_result(api::analyze(service, &req)),
            Err(e) => error_response(&e),
        },

        // POST /create - create every missing issue
        (&Method::Post, "/create") => handle_result(api::create_missing(service)),

        // POST /create-single - create one issue
        (&Method::Post, "/create-single") => {
            match read_json_body::<CreateSingleRequest>(request) {
                Ok(req) => handle_result(api::create_single(service, &req)),
                Err(e) => error_response(&e),
            }
        },

        // POST /sync - apply per-task sync/ignore decisions
        (&Method::Post, "/sync") => match read_json_body::<SyncRequest>(request) {
            Ok(req) => handle_result(api::sync_actions(service, &req)),
            Err(e) => error_response(&e),
        },

        // POST /ignore - add or remove a suppression
        (&Method::Post, "/ignore") => match read_json_body::<IgnoreRequest>(request) {
            Ok(req) => handle_result(api::modify_ignore(service, &req)),
            Err(e) => error_response(&e),
        },

        // POST /auto-sync - start or stop the background loop
        (&Method::Post, "/auto-sync") => match read_json_body::<AutoSyncRequest>(request) {
            Ok(req) => handle_result(api::control_auto_sync(service, &req)),
            Err(e) => error_response(&e),
        },

        // 404 for unknown routes
        _ => not_found_response(&format!("API endpoint not found: {method} {path}")),
    }
}

/// Parse a comma-separated `columns` query parameter
fn columns_from_query(query: &str) -> Vec<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "columns")
        .map(|(_, value)| {
            value
                .split(',')
                .map(|c| c.replace("%20", " ").trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Response<Cursor<Vec<u8>>> {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}

/// Create a successful JSON response
fn success_response<T: Serialize>(data: T) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::<()>::error("NOT_FOUND", message);
    json_response(&response, 404)
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Response<Cursor<Vec<u8>>> {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Response::from_data(json.into_bytes())
        .with_header(Header::from_bytes("Content-Type", "application/json").unwrap())
        .with_status_code(StatusCode(status))
}
