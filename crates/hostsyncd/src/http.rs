//! HTTP transport
//!
//! Maps requests onto [`HostDirectory`] and its errors onto status codes.
//!
//! Routes:
//! - `GET    /show`        - List all hosts
//! - `POST   /add`         - Add a host (`{"host": .., "ip": ..}`)
//! - `PUT    /edit/{id}`   - Replace host and ip of a record
//! - `DELETE /delete/{id}` - Delete a record
//! - `GET    /update`      - Regenerate the hosts file and reload the service
//!
//! Every response is JSON and allows any origin.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use hostsync_core::{Applied, Error, HostDirectory};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error};

const HOST_EXISTS: &str = "Host already exists";
const HOST_MISSING: &str = "Host does not exist";

/// Request body for add and edit
#[derive(Debug, Deserialize)]
pub struct HostPayload {
    pub host: String,
    pub ip: String,
}

/// Build the router serving the host directory
pub fn router(directory: Arc<HostDirectory>) -> Router {
    Router::new()
        .route("/show", get(show))
        .route("/add", post(add))
        .route("/edit/{id}", put(edit))
        .route("/delete/{id}", delete(remove))
        .route("/update", get(update))
        .with_state(directory)
}

async fn show(State(directory): State<Arc<HostDirectory>>) -> Response {
    match directory.list().await {
        Ok(hosts) => reply(StatusCode::OK, json!(hosts)),
        Err(e) => error_response(&e),
    }
}

async fn add(
    State(directory): State<Arc<HostDirectory>>,
    body: Result<Json<HostPayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    match directory.add(&payload.host, &payload.ip).await {
        Ok(applied) => applied_response(StatusCode::CREATED, "host", &applied),
        Err(e) => error_response(&e),
    }
}

async fn edit(
    State(directory): State<Arc<HostDirectory>>,
    Path(id): Path<String>,
    body: Result<Json<HostPayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let Some(id) = parse_id(&id) else {
        return bad_request(HOST_MISSING);
    };

    match directory.edit(id, &payload.host, &payload.ip).await {
        Ok(applied) => applied_response(StatusCode::OK, "host", &applied),
        Err(e) => error_response(&e),
    }
}

async fn remove(
    State(directory): State<Arc<HostDirectory>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return bad_request(HOST_MISSING);
    };

    match directory.delete(id).await {
        Ok(applied) => applied_response(StatusCode::OK, "deleted", &applied),
        Err(e) => error_response(&e),
    }
}

async fn update(State(directory): State<Arc<HostDirectory>>) -> Response {
    match directory.synchronize().await {
        Ok(report) => reply(
            StatusCode::OK,
            json!({ "success": true, "payload": report }),
        ),
        Err(e) => {
            error!("Forced synchronization failed: {}", e);
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "payload": { "error": e.to_string() } }),
            )
        }
    }
}

/// Ids that do not parse cannot match any record
fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

fn applied_response<T: serde::Serialize>(
    status: StatusCode,
    key: &str,
    applied: &Applied<T>,
) -> Response {
    let mut payload = serde_json::Map::new();
    payload.insert(key.to_string(), json!(applied.value));
    payload.insert("synced".to_string(), json!(applied.sync.is_synced()));
    if let Some(message) = applied.sync.error() {
        payload.insert("sync_error".to_string(), json!(message));
    }
    reply(status, json!({ "success": true, "payload": payload }))
}

fn error_response(err: &Error) -> Response {
    if !err.is_client_error() {
        error!("Request failed: {}", err);
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "payload": { "error": err.to_string() } }),
        );
    }

    match err {
        Error::DuplicateHost(_) => bad_request(HOST_EXISTS),
        Error::NotFound(_) => bad_request(HOST_MISSING),
        Error::InvalidInput(message) => bad_request(message),
        other => bad_request(&other.to_string()),
    }
}

fn bad_request(message: &str) -> Response {
    debug!("Rejecting request: {}", message);
    reply(
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "payload": { "error": message } }),
    )
}

fn reply(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}
