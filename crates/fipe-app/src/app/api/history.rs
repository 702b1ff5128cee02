use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use fipe_core::constants::HISTORY_ROUTE_COMPONENT;

use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Acknowledgement payload for a successful append
#[derive(Debug, Serialize)]
pub struct AppendAck {
    pub ok: bool,
}

/// ## Summary
/// GET /historico - Returns the full persisted history, newest first.
///
/// Always responds 200 with a JSON array; a missing or corrupt history file
/// reads as an empty list.
#[handler]
async fn list_history(depot: &mut Depot, res: &mut Response) {
    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(e) => {
            error!(error = ?e, "Failed to get history store");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    let records = store.list().await;
    res.render(Json(records));
}

/// ## Summary
/// POST /historico - Appends the request body to the front of the history.
///
/// The body is stored exactly as posted; shape validation is the caller's
/// concern and the read path tolerates malformed records.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON
/// Returns HTTP 500 if the write fails
#[handler]
async fn append_history(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing history append");

    let record: Value = match req.parse_json().await {
        Ok(record) => record,
        Err(e) => {
            error!(error = ?e, "Failed to parse history record body");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let store = match get_store_from_depot(depot) {
        Ok(store) => store,
        Err(e) => {
            error!(error = ?e, "Failed to get history store");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    if let Err(e) = store.append_front(record).await {
        error!(error = ?e, "Failed to persist history record");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        res.render(Json(ErrorResponse {
            error: "Failed to persist history record".to_string(),
        }));
        return;
    }

    res.status_code(StatusCode::CREATED);
    res.render(Json(AppendAck { ok: true }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(HISTORY_ROUTE_COMPONENT)
        .options(handler::empty())
        .get(list_history)
        .post(append_history)
}
