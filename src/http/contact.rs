//! `POST /api/contact` handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use std::time::Instant;

use crate::gate::{Outcome, SubmissionRecord};
use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::http::source::source_key;
use crate::observability::metrics;

pub async fn contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmissionRecord>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let source = source_key(&headers);

    let Json(record) = match payload {
        Ok(record) => record,
        Err(rejection) => {
            tracing::error!(
                request_id = %request_id,
                source = %source,
                error = %rejection,
                "Failed to decode contact submission"
            );
            metrics::record_submission(metrics::UNDECODABLE, start);
            return response::internal_error();
        }
    };

    let outcome = state.gate.handle(&source, &record);
    metrics::record_submission(outcome.label(), start);
    metrics::record_ledger_keys(state.gate.ledger().tracked_keys());

    match outcome {
        Outcome::RateLimited => response::rate_limited(),
        Outcome::Invalid(errors) => response::invalid(&errors),
        Outcome::Accepted(submission) => match state.sink.deliver(&submission).await {
            Ok(()) => {
                tracing::info!(request_id = %request_id, source = %source, "Contact submission accepted");
                response::accepted()
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    source = %source,
                    error = %e,
                    "Failed to deliver contact submission"
                );
                metrics::record_sink_failure();
                response::internal_error()
            }
        },
    }
}

pub async fn method_not_allowed() -> Response {
    response::method_not_allowed()
}
