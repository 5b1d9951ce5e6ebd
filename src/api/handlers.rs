//! HTTP request handlers for the postal tariff API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_postal_cost;
use crate::models::PostalCostInput;

use super::response::{ApiError, ApiErrorResponse, QuoteResponse, TariffSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tariff", get(tariff_handler))
        .with_state(state)
}

fn error_response(error: ApiErrorResponse) -> Response {
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a parcel description and returns a priced quote. Domain errors
/// such as an unknown region are reported inside the quote, not as HTTP
/// errors.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PostalCostInput>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    // Handle JSON parsing errors
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            });
        }
    };

    let config = state.config();
    let start_time = Instant::now();
    match compute_postal_cost(&input, config) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                origin = %input.origin_region,
                destination = %input.destination_region,
                total_cost = %result.total_cost,
                authoritative = result.is_authoritative(),
                duration_us = start_time.elapsed().as_micros(),
                "Quote completed"
            );
            let quote = QuoteResponse::new(result, config.metadata());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(quote),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Quote rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /tariff endpoint.
///
/// Returns the metadata and size of the loaded tariff.
async fn tariff_handler(State(state): State<AppState>) -> Json<TariffSummary> {
    Json(TariffSummary::from(state.config()))
}
