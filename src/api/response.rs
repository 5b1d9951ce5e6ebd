//! Response types for the postal tariff API.
//!
//! This module defines the quote and tariff bodies returned on success, the
//! error response structures, and the mapping from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{TariffConfig, TariffMetadata};
use crate::error::EngineError;
use crate::models::PostalCostOutput;

/// Body of a successful `POST /calculate`.
///
/// Domain errors are part of `result.errors`; a quote with errors is still
/// returned with status 200 and must not be shown as a final price.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    /// Unique identifier of this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub generated_at: DateTime<Utc>,
    /// Version of this engine.
    pub engine_version: String,
    /// Code of the tariff schedule used.
    pub tariff_code: String,
    /// Version of the tariff schedule used.
    pub tariff_version: String,
    /// Currency of every amount.
    pub currency: String,
    /// The calculation result.
    #[serde(flatten)]
    pub result: PostalCostOutput,
}

impl QuoteResponse {
    /// Wraps a calculation result with quote metadata.
    pub fn new(result: PostalCostOutput, tariff: &TariffMetadata) -> Self {
        Self {
            quote_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            tariff_code: tariff.code.clone(),
            tariff_version: tariff.version.clone(),
            currency: tariff.currency.clone(),
            result,
        }
    }
}

/// Body of `GET /tariff`.
#[derive(Debug, Clone, Serialize)]
pub struct TariffSummary {
    /// Schedule metadata.
    #[serde(flatten)]
    pub metadata: TariffMetadata,
    /// Regions in the adjacency table.
    pub region_count: usize,
    /// Priced services.
    pub service_count: usize,
    /// Priced rows across all services.
    pub rate_count: usize,
}

impl From<&TariffConfig> for TariffSummary {
    fn from(config: &TariffConfig) -> Self {
        Self {
            metadata: config.metadata().clone(),
            region_count: config.regions().len(),
            service_count: config.rates().service_count(),
            rate_count: config.rates().len(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid input error response.
    pub fn invalid_input(field: &str, message: &str) -> Self {
        Self::with_details(
            "INVALID_INPUT",
            format!("Invalid input field '{}': {}", field, message),
            "The parcel description violates a basic constraint",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tariff configuration", message),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_input(&field, &message),
            },
            EngineError::NoServiceSelected | EngineError::MultipleServicesSelected { .. } => {
                ApiErrorResponse {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    error: ApiError::new("SERVICE_SELECTION_ERROR", message),
                }
            }
            EngineError::RegionNotFound { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("REGION_NOT_FOUND", message),
            },
            EngineError::RateNotFound { .. }
            | EngineError::ExcessRateNotFound { .. }
            | EngineError::NoMatchingRate { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("RATE_NOT_FOUND", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let engine_error = EngineError::InvalidInput {
            field: "weight_kg".to_string(),
            message: "must be greater than zero, got 0".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
        assert!(api_error.error.message.contains("weight_kg"));
    }

    #[test]
    fn test_config_error_maps_to_server_error() {
        let engine_error = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_region_error_keeps_engine_message() {
        let engine_error = EngineError::RegionNotFound {
            region: "Atlantis".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            api_error.error.message,
            "Region not found in adjacency table: Atlantis"
        );
    }

    #[test]
    fn test_quote_response_flattens_result() {
        let metadata = TariffMetadata {
            code: "TEST".to_string(),
            name: "Test".to_string(),
            version: "1".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            currency: "IRR".to_string(),
        };
        let response = QuoteResponse::new(PostalCostOutput::default(), &metadata);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tariff_version"], "1");
        assert_eq!(json["currency"], "IRR");
        assert!(json.get("total_cost").is_some());
        assert!(json.get("additional_charges").is_some());
        assert!(json.get("result").is_none());
    }
}
