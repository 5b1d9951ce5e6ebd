//! HTTP API module for the postal tariff engine.
//!
//! This module provides the REST API endpoints for pricing parcels against
//! the loaded tariff.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse, QuoteResponse, TariffSummary};
pub use state::AppState;
