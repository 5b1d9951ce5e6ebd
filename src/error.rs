//! Error and warning types for the postal tariff engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! [`EngineError`] covers both hard failures (configuration, malformed input)
//! and the recoverable conditions the calculation records on its output.
//! [`TariffWarning`] covers advisory conditions that never invalidate a quote.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the postal tariff engine.
///
/// Configuration and input variants are returned as `Err` values. The
/// selection, region and rate variants are recorded as messages on a
/// [`PostalCostOutput`](crate::models::PostalCostOutput) instead, so a caller
/// always receives a complete quote.
///
/// # Example
///
/// ```
/// use postal_tariff::error::EngineError;
///
/// let error = EngineError::RegionNotFound {
///     region: "Atlantis".to_string(),
/// };
/// assert_eq!(error.to_string(), "Region not found in adjacency table: Atlantis");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is internally inconsistent.
    #[error("Invalid tariff configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The request violates a basic type constraint.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No service category was selected on the request.
    #[error("No shipping service selected; exactly one service category is required")]
    NoServiceSelected,

    /// More than one service category was selected on the request.
    #[error("{count} shipping service categories selected; exactly one is required")]
    MultipleServicesSelected {
        /// How many categories were set.
        count: usize,
    },

    /// A region is missing from the adjacency table.
    #[error("Region not found in adjacency table: {region}")]
    RegionNotFound {
        /// The unknown region name.
        region: String,
    },

    /// The rate table has no row for the service and scope.
    #[error("No rate for service '{service}' and {scope}")]
    RateNotFound {
        /// The service code (`category/subtype`).
        service: String,
        /// The relation or city tier that was looked up.
        scope: String,
    },

    /// The weight exceeds the band but no excess rate exists for the scope.
    #[error("No excess-weight rate for service '{service}' and {scope}; excess weight was not charged")]
    ExcessRateNotFound {
        /// The service code (`category/subtype`).
        service: String,
        /// The relation or city tier that was looked up.
        scope: String,
    },

    /// A validly selected service produced no base cost.
    #[error("Could not find a matching rate for service '{service}'; total cost is not authoritative")]
    NoMatchingRate {
        /// The service code (`category/subtype`).
        service: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// An advisory condition raised during calculation.
///
/// Warnings are recorded on the output and never change whether a quote is
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TariffWarning {
    /// Effective weight lies outside the selected subtype's nominal band.
    #[error("Weight {weight_kg} kg is outside the nominal band {band} of service '{service}'; its rate was applied anyway")]
    WeightOutsideBand {
        /// The service code.
        service: String,
        /// The effective weight.
        weight_kg: Decimal,
        /// The band rendered as text, e.g. `(3, 5] kg`.
        band: String,
    },

    /// Volumetric weight exceeded actual weight and is the chargeable weight.
    #[error("Volumetric weight {volumetric_kg} kg exceeds actual weight {actual_kg} kg and is used as the chargeable weight")]
    VolumetricWeightApplied {
        /// Actual weight.
        actual_kg: Decimal,
        /// Volumetric weight.
        volumetric_kg: Decimal,
    },

    /// A non-priority excess service was selected directly.
    #[error("Service '{service}' is normally an automatic excess-weight charge; selecting it directly is discouraged")]
    DirectExcessSelection {
        /// The service code.
        service: String,
    },

    /// A companion tier's rate was used instead of the selected one.
    #[error("Weight {weight_kg} kg exceeds the band of '{from}'; priced at the rate of '{to}'")]
    TierSubstitution {
        /// The selected service code.
        from: String,
        /// The service code whose rate was applied.
        to: String,
        /// The effective weight.
        weight_kg: Decimal,
    },

    /// A delivery-time reduction was requested on a service that does not offer it.
    #[error("Delivery-time reduction is only offered on the two cheapest priority services; ignored for '{service}'")]
    DeliveryReductionNotApplicable {
        /// The service code.
        service: String,
    },

    /// No collection city tier was supplied; the destination tier was used.
    #[error("Collection city tier not supplied; assumed destination tier '{tier}'")]
    CollectionTierAssumed {
        /// The tier that was assumed.
        tier: String,
    },
}
