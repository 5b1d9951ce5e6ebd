//! Volumetric weight and chargeable weight.
//!
//! A bulky, light parcel is billed by the space it takes: volumetric weight
//! is `L × W × H / divisor` and the chargeable (effective) weight is the
//! larger of actual and volumetric weight.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::TariffWarning;
use crate::models::{AuditStep, Dimensions};

/// Decimal places volumetric weight is reported to.
pub const VOLUMETRIC_WEIGHT_DP: u32 = 3;

/// The chargeable weight of a parcel.
#[derive(Debug, Clone)]
pub struct WeightResult {
    /// Volumetric weight, when dimensions were given.
    pub volumetric_weight_kg: Option<Decimal>,
    /// max(actual, volumetric).
    pub effective_weight_kg: Decimal,
    /// Present when volumetric weight was the binding constraint.
    pub warning: Option<TariffWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Volumetric weight of a parcel, rounded to three decimal places.
///
/// # Examples
///
/// ```
/// use postal_tariff::calculation::volumetric_weight;
/// use postal_tariff::models::Dimensions;
/// use rust_decimal::Decimal;
///
/// let dims = Dimensions::new(Decimal::new(40, 0), Decimal::new(30, 0), Decimal::new(20, 0));
/// assert_eq!(volumetric_weight(&dims, Decimal::new(6000, 0)), Decimal::new(4, 0));
/// ```
pub fn volumetric_weight(dimensions: &Dimensions, divisor: Decimal) -> Decimal {
    (dimensions.volume_cm3() / divisor)
        .round_dp_with_strategy(VOLUMETRIC_WEIGHT_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Determines the chargeable weight of a parcel.
///
/// Without dimensions the actual weight is chargeable and no volumetric
/// weight is reported. A warning is produced only when volumetric weight is
/// strictly greater than actual weight.
pub fn normalize_weight(
    actual_weight_kg: Decimal,
    dimensions: Option<&Dimensions>,
    divisor: Decimal,
    step_number: u32,
) -> WeightResult {
    let volumetric_weight_kg = dimensions.map(|dims| volumetric_weight(dims, divisor));

    let (effective_weight_kg, warning) = match volumetric_weight_kg {
        Some(volumetric) if volumetric > actual_weight_kg => (
            volumetric,
            Some(TariffWarning::VolumetricWeightApplied {
                actual_kg: actual_weight_kg,
                volumetric_kg: volumetric,
            }),
        ),
        _ => (actual_weight_kg, None),
    };

    let reasoning = match volumetric_weight_kg {
        None => format!(
            "No dimensions given; actual weight {} kg is chargeable",
            actual_weight_kg
        ),
        Some(volumetric) if warning.is_some() => format!(
            "Volumetric weight {} kg exceeds actual weight {} kg; volumetric weight is chargeable",
            volumetric, actual_weight_kg
        ),
        Some(volumetric) => format!(
            "Actual weight {} kg is not below volumetric weight {} kg; actual weight is chargeable",
            actual_weight_kg, volumetric
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "volumetric_weight".to_string(),
        rule_name: "Chargeable Weight".to_string(),
        input: serde_json::json!({
            "actual_weight_kg": actual_weight_kg.to_string(),
            "dimensions": dimensions.map(|d| serde_json::json!({
                "length_cm": d.length_cm.to_string(),
                "width_cm": d.width_cm.to_string(),
                "height_cm": d.height_cm.to_string()
            })),
            "divisor": divisor.to_string()
        }),
        output: serde_json::json!({
            "volumetric_weight_kg": volumetric_weight_kg.map(|v| v.to_string()),
            "effective_weight_kg": effective_weight_kg.to_string()
        }),
        reasoning,
    };

    WeightResult {
        volumetric_weight_kg,
        effective_weight_kg,
        warning,
        audit_step,
    }
}
