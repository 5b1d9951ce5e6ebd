//! Calculation output models for the postal tariff engine.
//!
//! This module contains the [`PostalCostOutput`] type and the structures it
//! is assembled from: the accessorial charge breakdown, the base cost split
//! and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProvincialStatus, ServiceCategory};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The accessorial surcharges layered on the base cost.
///
/// # Example
///
/// ```
/// use postal_tariff::models::AdditionalCharges;
/// use rust_decimal::Decimal;
///
/// let charges = AdditionalCharges {
///     fragile_liquid: Decimal::new(25000, 0),
///     ..AdditionalCharges::default()
/// };
/// assert_eq!(charges.total(), Decimal::new(25000, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharges {
    /// Fragile or liquid contents.
    pub fragile_liquid: Decimal,
    /// Oversized parcel.
    pub non_standard_dimension: Decimal,
    /// Non-standard packaging without proper wrap.
    pub non_standard_packaging: Decimal,
    /// Collection from the sender's location.
    pub sender_collection: Decimal,
    /// Southern-island air/sea leg.
    pub island_air_sea: Decimal,
    /// Delivery-time reduction.
    pub expedited_reduction: Decimal,
    /// Metro distribution, computed on the running subtotal.
    pub metro_distribution: Decimal,
}

impl AdditionalCharges {
    /// Sum of every charge except the metro distribution surcharge.
    pub fn subtotal_before_metro(&self) -> Decimal {
        self.fragile_liquid
            + self.non_standard_dimension
            + self.non_standard_packaging
            + self.sender_collection
            + self.island_air_sea
            + self.expedited_reduction
    }

    /// Sum of all seven charges.
    pub fn total(&self) -> Decimal {
        self.subtotal_before_metro() + self.metro_distribution
    }
}

/// How the base service cost splits between the tier rate and excess weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCostBreakdown {
    /// The rate of the priced tier.
    pub tier_cost: Decimal,
    /// Started kilograms billed above the tier's ceiling.
    pub excess_weight_kg: Decimal,
    /// Charge for the excess kilograms.
    pub excess_cost: Decimal,
}

/// The complete result of a postal cost calculation.
///
/// `errors` being non-empty means `total_cost` is not authoritative and must
/// not be shown as a final price. `warnings` are advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCostOutput {
    /// The service that was priced, when selection succeeded.
    pub service: Option<ServiceCategory>,
    /// The origin/destination relation, when both regions are known.
    pub relation: Option<ProvincialStatus>,
    /// Tier rate plus excess-weight charges.
    pub base_service_cost: Decimal,
    /// Split of the base service cost.
    pub base_breakdown: BaseCostBreakdown,
    /// Volumetric weight in kg (3 dp), when dimensions were given.
    pub volumetric_weight_kg: Option<Decimal>,
    /// The chargeable weight: max(actual, volumetric).
    pub effective_weight_kg: Decimal,
    /// Accessorial surcharges.
    pub additional_charges: AdditionalCharges,
    /// Grand total in whole currency units.
    pub total_cost: Decimal,
    /// Recorded errors, in the order they occurred.
    pub errors: Vec<String>,
    /// Recorded warnings, in the order they occurred.
    pub warnings: Vec<String>,
    /// Every rule decision, in pipeline order.
    pub audit_trace: Vec<AuditStep>,
}

impl PostalCostOutput {
    /// Returns true when no error was recorded.
    pub fn is_authoritative(&self) -> bool {
        self.errors.is_empty()
    }
}
