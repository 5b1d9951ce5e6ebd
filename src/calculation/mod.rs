//! Calculation logic for the postal tariff engine.
//!
//! This module contains every stage of a postal quote: region relation
//! resolution, volumetric and chargeable weight, service selection with its
//! band check, base service cost with excess-weight charges, the accessorial
//! surcharges, and the [`compute_postal_cost`] entry point that combines them.

mod base_cost;
mod postal_cost;
mod region_relation;
mod service_selection;
mod surcharges;
mod volumetric_weight;

#[cfg(test)]
pub(crate) mod test_support;

pub use base_cost::{BaseCostResult, calculate_base_cost};
pub use postal_cost::{compute_postal_cost, round_currency};
pub use region_relation::{RelationResult, resolve_relation};
pub use service_selection::{SelectionResult, select_service, selected_services};
pub use surcharges::{
    SurchargeResult, calculate_surcharges, island_surcharge, metro_distribution_rate,
    packaging_and_dimension_surcharges,
};
pub use volumetric_weight::{
    VOLUMETRIC_WEIGHT_DP, WeightResult, normalize_weight, volumetric_weight,
};
