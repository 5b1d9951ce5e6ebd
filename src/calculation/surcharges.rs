//! Accessorial surcharges.
//!
//! Each surcharge is gated by an input flag and computed independently from
//! the base service cost, except the metro distribution surcharge, which is
//! a percentage of the base cost plus every other surcharge and is therefore
//! computed last.
//!
//! | Surcharge | Amount |
//! |-----------|--------|
//! | Fragile or liquid | 25% of base |
//! | Non-standard packaging | 300% of base, suppresses the dimension surcharge |
//! | Non-standard dimensions | 25% of base when any side exceeds the standard parcel |
//! | Sender collection | flat fee by collection city tier |
//! | Southern island | started kg (at least 1) × per-kg rate |
//! | Delivery-time reduction | 30% / 80% of base, priority envelopes only |
//! | Metro distribution | 20% / 15% of the running subtotal |

use rust_decimal::Decimal;

use crate::config::{MetroDistribution, SurchargeConfig};
use crate::error::TariffWarning;
use crate::models::{
    AdditionalCharges, AuditStep, CityTier, DeliveryTimeReduction, PostalCostInput,
    ServiceCategory,
};

/// The accessorial charges for one parcel.
#[derive(Debug, Clone)]
pub struct SurchargeResult {
    /// All seven charges.
    pub charges: AdditionalCharges,
    /// Advisory conditions raised while applying flags.
    pub warnings: Vec<TariffWarning>,
    /// One step for the independent surcharges, one for the metro surcharge.
    pub audit_steps: Vec<AuditStep>,
}

/// Packaging and dimension surcharges are mutually exclusive.
///
/// Returns `(non_standard_packaging, non_standard_dimension)`.
pub fn packaging_and_dimension_surcharges(
    input: &PostalCostInput,
    base_service_cost: Decimal,
    surcharges: &SurchargeConfig,
) -> (Decimal, Decimal) {
    if input.non_standard_packaging {
        return (
            base_service_cost * surcharges.non_standard_packaging_rate,
            Decimal::ZERO,
        );
    }

    let oversized = input
        .dimensions
        .is_some_and(|dims| dims.exceeds(&surcharges.standard_dimensions));
    if oversized {
        (
            Decimal::ZERO,
            base_service_cost * surcharges.non_standard_dimension_rate,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    }
}

/// Island air/sea surcharge: started kilograms, at least one, times the
/// category's per-kilogram rate.
pub fn island_surcharge(
    service: ServiceCategory,
    effective_weight_kg: Decimal,
    surcharges: &SurchargeConfig,
) -> Decimal {
    let rate = if service.is_base_category() {
        surcharges.island.base_rate_per_kg
    } else {
        surcharges.island.priority_rate_per_kg
    };
    effective_weight_kg.max(Decimal::ONE).ceil() * rate
}

/// Rate applied to the running subtotal for the metro distribution surcharge.
///
/// Provincial capitals and counties pay nothing. A primary metropolis pays
/// the primary rate, as does any metropolis inside a capital region.
pub fn metro_distribution_rate(
    destination_region: &str,
    destination_city_tier: CityTier,
    metro: &MetroDistribution,
) -> Decimal {
    let in_capital_region = metro
        .capital_regions
        .iter()
        .any(|region| region == destination_region);

    match destination_city_tier {
        CityTier::MetropolisPrimary => metro.primary_rate,
        CityTier::MetropolisOther if in_capital_region => metro.primary_rate,
        CityTier::MetropolisOther => metro.other_rate,
        CityTier::ProvincialCapital | CityTier::County => Decimal::ZERO,
    }
}

/// Applies every accessorial surcharge to a priced service.
///
/// The caller only invokes this for a validly selected service with a
/// positive base cost.
pub fn calculate_surcharges(
    input: &PostalCostInput,
    service: ServiceCategory,
    base_service_cost: Decimal,
    effective_weight_kg: Decimal,
    reduction: DeliveryTimeReduction,
    surcharges: &SurchargeConfig,
    first_step: u32,
) -> SurchargeResult {
    let mut warnings = Vec::new();

    let fragile_liquid = if input.fragile_or_liquid {
        base_service_cost * surcharges.fragile_liquid_rate
    } else {
        Decimal::ZERO
    };

    let (non_standard_packaging, non_standard_dimension) =
        packaging_and_dimension_surcharges(input, base_service_cost, surcharges);

    let sender_collection = if input.collect_from_sender {
        let tier = match input.origin_city_tier {
            Some(tier) => tier,
            None => {
                warnings.push(TariffWarning::CollectionTierAssumed {
                    tier: input.destination_city_tier.to_string(),
                });
                input.destination_city_tier
            }
        };
        surcharges.collection_fees.fee_for(tier)
    } else {
        Decimal::ZERO
    };

    let island_air_sea = if input.southern_island_destination {
        island_surcharge(service, effective_weight_kg, surcharges)
    } else {
        Decimal::ZERO
    };

    let reduction_allowed = matches!(
        service,
        ServiceCategory::IntercityPriority(subtype) if subtype.allows_delivery_time_reduction()
    );
    let expedited_reduction = match reduction {
        DeliveryTimeReduction::None => Decimal::ZERO,
        _ if reduction_allowed => {
            base_service_cost * surcharges.delivery_time_reduction.rate_for(reduction)
        }
        _ => {
            warnings.push(TariffWarning::DeliveryReductionNotApplicable {
                service: service.to_string(),
            });
            Decimal::ZERO
        }
    };

    let independent = AdditionalCharges {
        fragile_liquid,
        non_standard_dimension,
        non_standard_packaging,
        sender_collection,
        island_air_sea,
        expedited_reduction,
        metro_distribution: Decimal::ZERO,
    };

    let independent_step = AuditStep {
        step_number: first_step,
        rule_id: "accessorial_surcharges".to_string(),
        rule_name: "Accessorial Surcharges".to_string(),
        input: serde_json::json!({
            "base_service_cost": base_service_cost.to_string(),
            "fragile_or_liquid": input.fragile_or_liquid,
            "non_standard_packaging": input.non_standard_packaging,
            "collect_from_sender": input.collect_from_sender,
            "southern_island_destination": input.southern_island_destination,
            "delivery_time_reduction_days": input.delivery_time_reduction_days
        }),
        output: serde_json::json!({
            "fragile_liquid": fragile_liquid.to_string(),
            "non_standard_dimension": non_standard_dimension.to_string(),
            "non_standard_packaging": non_standard_packaging.to_string(),
            "sender_collection": sender_collection.to_string(),
            "island_air_sea": island_air_sea.to_string(),
            "expedited_reduction": expedited_reduction.to_string()
        }),
        reasoning: format!(
            "Independent surcharges on base cost {} total {}",
            base_service_cost,
            independent.subtotal_before_metro()
        ),
    };

    // Metro is charged on everything above, so it must stay last.
    let subtotal = base_service_cost + independent.subtotal_before_metro();
    let metro_rate = metro_distribution_rate(
        &input.destination_region,
        input.destination_city_tier,
        &surcharges.metro_distribution,
    );
    let metro_distribution = subtotal * metro_rate;

    let metro_step = AuditStep {
        step_number: first_step + 1,
        rule_id: "metro_distribution".to_string(),
        rule_name: "Metro Distribution Surcharge".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.to_string(),
            "destination_region": input.destination_region,
            "destination_city_tier": input.destination_city_tier
        }),
        output: serde_json::json!({
            "rate": metro_rate.to_string(),
            "metro_distribution": metro_distribution.to_string()
        }),
        reasoning: format!(
            "{} of running subtotal {} for a {} destination",
            metro_rate, subtotal, input.destination_city_tier
        ),
    };

    SurchargeResult {
        charges: AdditionalCharges {
            metro_distribution,
            ..independent
        },
        warnings,
        audit_steps: vec![independent_step, metro_step],
    }
}
