//! Base service cost.
//!
//! Prices the selected service from the rate table:
//!
//! - **Base goods**: the band rate. The two largest bands charge every
//!   started kilogram above their ceiling at the rate of their companion
//!   non-priority excess service, keyed by the same relation.
//! - **Non-priority excess** selected directly: per-kilogram rate times the
//!   started kilograms of the whole parcel.
//! - **Urban priority**: band rate by destination city tier, plus the
//!   per-kilogram excess rate above the 1 kg ceiling where one is published.
//! - **Intercity priority**: band rate by relation plus excess above the
//!   ceiling. A 500 g priority envelope that outgrows its band is priced as
//!   the padded envelope instead.
//!
//! A missing row never invents a price: the affected component is zero and
//! an error is recorded.

use rust_decimal::Decimal;

use crate::config::{RateEntry, RateScope, RateTable};
use crate::error::{EngineError, TariffWarning};
use crate::models::{
    AuditStep, BaseCostBreakdown, BaseGoodsService, CityTier, IntercityPriorityService,
    ProvincialStatus, ScopeKind, ServiceCategory,
};

/// Result of pricing the selected service.
#[derive(Debug, Clone)]
pub struct BaseCostResult {
    /// The service whose rate was actually applied.
    pub priced_service: ServiceCategory,
    /// Split between tier rate and excess weight.
    pub breakdown: BaseCostBreakdown,
    /// Tier cost plus excess cost.
    pub base_service_cost: Decimal,
    /// Rate lookup failures, in the order they occurred.
    pub errors: Vec<EngineError>,
    /// Advisory conditions.
    pub warnings: Vec<TariffWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the base service cost.
///
/// `relation` is `None` when a region could not be resolved; relation-keyed
/// services then price at zero without a further error, since the lookup
/// failure has already been reported.
///
/// # Examples
///
/// ```
/// use postal_tariff::calculation::calculate_base_cost;
/// use postal_tariff::config::{RateScope, RateTable, WeightBand};
/// use postal_tariff::models::{
///     BaseGoodsService, CityTier, ExcessService, ProvincialStatus, ServiceCategory,
/// };
/// use rust_decimal::Decimal;
///
/// let intra = RateScope::Relation(ProvincialStatus::IntraProvincial);
/// let parcel = ServiceCategory::BaseGoods(BaseGoodsService::RegisteredParcel3To5Kg);
/// let excess = ServiceCategory::NonPriorityExcess(ExcessService::RegisteredParcelPerKg);
///
/// let mut rates = RateTable::new();
/// rates
///     .add_service(
///         parcel,
///         WeightBand::new(Decimal::new(3, 0), Some(Decimal::new(5, 0))),
///         [(intra, Decimal::new(285000, 0), None)],
///     )
///     .unwrap();
/// rates
///     .add_service(
///         excess,
///         WeightBand::unbounded(),
///         [(intra, Decimal::ZERO, Some(Decimal::new(36000, 0)))],
///     )
///     .unwrap();
///
/// let result = calculate_base_cost(
///     parcel,
///     Some(ProvincialStatus::IntraProvincial),
///     CityTier::County,
///     Decimal::new(7, 0),
///     &rates,
///     1,
/// );
/// assert_eq!(result.base_service_cost, Decimal::new(357000, 0));
/// assert!(result.errors.is_empty());
/// ```
pub fn calculate_base_cost(
    service: ServiceCategory,
    relation: Option<ProvincialStatus>,
    destination_city_tier: CityTier,
    effective_weight_kg: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> BaseCostResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut priced_service = service;

    let scope = match service.scope_kind() {
        ScopeKind::CityTier => Some(RateScope::CityTier(destination_city_tier)),
        ScopeKind::Relation => relation.map(RateScope::Relation),
    };

    let breakdown = match scope {
        None => BaseCostBreakdown::default(),
        Some(scope) => match service {
            ServiceCategory::BaseGoods(subtype) => {
                price_base_goods(subtype, scope, effective_weight_kg, rates, &mut errors)
            }
            ServiceCategory::NonPriorityExcess(_) => {
                warnings.push(TariffWarning::DirectExcessSelection {
                    service: service.to_string(),
                });
                price_direct_excess(service, scope, effective_weight_kg, rates, &mut errors)
            }
            ServiceCategory::UrbanPriority(_) => {
                match lookup(service, scope, rates, &mut errors) {
                    Some(entry) => {
                        price_with_own_excess(service, scope, &entry, effective_weight_kg, &mut errors)
                    }
                    None => BaseCostBreakdown::default(),
                }
            }
            ServiceCategory::IntercityPriority(subtype) => {
                let substitute = substitution_for(subtype, effective_weight_kg, rates);
                if let Some(companion) = substitute {
                    priced_service = ServiceCategory::IntercityPriority(companion);
                    warnings.push(TariffWarning::TierSubstitution {
                        from: service.to_string(),
                        to: priced_service.to_string(),
                        weight_kg: effective_weight_kg,
                    });
                }
                match lookup(priced_service, scope, rates, &mut errors) {
                    Some(entry) => price_with_own_excess(
                        priced_service,
                        scope,
                        &entry,
                        effective_weight_kg,
                        &mut errors,
                    ),
                    None => BaseCostBreakdown::default(),
                }
            }
        },
    };

    let base_service_cost = breakdown.tier_cost + breakdown.excess_cost;

    let reasoning = match scope {
        None => format!(
            "Relation could not be resolved; '{}' cannot be priced",
            service
        ),
        Some(scope) if errors.is_empty() => format!(
            "'{}' at {}: tier {} + {} excess kg = {}",
            priced_service,
            scope,
            breakdown.tier_cost,
            breakdown.excess_weight_kg,
            base_service_cost
        ),
        Some(scope) => format!(
            "'{}' at {}: incomplete rate data, priced {}",
            priced_service, scope, base_service_cost
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_cost".to_string(),
        rule_name: "Base Service Cost".to_string(),
        input: serde_json::json!({
            "service": service,
            "scope": scope.map(|s| s.to_string()),
            "effective_weight_kg": effective_weight_kg.to_string()
        }),
        output: serde_json::json!({
            "priced_service": priced_service,
            "tier_cost": breakdown.tier_cost.to_string(),
            "excess_weight_kg": breakdown.excess_weight_kg.to_string(),
            "excess_cost": breakdown.excess_cost.to_string(),
            "base_service_cost": base_service_cost.to_string()
        }),
        reasoning,
    };

    BaseCostResult {
        priced_service,
        breakdown,
        base_service_cost,
        errors,
        warnings,
        audit_step,
    }
}

fn lookup(
    service: ServiceCategory,
    scope: RateScope,
    rates: &RateTable,
    errors: &mut Vec<EngineError>,
) -> Option<RateEntry> {
    let entry = rates.get(service, scope).copied();
    if entry.is_none() {
        errors.push(EngineError::RateNotFound {
            service: service.to_string(),
            scope: scope.to_string(),
        });
    }
    entry
}

/// The companion subtype to price at, when the selected subtype has one and
/// the weight is above its ceiling.
fn substitution_for(
    subtype: IntercityPriorityService,
    effective_weight_kg: Decimal,
    rates: &RateTable,
) -> Option<IntercityPriorityService> {
    let companion = subtype.substitution_companion()?;
    let max_kg = rates
        .band(ServiceCategory::IntercityPriority(subtype))
        .and_then(|band| band.max_kg)?;
    (effective_weight_kg > max_kg).then_some(companion)
}

/// Band rate plus the row's own per-kilogram excess rate above the ceiling.
fn price_with_own_excess(
    service: ServiceCategory,
    scope: RateScope,
    entry: &RateEntry,
    effective_weight_kg: Decimal,
    errors: &mut Vec<EngineError>,
) -> BaseCostBreakdown {
    let excess_weight_kg = entry.band.excess_units(effective_weight_kg);
    let excess_cost = if excess_weight_kg.is_zero() {
        Decimal::ZERO
    } else {
        match entry.excess_rate_per_kg {
            Some(rate) => excess_weight_kg * rate,
            None => {
                errors.push(EngineError::ExcessRateNotFound {
                    service: service.to_string(),
                    scope: scope.to_string(),
                });
                Decimal::ZERO
            }
        }
    };

    BaseCostBreakdown {
        tier_cost: entry.base_rate,
        excess_weight_kg,
        excess_cost,
    }
}

fn price_base_goods(
    subtype: BaseGoodsService,
    scope: RateScope,
    effective_weight_kg: Decimal,
    rates: &RateTable,
    errors: &mut Vec<EngineError>,
) -> BaseCostBreakdown {
    let service = ServiceCategory::BaseGoods(subtype);
    let Some(entry) = lookup(service, scope, rates, errors) else {
        return BaseCostBreakdown::default();
    };

    let Some(companion) = subtype.excess_companion() else {
        return BaseCostBreakdown {
            tier_cost: entry.base_rate,
            ..BaseCostBreakdown::default()
        };
    };

    let excess_weight_kg = entry.band.excess_units(effective_weight_kg);
    let excess_cost = if excess_weight_kg.is_zero() {
        Decimal::ZERO
    } else {
        let excess_service = ServiceCategory::NonPriorityExcess(companion);
        match rates
            .get(excess_service, scope)
            .and_then(|row| row.excess_rate_per_kg)
        {
            Some(rate) => excess_weight_kg * rate,
            None => {
                errors.push(EngineError::ExcessRateNotFound {
                    service: excess_service.to_string(),
                    scope: scope.to_string(),
                });
                Decimal::ZERO
            }
        }
    };

    BaseCostBreakdown {
        tier_cost: entry.base_rate,
        excess_weight_kg,
        excess_cost,
    }
}

fn price_direct_excess(
    service: ServiceCategory,
    scope: RateScope,
    effective_weight_kg: Decimal,
    rates: &RateTable,
    errors: &mut Vec<EngineError>,
) -> BaseCostBreakdown {
    let rate = rates
        .get(service, scope)
        .and_then(|row| row.excess_rate_per_kg);
    let Some(rate) = rate else {
        errors.push(EngineError::RateNotFound {
            service: service.to_string(),
            scope: scope.to_string(),
        });
        return BaseCostBreakdown::default();
    };

    let excess_weight_kg = effective_weight_kg.ceil();
    BaseCostBreakdown {
        tier_cost: Decimal::ZERO,
        excess_weight_kg,
        excess_cost: excess_weight_kg * rate,
    }
}
