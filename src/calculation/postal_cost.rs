//! The postal cost entry point.
//!
//! [`compute_postal_cost`] runs the pipeline in a fixed order:
//!
//! 1. Region relation
//! 2. Chargeable weight
//! 3. Service selection and band check
//! 4. Base service cost
//! 5. Independent accessorial surcharges
//! 6. Metro distribution surcharge on the running subtotal
//!
//! Each stage returns its own result; this module is the only place they are
//! combined, so the order in which errors, warnings and audit steps appear on
//! the output is decided here.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AdditionalCharges, BaseCostBreakdown, PostalCostInput, PostalCostOutput};

use super::base_cost::calculate_base_cost;
use super::region_relation::resolve_relation;
use super::service_selection::select_service;
use super::surcharges::calculate_surcharges;
use super::volumetric_weight::normalize_weight;

/// Rounds a currency amount to whole units, halves away from zero.
///
/// # Examples
///
/// ```
/// use postal_tariff::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(1234565, 1)), Decimal::new(123457, 0));
/// assert_eq!(round_currency(Decimal::new(1234564, 1)), Decimal::new(123456, 0));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the cost of shipping one parcel.
///
/// Domain conditions (no or several services selected, unknown regions,
/// missing rate rows) never fail the call: they are recorded in
/// `errors`/`warnings` of the returned output, and a non-empty `errors`
/// means `total_cost` must not be quoted.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the input breaks a basic type
/// constraint: a non-positive weight or dimension, or a delivery-time
/// reduction of more than two days.
///
/// # Examples
///
/// ```no_run
/// use postal_tariff::calculation::compute_postal_cost;
/// use postal_tariff::config::ConfigLoader;
/// use postal_tariff::models::{BaseGoodsService, CityTier, PostalCostInput};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config/iran_post").unwrap();
/// let input = PostalCostInput::new("Tehran", "Tehran", CityTier::County, Decimal::new(8, 1))
///     .with_base_goods(BaseGoodsService::NonRegisteredUpTo1Kg);
///
/// let output = compute_postal_cost(&input, &config).unwrap();
/// assert!(output.is_authoritative());
/// assert_eq!(output.total_cost, Decimal::new(58000, 0));
/// ```
pub fn compute_postal_cost(
    input: &PostalCostInput,
    config: &TariffConfig,
) -> EngineResult<PostalCostOutput> {
    input.validate()?;
    let reduction = input.delivery_time_reduction()?;

    let mut errors: Vec<EngineError> = Vec::new();
    let mut warnings = Vec::new();
    let mut audit_trace = Vec::new();
    let mut step_number = 1;

    // Step 1: Region relation
    let relation = match resolve_relation(
        config.regions(),
        &input.origin_region,
        &input.destination_region,
        step_number,
    ) {
        Ok(result) => {
            audit_trace.push(result.audit_step);
            step_number += 1;
            Some(result.relation)
        }
        Err(error) => {
            errors.push(error);
            None
        }
    };

    // Step 2: Chargeable weight
    let weight = normalize_weight(
        input.weight_kg,
        input.dimensions.as_ref(),
        config.surcharges().volumetric_divisor,
        step_number,
    );
    step_number += 1;
    warnings.extend(weight.warning);
    audit_trace.push(weight.audit_step);
    let effective_weight_kg = weight.effective_weight_kg;

    // Step 3: Service selection
    let selection = match select_service(input, effective_weight_kg, config.rates(), step_number) {
        Ok(selection) => {
            step_number += 1;
            warnings.extend(selection.warning);
            audit_trace.push(selection.audit_step);
            Some(selection.service)
        }
        Err(error) => {
            errors.push(error);
            None
        }
    };

    let mut base_service_cost = Decimal::ZERO;
    let mut base_breakdown = BaseCostBreakdown::default();
    let mut additional_charges = AdditionalCharges::default();

    if let Some(service) = selection {
        // Step 4: Base service cost
        let base = calculate_base_cost(
            service,
            relation,
            input.destination_city_tier,
            effective_weight_kg,
            config.rates(),
            step_number,
        );
        step_number += 1;
        errors.extend(base.errors);
        warnings.extend(base.warnings);
        audit_trace.push(base.audit_step);
        base_service_cost = base.base_service_cost;
        base_breakdown = base.breakdown;

        // Steps 5 and 6: Surcharges, metro last
        if base_service_cost > Decimal::ZERO {
            let surcharges = calculate_surcharges(
                input,
                service,
                base_service_cost,
                effective_weight_kg,
                reduction,
                config.surcharges(),
                step_number,
            );
            warnings.extend(surcharges.warnings);
            audit_trace.extend(surcharges.audit_steps);
            additional_charges = surcharges.charges;
        } else {
            errors.push(EngineError::NoMatchingRate {
                service: service.to_string(),
            });
        }
    }

    let total_cost = round_currency(base_service_cost + additional_charges.total());

    for error in &errors {
        warn!(error = %error, "Recorded calculation error");
    }
    debug!(
        origin = %input.origin_region,
        destination = %input.destination_region,
        service = ?selection,
        relation = ?relation,
        effective_weight_kg = %effective_weight_kg,
        base_service_cost = %base_service_cost,
        total_cost = %total_cost,
        errors = errors.len(),
        warnings = warnings.len(),
        "Postal cost computed"
    );

    Ok(PostalCostOutput {
        service: selection,
        relation,
        base_service_cost,
        base_breakdown,
        volumetric_weight_kg: weight.volumetric_weight_kg,
        effective_weight_kg,
        additional_charges,
        total_cost,
        errors: errors.iter().map(ToString::to_string).collect(),
        warnings: warnings.iter().map(ToString::to_string).collect(),
        audit_trace,
    })
}
