//! Service selection and nominal band validation.
//!
//! Exactly one of the four service-category fields of the input must be set.
//! Once a service is chosen, its nominal weight band is checked; a weight
//! outside the band only produces a warning because the selected rate is
//! still applied.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult, TariffWarning};
use crate::models::{AuditStep, PostalCostInput, ServiceCategory};

/// The selected service and any band warning.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// The single active service.
    pub service: ServiceCategory,
    /// Present when the weight lies outside the service's nominal band.
    pub warning: Option<TariffWarning>,
    /// The audit step recording the selection.
    pub audit_step: AuditStep,
}

/// Every service category set on the input, in field order.
pub fn selected_services(input: &PostalCostInput) -> Vec<ServiceCategory> {
    [
        input.base_goods.map(ServiceCategory::BaseGoods),
        input
            .non_priority_excess
            .map(ServiceCategory::NonPriorityExcess),
        input.urban_priority.map(ServiceCategory::UrbanPriority),
        input
            .intercity_priority
            .map(ServiceCategory::IntercityPriority),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Selects the single active service and checks the effective weight
/// against its band.
///
/// # Errors
///
/// Returns [`EngineError::NoServiceSelected`] or
/// [`EngineError::MultipleServicesSelected`] when the input does not name
/// exactly one service.
pub fn select_service(
    input: &PostalCostInput,
    effective_weight_kg: Decimal,
    rates: &RateTable,
    step_number: u32,
) -> EngineResult<SelectionResult> {
    let services = selected_services(input);
    let service = match services.as_slice() {
        [] => return Err(EngineError::NoServiceSelected),
        [service] => *service,
        many => {
            return Err(EngineError::MultipleServicesSelected { count: many.len() });
        }
    };

    let band = rates.band(service);
    let warning = band
        .filter(|band| !band.contains(effective_weight_kg))
        .map(|band| TariffWarning::WeightOutsideBand {
            service: service.to_string(),
            weight_kg: effective_weight_kg,
            band: band.to_string(),
        });

    let reasoning = match (band, &warning) {
        (None, _) => format!("Selected '{}'; it has no published band", service),
        (Some(band), Some(_)) => format!(
            "Selected '{}'; weight {} kg is outside its band {}",
            service, effective_weight_kg, band
        ),
        (Some(band), None) => format!(
            "Selected '{}'; weight {} kg is within its band {}",
            service, effective_weight_kg, band
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "service_selection".to_string(),
        rule_name: "Service Selection".to_string(),
        input: serde_json::json!({
            "effective_weight_kg": effective_weight_kg.to_string()
        }),
        output: serde_json::json!({
            "service": service,
            "band": band.map(|b| b.to_string()),
            "within_band": warning.is_none()
        }),
        reasoning,
    };

    Ok(SelectionResult {
        service,
        warning,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, synthetic_rates};
    use crate::models::{
        BaseGoodsService, CityTier, ExcessService, IntercityPriorityService, UrbanPriorityService,
    };

    fn input() -> PostalCostInput {
        PostalCostInput::new("Tehran", "Tehran", CityTier::MetropolisPrimary, dec("1"))
    }

    #[test]
    fn test_no_service_selected() {
        let result = select_service(&input(), dec("1"), &synthetic_rates(), 1);
        assert!(matches!(result, Err(EngineError::NoServiceSelected)));
    }

    #[test]
    fn test_multiple_services_selected() {
        let input = input()
            .with_base_goods(BaseGoodsService::NonRegisteredUpTo1Kg)
            .with_urban_priority(UrbanPriorityService::SameDayParcel);
        let result = select_service(&input, dec("1"), &synthetic_rates(), 1);
        assert!(matches!(
            result,
            Err(EngineError::MultipleServicesSelected { count: 2 })
        ));
    }

    #[test]
    fn test_all_four_selected_reports_count() {
        let input = input()
            .with_base_goods(BaseGoodsService::NonRegisteredUpTo1Kg)
            .with_non_priority_excess(ExcessService::MBagPerKg)
            .with_urban_priority(UrbanPriorityService::SameDayParcel)
            .with_intercity_priority(IntercityPriorityService::ExpressParcel);
        let result = select_service(&input, dec("1"), &synthetic_rates(), 1);
        assert!(matches!(
            result,
            Err(EngineError::MultipleServicesSelected { count: 4 })
        ));
    }

    #[test]
    fn test_single_service_within_band() {
        let input = input().with_base_goods(BaseGoodsService::NonRegisteredUpTo1Kg);
        let result = select_service(&input, dec("0.8"), &synthetic_rates(), 3).unwrap();
        assert_eq!(
            result.service,
            ServiceCategory::BaseGoods(BaseGoodsService::NonRegisteredUpTo1Kg)
        );
        assert!(result.warning.is_none());
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_band_upper_bound_is_inclusive() {
        let input = input().with_base_goods(BaseGoodsService::NonRegisteredUpTo1Kg);
        let result = select_service(&input, dec("1"), &synthetic_rates(), 1).unwrap();
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_weight_above_band_warns() {
        let input = input().with_base_goods(BaseGoodsService::RegisteredParcel3To5Kg);
        let result = select_service(&input, dec("7"), &synthetic_rates(), 1).unwrap();
        match result.warning {
            Some(TariffWarning::WeightOutsideBand { band, weight_kg, .. }) => {
                assert_eq!(band, "(3, 5] kg");
                assert_eq!(weight_kg, dec("7"));
            }
            other => panic!("Expected WeightOutsideBand, got {:?}", other),
        }
    }

    #[test]
    fn test_weight_below_band_warns() {
        let input = input().with_base_goods(BaseGoodsService::RegisteredParcel3To5Kg);
        let result = select_service(&input, dec("2"), &synthetic_rates(), 1).unwrap();
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_band_lower_bound_is_exclusive() {
        let input = input().with_base_goods(BaseGoodsService::RegisteredParcel3To5Kg);
        let result = select_service(&input, dec("3"), &synthetic_rates(), 1).unwrap();
        assert!(result.warning.is_some());
    }

    #[test]
    fn test_unbounded_excess_service_never_warns() {
        let input = input().with_non_priority_excess(ExcessService::MBagPerKg);
        let result = select_service(&input, dec("40"), &synthetic_rates(), 1).unwrap();
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_unpriced_service_has_no_band_warning() {
        let input = input().with_urban_priority(UrbanPriorityService::NextDayParcel);
        let result = select_service(&input, dec("9"), &synthetic_rates(), 1).unwrap();
        assert!(result.warning.is_none());
        assert!(result.audit_step.output["band"].is_null());
    }
}
