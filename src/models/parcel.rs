//! Parcel description submitted for pricing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{
    BaseGoodsService, CityTier, ExcessService, IntercityPriorityService, UrbanPriorityService,
};

/// Heaviest parcel the engine will price, in kg.
pub const MAX_WEIGHT_KG: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Longest side the engine will price, in cm.
pub const MAX_SIDE_CM: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// Physical parcel dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in cm.
    pub length_cm: Decimal,
    /// Width in cm.
    pub width_cm: Decimal,
    /// Height in cm.
    pub height_cm: Decimal,
}

impl Dimensions {
    /// Creates dimensions from length, width and height in cm.
    pub fn new(length_cm: Decimal, width_cm: Decimal, height_cm: Decimal) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Returns the volume in cubic centimetres.
    pub fn volume_cm3(&self) -> Decimal {
        self.length_cm * self.width_cm * self.height_cm
    }

    /// Returns true if any side exceeds the matching side of `bounds`.
    pub fn exceeds(&self, bounds: &Dimensions) -> bool {
        self.length_cm > bounds.length_cm
            || self.width_cm > bounds.width_cm
            || self.height_cm > bounds.height_cm
    }
}

/// Days cut from the standard delivery time of a priority service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTimeReduction {
    /// Standard delivery time.
    None,
    /// One day faster.
    OneDay,
    /// Two days faster.
    TwoDays,
}

impl DeliveryTimeReduction {
    /// Converts a day count into a reduction.
    ///
    /// ```
    /// use postal_tariff::models::DeliveryTimeReduction;
    ///
    /// assert_eq!(DeliveryTimeReduction::from_days(2).unwrap(), DeliveryTimeReduction::TwoDays);
    /// assert!(DeliveryTimeReduction::from_days(3).is_err());
    /// ```
    pub fn from_days(days: u8) -> EngineResult<Self> {
        match days {
            0 => Ok(Self::None),
            1 => Ok(Self::OneDay),
            2 => Ok(Self::TwoDays),
            other => Err(EngineError::InvalidInput {
                field: "delivery_time_reduction_days".to_string(),
                message: format!("must be 0, 1 or 2, got {}", other),
            }),
        }
    }
}

/// A pricing request for one parcel.
///
/// Exactly one of the four service fields must be set; the calculation
/// reports anything else as a selection error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCostInput {
    /// Origin region (province) name.
    pub origin_region: String,
    /// Destination region (province) name.
    pub destination_region: String,
    /// Tier of the destination city.
    pub destination_city_tier: CityTier,
    /// Tier of the sender's city, used for the collection fee.
    #[serde(default)]
    pub origin_city_tier: Option<CityTier>,
    /// Actual weight in kg.
    pub weight_kg: Decimal,
    /// Optional physical dimensions.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Base goods selection.
    #[serde(default)]
    pub base_goods: Option<BaseGoodsService>,
    /// Direct non-priority excess selection.
    #[serde(default)]
    pub non_priority_excess: Option<ExcessService>,
    /// Urban priority selection.
    #[serde(default)]
    pub urban_priority: Option<UrbanPriorityService>,
    /// Intercity priority selection.
    #[serde(default)]
    pub intercity_priority: Option<IntercityPriorityService>,
    /// Contents are fragile or liquid.
    #[serde(default)]
    pub fragile_or_liquid: bool,
    /// Non-standard packaging without proper wrap.
    #[serde(default)]
    pub non_standard_packaging: bool,
    /// Collect from the sender's location.
    #[serde(default)]
    pub collect_from_sender: bool,
    /// Destination is a southern island (air/sea leg).
    #[serde(default)]
    pub southern_island_destination: bool,
    /// Days of delivery-time reduction (0, 1 or 2).
    #[serde(default)]
    pub delivery_time_reduction_days: u8,
}

impl PostalCostInput {
    /// Creates a request with no service selected and no accessorial flags.
    pub fn new(
        origin_region: impl Into<String>,
        destination_region: impl Into<String>,
        destination_city_tier: CityTier,
        weight_kg: Decimal,
    ) -> Self {
        Self {
            origin_region: origin_region.into(),
            destination_region: destination_region.into(),
            destination_city_tier,
            origin_city_tier: None,
            weight_kg,
            dimensions: None,
            base_goods: None,
            non_priority_excess: None,
            urban_priority: None,
            intercity_priority: None,
            fragile_or_liquid: false,
            non_standard_packaging: false,
            collect_from_sender: false,
            southern_island_destination: false,
            delivery_time_reduction_days: 0,
        }
    }

    /// Selects a base goods service.
    pub fn with_base_goods(mut self, service: BaseGoodsService) -> Self {
        self.base_goods = Some(service);
        self
    }

    /// Selects a non-priority excess service directly.
    pub fn with_non_priority_excess(mut self, service: ExcessService) -> Self {
        self.non_priority_excess = Some(service);
        self
    }

    /// Selects an urban priority service.
    pub fn with_urban_priority(mut self, service: UrbanPriorityService) -> Self {
        self.urban_priority = Some(service);
        self
    }

    /// Selects an intercity priority service.
    pub fn with_intercity_priority(mut self, service: IntercityPriorityService) -> Self {
        self.intercity_priority = Some(service);
        self
    }

    /// Sets the parcel dimensions.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Sets the sender's city tier.
    pub fn with_origin_city_tier(mut self, tier: CityTier) -> Self {
        self.origin_city_tier = Some(tier);
        self
    }

    /// Returns the delivery-time reduction requested.
    pub fn delivery_time_reduction(&self) -> EngineResult<DeliveryTimeReduction> {
        DeliveryTimeReduction::from_days(self.delivery_time_reduction_days)
    }

    /// Checks the basic type constraints of the request.
    ///
    /// Only malformed values fail here; service selection and region lookups
    /// are reported on the calculation output instead.
    pub fn validate(&self) -> EngineResult<()> {
        if self.weight_kg <= Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "weight_kg".to_string(),
                message: format!("must be greater than zero, got {}", self.weight_kg),
            });
        }
        if self.weight_kg > MAX_WEIGHT_KG {
            return Err(EngineError::InvalidInput {
                field: "weight_kg".to_string(),
                message: format!("must not exceed {} kg, got {}", MAX_WEIGHT_KG, self.weight_kg),
            });
        }

        if let Some(dimensions) = &self.dimensions {
            let sides = [
                ("dimensions.length_cm", dimensions.length_cm),
                ("dimensions.width_cm", dimensions.width_cm),
                ("dimensions.height_cm", dimensions.height_cm),
            ];
            for (field, value) in sides {
                if value <= Decimal::ZERO {
                    return Err(EngineError::InvalidInput {
                        field: field.to_string(),
                        message: format!("must be greater than zero, got {}", value),
                    });
                }
                if value > MAX_SIDE_CM {
                    return Err(EngineError::InvalidInput {
                        field: field.to_string(),
                        message: format!("must not exceed {} cm, got {}", MAX_SIDE_CM, value),
                    });
                }
            }
        }

        self.delivery_time_reduction()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_input() {
        let json = r#"{
            "origin_region": "Tehran",
            "destination_region": "Qom",
            "destination_city_tier": "provincial_capital",
            "weight_kg": "0.8",
            "base_goods": "non_registered_up_to_1kg"
        }"#;

        let input: PostalCostInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.origin_region, "Tehran");
        assert_eq!(input.weight_kg, dec("0.8"));
        assert_eq!(
            input.base_goods,
            Some(BaseGoodsService::NonRegisteredUpTo1Kg)
        );
        assert!(input.dimensions.is_none());
        assert!(!input.fragile_or_liquid);
        assert_eq!(input.delivery_time_reduction_days, 0);
    }

    #[test]
    fn test_deserialize_numeric_weight() {
        let json = r#"{
            "origin_region": "Tehran",
            "destination_region": "Tehran",
            "destination_city_tier": "metropolis_primary",
            "weight_kg": 2.5,
            "dimensions": { "length_cm": 40, "width_cm": 30, "height_cm": 20 },
            "urban_priority": "same_day_parcel",
            "fragile_or_liquid": true
        }"#;

        let input: PostalCostInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.weight_kg, dec("2.5"));
        assert_eq!(input.dimensions.unwrap().volume_cm3(), dec("24000"));
        assert!(input.fragile_or_liquid);
    }

    #[test]
    fn test_validate_rejects_non_positive_weight() {
        let input = PostalCostInput::new("Tehran", "Qom", CityTier::County, Decimal::ZERO);
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "weight_kg"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let input = PostalCostInput::new("Tehran", "Qom", CityTier::County, dec("1"))
            .with_dimensions(Dimensions::new(dec("10"), Decimal::ZERO, dec("5")));
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "dimensions.width_cm")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_weight_above_limit() {
        let input = PostalCostInput::new(
            "Tehran",
            "Qom",
            CityTier::County,
            dec("10000000000000000000000000"),
        );
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "weight_kg"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_weight_at_limit() {
        let input = PostalCostInput::new("Tehran", "Qom", CityTier::County, MAX_WEIGHT_KG);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_side_above_limit() {
        let huge = dec("100000000000000");
        let input = PostalCostInput::new("Tehran", "Qom", CityTier::County, dec("1"))
            .with_dimensions(Dimensions::new(dec("10"), dec("10"), huge));
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "dimensions.height_cm")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_three_day_reduction() {
        let mut input = PostalCostInput::new("Tehran", "Qom", CityTier::County, dec("1"));
        input.delivery_time_reduction_days = 3;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_request_without_service() {
        // Selection is checked by the calculation, not here.
        let input = PostalCostInput::new("Tehran", "Qom", CityTier::County, dec("1"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_dimensions_exceed_any_side() {
        let standard = Dimensions::new(dec("35"), dec("25"), dec("18"));
        assert!(!Dimensions::new(dec("35"), dec("25"), dec("18")).exceeds(&standard));
        assert!(Dimensions::new(dec("36"), dec("10"), dec("10")).exceeds(&standard));
        assert!(Dimensions::new(dec("10"), dec("10"), dec("18.5")).exceeds(&standard));
    }
}
