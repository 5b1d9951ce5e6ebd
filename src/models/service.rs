//! Service categories and subtypes of the domestic tariff.
//!
//! Every subtype is a plain identity; the numbers that price it live in the
//! [`RateTable`](crate::config::RateTable).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-priority goods, priced by provincial relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseGoodsService {
    /// Non-registered item up to 1 kg.
    #[serde(rename = "non_registered_up_to_1kg")]
    NonRegisteredUpTo1Kg,
    /// Non-registered item over 1 kg up to 2 kg.
    #[serde(rename = "non_registered_1_to_2kg")]
    NonRegistered1To2Kg,
    /// Registered item up to 500 g.
    #[serde(rename = "registered_up_to_500g")]
    RegisteredUpTo500G,
    /// Registered item over 500 g up to 1 kg.
    #[serde(rename = "registered_500g_to_1kg")]
    Registered500GTo1Kg,
    /// Registered parcel over 1 kg up to 3 kg.
    #[serde(rename = "registered_parcel_1_to_3kg")]
    RegisteredParcel1To3Kg,
    /// Registered parcel over 3 kg up to 5 kg; heavier parcels pay excess.
    #[serde(rename = "registered_parcel_3_to_5kg")]
    RegisteredParcel3To5Kg,
    /// Printed-matter bag up to 5 kg; heavier bags pay excess.
    #[serde(rename = "m_bag_up_to_5kg")]
    MBagUpTo5Kg,
}

impl BaseGoodsService {
    /// All subtypes in tariff order.
    pub const ALL: [BaseGoodsService; 7] = [
        Self::NonRegisteredUpTo1Kg,
        Self::NonRegistered1To2Kg,
        Self::RegisteredUpTo500G,
        Self::Registered500GTo1Kg,
        Self::RegisteredParcel1To3Kg,
        Self::RegisteredParcel3To5Kg,
        Self::MBagUpTo5Kg,
    ];

    /// Returns the wire code of the subtype.
    pub fn code(self) -> &'static str {
        match self {
            Self::NonRegisteredUpTo1Kg => "non_registered_up_to_1kg",
            Self::NonRegistered1To2Kg => "non_registered_1_to_2kg",
            Self::RegisteredUpTo500G => "registered_up_to_500g",
            Self::Registered500GTo1Kg => "registered_500g_to_1kg",
            Self::RegisteredParcel1To3Kg => "registered_parcel_1_to_3kg",
            Self::RegisteredParcel3To5Kg => "registered_parcel_3_to_5kg",
            Self::MBagUpTo5Kg => "m_bag_up_to_5kg",
        }
    }

    /// Returns the excess service charged for weight above this band, if any.
    pub fn excess_companion(self) -> Option<ExcessService> {
        match self {
            Self::RegisteredParcel3To5Kg => Some(ExcessService::RegisteredParcelPerKg),
            Self::MBagUpTo5Kg => Some(ExcessService::MBagPerKg),
            _ => None,
        }
    }
}

/// Per-kilogram excess rates for the largest base goods bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExcessService {
    /// Excess for registered parcels above 5 kg.
    #[serde(rename = "registered_parcel_per_kg")]
    RegisteredParcelPerKg,
    /// Excess for printed-matter bags above 5 kg.
    #[serde(rename = "m_bag_per_kg")]
    MBagPerKg,
}

impl ExcessService {
    /// All subtypes in tariff order.
    pub const ALL: [ExcessService; 2] = [Self::RegisteredParcelPerKg, Self::MBagPerKg];

    /// Returns the wire code of the subtype.
    pub fn code(self) -> &'static str {
        match self {
            Self::RegisteredParcelPerKg => "registered_parcel_per_kg",
            Self::MBagPerKg => "m_bag_per_kg",
        }
    }
}

/// Same-city expedited services, priced by destination city tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrbanPriorityService {
    /// Three-hour delivery, envelope.
    ThreeHourEnvelope,
    /// Three-hour delivery, padded envelope up to 1 kg.
    ThreeHourPaddedEnvelope,
    /// Three-hour delivery, parcel up to 1 kg.
    ThreeHourParcel,
    /// Same-day delivery, envelope.
    SameDayEnvelope,
    /// Same-day delivery, padded envelope up to 1 kg.
    SameDayPaddedEnvelope,
    /// Same-day delivery, parcel up to 1 kg.
    SameDayParcel,
    /// Next-day delivery, envelope.
    NextDayEnvelope,
    /// Next-day delivery, padded envelope up to 1 kg.
    NextDayPaddedEnvelope,
    /// Next-day delivery, parcel up to 1 kg.
    NextDayParcel,
}

impl UrbanPriorityService {
    /// All subtypes in tariff order.
    pub const ALL: [UrbanPriorityService; 9] = [
        Self::ThreeHourEnvelope,
        Self::ThreeHourPaddedEnvelope,
        Self::ThreeHourParcel,
        Self::SameDayEnvelope,
        Self::SameDayPaddedEnvelope,
        Self::SameDayParcel,
        Self::NextDayEnvelope,
        Self::NextDayPaddedEnvelope,
        Self::NextDayParcel,
    ];

    /// Returns the wire code of the subtype.
    pub fn code(self) -> &'static str {
        match self {
            Self::ThreeHourEnvelope => "three_hour_envelope",
            Self::ThreeHourPaddedEnvelope => "three_hour_padded_envelope",
            Self::ThreeHourParcel => "three_hour_parcel",
            Self::SameDayEnvelope => "same_day_envelope",
            Self::SameDayPaddedEnvelope => "same_day_padded_envelope",
            Self::SameDayParcel => "same_day_parcel",
            Self::NextDayEnvelope => "next_day_envelope",
            Self::NextDayPaddedEnvelope => "next_day_padded_envelope",
            Self::NextDayParcel => "next_day_parcel",
        }
    }
}

/// Cross-city expedited services, priced by provincial relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntercityPriorityService {
    /// Same-day delivery, envelope.
    #[serde(rename = "same_day_envelope")]
    SameDayEnvelope,
    /// Same-day delivery, padded envelope.
    #[serde(rename = "same_day_padded_envelope")]
    SameDayPaddedEnvelope,
    /// Same-day delivery, parcel.
    #[serde(rename = "same_day_parcel")]
    SameDayParcel,
    /// D+1 delivery, envelope.
    #[serde(rename = "next_day_envelope")]
    NextDayEnvelope,
    /// D+1 delivery, padded envelope.
    #[serde(rename = "next_day_padded_envelope")]
    NextDayPaddedEnvelope,
    /// D+1 delivery, parcel.
    #[serde(rename = "next_day_parcel")]
    NextDayParcel,
    /// D+2 express, envelope.
    #[serde(rename = "express_envelope")]
    ExpressEnvelope,
    /// D+2 express, parcel.
    #[serde(rename = "express_parcel")]
    ExpressParcel,
    /// Priority (pishtaz) envelope up to 500 g.
    #[serde(rename = "priority_envelope_up_to_500g")]
    PriorityEnvelopeUpTo500G,
    /// Priority (pishtaz) padded envelope up to 1 kg.
    #[serde(rename = "priority_padded_envelope")]
    PriorityPaddedEnvelope,
    /// Priority (pishtaz) parcel up to 1 kg.
    #[serde(rename = "priority_parcel")]
    PriorityParcel,
}

impl IntercityPriorityService {
    /// All subtypes in tariff order.
    pub const ALL: [IntercityPriorityService; 11] = [
        Self::SameDayEnvelope,
        Self::SameDayPaddedEnvelope,
        Self::SameDayParcel,
        Self::NextDayEnvelope,
        Self::NextDayPaddedEnvelope,
        Self::NextDayParcel,
        Self::ExpressEnvelope,
        Self::ExpressParcel,
        Self::PriorityEnvelopeUpTo500G,
        Self::PriorityPaddedEnvelope,
        Self::PriorityParcel,
    ];

    /// Returns the wire code of the subtype.
    pub fn code(self) -> &'static str {
        match self {
            Self::SameDayEnvelope => "same_day_envelope",
            Self::SameDayPaddedEnvelope => "same_day_padded_envelope",
            Self::SameDayParcel => "same_day_parcel",
            Self::NextDayEnvelope => "next_day_envelope",
            Self::NextDayPaddedEnvelope => "next_day_padded_envelope",
            Self::NextDayParcel => "next_day_parcel",
            Self::ExpressEnvelope => "express_envelope",
            Self::ExpressParcel => "express_parcel",
            Self::PriorityEnvelopeUpTo500G => "priority_envelope_up_to_500g",
            Self::PriorityPaddedEnvelope => "priority_padded_envelope",
            Self::PriorityParcel => "priority_parcel",
        }
    }

    /// The subtype whose rate prices this one once its band is exceeded.
    ///
    /// The tariff prices a 500 g priority envelope between 0.5 and 1 kg at the
    /// padded-envelope rate rather than charging excess on the 500 g rate.
    pub fn substitution_companion(self) -> Option<IntercityPriorityService> {
        match self {
            Self::PriorityEnvelopeUpTo500G => Some(Self::PriorityPaddedEnvelope),
            _ => None,
        }
    }

    /// Returns true for the two cheapest priority subtypes, the only ones
    /// that may buy a delivery-time reduction.
    pub fn allows_delivery_time_reduction(self) -> bool {
        matches!(
            self,
            Self::PriorityEnvelopeUpTo500G | Self::PriorityPaddedEnvelope
        )
    }
}

/// The lookup key kind a category's rates are published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Keyed by [`ProvincialStatus`](super::ProvincialStatus).
    Relation,
    /// Keyed by [`CityTier`](super::CityTier).
    CityTier,
}

/// The selected tariff service: a category tag plus its subtype.
///
/// Serialized as a discriminated union:
///
/// ```
/// use postal_tariff::models::{BaseGoodsService, ServiceCategory};
///
/// let service = ServiceCategory::BaseGoods(BaseGoodsService::NonRegisteredUpTo1Kg);
/// let json = serde_json::to_string(&service).unwrap();
/// assert_eq!(json, r#"{"type":"base_goods","subtype":"non_registered_up_to_1kg"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "subtype", rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Non-priority goods.
    BaseGoods(BaseGoodsService),
    /// Per-kilogram non-priority excess.
    NonPriorityExcess(ExcessService),
    /// Same-city expedited.
    UrbanPriority(UrbanPriorityService),
    /// Cross-city expedited.
    IntercityPriority(IntercityPriorityService),
}

impl ServiceCategory {
    /// Returns the category tag.
    pub fn category_code(&self) -> &'static str {
        match self {
            Self::BaseGoods(_) => "base_goods",
            Self::NonPriorityExcess(_) => "non_priority_excess",
            Self::UrbanPriority(_) => "urban_priority",
            Self::IntercityPriority(_) => "intercity_priority",
        }
    }

    /// Returns the subtype code.
    pub fn subtype_code(&self) -> &'static str {
        match self {
            Self::BaseGoods(s) => s.code(),
            Self::NonPriorityExcess(s) => s.code(),
            Self::UrbanPriority(s) => s.code(),
            Self::IntercityPriority(s) => s.code(),
        }
    }

    /// Returns whether rates for this category are keyed by relation or city tier.
    pub fn scope_kind(&self) -> ScopeKind {
        match self {
            Self::UrbanPriority(_) => ScopeKind::CityTier,
            _ => ScopeKind::Relation,
        }
    }

    /// Returns true for the non-priority categories.
    pub fn is_base_category(&self) -> bool {
        matches!(self, Self::BaseGoods(_) | Self::NonPriorityExcess(_))
    }

    /// Every service the tariff knows.
    pub fn all() -> impl Iterator<Item = ServiceCategory> {
        BaseGoodsService::ALL
            .into_iter()
            .map(Self::BaseGoods)
            .chain(ExcessService::ALL.into_iter().map(Self::NonPriorityExcess))
            .chain(UrbanPriorityService::ALL.into_iter().map(Self::UrbanPriority))
            .chain(
                IntercityPriorityService::ALL
                    .into_iter()
                    .map(Self::IntercityPriority),
            )
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category_code(), self.subtype_code())
    }
}
