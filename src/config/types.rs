//! Configuration types for the postal tariff.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML tariff files, and the assembled [`TariffConfig`] the calculation
//! consumes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CityTier, DeliveryTimeReduction, Dimensions, ProvincialStatus, ServiceCategory};

use super::rate_table::RateTable;
use super::regions::RegionGraph;

/// Metadata about the tariff schedule (`tariff.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffMetadata {
    /// Short identifying code of the schedule.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Schedule version label.
    pub version: String,
    /// Date from which the schedule applies.
    pub effective_date: NaiveDate,
    /// ISO currency code of every amount.
    pub currency: String,
}

/// `regions.yaml`: region name to declared neighbours.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsFile {
    /// Map of region name to the regions listed as adjacent to it.
    pub regions: BTreeMap<String, Vec<String>>,
}

/// `rates.yaml`: every priced service.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesFile {
    /// Service blocks in tariff order.
    pub services: Vec<ServiceRates>,
}

/// One service block of `rates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRates {
    /// The service being priced.
    pub service: ServiceCategory,
    /// Exclusive lower bound of the nominal band.
    #[serde(default)]
    pub min_weight_kg: Decimal,
    /// Inclusive upper bound of the nominal band.
    #[serde(default)]
    pub max_weight_kg: Option<Decimal>,
    /// One row per relation or city tier.
    pub rates: Vec<RateRow>,
}

/// One row of a service block. Exactly one of `relation`/`city_tier` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRow {
    /// Relation key.
    #[serde(default)]
    pub relation: Option<ProvincialStatus>,
    /// City tier key.
    #[serde(default)]
    pub city_tier: Option<CityTier>,
    /// Price of the band.
    #[serde(default)]
    pub base_rate: Decimal,
    /// Price per started kilogram above the band.
    #[serde(default)]
    pub excess_rate: Option<Decimal>,
}

/// Flat sender-collection fee per city tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionFees {
    /// Fee in a primary metropolis.
    pub metropolis_primary: Decimal,
    /// Fee in other metropolises.
    pub metropolis_other: Decimal,
    /// Fee in provincial capitals.
    pub provincial_capital: Decimal,
    /// Fee in county towns.
    pub county: Decimal,
}

impl CollectionFees {
    /// Returns the fee for a tier.
    pub fn fee_for(&self, tier: CityTier) -> Decimal {
        match tier {
            CityTier::MetropolisPrimary => self.metropolis_primary,
            CityTier::MetropolisOther => self.metropolis_other,
            CityTier::ProvincialCapital => self.provincial_capital,
            CityTier::County => self.county,
        }
    }
}

/// Per-kilogram rates for the southern-island air/sea leg.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IslandRates {
    /// Rate for base (non-priority) categories.
    pub base_rate_per_kg: Decimal,
    /// Rate for priority categories.
    pub priority_rate_per_kg: Decimal,
}

/// Percentages charged for a delivery-time reduction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryReductionRates {
    /// Fraction of base cost for one day faster.
    pub one_day_rate: Decimal,
    /// Fraction of base cost for two days faster.
    pub two_days_rate: Decimal,
}

impl DeliveryReductionRates {
    /// Returns the fraction charged for a reduction.
    pub fn rate_for(&self, reduction: DeliveryTimeReduction) -> Decimal {
        match reduction {
            DeliveryTimeReduction::None => Decimal::ZERO,
            DeliveryTimeReduction::OneDay => self.one_day_rate,
            DeliveryTimeReduction::TwoDays => self.two_days_rate,
        }
    }
}

/// Metro distribution surcharge settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetroDistribution {
    /// Regions whose destinations always pay the primary rate.
    pub capital_regions: Vec<String>,
    /// Fraction for capital-metro destinations.
    pub primary_rate: Decimal,
    /// Fraction for other metropolis destinations.
    pub other_rate: Decimal,
}

/// Accessorial surcharge schedule (`surcharges.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SurchargeConfig {
    /// Divisor turning cm³ into volumetric kg.
    pub volumetric_divisor: Decimal,
    /// Fraction of base cost for fragile or liquid contents.
    pub fragile_liquid_rate: Decimal,
    /// Fraction of base cost for unwrapped non-standard packaging.
    pub non_standard_packaging_rate: Decimal,
    /// Fraction of base cost for oversized parcels.
    pub non_standard_dimension_rate: Decimal,
    /// Largest parcel that is not oversized.
    pub standard_dimensions: Dimensions,
    /// Sender-collection fees.
    pub collection_fees: CollectionFees,
    /// Island air/sea rates.
    pub island: IslandRates,
    /// Delivery-time reduction percentages.
    pub delivery_time_reduction: DeliveryReductionRates,
    /// Metro distribution settings.
    pub metro_distribution: MetroDistribution,
}

impl SurchargeConfig {
    /// Every configured fraction and amount, labelled for validation messages.
    pub(crate) fn labelled_amounts(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("fragile_liquid_rate", self.fragile_liquid_rate),
            ("non_standard_packaging_rate", self.non_standard_packaging_rate),
            ("non_standard_dimension_rate", self.non_standard_dimension_rate),
            ("collection_fees.metropolis_primary", self.collection_fees.metropolis_primary),
            ("collection_fees.metropolis_other", self.collection_fees.metropolis_other),
            ("collection_fees.provincial_capital", self.collection_fees.provincial_capital),
            ("collection_fees.county", self.collection_fees.county),
            ("island.base_rate_per_kg", self.island.base_rate_per_kg),
            ("island.priority_rate_per_kg", self.island.priority_rate_per_kg),
            ("delivery_time_reduction.one_day_rate", self.delivery_time_reduction.one_day_rate),
            ("delivery_time_reduction.two_days_rate", self.delivery_time_reduction.two_days_rate),
            ("metro_distribution.primary_rate", self.metro_distribution.primary_rate),
            ("metro_distribution.other_rate", self.metro_distribution.other_rate),
        ]
    }
}

/// The complete tariff loaded from YAML files.
///
/// Immutable once built; share it behind an `Arc` and swap the whole value
/// to change tariffs.
#[derive(Debug, Clone)]
pub struct TariffConfig {
    metadata: TariffMetadata,
    regions: RegionGraph,
    rates: RateTable,
    surcharges: SurchargeConfig,
}

impl TariffConfig {
    /// Creates a TariffConfig from its component parts.
    pub fn new(
        metadata: TariffMetadata,
        regions: RegionGraph,
        rates: RateTable,
        surcharges: SurchargeConfig,
    ) -> Self {
        Self {
            metadata,
            regions,
            rates,
            surcharges,
        }
    }

    /// Returns the tariff metadata.
    pub fn metadata(&self) -> &TariffMetadata {
        &self.metadata
    }

    /// Returns the region adjacency graph.
    pub fn regions(&self) -> &RegionGraph {
        &self.regions
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the surcharge schedule.
    pub fn surcharges(&self) -> &SurchargeConfig {
        &self.surcharges
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
    fn test_rate_row_defaults() {
        let row: RateRow = serde_yaml::from_str("{ relation: intra_provincial, excess_rate: 36000 }")
            .unwrap();
        assert_eq!(row.relation, Some(ProvincialStatus::IntraProvincial));
        assert_eq!(row.city_tier, None);
        assert_eq!(row.base_rate, Decimal::ZERO);
        assert_eq!(row.excess_rate, Some(dec("36000")));
    }

    #[test]
    fn test_service_block_parses_band() {
        let yaml = r#"
service: { type: base_goods, subtype: registered_parcel_3_to_5kg }
min_weight_kg: 3
max_weight_kg: 5
rates:
  - { relation: intra_provincial, base_rate: 285000 }
"#;
        let block: ServiceRates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(block.min_weight_kg, dec("3"));
        assert_eq!(block.max_weight_kg, Some(dec("5")));
        assert_eq!(block.rates.len(), 1);
        assert_eq!(block.rates[0].base_rate, dec("285000"));
    }

    #[test]
    fn test_collection_fee_per_tier() {
        let fees = CollectionFees {
            metropolis_primary: dec("4"),
            metropolis_other: dec("3"),
            provincial_capital: dec("2"),
            county: dec("1"),
        };
        assert_eq!(fees.fee_for(CityTier::MetropolisPrimary), dec("4"));
        assert_eq!(fees.fee_for(CityTier::County), dec("1"));
    }

    #[test]
    fn test_reduction_rate_for_none_is_zero() {
        let rates = DeliveryReductionRates {
            one_day_rate: dec("0.30"),
            two_days_rate: dec("0.80"),
        };
        assert_eq!(rates.rate_for(DeliveryTimeReduction::None), Decimal::ZERO);
        assert_eq!(rates.rate_for(DeliveryTimeReduction::OneDay), dec("0.30"));
        assert_eq!(rates.rate_for(DeliveryTimeReduction::TwoDays), dec("0.80"));
    }
}
