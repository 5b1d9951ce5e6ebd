//! Small synthetic tariff shared by the calculation unit tests.
//!
//! Regions: Tehran and Alborz list each other; Tehran lists Qom but Qom lists
//! nobody, so Tehran -> Qom is adjacent while Qom -> Tehran is not; Fars has
//! no neighbours.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{
    CollectionFees, DeliveryReductionRates, IslandRates, MetroDistribution, RateScope, RateTable,
    RegionGraph, SurchargeConfig, TariffConfig, TariffMetadata, WeightBand,
};
use crate::models::{
    BaseGoodsService, CityTier, Dimensions, ExcessService, IntercityPriorityService,
    ProvincialStatus, ServiceCategory, UrbanPriorityService,
};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn by_relation(rates: [(&str, Option<&str>); 3]) -> Vec<(RateScope, Decimal, Option<Decimal>)> {
    ProvincialStatus::ALL
        .into_iter()
        .zip(rates)
        .map(|(relation, (base, excess))| (RateScope::Relation(relation), dec(base), excess.map(dec)))
        .collect()
}

fn by_tier(rates: &[(CityTier, &str, Option<&str>)]) -> Vec<(RateScope, Decimal, Option<Decimal>)> {
    rates
        .iter()
        .map(|(tier, base, excess)| (RateScope::CityTier(*tier), dec(base), excess.map(dec)))
        .collect()
}

pub(crate) fn synthetic_rates() -> RateTable {
    let mut table = RateTable::new();

    table
        .add_service(
            ServiceCategory::BaseGoods(BaseGoodsService::NonRegisteredUpTo1Kg),
            WeightBand::up_to(dec("1")),
            by_relation([("58000", None), ("96500", None), ("115000", None)]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::BaseGoods(BaseGoodsService::RegisteredParcel3To5Kg),
            WeightBand::new(dec("3"), Some(dec("5"))),
            by_relation([("285000", None), ("362000", None), ("431000", None)]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::BaseGoods(BaseGoodsService::MBagUpTo5Kg),
            WeightBand::up_to(dec("5")),
            by_relation([("154000", None), ("198000", None), ("236000", None)]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::NonPriorityExcess(ExcessService::RegisteredParcelPerKg),
            WeightBand::unbounded(),
            vec![
                (
                    RateScope::Relation(ProvincialStatus::IntraProvincial),
                    Decimal::ZERO,
                    Some(dec("36000")),
                ),
                (
                    RateScope::Relation(ProvincialStatus::AdjacentInterProvincial),
                    Decimal::ZERO,
                    Some(dec("47000")),
                ),
            ],
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::NonPriorityExcess(ExcessService::MBagPerKg),
            WeightBand::unbounded(),
            by_relation([("0", Some("21000")), ("0", Some("27000")), ("0", Some("33000"))]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::UrbanPriority(UrbanPriorityService::SameDayEnvelope),
            WeightBand::up_to(dec("1")),
            by_tier(&[
                (CityTier::MetropolisPrimary, "120000", None),
                (CityTier::MetropolisOther, "105000", None),
                (CityTier::ProvincialCapital, "92000", None),
                (CityTier::County, "80000", None),
            ]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::UrbanPriority(UrbanPriorityService::SameDayParcel),
            WeightBand::up_to(dec("1")),
            by_tier(&[
                (CityTier::MetropolisPrimary, "175000", Some("38000")),
                (CityTier::MetropolisOther, "152000", Some("32000")),
                (CityTier::ProvincialCapital, "132000", Some("27000")),
                (CityTier::County, "115000", Some("24000")),
            ]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::UrbanPriority(UrbanPriorityService::ThreeHourParcel),
            WeightBand::up_to(dec("1")),
            by_tier(&[
                (CityTier::MetropolisPrimary, "260000", Some("52000")),
                (CityTier::MetropolisOther, "225000", Some("44000")),
                (CityTier::ProvincialCapital, "195000", Some("37000")),
            ]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::IntercityPriority(IntercityPriorityService::PriorityEnvelopeUpTo500G),
            WeightBand::up_to(dec("0.5")),
            by_relation([
                ("74000", Some("22000")),
                ("98000", Some("26000")),
                ("118000", Some("30000")),
            ]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::IntercityPriority(IntercityPriorityService::PriorityPaddedEnvelope),
            WeightBand::up_to(dec("1")),
            by_relation([
                ("92000", Some("22000")),
                ("121000", Some("26000")),
                ("146000", Some("30000")),
            ]),
        )
        .unwrap();
    table
        .add_service(
            ServiceCategory::IntercityPriority(IntercityPriorityService::ExpressParcel),
            WeightBand::up_to(dec("1")),
            by_relation([
                ("162000", Some("33000")),
                ("198000", Some("39000")),
                ("236000", Some("45000")),
            ]),
        )
        .unwrap();

    table
}

pub(crate) fn synthetic_regions() -> RegionGraph {
    RegionGraph::from_lists([
        ("Tehran", vec!["Alborz", "Qom"]),
        ("Alborz", vec!["Tehran"]),
        ("Qom", vec![]),
        ("Fars", vec![]),
    ])
}

pub(crate) fn synthetic_surcharges() -> SurchargeConfig {
    SurchargeConfig {
        volumetric_divisor: dec("6000"),
        fragile_liquid_rate: dec("0.25"),
        non_standard_packaging_rate: dec("3.00"),
        non_standard_dimension_rate: dec("0.25"),
        standard_dimensions: Dimensions::new(dec("35"), dec("25"), dec("18")),
        collection_fees: CollectionFees {
            metropolis_primary: dec("150000"),
            metropolis_other: dec("120000"),
            provincial_capital: dec("90000"),
            county: dec("60000"),
        },
        island: IslandRates {
            base_rate_per_kg: dec("12000"),
            priority_rate_per_kg: dec("25000"),
        },
        delivery_time_reduction: DeliveryReductionRates {
            one_day_rate: dec("0.30"),
            two_days_rate: dec("0.80"),
        },
        metro_distribution: MetroDistribution {
            capital_regions: vec!["Tehran".to_string(), "Alborz".to_string()],
            primary_rate: dec("0.20"),
            other_rate: dec("0.15"),
        },
    }
}

pub(crate) fn synthetic_config() -> TariffConfig {
    TariffConfig::new(
        TariffMetadata {
            code: "TEST".to_string(),
            name: "Synthetic tariff".to_string(),
            version: "test".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            currency: "IRR".to_string(),
        },
        synthetic_regions(),
        synthetic_rates(),
        synthetic_surcharges(),
    )
}
