//! Tariff configuration loading and lookup.
//!
//! This module loads the tariff schedule from YAML files: schedule metadata,
//! province adjacency, the rate table and the surcharge schedule. The loaded
//! [`TariffConfig`] is read-only and is passed into every calculation.
//!
//! # Example
//!
//! ```no_run
//! use postal_tariff::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/iran_post").unwrap();
//! println!("Loaded tariff: {}", config.metadata().name);
//! ```

mod loader;
mod rate_table;
mod regions;
mod types;

pub use loader::ConfigLoader;
pub use rate_table::{RateEntry, RateScope, RateTable, WeightBand};
pub use regions::RegionGraph;
pub use types::{
    CollectionFees, DeliveryReductionRates, IslandRates, MetroDistribution, RateRow, RatesFile,
    RegionsFile, ServiceRates, SurchargeConfig, TariffConfig, TariffMetadata,
};
