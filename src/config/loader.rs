//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tariff
//! schedule from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::ServiceCategory;

use super::rate_table::{RateScope, RateTable, WeightBand};
use super::regions::RegionGraph;
use super::types::{
    RateRow, RatesFile, RegionsFile, ServiceRates, SurchargeConfig, TariffConfig, TariffMetadata,
};

/// Loads the tariff schedule from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/iran_post/
/// ├── tariff.yaml       # Schedule metadata
/// ├── regions.yaml      # Province adjacency lists
/// ├── rates.yaml        # Service bands and rate rows
/// └── surcharges.yaml   # Accessorial surcharge schedule
/// ```
///
/// # Example
///
/// ```no_run
/// use postal_tariff::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/iran_post")?;
/// println!("Loaded tariff: {}", config.metadata().name);
/// # Ok::<(), postal_tariff::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the tariff in `path`.
    ///
    /// Returns an error if any file is missing or unparsable, or if the data
    /// is inconsistent (see [`EngineError::InvalidConfig`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<TariffConfig> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TariffMetadata>(&path.join("tariff.yaml"))?;
        let regions_file = Self::load_yaml::<RegionsFile>(&path.join("regions.yaml"))?;
        let rates_file = Self::load_yaml::<RatesFile>(&path.join("rates.yaml"))?;
        let surcharges = Self::load_yaml::<SurchargeConfig>(&path.join("surcharges.yaml"))?;

        let regions = Self::build_regions(regions_file)?;
        let rates = Self::build_rate_table(rates_file)?;
        Self::validate_surcharges(&surcharges, &regions)?;

        info!(
            tariff = %metadata.code,
            version = %metadata.version,
            regions = regions.len(),
            services = rates.service_count(),
            rate_rows = rates.len(),
            "Tariff configuration loaded"
        );

        Ok(TariffConfig::new(metadata, regions, rates, surcharges))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Builds the adjacency graph, rejecting neighbours that have no entry.
    pub(crate) fn build_regions(file: RegionsFile) -> EngineResult<RegionGraph> {
        let graph = RegionGraph::from_lists(file.regions);

        if graph.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "region table is empty".to_string(),
            });
        }

        if let Some((region, neighbour)) = graph.unknown_neighbours().into_iter().next() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "region '{}' lists unknown neighbour '{}'",
                    region, neighbour
                ),
            });
        }

        // Kept as declared; surfaced for data owners to audit.
        for (region, neighbour) in graph.asymmetric_pairs() {
            warn!(
                region = %region,
                neighbour = %neighbour,
                "Asymmetric adjacency: neighbour does not list region back"
            );
        }

        Ok(graph)
    }

    /// Builds the rate table from service blocks.
    pub(crate) fn build_rate_table(file: RatesFile) -> EngineResult<RateTable> {
        let mut table = RateTable::new();

        for block in file.services {
            let ServiceRates {
                service,
                min_weight_kg,
                max_weight_kg,
                rates,
            } = block;

            let rows = rates
                .iter()
                .map(|row| {
                    Self::row_scope(service, row)
                        .map(|scope| (scope, row.base_rate, row.excess_rate))
                })
                .collect::<EngineResult<Vec<_>>>()?;

            debug!(service = %service, rows = rows.len(), "Registering tariff service");
            table.add_service(service, WeightBand::new(min_weight_kg, max_weight_kg), rows)?;
        }

        Ok(table)
    }

    fn row_scope(service: ServiceCategory, row: &RateRow) -> EngineResult<RateScope> {
        match (row.relation, row.city_tier) {
            (Some(relation), None) => Ok(RateScope::Relation(relation)),
            (None, Some(tier)) => Ok(RateScope::CityTier(tier)),
            (Some(_), Some(_)) => Err(EngineError::InvalidConfig {
                message: format!(
                    "a rate row of '{}' sets both relation and city_tier",
                    service
                ),
            }),
            (None, None) => Err(EngineError::InvalidConfig {
                message: format!(
                    "a rate row of '{}' sets neither relation nor city_tier",
                    service
                ),
            }),
        }
    }

    /// Checks the surcharge schedule against itself and the region table.
    pub(crate) fn validate_surcharges(
        surcharges: &SurchargeConfig,
        regions: &RegionGraph,
    ) -> EngineResult<()> {
        if surcharges.volumetric_divisor <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "volumetric_divisor must be greater than zero".to_string(),
            });
        }

        if let Some((label, _)) = surcharges
            .labelled_amounts()
            .into_iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must not be negative", label),
            });
        }

        for region in &surcharges.metro_distribution.capital_regions {
            if !regions.contains(region) {
                warn!(region = %region, "Capital-metro region is not in the adjacency table");
            }
        }

        Ok(())
    }
}
