//! Location classifications used as tariff lookup keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The relation between an origin and a destination region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvincialStatus {
    /// Origin and destination are the same region.
    IntraProvincial,
    /// The destination is listed as adjacent to the origin.
    AdjacentInterProvincial,
    /// Any other pair of known regions.
    NonAdjacentInterProvincial,
}

impl ProvincialStatus {
    /// All relations in tariff order.
    pub const ALL: [ProvincialStatus; 3] = [
        Self::IntraProvincial,
        Self::AdjacentInterProvincial,
        Self::NonAdjacentInterProvincial,
    ];

    /// Returns the wire code of the relation.
    pub fn code(self) -> &'static str {
        match self {
            Self::IntraProvincial => "intra_provincial",
            Self::AdjacentInterProvincial => "adjacent_inter_provincial",
            Self::NonAdjacentInterProvincial => "non_adjacent_inter_provincial",
        }
    }
}

impl fmt::Display for ProvincialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classification of a city for urban rates and the metro surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTier {
    /// Capital-tier metropolis with the highest urban surcharge.
    MetropolisPrimary,
    /// Any other metropolis.
    MetropolisOther,
    /// A provincial capital.
    ProvincialCapital,
    /// A county town.
    County,
}

impl CityTier {
    /// All tiers, largest first.
    pub const ALL: [CityTier; 4] = [
        Self::MetropolisPrimary,
        Self::MetropolisOther,
        Self::ProvincialCapital,
        Self::County,
    ];

    /// Returns the wire code of the tier.
    pub fn code(self) -> &'static str {
        match self {
            Self::MetropolisPrimary => "metropolis_primary",
            Self::MetropolisOther => "metropolis_other",
            Self::ProvincialCapital => "provincial_capital",
            Self::County => "county",
        }
    }

    /// Returns true for both metropolis tiers.
    pub fn is_metropolis(self) -> bool {
        matches!(self, Self::MetropolisPrimary | Self::MetropolisOther)
    }
}

impl fmt::Display for CityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
