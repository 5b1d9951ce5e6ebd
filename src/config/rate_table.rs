//! The tariff rate table.
//!
//! Every number that prices a service lives here, keyed by
//! (service, relation-or-city-tier). The calculation code only ever looks
//! rows up; it never branches on tariff amounts.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CityTier, ProvincialStatus, ScopeKind, ServiceCategory};

/// The second half of a rate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateScope {
    /// Rates keyed by origin/destination relation.
    Relation(ProvincialStatus),
    /// Rates keyed by destination city tier.
    CityTier(CityTier),
}

impl RateScope {
    /// Returns which kind of key this is.
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Relation(_) => ScopeKind::Relation,
            Self::CityTier(_) => ScopeKind::CityTier,
        }
    }
}

impl fmt::Display for RateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relation(status) => write!(f, "relation {}", status),
            Self::CityTier(tier) => write!(f, "city tier {}", tier),
        }
    }
}

/// A service's nominal weight band, `min_kg < w <= max_kg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightBand {
    /// Exclusive lower bound.
    pub min_kg: Decimal,
    /// Inclusive upper bound; `None` means unbounded.
    pub max_kg: Option<Decimal>,
}

impl WeightBand {
    /// A band with the given bounds.
    pub fn new(min_kg: Decimal, max_kg: Option<Decimal>) -> Self {
        Self { min_kg, max_kg }
    }

    /// A band from zero up to `max_kg`.
    pub fn up_to(max_kg: Decimal) -> Self {
        Self::new(Decimal::ZERO, Some(max_kg))
    }

    /// A band with no bounds at all.
    pub fn unbounded() -> Self {
        Self::new(Decimal::ZERO, None)
    }

    /// Returns true if the weight lies inside the band.
    pub fn contains(&self, weight_kg: Decimal) -> bool {
        weight_kg > self.min_kg && self.max_kg.is_none_or(|max| weight_kg <= max)
    }

    /// Whole kilograms started above the ceiling; zero inside the band.
    pub fn excess_units(&self, weight_kg: Decimal) -> Decimal {
        match self.max_kg {
            Some(max) if weight_kg > max => (weight_kg - max).ceil(),
            _ => Decimal::ZERO,
        }
    }
}

impl fmt::Display for WeightBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_kg {
            Some(max) => write!(f, "({}, {}] kg", self.min_kg.normalize(), max.normalize()),
            None => write!(f, "> {} kg", self.min_kg.normalize()),
        }
    }
}

/// One priced row of the tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    /// Price of the band.
    pub base_rate: Decimal,
    /// Price per started kilogram above the band, if published.
    pub excess_rate_per_kg: Option<Decimal>,
    /// The service's nominal band.
    pub band: WeightBand,
}

/// Read-only tariff rate table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    entries: HashMap<(ServiceCategory, RateScope), RateEntry>,
    bands: HashMap<ServiceCategory, WeightBand>,
}

impl RateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service with its band and priced rows.
    ///
    /// Each row is `(scope, base_rate, excess_rate_per_kg)`. Fails when the
    /// service is registered twice, a row uses the wrong key kind for its
    /// category, a scope repeats, or an amount is negative.
    pub fn add_service<I>(
        &mut self,
        service: ServiceCategory,
        band: WeightBand,
        rows: I,
    ) -> EngineResult<()>
    where
        I: IntoIterator<Item = (RateScope, Decimal, Option<Decimal>)>,
    {
        if self.bands.contains_key(&service) {
            return Err(invalid(format!("service '{}' is declared twice", service)));
        }
        if band.max_kg.is_some_and(|max| max <= band.min_kg) {
            return Err(invalid(format!(
                "service '{}' has an empty weight band {}",
                service, band
            )));
        }

        let mut rows_to_insert = Vec::new();
        for (scope, base_rate, excess_rate_per_kg) in rows {
            if scope.kind() != service.scope_kind() {
                return Err(invalid(format!(
                    "service '{}' cannot be priced by {}",
                    service, scope
                )));
            }
            if base_rate < Decimal::ZERO || excess_rate_per_kg.is_some_and(|r| r < Decimal::ZERO) {
                return Err(invalid(format!(
                    "service '{}' has a negative rate for {}",
                    service, scope
                )));
            }
            if rows_to_insert.iter().any(|(s, _)| *s == scope) {
                return Err(invalid(format!(
                    "service '{}' lists {} twice",
                    service, scope
                )));
            }
            rows_to_insert.push((
                scope,
                RateEntry {
                    base_rate,
                    excess_rate_per_kg,
                    band,
                },
            ));
        }

        self.bands.insert(service, band);
        for (scope, entry) in rows_to_insert {
            self.entries.insert((service, scope), entry);
        }
        Ok(())
    }

    /// Looks up the row for a service and scope.
    pub fn get(&self, service: ServiceCategory, scope: RateScope) -> Option<&RateEntry> {
        self.entries.get(&(service, scope))
    }

    /// Returns the nominal band of a registered service.
    pub fn band(&self, service: ServiceCategory) -> Option<&WeightBand> {
        self.bands.get(&service)
    }

    /// Number of priced rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered services.
    pub fn service_count(&self) -> usize {
        self.bands.len()
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfig { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseGoodsService, UrbanPriorityService};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const NON_REGISTERED: ServiceCategory =
        ServiceCategory::BaseGoods(BaseGoodsService::NonRegisteredUpTo1Kg);

    fn intra() -> RateScope {
        RateScope::Relation(ProvincialStatus::IntraProvincial)
    }

    #[test]
    fn test_lookup_returns_registered_row() {
        let mut table = RateTable::new();
        table
            .add_service(
                NON_REGISTERED,
                WeightBand::up_to(dec("1")),
                [(intra(), dec("58000"), None)],
            )
            .unwrap();

        let entry = table.get(NON_REGISTERED, intra()).unwrap();
        assert_eq!(entry.base_rate, dec("58000"));
        assert_eq!(entry.excess_rate_per_kg, None);
        assert_eq!(entry.band.max_kg, Some(dec("1")));
        assert!(
            table
                .get(
                    NON_REGISTERED,
                    RateScope::Relation(ProvincialStatus::AdjacentInterProvincial)
                )
                .is_none()
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.service_count(), 1);
    }

    #[test]
    fn test_band_is_known_without_rows() {
        let mut table = RateTable::new();
        table
            .add_service(NON_REGISTERED, WeightBand::up_to(dec("1")), [])
            .unwrap();
        assert!(table.band(NON_REGISTERED).is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn test_wrong_scope_kind_is_rejected() {
        let mut table = RateTable::new();
        let urban = ServiceCategory::UrbanPriority(UrbanPriorityService::SameDayParcel);
        let result = table.add_service(
            urban,
            WeightBand::up_to(dec("1")),
            [(intra(), dec("1000"), None)],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_duplicate_service_is_rejected() {
        let mut table = RateTable::new();
        table
            .add_service(NON_REGISTERED, WeightBand::up_to(dec("1")), [])
            .unwrap();
        let result = table.add_service(NON_REGISTERED, WeightBand::up_to(dec("1")), []);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_duplicate_scope_is_rejected() {
        let mut table = RateTable::new();
        let result = table.add_service(
            NON_REGISTERED,
            WeightBand::up_to(dec("1")),
            [(intra(), dec("1"), None), (intra(), dec("2"), None)],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
        assert!(table.band(NON_REGISTERED).is_none());
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut table = RateTable::new();
        let result = table.add_service(
            NON_REGISTERED,
            WeightBand::up_to(dec("1")),
            [(intra(), dec("-1"), None)],
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_band_membership_is_exclusive_below_inclusive_above() {
        let band = WeightBand::new(dec("3"), Some(dec("5")));
        assert!(!band.contains(dec("3")));
        assert!(band.contains(dec("3.001")));
        assert!(band.contains(dec("5")));
        assert!(!band.contains(dec("5.001")));
        assert!(WeightBand::unbounded().contains(dec("1000")));
    }

    #[test]
    fn test_excess_units_round_up_started_kilograms() {
        let band = WeightBand::up_to(dec("5"));
        assert_eq!(band.excess_units(dec("4.5")), Decimal::ZERO);
        assert_eq!(band.excess_units(dec("5")), Decimal::ZERO);
        assert_eq!(band.excess_units(dec("5.01")), dec("1"));
        assert_eq!(band.excess_units(dec("7")), dec("2"));
        assert_eq!(WeightBand::unbounded().excess_units(dec("9")), Decimal::ZERO);
    }

    #[test]
    fn test_band_display() {
        assert_eq!(
            WeightBand::new(dec("3"), Some(dec("5"))).to_string(),
            "(3, 5] kg"
        );
        assert_eq!(WeightBand::up_to(dec("0.50")).to_string(), "(0, 0.5] kg");
        assert_eq!(WeightBand::unbounded().to_string(), "> 0 kg");
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(intra().to_string(), "relation intra_provincial");
        assert_eq!(
            RateScope::CityTier(CityTier::County).to_string(),
            "city tier county"
        );
    }
}
