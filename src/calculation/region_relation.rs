//! Region relation resolution.
//!
//! Classifies an origin/destination pair into a [`ProvincialStatus`], the key
//! every relation-priced tariff row is published under.

use crate::config::RegionGraph;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ProvincialStatus};

/// The resolved relation and the audit step recording it.
#[derive(Debug, Clone)]
pub struct RelationResult {
    /// The relation between origin and destination.
    pub relation: ProvincialStatus,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Classifies the relation between two regions.
///
/// Both regions must have an entry in the adjacency table. Adjacency is read
/// from the origin's list only, so an asymmetric table can classify `A -> B`
/// and `B -> A` differently.
///
/// # Errors
///
/// Returns [`EngineError::RegionNotFound`] naming the first unknown region.
///
/// # Examples
///
/// ```
/// use postal_tariff::calculation::resolve_relation;
/// use postal_tariff::config::RegionGraph;
/// use postal_tariff::models::ProvincialStatus;
///
/// let graph = RegionGraph::from_lists([
///     ("Tehran", vec!["Qom"]),
///     ("Qom", vec!["Tehran"]),
///     ("Fars", vec![]),
/// ]);
///
/// let result = resolve_relation(&graph, "Tehran", "Qom", 1).unwrap();
/// assert_eq!(result.relation, ProvincialStatus::AdjacentInterProvincial);
///
/// let result = resolve_relation(&graph, "Tehran", "Fars", 1).unwrap();
/// assert_eq!(result.relation, ProvincialStatus::NonAdjacentInterProvincial);
/// ```
pub fn resolve_relation(
    regions: &RegionGraph,
    origin: &str,
    destination: &str,
    step_number: u32,
) -> EngineResult<RelationResult> {
    for region in [origin, destination] {
        if !regions.contains(region) {
            return Err(EngineError::RegionNotFound {
                region: region.to_string(),
            });
        }
    }

    let relation = if origin == destination {
        ProvincialStatus::IntraProvincial
    } else if regions.is_adjacent(origin, destination) {
        ProvincialStatus::AdjacentInterProvincial
    } else {
        ProvincialStatus::NonAdjacentInterProvincial
    };

    let reasoning = match relation {
        ProvincialStatus::IntraProvincial => {
            format!("Origin and destination are both '{}'", origin)
        }
        ProvincialStatus::AdjacentInterProvincial => {
            format!("'{}' is listed as adjacent to '{}'", destination, origin)
        }
        ProvincialStatus::NonAdjacentInterProvincial => {
            format!("'{}' is not listed as adjacent to '{}'", destination, origin)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "region_relation".to_string(),
        rule_name: "Region Relation".to_string(),
        input: serde_json::json!({
            "origin_region": origin,
            "destination_region": destination
        }),
        output: serde_json::json!({
            "relation": relation.code()
        }),
        reasoning,
    };

    Ok(RelationResult {
        relation,
        audit_step,
    })
}
