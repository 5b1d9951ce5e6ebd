//! Region adjacency graph.
//!
//! Adjacency is kept exactly as declared: listing `B` under `A` makes the
//! ordered pair `A -> B` adjacent and says nothing about `B -> A`.

use std::collections::{BTreeMap, BTreeSet};

/// Read-only province adjacency table.
///
/// # Example
///
/// ```
/// use postal_tariff::config::RegionGraph;
///
/// let graph = RegionGraph::from_lists([
///     ("Tehran", vec!["Qom"]),
///     ("Qom", vec![]),
/// ]);
/// assert!(graph.is_adjacent("Tehran", "Qom"));
/// assert!(!graph.is_adjacent("Qom", "Tehran"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl RegionGraph {
    /// Builds a graph from per-region adjacency lists.
    pub fn from_lists<I, R, N>(lists: I) -> Self
    where
        I: IntoIterator<Item = (R, Vec<N>)>,
        R: Into<String>,
        N: Into<String>,
    {
        let adjacency = lists
            .into_iter()
            .map(|(region, neighbours)| {
                (
                    region.into(),
                    neighbours.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { adjacency }
    }

    /// Returns true if the region has an entry in the table.
    pub fn contains(&self, region: &str) -> bool {
        self.adjacency.contains_key(region)
    }

    /// Returns true if `to` appears in the adjacency list of `from`.
    pub fn is_adjacent(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbours| neighbours.contains(to))
    }

    /// Iterates over every region name in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of regions in the table.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the table has no regions.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Pairs `(a, b)` where `b` is listed under `a` but `a` is not listed under `b`.
    pub fn asymmetric_pairs(&self) -> Vec<(String, String)> {
        self.adjacency
            .iter()
            .flat_map(|(region, neighbours)| {
                neighbours
                    .iter()
                    .filter(|neighbour| {
                        self.contains(neighbour) && !self.is_adjacent(neighbour, region)
                    })
                    .map(move |neighbour| (region.clone(), neighbour.clone()))
            })
            .collect()
    }

    /// Pairs `(a, b)` where `b` is listed under `a` but has no entry of its own.
    pub fn unknown_neighbours(&self) -> Vec<(String, String)> {
        self.adjacency
            .iter()
            .flat_map(|(region, neighbours)| {
                neighbours
                    .iter()
                    .filter(|neighbour| !self.contains(neighbour))
                    .map(move |neighbour| (region.clone(), neighbour.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> RegionGraph {
        RegionGraph::from_lists([
            ("Tehran", vec!["Alborz", "Qom"]),
            ("Alborz", vec!["Tehran"]),
            ("Qom", vec![]),
        ])
    }

    #[test]
    fn test_adjacency_is_read_as_declared() {
        let graph = sample_graph();
        assert!(graph.is_adjacent("Tehran", "Qom"));
        assert!(!graph.is_adjacent("Qom", "Tehran"));
        assert!(graph.is_adjacent("Alborz", "Tehran"));
    }

    #[test]
    fn test_unknown_region_is_not_contained() {
        let graph = sample_graph();
        assert!(graph.contains("Qom"));
        assert!(!graph.contains("Atlantis"));
        assert!(!graph.is_adjacent("Atlantis", "Tehran"));
    }

    #[test]
    fn test_asymmetric_pairs_are_reported() {
        let graph = sample_graph();
        assert_eq!(
            graph.asymmetric_pairs(),
            vec![("Tehran".to_string(), "Qom".to_string())]
        );
    }

    #[test]
    fn test_unknown_neighbours_are_reported() {
        let graph = RegionGraph::from_lists([("Tehran", vec!["Atlantis"])]);
        assert_eq!(
            graph.unknown_neighbours(),
            vec![("Tehran".to_string(), "Atlantis".to_string())]
        );
        assert!(graph.asymmetric_pairs().is_empty());
    }

    #[test]
    fn test_regions_are_sorted() {
        let graph = sample_graph();
        let regions: Vec<_> = graph.regions().collect();
        assert_eq!(regions, vec!["Alborz", "Qom", "Tehran"]);
        assert_eq!(graph.len(), 3);
    }
}
