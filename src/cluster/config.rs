//! Controller configuration.

use super::invoker::EdgeWeight;
use super::threshold::ThresholdSearch;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where a subset's ceiling comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CeilingMode {
    /// Recompute the ceiling from each subset's own distances.
    #[default]
    PerLevel,
    /// Use the parent's chosen threshold distance as the child's ceiling.
    /// The root still computes its ceiling from the full set.
    Inherited,
}

/// Parameters for [`RecursiveClusterer`](super::RecursiveClusterer).
///
/// ```rust
/// use glyphtier::{CeilingMode, ClusterConfig};
///
/// let config = ClusterConfig::default()
///     .with_max_cluster_size(8)
///     .with_ceiling(CeilingMode::Inherited);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Groups larger than this are subdivided.
    pub max_cluster_size: usize,
    /// Quantile level of a subset's distances used as its ceiling.
    pub ceiling_level: f64,
    /// Level the bounding phase starts halving from.
    pub start_level: f64,
    /// Level at which tightening gives up.
    pub floor_level: f64,
    /// Ceiling propagation.
    pub ceiling: CeilingMode,
    /// Recursion depth beyond which the run fails.
    pub max_depth: usize,
    /// Edge weighting for the threshold graph.
    pub edge_weight: EdgeWeight,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_cluster_size: 5,
            ceiling_level: 0.8,
            start_level: 0.8,
            floor_level: 0.025,
            ceiling: CeilingMode::PerLevel,
            max_depth: 64,
            edge_weight: EdgeWeight::Distance,
        }
    }
}

impl ClusterConfig {
    /// Set the size cap.
    pub fn with_max_cluster_size(mut self, size: usize) -> Self {
        self.max_cluster_size = size;
        self
    }

    /// Set the ceiling quantile level.
    pub fn with_ceiling_level(mut self, level: f64) -> Self {
        self.ceiling_level = level;
        self
    }

    /// Set the bounding phase starting level.
    pub fn with_start_level(mut self, level: f64) -> Self {
        self.start_level = level;
        self
    }

    /// Set the tightening floor.
    pub fn with_floor_level(mut self, level: f64) -> Self {
        self.floor_level = level;
        self
    }

    /// Set the ceiling propagation mode.
    pub fn with_ceiling(mut self, mode: CeilingMode) -> Self {
        self.ceiling = mode;
        self
    }

    /// Set the recursion guard.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the edge weighting.
    pub fn with_edge_weight(mut self, edge_weight: EdgeWeight) -> Self {
        self.edge_weight = edge_weight;
        self
    }

    /// The threshold search these levels describe.
    pub fn search(&self) -> ThresholdSearch {
        ThresholdSearch::new()
            .with_start_level(self.start_level)
            .with_floor_level(self.floor_level)
    }

    /// Reject parameter combinations the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_cluster_size == 0 {
            return Err(Error::InvalidParameter {
                name: "max_cluster_size",
                message: "must be at least 1",
            });
        }
        if !(self.ceiling_level > 0.0 && self.ceiling_level <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "ceiling_level",
                message: "must lie in (0, 1]",
            });
        }
        self.search().validate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClusterConfig::default();
        assert_eq!(config.max_cluster_size, 5);
        assert_eq!(config.ceiling, CeilingMode::PerLevel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ClusterConfig =
            serde_json::from_str(r#"{"max_cluster_size": 3, "ceiling": "inherited"}"#).unwrap();
        assert_eq!(config.max_cluster_size, 3);
        assert_eq!(config.ceiling, CeilingMode::Inherited);
        assert_eq!(config.floor_level, 0.025);
        assert_eq!(config.edge_weight, EdgeWeight::Distance);
    }

    #[test]
    fn test_edge_weight_names() {
        let config: ClusterConfig =
            serde_json::from_str(r#"{"edge_weight": "inverse-distance"}"#).unwrap();
        assert_eq!(config.edge_weight, EdgeWeight::InverseDistance);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClusterConfig::default().with_max_cluster_size(0).validate().is_err());
        assert!(ClusterConfig::default().with_ceiling_level(0.0).validate().is_err());
        assert!(ClusterConfig::default().with_floor_level(0.9).validate().is_err());
        assert!(ClusterConfig::default().with_start_level(2.0).validate().is_err());
    }
}
