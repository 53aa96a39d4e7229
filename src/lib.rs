// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Learnpath library - dependency-ordered, budget-aware learning plans
//!
//! This crate orders learning resources along their prerequisite graph,
//! prunes resources that break declared limits, greedily selects a subset
//! that fits a time and cost budget, and reports how the resulting path
//! measures up against the constraints.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod graph;
pub mod optimize;
pub mod path;
pub mod planner;
pub mod prune;
pub mod source;

pub use graph::{dependents, has_cycles, prerequisites, topological_sort, GraphError};
pub use optimize::{optimize_learning_path, select_within_budget};
pub use path::find_learning_paths;
pub use prune::prune_graph;

/// Core data types shared by every stage of the pipeline
pub mod types {
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Graph Model
    // =========================================================================

    /// A learning resource (node in the prerequisite graph)
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Resource {
        /// Opaque, stable identifier
        pub id: String,
        /// Display title
        #[serde(default)]
        pub title: String,
        /// Difficulty on a 1-5 scale, higher is harder
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub difficulty: Option<u8>,
        /// Minutes needed to complete the resource
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub duration_min: Option<u32>,
        /// Price, currency-agnostic
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub cost_amount: Option<f64>,
        /// Free-form category (book, course, video, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub resource_type: Option<String>,
    }

    impl Resource {
        /// Create a resource with only an id and title set
        #[must_use]
        pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                title: title.into(),
                difficulty: None,
                duration_min: None,
                cost_amount: None,
                resource_type: None,
            }
        }

        /// Set the difficulty
        #[must_use]
        pub fn with_difficulty(mut self, difficulty: u8) -> Self {
            self.difficulty = Some(difficulty);
            self
        }

        /// Set the duration in minutes
        #[must_use]
        pub fn with_duration(mut self, minutes: u32) -> Self {
            self.duration_min = Some(minutes);
            self
        }

        /// Set the cost
        #[must_use]
        pub fn with_cost(mut self, amount: f64) -> Self {
            self.cost_amount = Some(amount);
            self
        }

        /// Set the resource type
        #[must_use]
        pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
            self.resource_type = Some(resource_type.into());
            self
        }
    }

    /// Prerequisite relation: `source` must be completed before `target`
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Dependency {
        /// Prerequisite resource ID
        pub source: String,
        /// Dependent resource ID
        pub target: String,
        /// Popularity/frequency weight, informational only
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub weight: Option<f64>,
    }

    impl Dependency {
        /// Create an unweighted dependency
        #[must_use]
        pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
            Self {
                source: source.into(),
                target: target.into(),
                weight: None,
            }
        }
    }

    /// Resources plus the prerequisite edges between them
    ///
    /// Edges whose endpoints are not in `nodes` are tolerated and ignored by
    /// every graph operation.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Graph {
        /// Resources, in source order
        #[serde(default)]
        pub nodes: Vec<Resource>,
        /// Prerequisite edges, in source order
        #[serde(default)]
        pub edges: Vec<Dependency>,
    }

    impl Graph {
        /// Create a graph from nodes and edges
        #[must_use]
        pub fn new(nodes: Vec<Resource>, edges: Vec<Dependency>) -> Self {
            Self { nodes, edges }
        }

        /// Check if the graph has no resources
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.nodes.is_empty()
        }

        /// Get a resource by ID
        #[must_use]
        pub fn get(&self, id: &str) -> Option<&Resource> {
            self.nodes.iter().find(|n| n.id == id)
        }
    }

    // =========================================================================
    // Constraints
    // =========================================================================

    /// Limits and overrides applied when building a learning path
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Constraints {
        /// Upper bound on total study time, in hours
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_duration_hours: Option<f64>,
        /// Upper bound on total cost
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_cost_amount: Option<f64>,
        /// Upper bound on the average difficulty of the path
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_difficulty: Option<f64>,
        /// Resources that survive pruning regardless of per-resource caps
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub required_nodes: Vec<String>,
        /// Resources that never appear; beats `required_nodes`
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub excluded_nodes: Vec<String>,
    }

    impl Constraints {
        /// Duration budget in minutes, if one is declared
        #[must_use]
        pub fn max_duration_minutes(&self) -> Option<f64> {
            self.max_duration_hours.map(|h| h * 60.0)
        }

        /// Whether a time or cost budget is declared
        #[must_use]
        pub fn has_budget(&self) -> bool {
            self.max_duration_hours.is_some() || self.max_cost_amount.is_some()
        }
    }

    // =========================================================================
    // Learning Path
    // =========================================================================

    /// An ordered selection of resources measured against constraints
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LearningPath {
        /// Resources in dependency order
        pub nodes: Vec<Resource>,
        /// Sum of durations in minutes (missing counts as zero)
        pub total_duration: u64,
        /// Sum of costs (missing counts as zero)
        pub total_cost: f64,
        /// Mean difficulty over resources that declare one, zero if none do
        pub average_difficulty: f64,
        /// True when no constraint is violated
        pub is_valid: bool,
        /// Human-readable violations: duration, then cost, then difficulty
        pub violated_constraints: Vec<String>,
    }
}
