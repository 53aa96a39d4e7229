// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Learning path assembly - totals and constraint diagnostics

use crate::graph::{topological_sort, GraphError};
use crate::prune::prune_graph;
use crate::types::{Constraints, Graph, LearningPath, Resource};

impl LearningPath {
    /// Measure an ordered resource list against the constraints
    ///
    /// Performs no filtering. Each limit is checked independently and every
    /// breach adds one message, so all three can fire together.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn assemble<'a, I>(nodes: I, constraints: &Constraints) -> Self
    where
        I: IntoIterator<Item = &'a Resource>,
    {
        let nodes: Vec<Resource> = nodes.into_iter().cloned().collect();

        let total_duration: u64 = nodes.iter().filter_map(|n| n.duration_min).map(u64::from).sum();
        let total_cost: f64 = nodes.iter().filter_map(|n| n.cost_amount).sum();

        let (difficulty_sum, difficulty_count) = nodes
            .iter()
            .filter_map(|n| n.difficulty)
            .fold((0u32, 0u32), |(sum, count), d| (sum + u32::from(d), count + 1));
        let average_difficulty = if difficulty_count > 0 {
            f64::from(difficulty_sum) / f64::from(difficulty_count)
        } else {
            0.0
        };

        let mut violated_constraints = Vec::new();

        let total_hours = total_duration as f64 / 60.0;
        if let Some(limit) = constraints.max_duration_hours {
            if total_hours > limit {
                violated_constraints.push(format!(
                    "Time exceeds limit: {total_hours:.1}h > {limit}h ({total_duration} min)"
                ));
            }
        }
        if let Some(limit) = constraints.max_cost_amount {
            if total_cost > limit {
                violated_constraints.push(format!("Cost exceeds budget: {total_cost} > {limit}"));
            }
        }
        if let Some(limit) = constraints.max_difficulty {
            if average_difficulty > limit {
                violated_constraints.push(format!(
                    "Difficulty too high: {average_difficulty:.1} > {limit}"
                ));
            }
        }

        Self {
            nodes,
            total_duration,
            total_cost,
            average_difficulty,
            is_valid: violated_constraints.is_empty(),
            violated_constraints,
        }
    }

    /// Total duration in hours
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_hours(&self) -> f64 {
        self.total_duration as f64 / 60.0
    }

    /// Number of resources on the path
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the path has no resources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Candidate learning paths for a graph: prune, sort, assemble
///
/// Always yields exactly one candidate; no budget selection is applied.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] if the pruned graph cannot be ordered.
pub fn find_learning_paths(
    graph: &Graph,
    constraints: &Constraints,
) -> Result<Vec<LearningPath>, GraphError> {
    let pruned = prune_graph(graph, constraints);
    let sorted = topological_sort(&pruned)?;
    Ok(vec![LearningPath::assemble(sorted, constraints)])
}
