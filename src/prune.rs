// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Constraint-driven pruning of the resource graph

use crate::types::{Constraints, Graph, Resource};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Largest share of the cost budget a single resource may take
pub const MAX_COST_SHARE: f64 = 0.5;

/// Largest share of the time budget a single resource may take
pub const MAX_DURATION_SHARE: f64 = 0.3;

/// Remove resources that break per-resource caps
///
/// Rules run in a fixed order: difficulty cap, cost share, duration share,
/// then required resources are restored from the unfiltered graph and
/// excluded resources are removed last. Only edges between survivors are
/// kept.
#[must_use]
pub fn prune_graph(graph: &Graph, constraints: &Constraints) -> Graph {
    let mut kept: Vec<&Resource> = graph.nodes.iter().collect();

    if let Some(max_difficulty) = constraints.max_difficulty {
        kept.retain(|n| {
            let keep = n.difficulty.map_or(true, |d| f64::from(d) <= max_difficulty);
            if !keep {
                trace!(id = %n.id, "pruned: difficulty above cap");
            }
            keep
        });
    }

    if let Some(max_cost) = constraints.max_cost_amount {
        let cap = max_cost * MAX_COST_SHARE;
        kept.retain(|n| {
            let keep = n.cost_amount.map_or(true, |c| c <= cap);
            if !keep {
                trace!(id = %n.id, cap, "pruned: cost above budget share");
            }
            keep
        });
    }

    if let Some(max_minutes) = constraints.max_duration_minutes() {
        let cap = max_minutes * MAX_DURATION_SHARE;
        kept.retain(|n| {
            let keep = n.duration_min.map_or(true, |d| f64::from(d) <= cap);
            if !keep {
                trace!(id = %n.id, cap, "pruned: duration above budget share");
            }
            keep
        });
    }

    for required in &constraints.required_nodes {
        if kept.iter().any(|n| &n.id == required) {
            continue;
        }
        if let Some(original) = graph.get(required) {
            trace!(id = %required, "restored required resource");
            kept.push(original);
        }
    }

    if !constraints.excluded_nodes.is_empty() {
        let excluded: HashSet<&str> = constraints.excluded_nodes.iter().map(String::as_str).collect();
        kept.retain(|n| !excluded.contains(n.id.as_str()));
    }

    let survivors: HashSet<&str> = kept.iter().map(|n| n.id.as_str()).collect();
    let edges = graph
        .edges
        .iter()
        .filter(|e| survivors.contains(e.source.as_str()) && survivors.contains(e.target.as_str()))
        .cloned()
        .collect();

    debug!(
        before = graph.nodes.len(),
        after = kept.len(),
        "pruned graph"
    );

    Graph::new(kept.into_iter().cloned().collect(), edges)
}
