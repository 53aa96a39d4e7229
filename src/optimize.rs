// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Greedy budget selection - value density over a time/cost knapsack
//!
//! This is a polynomial heuristic, not an exact solver: resources are ranked
//! by value per unit of weight and accepted while both running totals stay
//! within budget.

use crate::graph::{topological_sort, GraphError};
use crate::prune::prune_graph;
use crate::types::{Constraints, Graph, LearningPath, Resource};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Minutes assumed for a resource that declares no duration
pub const DEFAULT_DURATION_MIN: u32 = 60;

/// Difficulty assumed for a resource that declares none
pub const DEFAULT_DIFFICULTY: u8 = 3;

/// Scale the cost budget is folded onto, in minute-equivalents
const COST_SCALE: f64 = 60.0;

/// Heuristic score for one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Minutes charged against the time budget
    pub duration: f64,
    /// Amount charged against the cost budget
    pub cost: f64,
    /// Estimated value, higher for easier resources (10-50)
    pub value: f64,
    /// Composite weight: duration plus normalized cost
    pub weight: f64,
    /// Value density used for ranking
    pub ratio: f64,
}

impl Score {
    /// Score a resource under the given budget
    #[must_use]
    pub fn of(resource: &Resource, constraints: &Constraints) -> Self {
        let duration = f64::from(resource.duration_min.unwrap_or(DEFAULT_DURATION_MIN));
        let cost = resource.cost_amount.unwrap_or(0.0);
        let difficulty = f64::from(resource.difficulty.unwrap_or(DEFAULT_DIFFICULTY));

        let value = (6.0 - difficulty) * 10.0;
        // Free resources weigh nothing even under a zero budget
        let normalized_cost = match constraints.max_cost_amount {
            Some(_) if cost <= 0.0 => 0.0,
            Some(max) if max <= 0.0 => f64::INFINITY,
            Some(max) => cost / max * COST_SCALE,
            None => 0.0,
        };
        let weight = duration + normalized_cost;
        let ratio = if weight > 0.0 { value / weight } else { value };

        Self {
            duration,
            cost,
            value,
            weight,
            ratio,
        }
    }
}

/// Greedily pick resources that fit the time and cost budget
///
/// Candidates are ranked by [`Score::ratio`], highest first; the sort is
/// stable so equal ratios keep their input order. A candidate that does not
/// fit is skipped and the scan continues. The result is in ranking order,
/// not input order.
#[must_use]
pub fn select_within_budget<'a>(
    nodes: &[&'a Resource],
    constraints: &Constraints,
) -> Vec<&'a Resource> {
    let max_minutes = constraints.max_duration_minutes().unwrap_or(f64::INFINITY);
    let max_cost = constraints.max_cost_amount.unwrap_or(f64::INFINITY);

    let mut scored: Vec<(&Resource, Score)> = nodes
        .iter()
        .map(|&n| (n, Score::of(n, constraints)))
        .collect();
    scored.sort_by(|a, b| b.1.ratio.total_cmp(&a.1.ratio));

    let mut selected = Vec::new();
    let mut total_minutes = 0.0;
    let mut total_cost = 0.0;

    for (resource, score) in scored {
        if total_minutes + score.duration <= max_minutes && total_cost + score.cost <= max_cost {
            trace!(id = %resource.id, ratio = score.ratio, "selected");
            total_minutes += score.duration;
            total_cost += score.cost;
            selected.push(resource);
        } else {
            trace!(id = %resource.id, ratio = score.ratio, "skipped: over budget");
        }
    }

    selected
}

/// Build the best-effort learning path for a graph
///
/// Prunes, orders, and - when a time or cost budget is declared - greedily
/// selects within it. The selection is put back into dependency order
/// before the path is assembled.
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] if the pruned graph cannot be ordered.
pub fn optimize_learning_path(
    graph: &Graph,
    constraints: &Constraints,
) -> Result<LearningPath, GraphError> {
    let pruned = prune_graph(graph, constraints);
    let sorted = topological_sort(&pruned)?;

    if !constraints.has_budget() {
        return Ok(LearningPath::assemble(sorted, constraints));
    }

    let chosen: HashSet<&str> = select_within_budget(&sorted, constraints)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    debug!(
        candidates = sorted.len(),
        selected = chosen.len(),
        "budget selection done"
    );

    let ordered = sorted.into_iter().filter(|n| chosen.contains(n.id.as_str()));
    Ok(LearningPath::assemble(ordered, constraints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dependency;

    fn ids(nodes: &[&Resource]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_score_defaults() {
        let score = Score::of(&Resource::new("x", ""), &Constraints::default());
        assert!((score.duration - 60.0).abs() < f64::EPSILON);
        assert!((score.value - 30.0).abs() < f64::EPSILON);
        assert!((score.ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_folds_cost_onto_minutes() {
        let constraints = Constraints {
            max_cost_amount: Some(1000.0),
            ..Constraints::default()
        };
        let resource = Resource::new("x", "").with_duration(30).with_cost(500.0).with_difficulty(1);
        let score = Score::of(&resource, &constraints);
        assert!((score.weight - 60.0).abs() < f64::EPSILON);
        assert!((score.ratio - 50.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_uses_value() {
        let resource = Resource::new("x", "").with_duration(0).with_difficulty(2);
        let score = Score::of(&resource, &Constraints::default());
        assert!((score.ratio - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_cost_budget_ranks_free_resources_by_duration() {
        // 30 min budget: every resource fits the 9 minute cap
        let p = Resource::new("p", "").with_duration(9).with_difficulty(1).with_cost(0.0);
        let qs: Vec<Resource> = (0..4)
            .map(|i| {
                Resource::new(format!("q{i}"), "")
                    .with_duration(7)
                    .with_difficulty(2)
                    .with_cost(0.0)
            })
            .collect();
        let mut nodes = vec![&p];
        nodes.extend(qs.iter());

        let unpriced = Constraints {
            max_duration_hours: Some(0.5),
            ..Constraints::default()
        };
        let zero_budget = Constraints {
            max_cost_amount: Some(0.0),
            ..unpriced.clone()
        };

        let score = Score::of(&qs[0], &zero_budget);
        assert!((score.weight - 7.0).abs() < f64::EPSILON);
        assert!((score.ratio - 40.0 / 7.0).abs() < 1e-12);

        let expected = ids(&select_within_budget(&nodes, &unpriced));
        assert_eq!(expected, vec!["q0", "q1", "q2", "q3"]);
        assert_eq!(ids(&select_within_budget(&nodes, &zero_budget)), expected);
    }

    #[test]
    fn test_zero_cost_budget_sinks_priced_resources() {
        let priced = Resource::new("priced", "").with_duration(10).with_cost(5.0);
        let score = Score::of(
            &priced,
            &Constraints {
                max_cost_amount: Some(0.0),
                ..Constraints::default()
            },
        );
        assert!(score.weight.is_infinite());
        assert!(score.ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_skips_and_continues() {
        // 3h budget: "long" ranks second but does not fit, "short" still does
        let a = Resource::new("a", "").with_duration(60).with_difficulty(1);
        let long = Resource::new("long", "").with_duration(150).with_difficulty(1);
        let short = Resource::new("short", "").with_duration(100).with_difficulty(4);
        let constraints = Constraints {
            max_duration_hours: Some(3.0),
            ..Constraints::default()
        };
        let picked = select_within_budget(&[&long, &a, &short], &constraints);
        assert_eq!(ids(&picked), vec!["a", "short"]);
    }

    #[test]
    fn test_equal_ratios_keep_input_order() {
        let x = Resource::new("x", "").with_duration(60);
        let y = Resource::new("y", "").with_duration(60);
        let z = Resource::new("z", "").with_duration(60);
        let constraints = Constraints {
            max_duration_hours: Some(2.0),
            ..Constraints::default()
        };
        let picked = select_within_budget(&[&y, &x, &z], &constraints);
        assert_eq!(ids(&picked), vec!["y", "x"]);
    }

    #[test]
    fn test_cost_budget_limits_selection() {
        let cheap = Resource::new("cheap", "").with_duration(10).with_cost(40.0).with_difficulty(1);
        let pricey = Resource::new("pricey", "").with_duration(10).with_cost(50.0);
        let constraints = Constraints {
            max_cost_amount: Some(80.0),
            ..Constraints::default()
        };
        let picked = select_within_budget(&[&pricey, &cheap], &constraints);
        assert_eq!(ids(&picked), vec!["cheap"]);
    }

    #[test]
    fn test_optimized_path_is_dependency_ordered() {
        // "b" is easier so it ranks first, but "a" must come before it
        let graph = Graph::new(
            vec![
                Resource::new("a", "").with_duration(30).with_difficulty(4),
                Resource::new("b", "").with_duration(30).with_difficulty(1),
            ],
            vec![Dependency::new("a", "b")],
        );
        let constraints = Constraints {
            max_duration_hours: Some(5.0),
            ..Constraints::default()
        };
        let path = optimize_learning_path(&graph, &constraints).unwrap();
        let order: Vec<_> = path.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert!(path.is_valid);
    }

    #[test]
    fn test_no_budget_skips_selection() {
        let graph = Graph::new(
            vec![
                Resource::new("a", "").with_duration(6000),
                Resource::new("b", "").with_duration(6000),
            ],
            vec![],
        );
        let path = optimize_learning_path(&graph, &Constraints::default()).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.total_duration, 12_000);
    }
}
