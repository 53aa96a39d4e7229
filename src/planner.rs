// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Plan service - request validation, graph lookup and plan summary
//!
//! This is the request/response layer the surrounding service talks to:
//! it validates the request, fetches the topic graph through a
//! [`GraphSource`], runs [`optimize_learning_path`] and wraps the result in
//! a summary for display.

use crate::graph::GraphError;
use crate::optimize::optimize_learning_path;
use crate::source::{GraphSource, SourceError};
use crate::types::{Constraints, LearningPath};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::info;

/// Errors returned by [`Planner::plan`]
#[derive(Debug, Error)]
pub enum PlanError {
    /// Topic ID missing or blank
    #[error("Invalid topicId: topicId is required and must be non-empty")]
    InvalidTopic,

    /// The topic resolved to an empty graph
    #[error("No learning resources found for topic: {0}")]
    NoResources(String),

    /// The graph source failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The topic graph cannot be ordered
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A planning request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Topic whose graph should be planned
    pub topic_id: String,
    /// Limits for the plan
    #[serde(flatten)]
    pub constraints: Constraints,
}

/// Coarse label for a path's average difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    /// Average up to 1.5
    Introductory,
    /// Average up to 2.5
    Beginner,
    /// Average up to 3.5
    Intermediate,
    /// Average up to 4.5
    Advanced,
    /// Anything harder
    Expert,
}

impl DifficultyLevel {
    /// Classify an average difficulty
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average <= 1.5 {
            Self::Introductory
        } else if average <= 2.5 {
            Self::Beginner
        } else if average <= 3.5 {
            Self::Intermediate
        } else if average <= 4.5 {
            Self::Advanced
        } else {
            Self::Expert
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Introductory => "Introductory",
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Headline figures for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// Total study time in hours, rounded to one decimal
    pub total_hours: f64,
    /// Total cost
    pub total_cost: f64,
    /// Number of resources
    pub node_count: usize,
    /// Difficulty label for the average difficulty
    pub difficulty_level: DifficultyLevel,
}

impl PlanSummary {
    /// Summarize a learning path
    #[must_use]
    pub fn of(path: &LearningPath) -> Self {
        Self {
            total_hours: (path.total_hours() * 10.0).round() / 10.0,
            total_cost: path.total_cost,
            node_count: path.len(),
            difficulty_level: DifficultyLevel::from_average(path.average_difficulty),
        }
    }
}

/// A completed plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    /// Topic that was planned
    pub topic_id: String,
    /// The optimized path
    pub path: LearningPath,
    /// Headline figures
    pub summary: PlanSummary,
}

/// Plans learning paths for topics served by a [`GraphSource`]
#[derive(Debug, Clone)]
pub struct Planner<S> {
    source: S,
}

impl<S: GraphSource> Planner<S> {
    /// Create a planner over a source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Produce a plan for the request
    ///
    /// # Errors
    ///
    /// Fails on a blank topic, a source failure, an empty topic graph, or a
    /// cyclic topic graph.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanReport, PlanError> {
        let topic_id = request.topic_id.trim();
        if topic_id.is_empty() {
            return Err(PlanError::InvalidTopic);
        }

        let graph = self.source.fetch(topic_id)?;
        if graph.is_empty() {
            return Err(PlanError::NoResources(topic_id.to_string()));
        }

        let path = optimize_learning_path(&graph, &request.constraints)?;
        let summary = PlanSummary::of(&path);
        info!(
            topic = topic_id,
            nodes = summary.node_count,
            valid = path.is_valid,
            "Planned learning path"
        );

        Ok(PlanReport {
            topic_id: topic_id.to_string(),
            path,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SampleSource;
    use crate::types::{Dependency, Graph, Resource};

    struct Fixed(Graph);

    impl GraphSource for Fixed {
        fn fetch(&self, _topic_id: &str) -> Result<Graph, SourceError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(DifficultyLevel::from_average(0.0), DifficultyLevel::Introductory);
        assert_eq!(DifficultyLevel::from_average(1.5), DifficultyLevel::Introductory);
        assert_eq!(DifficultyLevel::from_average(2.0), DifficultyLevel::Beginner);
        assert_eq!(DifficultyLevel::from_average(3.5), DifficultyLevel::Intermediate);
        assert_eq!(DifficultyLevel::from_average(4.5), DifficultyLevel::Advanced);
        assert_eq!(DifficultyLevel::from_average(4.6), DifficultyLevel::Expert);
    }

    #[test]
    fn test_blank_topic_rejected() {
        let planner = Planner::new(SampleSource);
        let request = PlanRequest {
            topic_id: "   ".into(),
            ..PlanRequest::default()
        };
        assert!(matches!(planner.plan(&request), Err(PlanError::InvalidTopic)));
    }

    #[test]
    fn test_empty_graph_is_no_resources() {
        let planner = Planner::new(Fixed(Graph::default()));
        let request = PlanRequest {
            topic_id: "void".into(),
            ..PlanRequest::default()
        };
        assert!(matches!(planner.plan(&request), Err(PlanError::NoResources(t)) if t == "void"));
    }

    #[test]
    fn test_cyclic_graph_is_error() {
        let graph = Graph::new(
            vec![Resource::new("a", ""), Resource::new("b", "")],
            vec![Dependency::new("a", "b"), Dependency::new("b", "a")],
        );
        let planner = Planner::new(Fixed(graph));
        let request = PlanRequest {
            topic_id: "loop".into(),
            ..PlanRequest::default()
        };
        assert!(matches!(planner.plan(&request), Err(PlanError::Graph(_))));
    }

    #[test]
    fn test_sample_plan_summary() {
        // 10h caps each resource at 180 min, which only HTML meets
        let planner = Planner::new(SampleSource);
        let request = PlanRequest {
            topic_id: "web-dev".into(),
            constraints: Constraints {
                max_duration_hours: Some(10.0),
                max_cost_amount: Some(5000.0),
                max_difficulty: Some(3.0),
                ..Constraints::default()
            },
        };
        let report = planner.plan(&request).unwrap();
        let ids: Vec<_> = report.path.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(report.summary.node_count, 1);
        assert!((report.summary.total_hours - 3.0).abs() < f64::EPSILON);
        assert_eq!(report.summary.difficulty_level, DifficultyLevel::Introductory);
        assert!(report.path.is_valid);
    }

    #[test]
    fn test_request_json_shape() {
        let request: PlanRequest = serde_json::from_str(
            r#"{"topicId":"ai-ml","maxDurationHours":20,"excludedNodes":["106"]}"#,
        )
        .unwrap();
        assert_eq!(request.topic_id, "ai-ml");
        assert_eq!(request.constraints.max_duration_hours, Some(20.0));
        assert_eq!(request.constraints.excluded_nodes, vec!["106".to_string()]);
    }
}
