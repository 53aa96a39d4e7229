// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph sources - where topic graphs come from
//!
//! The planning core never touches storage. Callers hand it a [`Graph`]
//! obtained through a [`GraphSource`]; fallback behaviour is composed here
//! with [`FallbackSource`] instead of being baked into the algorithms.

use crate::types::{Dependency, Graph, Resource};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while fetching a graph
#[derive(Debug, Error)]
pub enum SourceError {
    /// No graph is known for the topic
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    /// A graph file could not be read
    #[error("Failed to read {}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A graph file is not valid graph JSON
    #[error("Failed to parse {}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Capability to fetch the resource graph of a topic
pub trait GraphSource {
    /// Fetch the graph for `topic_id`
    ///
    /// # Errors
    ///
    /// Implementations report lookup and decoding failures as [`SourceError`].
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError>;

    /// Topics this source can serve, if it can enumerate them
    fn topics(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
        (**self).fetch(topic_id)
    }

    fn topics(&self) -> Vec<String> {
        (**self).topics()
    }
}

impl<S: GraphSource + ?Sized> GraphSource for Box<S> {
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
        (**self).fetch(topic_id)
    }

    fn topics(&self) -> Vec<String> {
        (**self).topics()
    }
}

/// Load a graph from a JSON file
///
/// # Errors
///
/// Returns [`SourceError::Io`] or [`SourceError::Parse`].
pub fn load_graph_file(path: &Path) -> Result<Graph, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// JSON directory
// =============================================================================

/// Serves `<dir>/<topic>.json` files
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    /// Create a source rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this source reads from
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn topic_path(&self, topic_id: &str) -> Option<PathBuf> {
        // Topic IDs are file stems, never paths
        if topic_id.is_empty() || topic_id.contains(['/', '\\']) || topic_id.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{topic_id}.json")))
    }
}

impl GraphSource for JsonDirSource {
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
        let path = self
            .topic_path(topic_id)
            .filter(|p| p.is_file())
            .ok_or_else(|| SourceError::TopicNotFound(topic_id.to_string()))?;
        debug!("Loading topic {} from {}", topic_id, path.display());
        load_graph_file(&path)
    }

    fn topics(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut topics: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        topics.sort();
        topics
    }
}

// =============================================================================
// Bundled samples
// =============================================================================

/// Topic served when a sample lookup misses
pub const DEFAULT_SAMPLE_TOPIC: &str = "web-dev";

/// Built-in demonstration graphs
///
/// Unknown topics resolve to [`DEFAULT_SAMPLE_TOPIC`], so this source never
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl SampleSource {
    fn web_dev() -> Graph {
        Graph::new(
            vec![
                sample("1", "HTML Basics", 1, 180, 0.0, "tutorial"),
                sample("2", "CSS Basics", 2, 240, 0.0, "tutorial"),
                sample("3", "JavaScript Basics", 2, 360, 0.0, "course"),
                sample("4", "Intro to React", 3, 480, 2000.0, "course"),
                sample("5", "Node.js Basics", 3, 360, 1500.0, "course"),
                sample("6", "Full-Stack Development", 4, 720, 5000.0, "project"),
            ],
            edges(&[
                ("1", "2"),
                ("1", "3"),
                ("2", "4"),
                ("3", "4"),
                ("3", "5"),
                ("4", "6"),
                ("5", "6"),
            ]),
        )
    }

    fn ai_ml() -> Graph {
        Graph::new(
            vec![
                sample("101", "Python Basics", 1, 300, 0.0, "tutorial"),
                sample("102", "Math Foundations", 2, 480, 0.0, "course"),
                sample("103", "NumPy/Pandas", 2, 360, 1000.0, "course"),
                sample("104", "Intro to Machine Learning", 3, 600, 3000.0, "course"),
                sample("105", "Deep Learning", 4, 720, 5000.0, "course"),
                sample("106", "AI Project", 5, 900, 8000.0, "project"),
            ],
            edges(&[
                ("101", "103"),
                ("102", "104"),
                ("103", "104"),
                ("104", "105"),
                ("105", "106"),
            ]),
        )
    }

    fn basic_math() -> Graph {
        Graph::new(
            vec![
                sample("201", "Arithmetic", 1, 240, 0.0, "tutorial"),
                sample("202", "Linear Algebra", 3, 480, 2000.0, "course"),
                sample("203", "Calculus", 3, 600, 2500.0, "course"),
                sample("204", "Statistics", 2, 360, 1500.0, "course"),
                sample("205", "Discrete Mathematics", 4, 540, 3000.0, "course"),
            ],
            edges(&[("201", "202"), ("201", "203"), ("201", "204"), ("202", "205")]),
        )
    }
}

fn sample(id: &str, title: &str, difficulty: u8, minutes: u32, cost: f64, kind: &str) -> Resource {
    Resource::new(id, title)
        .with_difficulty(difficulty)
        .with_duration(minutes)
        .with_cost(cost)
        .with_type(kind)
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Dependency> {
    pairs
        .iter()
        .map(|(s, t)| Dependency {
            source: (*s).to_string(),
            target: (*t).to_string(),
            weight: Some(1.0),
        })
        .collect()
}

impl GraphSource for SampleSource {
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
        let graph = match topic_id {
            "ai-ml" => Self::ai_ml(),
            "basic-math" => Self::basic_math(),
            "web-dev" => Self::web_dev(),
            other => {
                debug!("No sample for {}, using {}", other, DEFAULT_SAMPLE_TOPIC);
                Self::web_dev()
            }
        };
        Ok(graph)
    }

    fn topics(&self) -> Vec<String> {
        vec!["ai-ml".into(), "basic-math".into(), DEFAULT_SAMPLE_TOPIC.into()]
    }
}

// =============================================================================
// Fallback composition
// =============================================================================

/// Tries `primary`, then `fallback` when the primary errors or returns an
/// empty graph
#[derive(Debug, Clone)]
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSource<P, F> {
    /// Compose two sources
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: GraphSource, F: GraphSource> GraphSource for FallbackSource<P, F> {
    fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
        match self.primary.fetch(topic_id) {
            Ok(graph) if !graph.is_empty() => Ok(graph),
            Ok(_) => {
                warn!("Topic {} has no resources, using fallback source", topic_id);
                self.fallback.fetch(topic_id)
            }
            Err(e) => {
                warn!("Primary source failed for {}: {}, using fallback source", topic_id, e);
                self.fallback.fetch(topic_id)
            }
        }
    }

    fn topics(&self) -> Vec<String> {
        let mut topics = self.primary.topics();
        for topic in self.fallback.topics() {
            if !topics.contains(&topic) {
                topics.push(topic);
            }
        }
        topics.sort();
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::has_cycles;
    use tempfile::TempDir;

    struct Failing;

    impl GraphSource for Failing {
        fn fetch(&self, topic_id: &str) -> Result<Graph, SourceError> {
            Err(SourceError::TopicNotFound(topic_id.to_string()))
        }
    }

    struct Empty;

    impl GraphSource for Empty {
        fn fetch(&self, _topic_id: &str) -> Result<Graph, SourceError> {
            Ok(Graph::default())
        }
    }

    #[test]
    fn test_samples_are_acyclic() {
        for topic in SampleSource.topics() {
            let graph = SampleSource.fetch(&topic).unwrap();
            assert!(!graph.is_empty(), "{topic} should have resources");
            assert!(!has_cycles(&graph), "{topic} should be acyclic");
        }
    }

    #[test]
    fn test_unknown_sample_topic_is_web_dev() {
        let graph = SampleSource.fetch("quantum-basket-weaving").unwrap();
        assert_eq!(graph, SampleSource.fetch(DEFAULT_SAMPLE_TOPIC).unwrap());
    }

    #[test]
    fn test_json_dir_source_reads_topic() {
        let dir = TempDir::new().unwrap();
        let graph = Graph::new(
            vec![Resource::new("a", "Alpha").with_duration(30)],
            vec![],
        );
        fs::write(
            dir.path().join("rust.json"),
            serde_json::to_string(&graph).unwrap(),
        )
        .unwrap();

        let source = JsonDirSource::new(dir.path());
        assert_eq!(source.fetch("rust").unwrap(), graph);
        assert_eq!(source.topics(), vec!["rust".to_string()]);
    }

    #[test]
    fn test_json_dir_source_missing_topic() {
        let dir = TempDir::new().unwrap();
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(
            source.fetch("absent"),
            Err(SourceError::TopicNotFound(t)) if t == "absent"
        ));
        assert!(matches!(
            source.fetch("../etc/passwd"),
            Err(SourceError::TopicNotFound(_))
        ));
    }

    #[test]
    fn test_json_dir_source_bad_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let source = JsonDirSource::new(dir.path());
        assert!(matches!(source.fetch("broken"), Err(SourceError::Parse { .. })));
    }

    #[test]
    fn test_fallback_on_error_and_empty() {
        let on_error = FallbackSource::new(Failing, SampleSource);
        assert!(!on_error.fetch("ai-ml").unwrap().is_empty());

        let on_empty = FallbackSource::new(Empty, SampleSource);
        assert_eq!(
            on_empty.fetch("ai-ml").unwrap(),
            SampleSource.fetch("ai-ml").unwrap()
        );
    }

    #[test]
    fn test_fallback_prefers_primary() {
        let dir = TempDir::new().unwrap();
        let graph = Graph::new(vec![Resource::new("only", "Only")], vec![]);
        fs::write(
            dir.path().join("web-dev.json"),
            serde_json::to_string(&graph).unwrap(),
        )
        .unwrap();
        let source = FallbackSource::new(JsonDirSource::new(dir.path()), SampleSource);
        assert_eq!(source.fetch("web-dev").unwrap(), graph);
        assert_eq!(
            source.topics(),
            vec!["ai-ml".to_string(), "basic-math".into(), "web-dev".into()]
        );
    }
}
