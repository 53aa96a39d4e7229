// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod neighbors;
pub mod paths;
pub mod plan;
pub mod prune;
pub mod sort;

use crate::config::Config;
use crate::source::load_graph_file;
use crate::types::{Constraints, Graph, LearningPath, Resource};
use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: Config,
    /// Emit JSON instead of text
    pub json: bool,
    /// Colorize text output
    pub color: bool,
}

impl Context {
    /// Print a value as pretty JSON
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }

    /// Style a heading
    #[must_use]
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style a success marker
    #[must_use]
    pub fn good(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style a failure marker
    #[must_use]
    pub fn bad(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style secondary text
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print one resource as a list entry
    pub fn print_resource(&self, index: usize, resource: &Resource) {
        let mut details = Vec::new();
        if let Some(d) = resource.difficulty {
            details.push(format!("difficulty {d}"));
        }
        if let Some(m) = resource.duration_min {
            details.push(format!("{m} min"));
        }
        if let Some(c) = resource.cost_amount {
            details.push(format!("cost {c}"));
        }
        if let Some(t) = &resource.resource_type {
            details.push(t.clone());
        }
        let title = if resource.title.is_empty() {
            resource.id.as_str()
        } else {
            resource.title.as_str()
        };
        println!(
            "  {:>2}. {} {} {}",
            index + 1,
            title,
            self.dim(&format!("[{}]", resource.id)),
            self.dim(&details.join(", "))
        );
    }

    /// Print a learning path with its totals and violations
    pub fn print_path(&self, path: &LearningPath) {
        if path.is_empty() {
            println!("  {}", self.dim("(no eligible resources)"));
        }
        for (i, node) in path.nodes.iter().enumerate() {
            self.print_resource(i, node);
        }
        println!();
        println!(
            "  Total: {:.1}h ({} min), cost {}, avg difficulty {:.1}",
            path.total_hours(),
            path.total_duration,
            path.total_cost,
            path.average_difficulty
        );
        if path.is_valid {
            println!("  {}", self.good("Within all constraints"));
        } else {
            for violation in &path.violated_constraints {
                println!("  {} {}", self.bad("✗"), violation);
            }
        }
    }
}

/// Constraint flags shared by planning commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConstraintArgs {
    /// Total time budget in hours
    #[arg(long = "max-hours", value_name = "HOURS")]
    pub max_duration_hours: Option<f64>,

    /// Total cost budget
    #[arg(long = "max-cost", value_name = "AMOUNT")]
    pub max_cost_amount: Option<f64>,

    /// Ceiling on average difficulty (1-5)
    #[arg(long = "max-difficulty", value_name = "LEVEL")]
    pub max_difficulty: Option<f64>,

    /// Resource that must be included (repeatable)
    #[arg(long = "require", value_name = "ID")]
    pub required_nodes: Vec<String>,

    /// Resource that must be excluded (repeatable)
    #[arg(long = "exclude", value_name = "ID")]
    pub excluded_nodes: Vec<String>,
}

impl ConstraintArgs {
    /// Merge flags over configured defaults; flags win, exclusions add up
    #[must_use]
    pub fn resolve(&self, defaults: &Constraints) -> Constraints {
        let mut excluded_nodes = defaults.excluded_nodes.clone();
        for id in &self.excluded_nodes {
            if !excluded_nodes.contains(id) {
                excluded_nodes.push(id.clone());
            }
        }
        Constraints {
            max_duration_hours: self.max_duration_hours.or(defaults.max_duration_hours),
            max_cost_amount: self.max_cost_amount.or(defaults.max_cost_amount),
            max_difficulty: self.max_difficulty.or(defaults.max_difficulty),
            required_nodes: self.required_nodes.clone(),
            excluded_nodes,
        }
    }
}

/// Load a graph file for a command
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_graph(path: &Path) -> Result<Graph> {
    load_graph_file(path).with_context(|| format!("Failed to load graph from {}", path.display()))
}
