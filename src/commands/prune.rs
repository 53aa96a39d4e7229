// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Prune command - apply per-resource caps and print the reduced graph

use super::{load_graph, ConstraintArgs, Context};
use crate::prune::prune_graph;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Prune a graph file
///
/// The pruned graph is always JSON so it can be fed back into other
/// commands; it goes to `output` when given, stdout otherwise.
pub fn run(ctx: &Context, file: &Path, args: &ConstraintArgs, output: Option<PathBuf>) -> Result<()> {
    let graph = load_graph(file)?;
    let constraints = args.resolve(&ctx.config.defaults.to_constraints());
    let pruned = prune_graph(&graph, &constraints);

    tracing::info!(
        "Kept {} of {} resources, {} of {} dependencies",
        pruned.nodes.len(),
        graph.nodes.len(),
        pruned.edges.len(),
        graph.edges.len()
    );

    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&pruned).context("Failed to serialize graph")?;
            fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Pruned graph written to {}", path.display());
            Ok(())
        }
        None => ctx.print_json(&pruned),
    }
}
