// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use super::{load_graph, Context};
use crate::graph::ResourceGraph;
use anyhow::{bail, Result};
use std::path::Path;

/// Which side of a resource to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Resources that must come first
    Prerequisites,
    /// Resources that build on it
    Dependents,
}

/// List direct prerequisites or dependents of a resource
pub fn run(ctx: &Context, file: &Path, id: &str, direction: Direction) -> Result<()> {
    let graph = load_graph(file)?;
    if graph.get(id).is_none() {
        bail!("Resource not found: {}", id);
    }

    let index = ResourceGraph::new(&graph);
    let (label, found) = match direction {
        Direction::Prerequisites => ("Prerequisites", index.prerequisites(id)),
        Direction::Dependents => ("Dependents", index.dependents(id)),
    };

    if ctx.json {
        return ctx.print_json(&found);
    }

    println!("{}", ctx.heading(&format!("{label} of {id} ({}):", found.len())));
    for (i, resource) in found.iter().enumerate() {
        ctx.print_resource(i, resource);
    }
    Ok(())
}
