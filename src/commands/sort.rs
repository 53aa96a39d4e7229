// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Sort and check commands - dependency order and cycle detection

use super::{load_graph, Context};
use crate::graph::ResourceGraph;
use anyhow::{bail, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

/// Print the graph's resources in dependency order
pub fn run(ctx: &Context, file: &Path) -> Result<()> {
    let graph = load_graph(file)?;
    let order = ResourceGraph::new(&graph).topological_order()?;
    info!("Ordered {} resources", order.len());

    if ctx.json {
        return ctx.print_json(&order);
    }

    println!("{}", ctx.heading(&format!("Dependency order ({}):", order.len())));
    for (i, resource) in order.iter().enumerate() {
        ctx.print_resource(i, resource);
    }
    Ok(())
}

/// Report whether the graph can be ordered; fails if it has a cycle
pub fn check(ctx: &Context, file: &Path) -> Result<()> {
    let graph = load_graph(file)?;
    let index = ResourceGraph::new(&graph);
    let result = index.topological_order();

    if ctx.json {
        ctx.print_json(&json!({
            "nodes": graph.nodes.len(),
            "edges": index.edge_count(),
            "danglingEdges": graph.edges.len() - index.edge_count(),
            "hasCycles": result.is_err(),
        }))?;
    } else {
        println!(
            "{} resources, {} dependencies ({} dangling ignored)",
            graph.nodes.len(),
            index.edge_count(),
            graph.edges.len() - index.edge_count()
        );
    }

    match result {
        Ok(_) => {
            if !ctx.json {
                println!("{}", ctx.good("No cycles"));
            }
            Ok(())
        }
        Err(e) => bail!(e),
    }
}
