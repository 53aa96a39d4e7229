// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Paths and optimize commands over a graph file

use super::{load_graph, ConstraintArgs, Context};
use crate::optimize::optimize_learning_path;
use crate::path::find_learning_paths;
use anyhow::Result;
use std::path::Path;

/// Print candidate paths (prune, sort, assemble; no budget selection)
pub fn run(ctx: &Context, file: &Path, args: &ConstraintArgs) -> Result<()> {
    let graph = load_graph(file)?;
    let constraints = args.resolve(&ctx.config.defaults.to_constraints());
    let paths = find_learning_paths(&graph, &constraints)?;

    if ctx.json {
        return ctx.print_json(&paths);
    }

    for (i, path) in paths.iter().enumerate() {
        println!("{}", ctx.heading(&format!("Candidate {}:", i + 1)));
        ctx.print_path(path);
    }
    Ok(())
}

/// Print the budget-optimized path
pub fn optimize(ctx: &Context, file: &Path, args: &ConstraintArgs) -> Result<()> {
    let graph = load_graph(file)?;
    let constraints = args.resolve(&ctx.config.defaults.to_constraints());
    let path = optimize_learning_path(&graph, &constraints)?;

    if ctx.json {
        return ctx.print_json(&path);
    }

    println!("{}", ctx.heading("Optimized path:"));
    ctx.print_path(&path);
    Ok(())
}
