// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Plan command - plan a topic from the configured graph source

use super::{ConstraintArgs, Context};
use crate::planner::{PlanRequest, Planner};
use crate::source::{FallbackSource, GraphSource, JsonDirSource, SampleSource};
use anyhow::{Context as _, Result};
use tracing::info;

/// Build the graph source described by the configuration
#[must_use]
pub fn source_for(ctx: &Context) -> Box<dyn GraphSource> {
    let dir = JsonDirSource::new(ctx.config.data_dir.clone());
    if ctx.config.fallback_to_samples {
        Box::new(FallbackSource::new(dir, SampleSource))
    } else {
        Box::new(dir)
    }
}

/// Plan a topic and print the report
pub fn run(ctx: &Context, topic: &str, args: &ConstraintArgs) -> Result<()> {
    let request = PlanRequest {
        topic_id: topic.to_string(),
        constraints: args.resolve(&ctx.config.defaults.to_constraints()),
    };
    info!("Planning topic {}", topic);

    let planner = Planner::new(source_for(ctx));
    let report = planner
        .plan(&request)
        .with_context(|| format!("Failed to plan topic {topic}"))?;

    if ctx.json {
        return ctx.print_json(&report);
    }

    let summary = &report.summary;
    println!("{}", ctx.heading(&format!("Learning plan: {}", report.topic_id)));
    println!(
        "  {} resources, {}h, cost {}, {} level",
        summary.node_count, summary.total_hours, summary.total_cost, summary.difficulty_level
    );
    println!();
    ctx.print_path(&report.path);
    Ok(())
}

/// List topics the configured source can serve
pub fn topics(ctx: &Context) -> Result<()> {
    let topics = source_for(ctx).topics();

    if ctx.json {
        return ctx.print_json(&topics);
    }

    if topics.is_empty() {
        println!(
            "No topics found in {}. Add <topic>.json graph files there.",
            ctx.config.data_dir.display()
        );
        return Ok(());
    }

    println!("{}", ctx.heading(&format!("Topics ({}):", topics.len())));
    for topic in &topics {
        println!("  {topic}");
    }
    Ok(())
}
