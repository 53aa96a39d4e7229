// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use super::Context;
use crate::config::{default_config_path, to_toml};
use anyhow::Result;

/// Print the effective configuration
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.json {
        return ctx.print_json(&ctx.config);
    }

    if let Some(path) = default_config_path() {
        println!("{}", ctx.dim(&format!("# default file: {}", path.display())));
    }
    print!("{}", to_toml(&ctx.config)?);
    Ok(())
}
