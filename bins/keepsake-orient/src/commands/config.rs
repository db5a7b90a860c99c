//! Config command - print the effective configuration

use super::Context;
use keepsake_cli::output::Status;
use keepsake_core::Result;

/// Run config command
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ctx.config.schema)?);
        return Ok(());
    }

    match &ctx.config.path {
        Some(path) => Status::info(&format!("Loaded from {}", path)),
        None => Status::info("No configuration file found, using defaults"),
    }
    println!();
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
