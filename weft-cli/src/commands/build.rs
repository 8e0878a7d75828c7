//! Build command implementation.

use weft::errors::Result;
use weft::interface::{build_all, Context};

use super::helpers::run_transaction;
use super::serve::{serve, ServeOptions};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Serve the output folder once the build is done.
    pub server: bool,
    /// Dry run - show what would be done without doing it.
    pub dry_run: bool,
}

/// Executes the build command.
pub fn build(ctx: &Context, options: BuildOptions) -> Result<()> {
    tracing::info!("Building {} tutorials...", ctx.config.tutorials.len());

    let transaction = build_all(ctx)?;
    run_transaction(&transaction, options.dry_run)?;

    if options.server && !options.dry_run {
        serve(ctx, ServeOptions::default())?;
    }
    Ok(())
}
