//! Serve command implementation.

use std::path::PathBuf;

use weft::errors::Result;
use weft::interface::Context;

/// Options for the serve command.
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    /// Directory to serve; the output folder when absent.
    pub dir: Option<PathBuf>,
    /// Port; the configured one when absent.
    pub port: Option<u16>,
}

/// Executes the serve command. Blocks until the process is interrupted.
pub fn serve(ctx: &Context, options: ServeOptions) -> Result<()> {
    let dir = options.dir.unwrap_or_else(|| ctx.output_dir());
    let port = options.port.unwrap_or(ctx.config.server.port);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(weft::server::serve(&dir, port, &ctx.config.server.mime_types))
}
