//! Tangle command implementation.

use weft::errors::Result;
use weft::interface::{tangle_tutorial, tutorial_js_name, Context};
use weft::io::Transaction;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Tutorial to tangle.
    pub name: String,
    /// Print the script instead of writing it.
    pub stdout: bool,
}

/// Executes the tangle command.
pub fn tangle(ctx: &Context, options: TangleOptions) -> Result<()> {
    let script = tangle_tutorial(ctx, &options.name)?;

    if options.stdout {
        print!("{}", script);
        return Ok(());
    }

    let mut transaction = Transaction::new();
    transaction.write(ctx.output_path(tutorial_js_name(&options.name)), script);
    transaction.execute()
}
