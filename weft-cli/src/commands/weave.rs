//! Weave command implementation.

use weft::errors::Result;
use weft::interface::{demo_html_name, demo_page, tutorial_html_name, weave_tutorial, Context};
use weft::io::Transaction;

/// Options for the weave command.
#[derive(Debug, Clone, Default)]
pub struct WeaveOptions {
    /// Tutorial to weave.
    pub name: String,
    /// Print the page instead of writing it.
    pub stdout: bool,
}

/// Executes the weave command.
///
/// Writes the tutorial page together with its demo page, which the
/// embedded frame points at.
pub fn weave(ctx: &Context, options: WeaveOptions) -> Result<()> {
    let page = weave_tutorial(ctx, &options.name)?;

    if options.stdout {
        print!("{}", page);
        return Ok(());
    }

    let mut transaction = Transaction::new();
    transaction.write(ctx.output_path(tutorial_html_name(&options.name)), page);
    transaction.write(
        ctx.output_path(demo_html_name(&options.name)),
        demo_page(ctx, &options.name)?,
    );
    transaction.execute()
}
