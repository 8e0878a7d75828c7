//! Shared command helpers.

use weft::errors::Result;
use weft::io::Transaction;

/// Runs a transaction, or only lists its actions on a dry run.
pub fn run_transaction(transaction: &Transaction, dry_run: bool) -> Result<()> {
    if transaction.is_empty() {
        println!("Nothing to build.");
        return Ok(());
    }

    if dry_run {
        println!("Would perform {} actions:", transaction.len());
        for desc in transaction.describe() {
            println!("  {}", desc);
        }
        return Ok(());
    }

    transaction.execute()?;
    tracing::debug!("Performed {} actions", transaction.len());
    Ok(())
}
