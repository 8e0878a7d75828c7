//! File system output.

mod transaction;

pub use transaction::{Action, CopyFile, RunTool, Transaction, WriteFile};
