//! Weft - Literate Tutorial Builder
//!
//! This library turns markdown tutorials into a small documentation site.
//! Each tutorial is woven into an HTML page with highlighted code, and its
//! code fragments are tangled into a runnable JavaScript file.
//!
//! # Features
//!
//! - **Weave**: Render markdown into HTML page templates with highlighted code blocks
//! - **Tangle**: Substitute `// TODO: label` placeholders with named fragments, then beautify
//! - **Reference**: Scrape `///` comments from binding sources into an API reference page
//! - **Serve**: Preview the generated site over HTTP
//!
//! # Example
//!
//! ```no_run
//! use weft::interface::{build_all, Context};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! let transaction = build_all(&ctx).unwrap();
//! transaction.execute().unwrap();
//! ```

pub mod beautify;
pub mod config;
pub mod errors;
pub mod highlight;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod reference;
pub mod server;
pub mod text_location;
pub mod weave;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{Result, WeftError};
pub use interface::Context;
pub use model::{DocEntity, FragmentMap};
