//! CLI command implementations.

pub mod build;
mod helpers;
pub mod reference;
pub mod serve;
pub mod tangle;
pub mod watch;
pub mod weave;

pub use build::{build, BuildOptions};
pub use reference::{reference, ReferenceOptions};
pub use serve::{serve, ServeOptions};
pub use tangle::{tangle, TangleOptions};
pub use watch::{watch, WatchOptions};
pub use weave::{weave, WeaveOptions};
