//! High-level interface for weft operations.

mod build;
mod context;
mod reference;
mod tutorial;

pub use build::{build_all, compile_materials, copy_assets};
pub use context::Context;
pub use reference::{build_reference, doc_tree, reference_markdown};
pub use tutorial::{
    demo_html_name, demo_page, tangle_tutorial, tutorial_html_name, tutorial_js_name,
    weave_tutorial,
};
