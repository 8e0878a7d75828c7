//! Core model types for weft.

mod doc_tree;
mod fragment;
mod fragment_map;
mod properties;
mod tangle;

pub use doc_tree::{
    DocEntity, TAG_ARGUMENT, TAG_CLASS, TAG_ENUM, TAG_FUNCTION, TAG_METHOD, TAG_RETVAL,
    TAG_STATIC, TAG_VALUE,
};
pub use fragment::Fragment;
pub use fragment_map::FragmentMap;
pub use properties::{FenceInfo, Properties, Property};
pub use tangle::{tangle_fragments, Placeholder, Tangled};
