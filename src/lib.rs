//! `voxmerge` groups regularly spaced 3D blocks that share a voxel lattice
//! and writes each group out as a single volumetric grid
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of the workspace crates.
#[doc(inline)]
pub use voxmerge_container as container;

#[doc(inline)]
pub use voxmerge_grid as grid;

#[doc(inline)]
pub use voxmerge_merge as merge;

#[doc(inline)]
pub use voxmerge_utils as utils;
