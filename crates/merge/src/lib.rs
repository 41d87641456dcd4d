//! Lattice-consistent grouping and voxel placement of gridded blocks
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod assemble;
mod block;
mod collection;
mod consistency;
mod error;
mod group;
mod placement;
mod transform;

// inline important modules for a nice public API
#[doc(inline)]
pub use block::{
    load_values, read_block, read_blocks, Block, DELTA_ATTRIBUTE, IORIGIN_ATTRIBUTE,
    ORIGIN_ATTRIBUTE,
};

#[doc(inline)]
pub use consistency::{blocks_consistent, is_consistent, Tolerance};

#[doc(inline)]
pub use collection::Collection;

#[doc(inline)]
pub use group::{group, group_with};

#[doc(inline)]
pub use placement::{placement_offset, scatter};

#[doc(inline)]
pub use transform::ValueTransform;

#[doc(inline)]
pub use assemble::{assemble, sanitise_name, Assembler, AssemblerBuilder};

#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
