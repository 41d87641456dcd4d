//! Small extensions to `std` types shared by every voxmerge crate
#![doc = include_str!("../readme.md")]

/// Shorthand for `format!`
pub use std::format as f;

mod error;
mod slice_ext;
mod string_ext;
mod value_ext;

pub use error::{Error, Result};
pub use slice_ext::SliceExt;
pub use string_ext::StringExt;
pub use value_ext::ValueExt;
