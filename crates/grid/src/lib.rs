//! Sparse voxel grids and VTK output
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod grid;

pub mod vtk;

// inline important modules for a nice public API
#[doc(inline)]
pub use grid::{Coord, Grid, Transform};

#[doc(inline)]
pub use vtk::{grid_to_vtk, write_all, write_vtk, VtkFormat};

#[doc(inline)]
pub use error::{Error, Result};
