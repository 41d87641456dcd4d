//! Voxel offsets and placement of block values into a grid

// crate modules
use crate::block::Block;
use crate::error::{Error, Result};

// voxmerge modules
use voxmerge_grid::{Coord, Grid};

// extrenal crates
use log::trace;
use nalgebra::Vector3;

/// Whole number of voxel steps from a collection origin to a block origin
///
/// Rounded per axis, so origins that are only nearly on the lattice still
/// land on the right voxel. An offset below zero on any axis means the block
/// starts before the collection, which is an error and never clamped.
///
/// ```rust
/// # use voxmerge_merge::{placement_offset, Block};
/// # use nalgebra::Vector3;
/// let block = Block::new("b", Vector3::new(2.0, 0.0, 0.0), Vector3::repeat(1.0), [0, 0, 0], [1, 1, 1]).unwrap();
///
/// assert_eq!(placement_offset(&block, &Vector3::zeros()).unwrap(), [2, 0, 0]);
/// assert!(placement_offset(&block, &Vector3::new(3.0, 0.0, 0.0)).is_err());
/// ```
pub fn placement_offset(block: &Block, canonical_origin: &Vector3<f64>) -> Result<[i32; 3]> {
    let steps = (block.origin - canonical_origin).component_div(&block.delta);
    let offset = [0usize, 1, 2].map(|a| steps[a].round() as i64);

    if offset.iter().any(|o| *o < 0) {
        return Err(Error::NegativeOffset {
            block: block.name.clone(),
            offset,
            collection_origin: (*canonical_origin).into(),
        });
    }

    let overflow = || Error::OffsetOverflow {
        block: block.name.clone(),
        offset,
    };

    // the far corner must also fit in the grid coordinate range
    let [nx, ny, nz] = block.world_dims();
    for (o, n) in offset.iter().zip([nx, ny, nz]) {
        let last = o.checked_add(n as i64 - 1).ok_or_else(overflow)?;
        i32::try_from(last).map_err(|_| overflow())?;
    }

    Ok([offset[0] as i32, offset[1] as i32, offset[2] as i32])
}

/// Write block values into the grid at the given voxel offset
///
/// Values are stored slowest varying first, as `values[(i*d1 + j)*d2 + k]`
/// for the stored shape `[d0, d1, d2]`. The fastest stored axis runs along
/// world `x`, so the value lands at grid coordinate
/// `(k + offset[0], j + offset[1], i + offset[2])`.
///
/// ```rust
/// # use voxmerge_merge::{scatter, Block};
/// # use voxmerge_grid::Grid;
/// # use nalgebra::Vector3;
/// // two voxels along the slowest stored axis
/// let block = Block::new("b", Vector3::zeros(), Vector3::repeat(1.0), [0, 0, 0], [2, 1, 1]).unwrap();
/// let mut grid = Grid::new();
/// scatter(&mut grid, &block, &[10.0, 20.0], [0, 0, 0]).unwrap();
///
/// assert_eq!(grid.value([0, 0, 0]), 10.0);
/// assert_eq!(grid.value([0, 0, 1]), 20.0);
/// ```
pub fn scatter(grid: &mut Grid, block: &Block, values: &[f32], offset: [i32; 3]) -> Result<()> {
    if values.len() != block.voxel_count() {
        return Err(Error::UnexpectedValueCount {
            dataset: block.name.clone(),
            expected: block.voxel_count(),
            found: values.len(),
        });
    }

    let [d0, d1, d2] = block.dims;
    trace!("{}: placing {d0}x{d1}x{d2} at {offset:?}", block.name);

    for i in 0..d0 {
        for j in 0..d1 {
            let row = (i * d1 + j) * d2;
            for k in 0..d2 {
                let coord: Coord = [
                    k as i32 + offset[0],
                    j as i32 + offset[1],
                    i as i32 + offset[2],
                ];
                grid.set_value(coord, values[row + k]);
            }
        }
    }

    Ok(())
}
