// standard library
use std::ops::RangeInclusive;

// voxmerge modules
use voxmerge_utils::f;

// internal modules
use crate::error::{Error, Result};
use crate::vtk::GridToVtkBuilder;
use crate::{Coord, Grid};

// extrenal crates
use log::trace;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, DataArray, DataSet, ElementType, Extent, IOBuffer,
    ImageDataPiece, Piece, RangeExtent, Version, Vtk,
};

/// Convert sparse grids to VTK image data for plotting
///
/// The fields remain public for direct use, but for convenience and style
/// preference a builder pattern is also implemented.
///
/// # Layout
///
/// VTK image data is dense, so the grid is written over the inclusive
/// bounding box of its active voxels. Grid index axes map directly onto the
/// VTK x, y, z axes:
///
/// - `origin` is the world position of the bounding box minimum
/// - `spacing` is the scale of the grid transform
/// - values are point data, one point per voxel
///
/// Inactive voxels inside the bounding box take the grid background value.
///
/// ```rust
/// # use voxmerge_grid::vtk::GridToVtk;
/// # use voxmerge_grid::Grid;
/// let mut grid = Grid::new();
/// grid.set_name("rho");
/// grid.set_value([0, 0, 0], 1.0);
///
/// let vtk = GridToVtk::new().convert(&grid).unwrap();
/// assert_eq!(vtk.title, "rho");
/// ```
///
/// # Byte order
///
/// Important for binary file compatability with plotting software. ParaView
/// does not care, but Visit only likes big endian. This is the default for
/// convenience.
///
/// ```rust
/// # use voxmerge_grid::vtk::GridToVtk;
/// # use vtkio::model::ByteOrder;
/// let converter = GridToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
/// ```
#[derive(Debug, PartialEq)]
pub struct GridToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Include an array flagging which points were written
    pub include_mask: bool,
}

// Public API
impl GridToVtk {
    /// Start with the default configuration
    pub fn new() -> GridToVtk {
        Default::default()
    }

    /// Get an instance of the [GridToVtkBuilder]
    pub fn builder() -> GridToVtkBuilder {
        GridToVtkBuilder::default()
    }

    /// Convert a [Grid] to a vtkio::Vtk object
    ///
    /// Fails with [Error::EmptyGrid] if nothing has been written to the grid,
    /// since there is no extent to describe.
    pub fn convert(&self, grid: &Grid) -> Result<Vtk> {
        let (lo, hi) = grid
            .bounding_box()
            .ok_or_else(|| Error::EmptyGrid(grid.name().to_string()))?;

        let dims = [0usize, 1, 2].map(|a| (hi[a] - lo[a] + 1) as usize);
        trace!("{} point extent {dims:?} from {lo:?}", grid.name());

        let origin = grid.transform().index_to_world(lo);
        let spacing = grid.transform().scale;
        let extent = Self::extent(dims);

        Ok(Vtk {
            version: Version::Auto,
            title: grid.name().to_string(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::ImageData {
                extent: extent.clone(),
                origin: [origin.x as f32, origin.y as f32, origin.z as f32],
                spacing: [spacing.x as f32, spacing.y as f32, spacing.z as f32],
                meta: None,
                pieces: vec![Piece::Inline(Box::new(ImageDataPiece {
                    extent,
                    data: self.collect_attributes(grid, lo, dims),
                }))],
            },
        })
    }
}

impl Default for GridToVtk {
    fn default() -> Self {
        GridToVtkBuilder::default().build()
    }
}

/// Implementations for laying out the point data
impl GridToVtk {
    /// Point extent starting from zero, the origin carries the offset
    fn extent(dims: [usize; 3]) -> Extent {
        let range_ext: RangeExtent = [
            RangeInclusive::new(0, dims[0] as i32 - 1),
            RangeInclusive::new(0, dims[1] as i32 - 1),
            RangeInclusive::new(0, dims[2] as i32 - 1),
        ];
        Extent::Ranges(range_ext)
    }

    /// Dense values, and optionally the mask, in VTK point order
    fn collect_attributes(&self, grid: &Grid, lo: Coord, dims: [usize; 3]) -> Attributes {
        let mut values = vec![grid.background(); dims[0] * dims[1] * dims[2]];
        let mut mask = vec![0_u8; if self.include_mask { values.len() } else { 0 }];

        for (coord, value) in grid.iter_active() {
            let idx = Self::point_index(coord, lo, dims);
            values[idx] = value;
            if self.include_mask {
                mask[idx] = 1;
            }
        }

        let mut attributes = Attributes::new();
        attributes.point.push(Self::scalars(grid.name(), IOBuffer::F32(values)));

        if self.include_mask {
            let name = f!("{}_active", grid.name());
            attributes.point.push(Self::scalars(&name, IOBuffer::U8(mask)));
        }

        attributes
    }

    /// VTK points are ordered with x varying fastest
    fn point_index(coord: Coord, lo: Coord, dims: [usize; 3]) -> usize {
        let [i, j, k] = [0usize, 1, 2].map(|a| (coord[a] - lo[a]) as usize);
        i + dims[0] * (j + dims[1] * k)
    }

    fn scalars(name: &str, data: IOBuffer) -> Attribute {
        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data,
        })
    }
}
