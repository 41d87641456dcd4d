// internal modules
use crate::vtk::GridToVtk;

// extrenal crates
use vtkio::model::ByteOrder;

/// Chained configuration for [GridToVtk]
///
/// Every setter is optional, anything left alone keeps its default. Call
/// [build()](GridToVtkBuilder::build) to get the converter.
///
/// ```rust, no_run
/// # use voxmerge_grid::vtk::{write_all_with, GridToVtk, VtkFormat};
/// # use voxmerge_grid::Grid;
/// # use vtkio::model::ByteOrder;
/// # let grids = vec![Grid::default()];
/// let converter = GridToVtk::builder()
///     .include_mask(true)
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
///
/// // Little endian legacy binaries with a mask array for every grid
/// write_all_with("./merged.vtk", &grids, VtkFormat::LegacyBinary, &converter).unwrap();
/// ```
#[derive(Debug)]
pub struct GridToVtkBuilder {
    byte_order: ByteOrder,
    include_mask: bool,
}

impl GridToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [GridToVtk] type
    pub fn build(self) -> GridToVtk {
        GridToVtk {
            byte_order: self.byte_order,
            include_mask: self.include_mask,
        }
    }

    /// Set the byte ordering
    ///
    /// Visit only reads big endian legacy binaries even though most systems
    /// are little endian, so big endian is the default.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Include an activity mask in output files
    ///
    /// Sparse grids are written densely over the bounding box of the active
    /// voxels, with gaps filled by the background value. The mask is a second
    /// point array, `1` where a voxel was written and `0` elsewhere, so the gaps
    /// can be thresholded away in ParaView.
    pub fn include_mask(mut self, include: bool) -> Self {
        self.include_mask = include;
        self
    }
}

impl Default for GridToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            include_mask: false,
        }
    }
}
