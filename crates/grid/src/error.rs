//! Result and Error types for voxmerge-grid

/// Type alias for Result<T, grid::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `voxmerge-grid` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("grid \"{0}\" has no active voxels to write")]
    EmptyGrid(String),

    #[error("no grids provided for output \"{0}\"")]
    NothingToWrite(String),

    #[error("grid \"{grid}\" would overwrite \"{path}\", written earlier in the same run")]
    DuplicateOutput { grid: String, path: String },
}
