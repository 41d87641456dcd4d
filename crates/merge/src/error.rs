//! Result and Error types for voxmerge-merge

// voxmerge modules
use voxmerge_container::ElementClass;

/// Type alias for Result<T, merge::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of every [Error]
///
/// Every variant is fatal to a run, the kind only says where the fault lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A dataset can not be used as a block at all
    InputShape,
    /// Blocks, collections or values contradict each other
    ConsistencyViolation,
    /// Writing the output failed
    Sink,
    /// The container could not be read
    Container,
}

/// The error type for the `voxmerge-merge` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read container")]
    ContainerError(#[from] voxmerge_container::Error),

    #[error("failed to write grids")]
    SinkError(#[from] voxmerge_grid::Error),

    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    #[error("dataset \"{dataset}\" holds {found} values, only FLOAT datasets can be merged")]
    UnsupportedElementType {
        dataset: String,
        found: ElementClass,
    },

    #[error("dataset \"{dataset}\" has {found} dimensions, only 3D datasets can be merged")]
    UnexpectedRank { dataset: String, found: usize },

    #[error("dataset \"{0}\" is empty")]
    EmptyDataset(String),

    #[error(
        "inconsistent number of values in \"{dataset}\" (expected {expected:?}, found {found:?})"
    )]
    UnexpectedValueCount {
        dataset: String,
        expected: usize,
        found: usize,
    },

    #[error("dataset \"{dataset}\" shape {shape:?} holds more voxels than can be addressed")]
    ShapeOverflow { dataset: String, shape: Vec<usize> },

    #[error("dataset \"{dataset}\" has invalid spacing {delta:?}, every component must be positive")]
    InvalidDelta { dataset: String, delta: [f64; 3] },

    #[error("dataset \"{0}\" requested more than once")]
    DuplicateBlock(String),

    #[error(
        "block \"{block}\" lies before collection origin {collection_origin:?} (offset {offset:?})"
    )]
    NegativeOffset {
        block: String,
        offset: [i64; 3],
        collection_origin: [f64; 3],
    },

    #[error("block \"{block}\" does not fit in the grid index range (offset {offset:?})")]
    OffsetOverflow { block: String, offset: [i64; 3] },

    #[error("block \"{block}\" is not on the lattice of collection \"{collection}\"")]
    InconsistentMember { block: String, collection: String },

    #[error("block \"{block}\" value range [{min}, {max}] can not be normalised")]
    DegenerateRange { block: String, min: f32, max: f32 },

    #[error("block \"{block}\" has a NaN or infinite value at index {index}")]
    UndefinedValues { block: String, index: usize },
}

impl Error {
    /// Where the fault lies, see [ErrorKind]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContainerError(_) => ErrorKind::Container,
            Self::SinkError(_) | Self::IOError(_) | Self::ProgressBar(_) => ErrorKind::Sink,
            Self::UnsupportedElementType { .. }
            | Self::UnexpectedRank { .. }
            | Self::EmptyDataset(_)
            | Self::UnexpectedValueCount { .. }
            | Self::ShapeOverflow { .. }
            | Self::InvalidDelta { .. }
            | Self::DuplicateBlock(_) => ErrorKind::InputShape,
            Self::NegativeOffset { .. }
            | Self::OffsetOverflow { .. }
            | Self::InconsistentMember { .. }
            | Self::DegenerateRange { .. }
            | Self::UndefinedValues { .. } => ErrorKind::ConsistencyViolation,
        }
    }
}
