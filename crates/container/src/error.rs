//! Result and Error types for the container module

use crate::model::ElementClass;

/// Type alias for `Result<T, container::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `voxmerge-container`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to deserialise a JSON container description
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Failure reported by the native HDF5 library
    #[cfg(feature = "hdf5")]
    #[error("hdf5 error")]
    Hdf5Error(#[from] hdf5::Error),

    /// No dataset exists with the given name
    #[error("dataset \"{0}\" not found")]
    DatasetNotFound(String),

    /// No group exists with the given name
    #[error("group \"{0}\" not found")]
    GroupNotFound(String),

    /// The dataset has no attribute with the given name
    #[error("attribute \"{attribute}\" not found on dataset \"{dataset}\"")]
    AttributeNotFound { dataset: String, attribute: String },

    /// The attribute holds values of a class that cannot be converted
    #[error("attribute \"{attribute}\" on \"{dataset}\" has unexpected type (expected {expected}, found {found})")]
    UnexpectedAttributeType {
        dataset: String,
        attribute: String,
        expected: &'static str,
        found: ElementClass,
    },

    /// The attribute does not hold exactly the expected number of values
    #[error("attribute \"{attribute}\" on \"{dataset}\" has unexpected length (expected {expected}, found {found})")]
    UnexpectedAttributeLength {
        dataset: String,
        attribute: String,
        expected: usize,
        found: usize,
    },

    /// The attribute holds a type the readers do not decode
    #[error("attribute \"{attribute}\" on \"{dataset}\" is not a supported type")]
    UnsupportedAttribute { dataset: String, attribute: String },

    /// No reader is available for the file
    #[error("unsupported container \"{0}\"")]
    UnsupportedContainer(String),
}
