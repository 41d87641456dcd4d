//! Metadata types shared by every container implementation

// standard library
use std::fmt;

// extrenal crates
use serde::{Deserialize, Serialize};

/// Broad class of the elements stored in a dataset or attribute
///
/// Mirrors the type classes of hierarchical formats such as HDF5, without any
/// of the size or byte order details. Only [ElementClass::Float] datasets can
/// be turned into grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementClass {
    /// Signed or unsigned integers
    Integer,
    /// Floating point numbers of any precision
    Float,
    /// Fixed or variable length strings
    String,
    /// Enumerations, including booleans
    Enum,
    /// Structured records
    Compound,
    /// Fixed or variable length arrays
    Array,
    /// Anything else
    Other,
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Enum => "ENUM",
            Self::Compound => "COMPOUND",
            Self::Array => "ARRAY",
            Self::Other => "OTHER",
        };
        write!(f, "{s}")
    }
}

/// Decoded attribute values
///
/// Integer and float attributes are always widened to 64 bits so that a
/// single representation covers every source precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeValue {
    /// Integer array, scalars are a single element
    Integer(Vec<i64>),
    /// Float array, scalars are a single element
    Float(Vec<f64>),
    /// Text
    Text(String),
}

impl AttributeValue {
    /// The element class of the stored values
    pub fn class(&self) -> ElementClass {
        match self {
            Self::Integer(_) => ElementClass::Integer,
            Self::Float(_) => ElementClass::Float,
            Self::Text(_) => ElementClass::String,
        }
    }

    /// Number of elements held, text counts as one
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(_) => 1,
        }
    }

    /// True for empty numeric arrays
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kind of an entry in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Group,
    Dataset,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Dataset => write!(f, "dataset"),
        }
    }
}

/// A single member of a group
///
/// The `path` is relative to the container root with `/` separators and no
/// leading slash, so root members are just their own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path from the root
    pub path: String,
    /// Group or dataset
    pub kind: EntryKind,
}

impl Entry {
    /// Last component of the path
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Metadata describing one dataset
///
/// Nothing here requires the values to be read, so it is cheap to open every
/// dataset in a container for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// Full path of the dataset
    pub name: String,
    /// Element class of the stored values
    pub class: ElementClass,
    /// Extent of each dimension, slowest varying first
    pub shape: Vec<usize>,
    /// Number of elements actually held in storage
    pub len: usize,
    /// Names of the attributes attached to the dataset
    pub attributes: Vec<String>,
}

impl DatasetInfo {
    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements implied by the shape, `None` if it overflows
    pub fn shape_len(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |n, d| n.checked_mul(*d))
    }
}
