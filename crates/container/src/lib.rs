//! Hierarchical container readers and inspection
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod container;
mod error;
mod memory;
mod model;

#[cfg(feature = "hdf5")]
mod h5;

pub mod inspect;

// standard library
use std::path::Path;

// inline important modules for a nice public API
#[doc(inline)]
pub use container::{read_array, Container, FromAttribute};

#[doc(inline)]
pub use memory::{MemoryContainer, MemoryDataset};

#[doc(inline)]
pub use model::{AttributeValue, DatasetInfo, ElementClass, Entry, EntryKind};

#[cfg(feature = "hdf5")]
#[doc(inline)]
pub use h5::Hdf5Container;

#[doc(inline)]
pub use error::{Error, Result};

/// Open a container, choosing the reader from the file extension
///
/// `.json` files are loaded into a [MemoryContainer]. Anything else is
/// treated as HDF5, which needs the `hdf5` feature.
///
/// ```rust, no_run
/// # use voxmerge_container::{open_container, Container};
/// let container = open_container("./data/blocks.json").unwrap();
/// let datasets = container.list_datasets().unwrap();
/// ```
pub fn open_container<P: AsRef<Path>>(path: P) -> Result<Box<dyn Container>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        return Ok(Box::new(MemoryContainer::from_json_file(path)?));
    }

    #[cfg(feature = "hdf5")]
    {
        Ok(Box::new(Hdf5Container::open(path)?))
    }

    #[cfg(not(feature = "hdf5"))]
    {
        Err(Error::UnsupportedContainer(voxmerge_utils::f!(
            "{} (built without the hdf5 feature)",
            path.display()
        )))
    }
}
