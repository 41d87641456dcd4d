//! Block descriptors and their validated ingestion from a container

// standard library
use std::collections::HashSet;

// crate modules
use crate::error::{Error, Result};

// voxmerge modules
use voxmerge_container::{read_array, Container, ElementClass};

// extrenal crates
use log::{debug, trace};
use nalgebra::Vector3;
use serde::Serialize;

/// Attribute holding the world position of the first voxel
pub const ORIGIN_ATTRIBUTE: &str = "origin";
/// Attribute holding the spacing along each axis
pub const DELTA_ATTRIBUTE: &str = "delta";
/// Attribute holding the origin on the global integer lattice
pub const IORIGIN_ATTRIBUTE: &str = "iorigin";

/// Spatial metadata for one regularly spaced input dataset
///
/// Vectors are in world axis order `(x, y, z)`. The `dims` are the dataset
/// shape as stored, slowest varying first, so `dims[0]` runs along world `z`
/// and `dims[2]` along world `x` (see [world_dims()](Block::world_dims)).
///
/// The values themselves are not part of the descriptor. They are read on
/// demand with [load_values()] and dropped once placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Dataset path, unique within a run
    pub name: String,
    /// World position of the first voxel
    pub origin: Vector3<f64>,
    /// Voxel spacing, strictly positive
    pub delta: Vector3<f64>,
    /// Origin on the global integer lattice, only used as a hint
    pub iorigin: [i64; 3],
    /// Voxel extent of the stored dataset, slowest varying first
    pub dims: [usize; 3],
}

impl Block {
    /// Create a block, checking the spacing and extent
    ///
    /// The extent must be non-empty and its voxel count must fit in a `usize`.
    ///
    /// ```rust
    /// # use voxmerge_merge::Block;
    /// # use nalgebra::Vector3;
    /// let block = Block::new("rho", Vector3::zeros(), Vector3::repeat(0.5), [0, 0, 0], [4, 2, 1]);
    /// assert_eq!(block.unwrap().voxel_count(), 8);
    ///
    /// // spacing must be positive
    /// let block = Block::new("rho", Vector3::zeros(), Vector3::new(0.5, 0.0, 0.5), [0, 0, 0], [1, 1, 1]);
    /// assert!(block.is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        origin: Vector3<f64>,
        delta: Vector3<f64>,
        iorigin: [i64; 3],
        dims: [usize; 3],
    ) -> Result<Self> {
        let name = name.into();

        if delta.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(Error::InvalidDelta {
                dataset: name,
                delta: delta.into(),
            });
        }

        if dims.iter().any(|d| *d == 0) {
            return Err(Error::EmptyDataset(name));
        }

        if dims.iter().try_fold(1usize, |n, d| n.checked_mul(*d)).is_none() {
            return Err(Error::ShapeOverflow {
                dataset: name,
                shape: dims.to_vec(),
            });
        }

        Ok(Self {
            name,
            origin,
            delta,
            iorigin,
            dims,
        })
    }

    /// Total number of voxels, known to fit since [Block::new()]
    pub fn voxel_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Voxel extent in world axis order `(x, y, z)`
    pub fn world_dims(&self) -> [usize; 3] {
        [self.dims[2], self.dims[1], self.dims[0]]
    }

    /// World position of the last voxel
    pub fn upper(&self) -> Vector3<f64> {
        let [nx, ny, nz] = self.world_dims();
        let steps = Vector3::new(nx as f64, ny as f64, nz as f64) - Vector3::repeat(1.0);
        self.origin + steps.component_mul(&self.delta)
    }
}

/// Open a dataset and turn it into a validated [Block]
///
/// The dataset is rejected if:
/// - the elements are not floats
/// - it is not exactly 3 dimensional
/// - it holds no voxels
/// - the stored element count does not match the shape
/// - the origin, delta or iorigin attributes are missing or not 3 long
/// - any delta is not strictly positive
///
/// Only metadata is read, the values stay in the container.
pub fn read_block<C: Container + ?Sized>(container: &C, name: &str) -> Result<Block> {
    let info = container.open_dataset(name)?;
    trace!("{name}: {info:?}");

    if info.class != ElementClass::Float {
        return Err(Error::UnsupportedElementType {
            dataset: info.name,
            found: info.class,
        });
    }

    let dims: [usize; 3] = info
        .shape
        .as_slice()
        .try_into()
        .map_err(|_| Error::UnexpectedRank {
            dataset: info.name.clone(),
            found: info.rank(),
        })?;

    let expected = info.shape_len().ok_or_else(|| Error::ShapeOverflow {
        dataset: info.name.clone(),
        shape: info.shape.clone(),
    })?;
    if expected == 0 || info.len == 0 {
        return Err(Error::EmptyDataset(info.name));
    }

    if info.len != expected {
        return Err(Error::UnexpectedValueCount {
            dataset: info.name,
            expected,
            found: info.len,
        });
    }

    let origin: [f64; 3] = read_array(container, name, ORIGIN_ATTRIBUTE)?;
    let delta: [f64; 3] = read_array(container, name, DELTA_ATTRIBUTE)?;
    let iorigin: [i64; 3] = read_array(container, name, IORIGIN_ATTRIBUTE)?;

    Block::new(info.name, origin.into(), delta.into(), iorigin, dims)
}

/// Read and validate every named block, in the order given
///
/// Any failure aborts the whole batch, as do repeated names.
pub fn read_blocks<C, S>(container: &C, names: &[S]) -> Result<Vec<Block>>
where
    C: Container + ?Sized,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut blocks = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(Error::DuplicateBlock(name.to_string()));
        }
        let block = read_block(container, name)?;
        debug!(
            "Block {name}: dims {:?}, origin {:?}, delta {:?}",
            block.dims,
            block.origin.as_slice(),
            block.delta.as_slice()
        );
        blocks.push(block);
    }

    Ok(blocks)
}

/// Read the values of a block into an owned buffer
///
/// The length is checked against the block extent before anything else can
/// touch the data.
pub fn load_values<C: Container + ?Sized>(container: &C, block: &Block) -> Result<Vec<f32>> {
    let values = container.read_values(&block.name)?;
    if values.len() != block.voxel_count() {
        return Err(Error::UnexpectedValueCount {
            dataset: block.name.clone(),
            expected: block.voxel_count(),
            found: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use voxmerge_container::{AttributeValue, MemoryContainer, MemoryDataset};

    fn dataset(name: &str, shape: Vec<usize>, values: Vec<f32>) -> MemoryDataset {
        MemoryDataset::new(name, shape, values)
            .with_attribute("origin", AttributeValue::Float(vec![1.0, 2.0, 3.0]))
            .with_attribute("delta", AttributeValue::Float(vec![0.5, 0.5, 0.5]))
            .with_attribute("iorigin", AttributeValue::Integer(vec![2, 4, 6]))
    }

    #[test]
    fn valid_block() {
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![1, 2, 3], vec![0.0; 6])]);
        let block = read_block(&container, "rho").unwrap();

        assert_eq!(block.dims, [1, 2, 3]);
        assert_eq!(block.world_dims(), [3, 2, 1]);
        assert_eq!(block.origin, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(block.iorigin, [2, 4, 6]);
        assert_eq!(block.upper(), Vector3::new(2.0, 2.5, 3.0));
    }

    #[test]
    fn rejects_non_float() {
        let mut ds = dataset("rho", vec![1, 1, 1], vec![0.0]);
        ds.class = ElementClass::Integer;
        let container = MemoryContainer::from_datasets(vec![ds]);

        let err = read_block(&container, "rho").unwrap_err();
        assert!(matches!(err, Error::UnsupportedElementType { .. }));
        assert_eq!(err.kind(), ErrorKind::InputShape);
    }

    #[test]
    fn rejects_wrong_rank() {
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![2, 2], vec![0.0; 4])]);
        assert!(matches!(
            read_block(&container, "rho"),
            Err(Error::UnexpectedRank { found: 2, .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![0, 2, 2], vec![])]);
        assert!(matches!(
            read_block(&container, "rho"),
            Err(Error::EmptyDataset(_))
        ));
    }

    #[test]
    fn rejects_size_mismatch() {
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![2, 2, 2], vec![0.0; 7])]);
        assert!(matches!(
            read_block(&container, "rho"),
            Err(Error::UnexpectedValueCount {
                expected: 8,
                found: 7,
                ..
            })
        ));
    }

    #[test]
    fn rejects_overflowing_shape() {
        let huge = 1 << 40;
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![huge, huge, huge], vec![0.0])]);

        let err = read_block(&container, "rho").unwrap_err();
        assert!(matches!(err, Error::ShapeOverflow { .. }));
        assert_eq!(err.kind(), ErrorKind::InputShape);

        assert!(matches!(
            Block::new("rho", Vector3::zeros(), Vector3::repeat(1.0), [0; 3], [huge; 3]),
            Err(Error::ShapeOverflow { .. })
        ));
    }

    #[test]
    fn rejects_bad_delta() {
        let ds = dataset("rho", vec![1, 1, 1], vec![0.0])
            .with_attribute("delta", AttributeValue::Float(vec![0.5, -0.5, 0.5]));
        let container = MemoryContainer::from_datasets(vec![ds]);
        assert!(matches!(
            read_block(&container, "rho"),
            Err(Error::InvalidDelta { .. })
        ));
    }

    #[test]
    fn rejects_short_attribute() {
        let ds = dataset("rho", vec![1, 1, 1], vec![0.0])
            .with_attribute("origin", AttributeValue::Float(vec![0.0, 0.0]));
        let container = MemoryContainer::from_datasets(vec![ds]);

        let err = read_block(&container, "rho").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Container);
    }

    #[test]
    fn rejects_duplicates() {
        let container =
            MemoryContainer::from_datasets(vec![dataset("rho", vec![1, 1, 1], vec![0.0])]);
        assert!(matches!(
            read_blocks(&container, &["rho", "rho"]),
            Err(Error::DuplicateBlock(_))
        ));
    }
}
