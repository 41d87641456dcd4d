//! Turning collections of blocks into populated grids

// crate modules
use crate::block::{load_values, read_block};
use crate::collection::Collection;
use crate::consistency::Tolerance;
use crate::error::{Error, Result};
use crate::placement::{placement_offset, scatter};
use crate::transform::ValueTransform;

// voxmerge modules
use voxmerge_container::Container;
use voxmerge_grid::Grid;
use voxmerge_utils::StringExt;

// extrenal crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info};

/// Characters that downstream readers can not handle in a grid name
const RESERVED: [char; 3] = [' ', ':', '='];

/// Replace characters that are not allowed in a grid name with underscores
///
/// ```rust
/// # use voxmerge_merge::sanitise_name;
/// assert_eq!(sanitise_name("rho: t=0 s"), "rho__t_0_s");
/// assert_eq!(sanitise_name("flux"), "flux");
/// ```
pub fn sanitise_name(name: &str) -> String {
    name.replace_any(&RESERVED, '_')
}

/// Assemble one grid per collection with default settings
///
/// Shorthand for an [Assembler] with the [ValueTransform] picked from
/// `normalize` and `offset`.
pub fn assemble<C: Container + ?Sized>(
    container: &C,
    collections: &[Collection],
    normalize: bool,
    offset: f32,
) -> Result<Vec<Grid>> {
    Assembler::builder()
        .transform(ValueTransform::new(normalize, offset))
        .build()
        .assemble(container, collections)
}

/// Configurable grid assembly
///
/// For each collection a grid is created with the collection spacing as its
/// scale and the canonical origin as its translation. Every member is then
/// read back from the container, re-validated against the collection,
/// transformed, and scattered into place. Values are dropped as soon as a
/// block is placed.
///
/// Any failure aborts the whole run, partial grids are never returned.
///
/// ```rust
/// # use voxmerge_merge::{Assembler, ValueTransform};
/// let assembler = Assembler::builder()
///     .transform(ValueTransform::Normalize { offset: 0.0 })
///     .disable_progress(true)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assembler {
    /// Transform applied to each block before placement
    pub transform: ValueTransform,
    /// Tolerances used to re-check membership
    pub tolerance: Tolerance,
    /// Hide the progress bar
    pub disable_progress: bool,
}

impl Assembler {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an [AssemblerBuilder]
    pub fn builder() -> AssemblerBuilder {
        AssemblerBuilder::default()
    }

    /// Build a grid for every collection, in order
    pub fn assemble<C: Container + ?Sized>(
        &self,
        container: &C,
        collections: &[Collection],
    ) -> Result<Vec<Grid>> {
        let total = collections.iter().map(|c| c.len()).sum();
        let mut progress = self.init_progress_bar(total)?;

        let mut grids = Vec::with_capacity(collections.len());
        for collection in collections {
            grids.push(self.assemble_one(container, collection, &mut progress)?);
        }

        if !self.disable_progress {
            eprintln!();
        }

        Ok(grids)
    }

    fn assemble_one<C: Container + ?Sized>(
        &self,
        container: &C,
        collection: &Collection,
        progress: &mut Bar,
    ) -> Result<Grid> {
        let mut grid = Grid::new();
        grid.set_name(sanitise_name(&collection.name));
        grid.set_transform(collection.delta, collection.canonical_origin);
        debug!(
            "Grid {}: origin {:?}, delta {:?}, {} member(s)",
            grid.name(),
            collection.canonical_origin.as_slice(),
            collection.delta.as_slice(),
            collection.len()
        );

        for name in &collection.members {
            let block = read_block(container, name)?;
            if !collection.accepts(&block, &self.tolerance) {
                return Err(Error::InconsistentMember {
                    block: block.name,
                    collection: collection.name.clone(),
                });
            }

            let mut values = load_values(container, &block)?;
            self.transform.apply(&block.name, &mut values)?;

            let offset = placement_offset(&block, &collection.canonical_origin)?;
            scatter(&mut grid, &block, &values, offset)?;
            progress.update(1)?;
        }

        info!(
            "Assembled {} with {} active voxels",
            grid.name(),
            grid.active_voxel_count()
        );
        Ok(grid)
    }

    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        let mut bar = BarBuilder::default()
            .total(total)
            .unit(" blocks")
            .disable(self.disable_progress)
            .build()
            .map_err(Error::ProgressBar)?;

        if !self.disable_progress {
            bar.refresh()?;
        }
        Ok(bar)
    }
}

/// Builder for [Assembler]
///
/// Any number of parameters can be set, the rest keep their defaults. Call
/// [build()](AssemblerBuilder::build) for the final [Assembler].
#[derive(Debug, Clone, Default)]
pub struct AssemblerBuilder {
    transform: ValueTransform,
    tolerance: Tolerance,
    disable_progress: bool,
}

impl AssemblerBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [Assembler] type
    pub fn build(self) -> Assembler {
        Assembler {
            transform: self.transform,
            tolerance: self.tolerance,
            disable_progress: self.disable_progress,
        }
    }

    /// Transform applied to every block
    pub fn transform(mut self, transform: ValueTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Tolerances for re-checking that members share the collection lattice
    ///
    /// Should match whatever the collections were grouped with.
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Hide the progress bar
    pub fn disable_progress(mut self, disable: bool) -> Self {
        self.disable_progress = disable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::read_blocks;
    use crate::error::ErrorKind;
    use crate::group::group;
    use nalgebra::Vector3;
    use voxmerge_container::{AttributeValue, MemoryContainer, MemoryDataset};

    fn dataset(name: &str, origin: [f64; 3], shape: Vec<usize>, values: Vec<f32>) -> MemoryDataset {
        MemoryDataset::new(name, shape, values)
            .with_attribute("origin", AttributeValue::Float(origin.to_vec()))
            .with_attribute("delta", AttributeValue::Float(vec![1.0, 1.0, 1.0]))
            .with_attribute("iorigin", AttributeValue::Integer(vec![0, 0, 0]))
    }

    fn quiet(normalize: bool, offset: f32) -> Assembler {
        Assembler::builder()
            .transform(ValueTransform::new(normalize, offset))
            .disable_progress(true)
            .build()
    }

    #[test]
    fn names_are_sanitised() {
        assert_eq!(sanitise_name("a b:c=d"), "a_b_c_d");
        assert_eq!(sanitise_name(""), "");
    }

    #[test]
    fn single_collection() {
        let container = MemoryContainer::from_datasets(vec![
            dataset("t = 0", [0.0, 0.0, 0.0], vec![1, 1, 2], vec![1.0, 2.0]),
            dataset("t = 1", [2.0, 0.0, 0.0], vec![1, 1, 1], vec![3.0]),
        ]);
        let blocks = read_blocks(&container, &["t = 0", "t = 1"]).unwrap();
        let collections = group(&blocks);
        let grids = quiet(false, 0.0).assemble(&container, &collections).unwrap();

        assert_eq!(grids.len(), 1);
        let grid = &grids[0];
        assert_eq!(grid.name(), "t___0");
        assert_eq!(grid.active_voxel_count(), 3);
        assert_eq!(grid.value([0, 0, 0]), 1.0);
        assert_eq!(grid.value([1, 0, 0]), 2.0);
        assert_eq!(grid.value([2, 0, 0]), 3.0);
        assert_eq!(grid.transform().translate, Vector3::zeros());
    }

    #[test]
    fn per_block_normalisation() {
        let container = MemoryContainer::from_datasets(vec![
            dataset("a", [0.0, 0.0, 0.0], vec![1, 1, 3], vec![1.0, 3.0, 5.0]),
            dataset("b", [0.0, 1.0, 0.0], vec![1, 1, 2], vec![10.0, 20.0]),
        ]);
        let blocks = read_blocks(&container, &["a", "b"]).unwrap();
        let grids = quiet(true, 0.0)
            .assemble(&container, &group(&blocks))
            .unwrap();

        let grid = &grids[0];
        assert_eq!(grid.value([1, 0, 0]), 0.5);
        assert_eq!(grid.value([0, 1, 0]), 0.0);
        assert_eq!(grid.value([1, 1, 0]), 1.0);
    }

    #[test]
    fn degenerate_block_fails_run() {
        let container = MemoryContainer::from_datasets(vec![dataset(
            "flat",
            [0.0, 0.0, 0.0],
            vec![1, 1, 3],
            vec![4.0, 4.0, 4.0],
        )]);
        let blocks = read_blocks(&container, &["flat"]).unwrap();
        let err = quiet(true, 0.0)
            .assemble(&container, &group(&blocks))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConsistencyViolation);
    }

    #[test]
    fn stale_collection_is_rejected() {
        let container = MemoryContainer::from_datasets(vec![
            dataset("a", [0.0, 0.0, 0.0], vec![1, 1, 1], vec![1.0]),
            dataset("b", [0.5, 0.0, 0.0], vec![1, 1, 1], vec![1.0]),
        ]);
        let blocks = read_blocks(&container, &["a"]).unwrap();
        let mut collections = group(&blocks);
        collections[0].members.push("b".to_string());

        assert!(matches!(
            quiet(false, 0.0).assemble(&container, &collections),
            Err(Error::InconsistentMember { .. })
        ));
    }

    #[test]
    fn free_function_matches_assembler() {
        let container = MemoryContainer::from_datasets(vec![dataset(
            "a",
            [1.0, 2.0, 3.0],
            vec![1, 1, 1],
            vec![7.0],
        )]);
        let blocks = read_blocks(&container, &["a"]).unwrap();
        let grids = assemble(&container, &group(&blocks), false, 1.0).unwrap();
        assert_eq!(grids[0].value([0, 0, 0]), 8.0);
        assert_eq!(grids[0].transform().translate, Vector3::new(1.0, 2.0, 3.0));
    }
}
