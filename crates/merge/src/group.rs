//! Partitioning of blocks into lattice-consistent collections

// crate modules
use crate::block::Block;
use crate::collection::Collection;
use crate::consistency::Tolerance;

// extrenal crates
use log::{debug, info};

/// Group blocks with the default [Tolerance]
///
/// See [group_with()] for details.
pub fn group(blocks: &[Block]) -> Vec<Collection> {
    group_with(blocks, &Tolerance::default())
}

/// Partition blocks into collections that each share a single lattice
///
/// Blocks are visited in the order given. Each one joins the first existing
/// collection that accepts it, or starts a new one named after itself.
///
/// This is a greedy pass and existing collections are never merged. A block
/// that would bridge two earlier collections joins the first of them, so
/// the number of collections can depend on the input order. Every block
/// still ends up in exactly one collection.
///
/// ```rust
/// # use voxmerge_merge::{group, Block};
/// # use nalgebra::Vector3;
/// let spacing = Vector3::repeat(1.0);
/// let blocks = vec![
///     Block::new("a", Vector3::new(0.0, 0.0, 0.0), spacing, [0, 0, 0], [2, 2, 2]).unwrap(),
///     Block::new("b", Vector3::new(0.5, 0.0, 0.0), spacing, [0, 0, 0], [2, 2, 2]).unwrap(),
///     Block::new("c", Vector3::new(2.0, 0.0, 0.0), spacing, [2, 0, 0], [2, 2, 2]).unwrap(),
/// ];
///
/// let collections = group(&blocks);
/// assert_eq!(collections.len(), 2);
/// assert_eq!(collections[0].members, vec!["a", "c"]);
/// assert_eq!(collections[1].name, "b");
/// ```
pub fn group_with(blocks: &[Block], tolerance: &Tolerance) -> Vec<Collection> {
    let mut collections: Vec<Collection> = Vec::new();

    for block in blocks {
        match collections.iter_mut().find(|c| c.accepts(block, tolerance)) {
            Some(collection) => {
                debug!("{} joins {}", block.name, collection.name);
                collection.admit(block);
            }
            None => {
                debug!("{} starts a new collection", block.name);
                collections.push(Collection::new(block));
            }
        }
    }

    info!(
        "Grouped {} blocks into {} collection(s)",
        blocks.len(),
        collections.len()
    );
    collections
}
