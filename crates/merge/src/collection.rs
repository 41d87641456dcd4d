//! Groups of blocks that share a lattice

// standard library
use std::fmt;

// crate modules
use crate::block::Block;
use crate::consistency::{iorigin_agrees, is_consistent, Tolerance};

// voxmerge modules
use voxmerge_utils::ValueExt;

// extrenal crates
use log::debug;
use nalgebra::Vector3;
use serde::Serialize;

/// A set of blocks that can be written into one grid
///
/// The `canonical_origin` is the component-wise minimum of every member
/// origin. It only ever moves towards negative infinity as members are
/// admitted, and every member sits a whole number of `delta` steps from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    /// Name of the first member admitted
    pub name: String,
    /// Component-wise minimum of all member origins
    pub canonical_origin: Vector3<f64>,
    /// Spacing shared by every member
    pub delta: Vector3<f64>,
    /// Block names in the order they were admitted
    pub members: Vec<String>,
    /// Component-wise maximum of the last voxel of every member
    pub upper: Vector3<f64>,
    #[serde(skip)]
    anchor: (Vector3<f64>, [i64; 3]),
}

impl Collection {
    /// Start a new collection seeded by a single block
    pub fn new(block: &Block) -> Self {
        Self {
            name: block.name.clone(),
            canonical_origin: block.origin,
            delta: block.delta,
            members: vec![block.name.clone()],
            upper: block.upper(),
            anchor: (block.origin, block.iorigin),
        }
    }

    /// Could `block` be admitted without breaking the shared lattice?
    pub fn accepts(&self, block: &Block, tolerance: &Tolerance) -> bool {
        is_consistent(block, &self.canonical_origin, &self.delta, tolerance)
    }

    /// Add a block that has already been [accepted](Collection::accepts)
    pub fn admit(&mut self, block: &Block) {
        if !iorigin_agrees(block, &self.anchor.0, &self.anchor.1) {
            debug!(
                "{}: iorigin {:?} disagrees with the world origin of {}",
                block.name, block.iorigin, self.members[0]
            );
        }

        self.canonical_origin = self.canonical_origin.inf(&block.origin);
        self.upper = self.upper.sup(&block.upper());
        self.members.push(block.name.clone());
    }

    /// Is the named block a member?
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Number of member blocks
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false, a collection is created with one member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Voxel extent of the envelope around every member, `(x, y, z)`
    pub fn voxel_extent(&self) -> [usize; 3] {
        let steps = (self.upper - self.canonical_origin).component_div(&self.delta);
        [0, 1, 2].map(|a: usize| steps[a].round().max(0.0) as usize + 1)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vector = |v: &Vector3<f64>| {
            v.iter()
                .map(|x| x.sci(5, 2))
                .collect::<Vec<String>>()
                .join(" ")
        };
        let [nx, ny, nz] = self.voxel_extent();

        writeln!(f, "{}  ->  {} block(s)", self.name, self.len())?;
        writeln!(f, "\torigin: {}", vector(&self.canonical_origin))?;
        writeln!(f, "\tdelta: {}", vector(&self.delta))?;
        writeln!(f, "\tvoxels: {nx} x {ny} x {nz}")?;
        for member in &self.members {
            writeln!(f, "\t\t{member}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, origin: [f64; 3], dims: [usize; 3]) -> Block {
        Block::new(name, origin.into(), Vector3::repeat(1.0), [0, 0, 0], dims).unwrap()
    }

    #[test]
    fn envelope_only_grows() {
        let a = block("a", [2.0, 0.0, 0.0], [1, 1, 2]);
        let b = block("b", [0.0, 3.0, 1.0], [1, 1, 1]);
        let c = block("c", [1.0, 1.0, -1.0], [1, 1, 1]);

        let mut collection = Collection::new(&a);
        let mut previous = collection.canonical_origin;

        for next in [&b, &c] {
            assert!(collection.accepts(next, &Tolerance::default()));
            collection.admit(next);
            assert!((0..3).all(|i| collection.canonical_origin[i] <= previous[i]));
            previous = collection.canonical_origin;
        }

        assert_eq!(collection.canonical_origin, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(collection.upper, Vector3::new(3.0, 3.0, 1.0));
        assert_eq!(collection.voxel_extent(), [4, 4, 3]);
        assert_eq!(collection.members, vec!["a", "b", "c"]);
        assert_eq!(collection.name, "a");
    }

    #[test]
    fn rejects_off_lattice() {
        let a = block("a", [0.0, 0.0, 0.0], [1, 1, 1]);
        let b = block("b", [0.5, 0.0, 0.0], [1, 1, 1]);
        let collection = Collection::new(&a);
        assert!(!collection.accepts(&b, &Tolerance::default()));
        assert!(collection.contains("a"));
        assert!(!collection.contains("b"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn summary() {
        let mut collection = Collection::new(&block("a", [0.0, 0.0, 0.0], [1, 1, 2]));
        collection.admit(&block("b", [0.0, 1.0, 0.0], [1, 1, 1]));
        let text = collection.to_string();
        let lines = text.lines().collect::<Vec<&str>>();

        assert_eq!(lines[0], "a  ->  2 block(s)");
        assert_eq!(lines[1], "\torigin: 0.00000e+00 0.00000e+00 0.00000e+00");
        assert_eq!(lines[3], "\tvoxels: 2 x 2 x 1");
        assert_eq!(lines[5], "\t\tb");
    }

    #[test]
    fn serialise_skips_anchor() {
        let collection = Collection::new(&block("a", [0.0, 0.0, 0.0], [1, 1, 1]));
        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.get("anchor").is_none());
        assert_eq!(json["members"][0], "a");
    }
}
