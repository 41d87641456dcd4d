//! Lattice consistency between blocks

// crate modules
use crate::block::Block;

// extrenal crates
use nalgebra::Vector3;

/// Tolerances for deciding whether two blocks share a lattice
///
/// - `delta` is relative, applied to the larger of each pair of spacings
/// - `lattice` is absolute, in units of voxel steps
///
/// ```rust
/// # use voxmerge_merge::Tolerance;
/// let tolerance = Tolerance::default();
/// assert_eq!(tolerance.delta, 1e-6);
/// assert_eq!(tolerance.lattice, 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Relative tolerance on spacing equality
    pub delta: f64,
    /// Absolute tolerance on the fractional part of a lattice step
    pub lattice: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            delta: 1e-6,
            lattice: 1e-3,
        }
    }
}

impl Tolerance {
    /// Are the spacings equal along every axis?
    pub fn same_spacing(&self, a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() <= self.delta * x.abs().max(y.abs()))
    }

    /// Do the origins differ by a whole number of `delta` steps on every axis?
    pub fn on_lattice(&self, a: &Vector3<f64>, b: &Vector3<f64>, delta: &Vector3<f64>) -> bool {
        (a - b)
            .component_div(delta)
            .iter()
            .all(|s| s.is_finite() && (s - s.round()).abs() <= self.lattice)
    }
}

/// Can a block join a lattice anchored at `origin` with spacing `delta`?
///
/// True if the spacing matches and the block origin is a whole number of
/// steps away from `origin` on every axis. Any point of a lattice works as
/// the anchor, so a collection can be tested through its canonical origin.
pub fn is_consistent(
    block: &Block,
    origin: &Vector3<f64>,
    delta: &Vector3<f64>,
    tolerance: &Tolerance,
) -> bool {
    tolerance.same_spacing(&block.delta, delta)
        && tolerance.on_lattice(&block.origin, origin, delta)
}

/// Pairwise consistency of two blocks
///
/// ```rust
/// # use voxmerge_merge::{blocks_consistent, Block, Tolerance};
/// # use nalgebra::Vector3;
/// let a = Block::new("a", Vector3::zeros(), Vector3::repeat(0.5), [0, 0, 0], [2, 2, 2]).unwrap();
/// let b = Block::new("b", Vector3::new(1.5, 0.0, -2.0), Vector3::repeat(0.5), [3, 0, -4], [2, 2, 2]).unwrap();
/// let c = Block::new("c", Vector3::new(0.25, 0.0, 0.0), Vector3::repeat(0.5), [0, 0, 0], [2, 2, 2]).unwrap();
///
/// assert!(blocks_consistent(&a, &b, &Tolerance::default()));
/// assert!(!blocks_consistent(&a, &c, &Tolerance::default()));
/// ```
pub fn blocks_consistent(a: &Block, b: &Block, tolerance: &Tolerance) -> bool {
    is_consistent(a, &b.origin, &b.delta, tolerance)
}

/// Does the integer lattice origin agree with the world origins?
///
/// The step between two blocks implied by their `iorigin` should match the
/// one implied by their world origins. Some writers leave `iorigin` at zero,
/// so disagreement is only worth a log message.
pub(crate) fn iorigin_agrees(
    block: &Block,
    anchor_origin: &Vector3<f64>,
    anchor_iorigin: &[i64; 3],
) -> bool {
    let steps = (block.origin - anchor_origin).component_div(&block.delta);
    (0..3).all(|a| steps[a].round() as i64 == block.iorigin[a] - anchor_iorigin[a])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn block(origin: [f64; 3], delta: [f64; 3]) -> Block {
        Block::new("b", origin.into(), delta.into(), [0, 0, 0], [1, 1, 1]).unwrap()
    }

    #[rstest]
    #[case([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], true)] // identical origin
    #[case([3.0, -2.0, 7.0], [1.0, 1.0, 1.0], true)] // whole steps
    #[case([0.5, 0.0, 0.0], [1.0, 1.0, 1.0], false)] // half step
    #[case([0.0, 0.0, 0.0], [1.0, 1.0, 2.0], false)] // different spacing
    #[case([1e-5, 0.0, 0.0], [1.0, 1.0, 1.0], true)] // within lattice tolerance
    #[case([0.0, 0.0, 0.0], [1.0 + 1e-9, 1.0, 1.0], true)] // within delta tolerance
    fn consistency_cases(#[case] origin: [f64; 3], #[case] delta: [f64; 3], #[case] ok: bool) {
        let anchor = Vector3::zeros();
        let spacing = Vector3::repeat(1.0);
        let tolerance = Tolerance::default();
        assert_eq!(
            is_consistent(&block(origin, delta), &anchor, &spacing, &tolerance),
            ok
        );
    }

    #[test]
    fn fine_spacing_lattice() {
        // 0.1 steps do not divide exactly in floating point
        let a = block([0.0, 0.0, 0.0], [0.1, 0.1, 0.1]);
        let b = block([0.7, 0.3, -0.9], [0.1, 0.1, 0.1]);
        assert!(blocks_consistent(&a, &b, &Tolerance::default()));
    }

    #[test]
    fn iorigin_hint() {
        let mut b = block([2.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        b.iorigin = [2, 0, 0];
        assert!(iorigin_agrees(&b, &Vector3::zeros(), &[0, 0, 0]));
        assert!(!iorigin_agrees(&b, &Vector3::zeros(), &[1, 0, 0]));
    }
}
