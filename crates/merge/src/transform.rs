//! Per-block value transforms applied before placement

// crate modules
use crate::error::{Error, Result};

// voxmerge modules
use voxmerge_utils::SliceExt;

// extrenal crates
use log::trace;

/// Transform applied to every value of a block
///
/// Each block is transformed on its own, so normalised blocks of one grid
/// are not on a shared scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ValueTransform {
    /// Leave values untouched
    #[default]
    Identity,
    /// Add a constant to every value
    Offset(f32),
    /// Map the block range onto `[offset, 1 + offset]`
    Normalize { offset: f32 },
}

impl ValueTransform {
    /// Pick the transform for a pair of command line style options
    ///
    /// ```rust
    /// # use voxmerge_merge::ValueTransform;
    /// assert_eq!(ValueTransform::new(false, 0.0), ValueTransform::Identity);
    /// assert_eq!(ValueTransform::new(false, 2.0), ValueTransform::Offset(2.0));
    /// assert_eq!(ValueTransform::new(true, 0.1), ValueTransform::Normalize { offset: 0.1 });
    /// ```
    pub fn new(normalize: bool, offset: f32) -> Self {
        match (normalize, offset) {
            (true, offset) => Self::Normalize { offset },
            (false, o) if o == 0.0 => Self::Identity,
            (false, offset) => Self::Offset(offset),
        }
    }

    /// Transform the values of a block in place
    ///
    /// Normalising fails for an empty block, for any NaN or infinite value,
    /// and when every value is the same.
    ///
    /// ```rust
    /// # use voxmerge_merge::ValueTransform;
    /// let mut values = vec![1.0, 3.0, 5.0];
    /// ValueTransform::new(true, 0.0).apply("rho", &mut values).unwrap();
    /// assert_eq!(values, vec![0.0, 0.5, 1.0]);
    ///
    /// let mut flat = vec![4.0, 4.0, 4.0];
    /// assert!(ValueTransform::new(true, 0.0).apply("rho", &mut flat).is_err());
    /// ```
    pub fn apply(&self, block: &str, values: &mut [f32]) -> Result<()> {
        match *self {
            Self::Identity => {}
            Self::Offset(offset) => values.iter_mut().for_each(|v| *v += offset),
            Self::Normalize { offset } => {
                let (min, max) = values.try_range().map_err(|e| match e {
                    voxmerge_utils::Error::EmptySlice => Error::EmptyDataset(block.to_string()),
                    voxmerge_utils::Error::NonFinite { index } => Error::UndefinedValues {
                        block: block.to_string(),
                        index,
                    },
                })?;

                let range = max - min;
                if range <= 0.0 || !range.is_finite() {
                    return Err(Error::DegenerateRange {
                        block: block.to_string(),
                        min,
                        max,
                    });
                }

                trace!("{block}: normalising [{min}, {max}] + {offset}");
                values
                    .iter_mut()
                    .for_each(|v| *v = (*v - min) / range + offset);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn identity() {
        let mut values = vec![1.0, f32::NAN, -3.0];
        ValueTransform::Identity.apply("b", &mut values).unwrap();
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
    }

    #[test]
    fn offset_only() {
        let mut values = vec![1.0, 2.0];
        ValueTransform::new(false, 0.5).apply("b", &mut values).unwrap();
        assert_close(&values, &[1.5, 2.5]);
    }

    #[test]
    fn normalise_with_offset() {
        let mut values = vec![1.0, 3.0, 5.0];
        ValueTransform::new(true, 0.1).apply("b", &mut values).unwrap();
        assert_close(&values, &[0.1, 0.6, 1.1]);
    }

    #[test]
    fn degenerate_range() {
        let mut values = vec![4.0, 4.0, 4.0];
        let err = ValueTransform::new(true, 0.0)
            .apply("b", &mut values)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConsistencyViolation);
        assert!(matches!(
            err,
            Error::DegenerateRange { min, max, .. } if min == 4.0 && max == 4.0
        ));
        assert_eq!(values, vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn undefined_values() {
        let mut values = vec![1.0, f32::INFINITY];
        assert!(matches!(
            ValueTransform::new(true, 0.0).apply("b", &mut values),
            Err(Error::UndefinedValues { index: 1, .. })
        ));
    }

    #[test]
    fn empty_block() {
        assert!(matches!(
            ValueTransform::new(true, 0.0).apply("b", &mut []),
            Err(Error::EmptyDataset(_))
        ));
    }
}
