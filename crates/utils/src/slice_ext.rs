use crate::error::{Error, Result};

/// Extrema of float slices that refuse to guess
///
/// Floats are only partially ordered, so a single NaN can silently change
/// what `fold(f32::min)` returns. These methods reject empty slices and any
/// NaN or infinite value instead.
pub trait SliceExt<T> {
    /// Smallest value
    ///
    /// ```rust
    /// # use voxmerge_utils::{Error, SliceExt};
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1, f32::MIN, 2.2].try_min(), Ok(f32::MIN));
    ///
    /// assert_eq!([1.1, f32::NAN].try_min(), Err(Error::NonFinite { index: 1 }));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::EmptySlice));
    /// ```
    fn try_min(&self) -> Result<T> {
        self.try_range().map(|(min, _)| min)
    }

    /// Largest value
    ///
    /// ```rust
    /// # use voxmerge_utils::{Error, SliceExt};
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([f64::INFINITY].try_max(), Err(Error::NonFinite { index: 0 }));
    /// ```
    fn try_max(&self) -> Result<T> {
        self.try_range().map(|(_, max)| max)
    }

    /// Smallest and largest value in one pass
    ///
    /// ```rust
    /// # use voxmerge_utils::SliceExt;
    /// assert_eq!([4.0_f32, 1.0, 3.0].try_range(), Ok((1.0, 4.0)));
    /// assert!(Vec::<f32>::new().try_range().is_err());
    /// ```
    fn try_range(&self) -> Result<(T, T)>;
}

macro_rules! impl_slice_ext {
    ($($t:ty),*) => {$(
        impl SliceExt<$t> for [$t] {
            fn try_range(&self) -> Result<($t, $t)> {
                let first = *self.first().ok_or(Error::EmptySlice)?;
                self.iter()
                    .enumerate()
                    .try_fold((first, first), |(lo, hi), (index, v)| {
                        if v.is_finite() {
                            Ok((lo.min(*v), hi.max(*v)))
                        } else {
                            Err(Error::NonFinite { index })
                        }
                    })
            }
        }
    )*};
}

impl_slice_ext!(f32, f64);
