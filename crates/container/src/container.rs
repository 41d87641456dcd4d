//! The reader interface every container implements

// crate modules
use crate::error::{Error, Result};
use crate::model::{AttributeValue, DatasetInfo, Entry, EntryKind};

/// Read access to a hierarchical container of datasets
///
/// Paths are relative to the root with `/` separators. The empty string (or
/// `"/"`) refers to the root group.
///
/// Only [entries()](Container::entries) needs to understand the hierarchy.
/// [list_datasets()](Container::list_datasets) walks it depth first using
/// that, in the order the implementation reports members.
pub trait Container {
    /// Members directly below `group`
    fn entries(&self, group: &str) -> Result<Vec<Entry>>;

    /// Metadata for a single dataset, without reading its values
    fn open_dataset(&self, name: &str) -> Result<DatasetInfo>;

    /// Decode one attribute attached to a dataset
    fn read_attribute(&self, dataset: &str, attribute: &str) -> Result<AttributeValue>;

    /// Read every value of a dataset, converted to `f32`
    fn read_values(&self, dataset: &str) -> Result<Vec<f32>>;

    /// Paths of every dataset in the container
    fn list_datasets(&self) -> Result<Vec<String>> {
        let mut datasets = Vec::new();
        let mut pending = vec![String::new()];

        while let Some(group) = pending.pop() {
            let mut subgroups = Vec::new();
            for entry in self.entries(&group)? {
                match entry.kind {
                    EntryKind::Dataset => datasets.push(entry.path),
                    EntryKind::Group => subgroups.push(entry.path),
                }
            }
            // reversed so that groups are visited in reported order
            pending.extend(subgroups.into_iter().rev());
        }

        Ok(datasets)
    }
}

/// Element types that can be extracted from an [AttributeValue]
///
/// Implemented for the float and integer primitives used by grid metadata.
/// Integer attributes are accepted where floats are requested, but not the
/// other way around.
pub trait FromAttribute: Sized {
    /// Name used in error messages
    const EXPECTED: &'static str;

    /// Convert the attribute values, or `None` if the class does not fit
    fn from_attribute(value: &AttributeValue) -> Option<Vec<Self>>;
}

impl FromAttribute for f64 {
    const EXPECTED: &'static str = "float";

    fn from_attribute(value: &AttributeValue) -> Option<Vec<Self>> {
        match value {
            AttributeValue::Float(v) => Some(v.clone()),
            AttributeValue::Integer(v) => Some(v.iter().map(|i| *i as f64).collect()),
            AttributeValue::Text(_) => None,
        }
    }
}

impl FromAttribute for f32 {
    const EXPECTED: &'static str = "float";

    fn from_attribute(value: &AttributeValue) -> Option<Vec<Self>> {
        f64::from_attribute(value).map(|v| v.into_iter().map(|f| f as f32).collect())
    }
}

impl FromAttribute for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_attribute(value: &AttributeValue) -> Option<Vec<Self>> {
        match value {
            AttributeValue::Integer(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromAttribute for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_attribute(value: &AttributeValue) -> Option<Vec<Self>> {
        match value {
            AttributeValue::Integer(v) => v.iter().map(|i| i32::try_from(*i).ok()).collect(),
            _ => None,
        }
    }
}

/// Read a fixed length array attribute
///
/// Fails with [Error::UnexpectedAttributeType] if the values can not be
/// represented as `T`, and [Error::UnexpectedAttributeLength] if there are
/// not exactly `N` of them.
///
/// ```rust
/// # use voxmerge_container::{read_array, AttributeValue, MemoryContainer, MemoryDataset};
/// let mut dataset = MemoryDataset::new("rho", vec![1, 1, 1], vec![0.0]);
/// dataset.set_attribute("delta", AttributeValue::Float(vec![0.5, 0.5, 0.5]));
/// let container = MemoryContainer::from_datasets(vec![dataset]);
///
/// let delta: [f64; 3] = read_array(&container, "rho", "delta").unwrap();
/// assert_eq!(delta, [0.5, 0.5, 0.5]);
///
/// // wrong length
/// assert!(read_array::<f64, 2, _>(&container, "rho", "delta").is_err());
/// ```
pub fn read_array<T, const N: usize, C>(
    container: &C,
    dataset: &str,
    attribute: &str,
) -> Result<[T; N]>
where
    T: FromAttribute,
    C: Container + ?Sized,
{
    let value = container.read_attribute(dataset, attribute)?;

    let values = T::from_attribute(&value).ok_or_else(|| Error::UnexpectedAttributeType {
        dataset: dataset.to_string(),
        attribute: attribute.to_string(),
        expected: T::EXPECTED,
        found: value.class(),
    })?;

    values
        .try_into()
        .map_err(|v: Vec<T>| Error::UnexpectedAttributeLength {
            dataset: dataset.to_string(),
            attribute: attribute.to_string(),
            expected: N,
            found: v.len(),
        })
}
