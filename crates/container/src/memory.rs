//! In-memory container, optionally loaded from a JSON description

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::container::Container;
use crate::error::{Error, Result};
use crate::model::{AttributeValue, DatasetInfo, ElementClass, Entry, EntryKind};

// voxmerge modules
use voxmerge_utils::f;

// extrenal crates
use log::debug;
use serde::{Deserialize, Serialize};

/// A single dataset held in memory
///
/// Groups are implied by the `/` separated components of the name, so
/// `"level0/rho"` is the dataset `rho` inside the group `level0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDataset {
    /// Full path of the dataset
    pub name: String,
    /// Element class reported to readers
    #[serde(default = "default_class")]
    pub class: ElementClass,
    /// Extent of each dimension, slowest varying first
    pub shape: Vec<usize>,
    /// Flat values in row-major order
    #[serde(default)]
    pub values: Vec<f32>,
    /// Attributes by name
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

fn default_class() -> ElementClass {
    ElementClass::Float
}

impl MemoryDataset {
    /// New float dataset with no attributes
    pub fn new(name: impl Into<String>, shape: Vec<usize>, values: Vec<f32>) -> Self {
        Self {
            name: name.into().trim_start_matches('/').to_string(),
            class: ElementClass::Float,
            shape,
            values,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach or replace an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(name.into(), value);
    }

    /// Chained version of [set_attribute()](MemoryDataset::set_attribute)
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set_attribute(name, value);
        self
    }
}

/// Container with every dataset held in memory
///
/// Mostly useful for tests and small inputs written by hand. The JSON layout
/// matches the serde representation of the types:
///
/// ```json
/// {
///   "datasets": [
///     {
///       "name": "level0/rho it=0",
///       "shape": [1, 1, 2],
///       "values": [0.5, 1.5],
///       "attributes": {
///         "origin": { "float": [0.0, 0.0, 0.0] },
///         "delta": { "float": [0.1, 0.1, 0.1] },
///         "iorigin": { "integer": [0, 0, 0] }
///       }
///     }
///   ]
/// }
/// ```
///
/// The `class` of a dataset defaults to `"float"` when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryContainer {
    /// Datasets in the order they are reported
    pub datasets: Vec<MemoryDataset>,
}

impl MemoryContainer {
    /// Empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Container holding the given datasets
    pub fn from_datasets(datasets: Vec<MemoryDataset>) -> Self {
        Self { datasets }
    }

    /// Load a container description from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading JSON container {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let container: Self = serde_json::from_reader(reader)?;
        Ok(container.normalised())
    }

    /// Load a container description from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self> {
        let container: Self = serde_json::from_str(s)?;
        Ok(container.normalised())
    }

    /// Strip leading separators so every path is relative to the root
    fn normalised(mut self) -> Self {
        for dataset in &mut self.datasets {
            if dataset.name.starts_with('/') {
                dataset.name = dataset.name.trim_start_matches('/').to_string();
            }
        }
        self
    }

    /// Add a dataset at the end
    pub fn push(&mut self, dataset: MemoryDataset) {
        self.datasets.push(dataset);
    }

    fn dataset(&self, name: &str) -> Result<&MemoryDataset> {
        let name = name.trim_start_matches('/');
        self.datasets
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::DatasetNotFound(name.to_string()))
    }
}

impl Container for MemoryContainer {
    fn entries(&self, group: &str) -> Result<Vec<Entry>> {
        let group = group.trim_matches('/');
        let mut entries: Vec<Entry> = Vec::new();

        for dataset in &self.datasets {
            let relative = if group.is_empty() {
                dataset.name.as_str()
            } else {
                match dataset
                    .name
                    .strip_prefix(group)
                    .and_then(|r| r.strip_prefix('/'))
                {
                    Some(r) => r,
                    None => continue,
                }
            };

            let (path, kind) = match relative.split_once('/') {
                Some((child, _)) => (join(group, child), EntryKind::Group),
                None => (dataset.name.clone(), EntryKind::Dataset),
            };

            if !entries.iter().any(|e| e.path == path) {
                entries.push(Entry { path, kind });
            }
        }

        if !group.is_empty() && entries.is_empty() {
            return Err(Error::GroupNotFound(group.to_string()));
        }

        Ok(entries)
    }

    fn open_dataset(&self, name: &str) -> Result<DatasetInfo> {
        let dataset = self.dataset(name)?;
        Ok(DatasetInfo {
            name: dataset.name.clone(),
            class: dataset.class,
            shape: dataset.shape.clone(),
            len: dataset.values.len(),
            attributes: dataset.attributes.keys().cloned().collect(),
        })
    }

    fn read_attribute(&self, dataset: &str, attribute: &str) -> Result<AttributeValue> {
        self.dataset(dataset)?
            .attributes
            .get(attribute)
            .cloned()
            .ok_or_else(|| Error::AttributeNotFound {
                dataset: dataset.to_string(),
                attribute: attribute.to_string(),
            })
    }

    fn read_values(&self, dataset: &str) -> Result<Vec<f32>> {
        Ok(self.dataset(dataset)?.values.clone())
    }
}

fn join(group: &str, child: &str) -> String {
    if group.is_empty() {
        child.to_string()
    } else {
        f!("{group}/{child}")
    }
}
