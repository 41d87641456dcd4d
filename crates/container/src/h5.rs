//! HDF5 reader backed by the native library

// standard library
use std::path::Path;

// crate modules
use crate::container::Container;
use crate::error::{Error, Result};
use crate::model::{AttributeValue, DatasetInfo, ElementClass, Entry, EntryKind};

// voxmerge modules
use voxmerge_utils::f;

// extrenal crates
use hdf5::types::{FixedAscii, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, File, Group, Location};
use log::{debug, trace};

/// Read-only view of an HDF5 file
///
/// The native library initialises itself the first time any `hdf5` call is
/// made and has no teardown beyond dropping the handles, so there is nothing
/// to set up here beyond opening the file.
#[derive(Debug)]
pub struct Hdf5Container {
    file: File,
}

impl Hdf5Container {
    /// Open an existing file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening HDF5 file {}", path.display());
        Ok(Self {
            file: File::open(path)?,
        })
    }

    fn group(&self, path: &str) -> Result<Group> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Ok(self.file.as_group()?);
        }
        self.file
            .group(path)
            .map_err(|_| Error::GroupNotFound(path.to_string()))
    }

    fn dataset(&self, path: &str) -> Result<Dataset> {
        let path = path.trim_start_matches('/');
        self.file
            .dataset(path)
            .map_err(|_| Error::DatasetNotFound(path.to_string()))
    }
}

impl Container for Hdf5Container {
    fn entries(&self, group: &str) -> Result<Vec<Entry>> {
        let group = self.group(group)?;
        let prefix = relative_path(&group);
        let mut entries = Vec::new();

        // members come back in the library's link index order
        for name in group.member_names()? {
            let path = match prefix.is_empty() {
                true => name.clone(),
                false => f!("{prefix}/{name}"),
            };

            let kind = if group.group(&name).is_ok() {
                EntryKind::Group
            } else if group.dataset(&name).is_ok() {
                EntryKind::Dataset
            } else {
                trace!("Skipping {path}, neither a group nor a dataset");
                continue;
            };

            entries.push(Entry { path, kind });
        }

        Ok(entries)
    }

    fn open_dataset(&self, name: &str) -> Result<DatasetInfo> {
        let dataset = self.dataset(name)?;
        let class = dataset
            .dtype()
            .and_then(|t| t.to_descriptor())
            .map(|d| element_class(&d))
            .unwrap_or(ElementClass::Other);

        Ok(DatasetInfo {
            name: name.trim_start_matches('/').to_string(),
            class,
            shape: dataset.shape(),
            len: dataset.size(),
            attributes: dataset.attr_names()?,
        })
    }

    fn read_attribute(&self, dataset: &str, attribute: &str) -> Result<AttributeValue> {
        let attr = self
            .dataset(dataset)?
            .attr(attribute)
            .map_err(|_| Error::AttributeNotFound {
                dataset: dataset.to_string(),
                attribute: attribute.to_string(),
            })?;

        let unsupported = || Error::UnsupportedAttribute {
            dataset: dataset.to_string(),
            attribute: attribute.to_string(),
        };

        let descriptor = attr.dtype()?.to_descriptor().map_err(|_| unsupported())?;
        trace!("{dataset}::{attribute} has type {descriptor:?}");

        match element_class(&descriptor) {
            ElementClass::Integer => Ok(AttributeValue::Integer(attr.read_raw::<i64>()?)),
            ElementClass::Float => Ok(AttributeValue::Float(attr.read_raw::<f64>()?)),
            ElementClass::String => read_text(&attr, &descriptor).ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }

    fn read_values(&self, dataset: &str) -> Result<Vec<f32>> {
        Ok(self.dataset(dataset)?.read_raw::<f32>()?)
    }
}

/// Path of a location without the leading root separator
fn relative_path(location: &Location) -> String {
    location.name().trim_start_matches('/').to_string()
}

fn element_class(descriptor: &TypeDescriptor) -> ElementClass {
    match descriptor {
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) => ElementClass::Integer,
        TypeDescriptor::Float(_) => ElementClass::Float,
        TypeDescriptor::Boolean | TypeDescriptor::Enum(_) => ElementClass::Enum,
        TypeDescriptor::Compound(_) => ElementClass::Compound,
        TypeDescriptor::FixedArray(..) | TypeDescriptor::VarLenArray(_) => ElementClass::Array,
        TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => ElementClass::String,
        #[allow(unreachable_patterns)]
        _ => ElementClass::Other,
    }
}

/// String attributes come in several flavours, try the matching one
fn read_text(attr: &hdf5::Attribute, descriptor: &TypeDescriptor) -> Option<AttributeValue> {
    let text = match descriptor {
        TypeDescriptor::VarLenUnicode => attr
            .read_scalar::<VarLenUnicode>()
            .ok()
            .map(|s| s.as_str().to_string()),
        TypeDescriptor::VarLenAscii => attr
            .read_scalar::<VarLenAscii>()
            .ok()
            .map(|s| s.as_str().to_string()),
        _ => attr
            .read_scalar::<FixedAscii<1024>>()
            .ok()
            .map(|s| s.as_str().to_string()),
    }?;

    Some(AttributeValue::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_member_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.h5");
        {
            let file = File::create(&path).unwrap();
            let level = file.create_group("level0").unwrap();
            level.new_dataset::<f32>().shape([1, 1, 1]).create("rho").unwrap();
            level.create_group("coarse").unwrap();
            file.new_dataset::<f32>().shape([2]).create("a").unwrap();
        }

        let container = Hdf5Container::open(&path).unwrap();
        let entries = container.entries("/").unwrap();
        assert_eq!(
            entries,
            vec![
                Entry {
                    path: "a".to_string(),
                    kind: EntryKind::Dataset
                },
                Entry {
                    path: "level0".to_string(),
                    kind: EntryKind::Group
                },
            ]
        );

        let kinds: Vec<_> = container
            .entries("level0")
            .unwrap()
            .into_iter()
            .map(|e| (e.path, e.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("level0/coarse".to_string(), EntryKind::Group),
                ("level0/rho".to_string(), EntryKind::Dataset),
            ]
        );
    }
}
