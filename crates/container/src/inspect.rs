//! Human readable dumps of container contents
//!
//! Everything is written to any `std::io::Write`, generally stdout, using tab
//! indentation for each level of the hierarchy:
//!
//! ```text
//! level0  ->  group
//!     rho it=0  ->  dataset
//!         type: FLOAT
//!         attrs: 3
//!             delta (FLOAT, 3)  =  0.1  0.1  0.1
//!             ...
//!         npoints: 8
//!         dims: 3
//!             dim #0:
//!                 dim=2   start=0   end=1
//! ```

// standard library
use std::io::Write;

// crate modules
use crate::container::Container;
use crate::error::{Error, Result};
use crate::model::{AttributeValue, DatasetInfo, ElementClass, EntryKind};

// voxmerge modules
use voxmerge_utils::f;

const SPACING: &str = "\t";

/// Print the whole hierarchy, including dataset metadata and attributes
pub fn print_contents<C, W>(container: &C, out: &mut W) -> Result<()>
where
    C: Container + ?Sized,
    W: Write,
{
    print_group(container, "", "", out)
}

/// Print the metadata of one dataset followed by all of its values
///
/// Only integer and float datasets have their values printed.
pub fn print_dataset<C, W>(container: &C, name: &str, out: &mut W) -> Result<()>
where
    C: Container + ?Sized,
    W: Write,
{
    let info = container.open_dataset(name)?;
    print_dataset_info(container, &info, "", out)?;
    writeln!(out)?;

    match info.class {
        ElementClass::Integer | ElementClass::Float => {
            let values = container.read_values(name)?;
            let line = values.iter().map(|v| f!("{v}  ")).collect::<String>();
            writeln!(out, "{line}")?;
        }
        _ => writeln!(out, "(print not implemented)")?,
    }

    Ok(())
}

fn print_group<C, W>(container: &C, group: &str, prefix: &str, out: &mut W) -> Result<()>
where
    C: Container + ?Sized,
    W: Write,
{
    let nested = f!("{prefix}{SPACING}");

    for entry in container.entries(group)? {
        writeln!(out, "{prefix}{}  ->  {}", entry.name(), entry.kind)?;
        match entry.kind {
            EntryKind::Group => print_group(container, &entry.path, &nested, out)?,
            EntryKind::Dataset => {
                let info = container.open_dataset(&entry.path)?;
                print_dataset_info(container, &info, &nested, out)?;
            }
        }
    }

    Ok(())
}

fn print_dataset_info<C, W>(
    container: &C,
    info: &DatasetInfo,
    prefix: &str,
    out: &mut W,
) -> Result<()>
where
    C: Container + ?Sized,
    W: Write,
{
    writeln!(out, "{prefix}type: {}", info.class)?;
    writeln!(out, "{prefix}attrs: {}", info.attributes.len())?;
    print_attributes(container, info, &f!("{prefix}{SPACING}"), out)?;
    writeln!(out, "{prefix}npoints: {}", info.len)?;
    writeln!(out, "{prefix}dims: {}", info.rank())?;

    for (i, dim) in info.shape.iter().enumerate() {
        writeln!(out, "{prefix}{SPACING}dim #{i}:")?;
        writeln!(
            out,
            "{prefix}{SPACING}{SPACING}dim={dim}   start=0   end={}",
            dim.saturating_sub(1)
        )?;
    }

    Ok(())
}

fn print_attributes<C, W>(
    container: &C,
    info: &DatasetInfo,
    prefix: &str,
    out: &mut W,
) -> Result<()>
where
    C: Container + ?Sized,
    W: Write,
{
    for name in &info.attributes {
        match container.read_attribute(&info.name, name) {
            Ok(value) => writeln!(
                out,
                "{prefix}{name} ({}, {})  =  {}",
                value.class(),
                value.len(),
                format_attribute(&value)
            )?,
            Err(Error::UnsupportedAttribute { .. }) => {
                writeln!(out, "{prefix}{name}  =  (print not implemented)")?
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn format_attribute(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Integer(v) => join(v),
        AttributeValue::Float(v) => join(v),
        AttributeValue::Text(s) => s.clone(),
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join("  ")
}
