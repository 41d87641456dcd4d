//! Writing grids to VTK formats
//!
//! All grids of a run are handed to [write_all()] together. VTK image data
//! holds a single origin and spacing, so every grid is its own file:
//!
//! - one grid is written to exactly the path given
//! - several grids are written beside that path as `<stem>_<grid name>.<ext>`,
//!   with any path separators in the grid name replaced by `_`
//! - a name already taken by an earlier grid of the run gets the grid index
//!   appended, `<stem>_<grid name>_<i>.<ext>`
//!
//! Every target is decided before the first file is written, and a run never
//! writes two grids to the same file.
//!
//! Finer control over the conversion is available through [GridToVtk] and
//! [write_vtk()].

mod builder;
mod convert;

// standard library
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// voxmerge modules
use voxmerge_utils::{f, StringExt};

// internal modules
use crate::error::{Error, Result};
use crate::Grid;

// re-exports
#[doc(inline)]
pub use builder::GridToVtkBuilder;
#[doc(inline)]
pub use convert::GridToVtk;

// extrenal crates
use log::{info, warn};
use vtkio::model::Vtk;

/// Available VTK output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VtkFormat {
    /// XML image data (`.vti`)
    #[default]
    Xml,
    /// Legacy text format (`.vtk`)
    LegacyAscii,
    /// Legacy big endian binary format (`.vtk`)
    LegacyBinary,
}

impl VtkFormat {
    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xml => "vti",
            Self::LegacyAscii | Self::LegacyBinary => "vtk",
        }
    }
}

/// Convert a single grid with the default [GridToVtk] configuration
pub fn grid_to_vtk(grid: &Grid) -> Result<Vtk> {
    GridToVtk::default().convert(grid)
}

/// Write a Vtk to `path` in the requested format
///
/// The XML writer picks the dataset type from the extension, so `path`
/// should end in `.vti` for [VtkFormat::Xml].
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        VtkFormat::Xml => vtk.export(path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(path)?,
        VtkFormat::LegacyBinary => vtk.export_be(path)?,
    }
    Ok(())
}

/// Write every grid of a run, see the [module](crate::vtk) notes for naming
///
/// Returns the paths written, in the same order as `grids`.
pub fn write_all<P: AsRef<Path>>(
    path: P,
    grids: &[Grid],
    format: VtkFormat,
) -> Result<Vec<PathBuf>> {
    write_all_with(path, grids, format, &GridToVtk::default())
}

/// Same as [write_all()] with an explicit converter configuration
pub fn write_all_with<P: AsRef<Path>>(
    path: P,
    grids: &[Grid],
    format: VtkFormat,
    converter: &GridToVtk,
) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    if grids.is_empty() {
        return Err(Error::NothingToWrite(path.display().to_string()));
    }

    let paths = output_paths(path, grids, format)?;
    for (grid, target) in grids.iter().zip(&paths) {
        info!("Writing {} to {}", grid.name(), target.display());
        write_vtk(converter.convert(grid)?, target, format)?;
    }

    Ok(paths)
}

/// File names for each grid of a run, unique within the run
fn output_paths(path: &Path, grids: &[Grid], format: VtkFormat) -> Result<Vec<PathBuf>> {
    if grids.len() == 1 {
        return Ok(vec![path.to_path_buf()]);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "grid".to_string());

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| format.extension().to_string());

    let mut taken = HashSet::new();
    let mut paths = Vec::with_capacity(grids.len());

    for (i, grid) in grids.iter().enumerate() {
        let name = if grid.name().is_empty() {
            f!("{i}")
        } else {
            grid.name().replace_any(&['/', '\\'], '_')
        };

        let mut target = path.with_file_name(f!("{stem}_{name}.{extension}"));
        if taken.contains(&target) {
            target = path.with_file_name(f!("{stem}_{name}_{i}.{extension}"));
            warn!(
                "Grid \"{}\" shares an output name with an earlier grid, using {}",
                grid.name(),
                target.display()
            );
        }

        if !taken.insert(target.clone()) {
            return Err(Error::DuplicateOutput {
                grid: grid.name().to_string(),
                path: target.display().to_string(),
            });
        }
        paths.push(target);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Grid {
        let mut grid = Grid::new();
        grid.set_name(name);
        grid
    }

    #[test]
    fn single_grid_uses_path() {
        let paths = output_paths(Path::new("out/run.vti"), &[named("a")], VtkFormat::Xml).unwrap();
        assert_eq!(paths, vec![PathBuf::from("out/run.vti")]);
    }

    #[test]
    fn several_grids_are_suffixed() {
        let grids = [named("level0/rho_it_0"), named("")];
        let paths = output_paths(Path::new("out/run.vtk"), &grids, VtkFormat::LegacyAscii).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/run_level0_rho_it_0.vtk"),
                PathBuf::from("out/run_1.vtk")
            ]
        );
    }

    #[test]
    fn missing_extension_follows_format() {
        let grids = [named("a"), named("b")];
        let paths = output_paths(Path::new("run"), &grids, VtkFormat::Xml).unwrap();
        assert_eq!(paths[0], PathBuf::from("run_a.vti"));
    }

    #[test]
    fn colliding_names_get_the_index() {
        let grids = [named("g/x"), named("g_x"), named("a")];
        let paths = output_paths(Path::new("run.vti"), &grids, VtkFormat::Xml).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("run_g_x.vti"),
                PathBuf::from("run_g_x_1.vti"),
                PathBuf::from("run_a.vti")
            ]
        );
    }

    #[test]
    fn unresolvable_collision() {
        let grids = [named("a_b"), named("a_b_1"), named("a_b")];
        let paths = output_paths(Path::new("run.vti"), &grids, VtkFormat::Xml).unwrap();
        assert_eq!(paths[2], PathBuf::from("run_a_b_2.vti"));

        // the fallback for the third grid is already taken
        let grids = [named("a_b"), named("a_b_2"), named("a_b")];
        assert!(matches!(
            output_paths(Path::new("run.vti"), &grids, VtkFormat::Xml),
            Err(Error::DuplicateOutput { .. })
        ));
    }

    #[test]
    fn nothing_to_write() {
        assert!(matches!(
            write_all("x.vti", &[], VtkFormat::Xml),
            Err(Error::NothingToWrite(_))
        ));
    }
}
