//! Integration tests for writing grids to disk

use nalgebra::Vector3;
use rstest::{fixture, rstest};
use voxmerge_grid::{write_all, Grid, VtkFormat};

#[fixture]
fn grid() -> Grid {
    let mut grid = Grid::new();
    grid.set_name("rho_it_0");
    grid.set_transform(Vector3::new(0.5, 0.5, 0.5), Vector3::new(-1.0, 0.0, 2.0));
    grid.set_value([0, 0, 0], 1.0);
    grid.set_value([1, 0, 0], 2.0);
    grid
}

#[rstest]
#[case(VtkFormat::Xml, "grid.vti")] // case 1
#[case(VtkFormat::LegacyAscii, "grid.vtk")] // case 2
#[case(VtkFormat::LegacyBinary, "grid.vtk")] // case 3
fn single_grid_written_to_path(grid: Grid, #[case] format: VtkFormat, #[case] name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);

    let written = write_all(&path, &[grid], format).unwrap();
    assert_eq!(written, vec![path.clone()]);
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[rstest]
fn legacy_ascii_layout(grid: Grid) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.vtk");
    write_all(&path, &[grid], VtkFormat::LegacyAscii).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("STRUCTURED_POINTS"));
    assert!(text.contains("DIMENSIONS 2 1 1"));
    assert!(text.contains("rho_it_0"));
}

#[rstest]
fn one_file_per_grid(grid: Grid) {
    let mut other = grid.clone();
    other.set_name("rho_it_1");

    let dir = tempfile::tempdir().unwrap();
    let written = write_all(dir.path().join("run.vti"), &[grid, other], VtkFormat::Xml).unwrap();

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("run_rho_it_0.vti").exists());
    assert!(dir.path().join("run_rho_it_1.vti").exists());
}

#[rstest]
fn colliding_names_keep_every_grid(grid: Grid) {
    let mut spaced = grid.clone();
    spaced.set_name("a_b");
    let mut nested = grid;
    nested.set_name("a/b");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.vti");
    let written = write_all(&path, &[spaced, nested], VtkFormat::Xml).unwrap();

    assert_eq!(written.len(), 2);
    assert_ne!(written[0], written[1]);
    assert!(dir.path().join("run_a_b.vti").exists());
    assert!(dir.path().join("run_a_b_1.vti").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}
