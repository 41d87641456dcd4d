//! Command line behaviour against the sample block container

use std::process::{Command, Output};

use rstest::rstest;

const BLOCKS: &str = "./crates/merge/data/blocks.json";

fn voxmerge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_voxmerge"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn prints_contents() {
    let output = voxmerge(&[BLOCKS]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("level0  ->  group"));
    assert!(stdout.contains("\trho t=1  ->  dataset"));
}

#[test]
fn prints_dataset_values() {
    let output = voxmerge(&[BLOCKS, "--dataset", "level1/coarse"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("10  20  "));
}

#[test]
fn dry_run_json() {
    let output = voxmerge(&[BLOCKS, "--dry-run", "--json", "-q"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[1]["members"][0], "level1/rho t=0");
}

#[rstest]
#[case("xml", "merged.vti")] // case 1
#[case("ascii", "merged.vtk")] // case 2
fn writes_one_file_per_grid(#[case] format: &str, #[case] name: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let output = voxmerge(&[
        BLOCKS,
        "--output",
        path.to_str().unwrap(),
        "--format",
        format,
        "--no-progress",
        "-q",
    ]);
    assert!(output.status.success());

    let written = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(written, 3);
}

#[test]
fn degenerate_normalisation_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.vti");
    let output = voxmerge(&[
        BLOCKS,
        "--dataset",
        "level1/rho t=0",
        "--normalize",
        "--output",
        path.to_str().unwrap(),
        "--no-progress",
    ]);

    assert!(!output.status.success());
    assert!(!path.exists());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("can not be normalised"));
}

#[rstest]
#[case("--delta-tolerance=-1e-6")] // case 1
#[case("--lattice-tolerance=-0.5")] // case 2
#[case("--lattice-tolerance=nan")] // case 3
fn rejects_bad_tolerance(#[case] flag: &str) {
    let output = voxmerge(&[BLOCKS, "--dry-run", flag]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("non-negative tolerance"));
}
