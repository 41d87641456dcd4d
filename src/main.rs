//! Command line interface for merging gridded blocks

// standard library
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

// voxmerge modules
use voxmerge::container::inspect::{print_contents, print_dataset};
use voxmerge::container::{open_container, Container, ElementClass};
use voxmerge::grid::{write_all, VtkFormat};
use voxmerge::merge::{group_with, read_blocks, Assembler, Tolerance, ValueTransform};
use voxmerge::utils::f;

// extrenal crates
use clap::{ArgAction, Parser, ValueEnum};
use log::{error, info, warn};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Merge gridded blocks into lattice-consistent volumetric grids
///
/// Blocks are 3D float datasets with `origin`, `delta` and `iorigin`
/// attributes. Blocks that share a voxel lattice are placed into one grid,
/// and every grid is written as VTK image data.
///
/// Without `--output` nothing is written and the container is inspected
/// instead.
#[derive(Parser, Debug)]
#[command(name = "voxmerge", version, about, long_about)]
struct Cli {
    /// Path to the input container (.json, or HDF5 otherwise)
    input: PathBuf,

    /// Dataset to use, may be repeated (default: every 3D float dataset)
    #[arg(short, long = "dataset", value_name = "NAME")]
    datasets: Vec<String>,

    /// Write the merged grids to this path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Normalise each block onto [offset, 1 + offset]
    #[arg(long)]
    normalize: bool,

    /// Constant added to every value
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset: f32,

    /// Print the grouping without assembling anything
    #[arg(long)]
    dry_run: bool,

    /// Print the dry run grouping as JSON
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Output file format
    #[arg(long, value_enum, default_value_t = Format::Xml)]
    format: Format,

    /// Relative tolerance for matching voxel spacing
    #[arg(long, default_value_t = Tolerance::default().delta, value_parser = non_negative)]
    delta_tolerance: f64,

    /// Tolerance in voxel steps for matching the lattice
    #[arg(long, default_value_t = Tolerance::default().lattice, value_parser = non_negative)]
    lattice_tolerance: f64,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Output formats available on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// XML image data (.vti)
    Xml,
    /// Legacy ASCII (.vtk)
    Ascii,
    /// Legacy binary (.vtk)
    Binary,
}

impl From<Format> for VtkFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Xml => VtkFormat::Xml,
            Format::Ascii => VtkFormat::LegacyAscii,
            Format::Binary => VtkFormat::LegacyBinary,
        }
    }
}

/// Tolerances must be finite and at least zero
fn non_negative(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| f!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(f!("{value} is not a finite, non-negative tolerance"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let container = open_container(&cli.input)?;
    let mut stdout = std::io::stdout().lock();

    if cli.output.is_none() && !cli.dry_run {
        if cli.datasets.is_empty() {
            print_contents(container.as_ref(), &mut stdout)?;
        } else {
            for name in &cli.datasets {
                print_dataset(container.as_ref(), name, &mut stdout)?;
                writeln!(stdout)?;
            }
        }
        return Ok(());
    }

    let names = match cli.datasets.is_empty() {
        true => candidate_datasets(container.as_ref())?,
        false => cli.datasets.clone(),
    };
    info!("Reading {} block(s) from {}", names.len(), cli.input.display());

    let tolerance = Tolerance {
        delta: cli.delta_tolerance,
        lattice: cli.lattice_tolerance,
    };
    let blocks = read_blocks(container.as_ref(), &names)?;
    let collections = group_with(&blocks, &tolerance);

    if cli.dry_run {
        if cli.json {
            serde_json::to_writer_pretty(&mut stdout, &collections)?;
            writeln!(stdout)?;
        } else {
            for collection in &collections {
                write!(stdout, "{collection}")?;
            }
        }
        return Ok(());
    }

    let assembler = Assembler::builder()
        .transform(ValueTransform::new(cli.normalize, cli.offset))
        .tolerance(tolerance)
        .disable_progress(cli.no_progress || cli.quiet)
        .build();
    let grids = assembler.assemble(container.as_ref(), &collections)?;

    if let Some(path) = &cli.output {
        for written in write_all(path, &grids, cli.format.into())? {
            info!("Wrote {}", written.display());
        }
    }

    Ok(())
}

/// Every dataset that looks like a block
fn candidate_datasets(container: &dyn Container) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for name in container.list_datasets()? {
        let info = container.open_dataset(&name)?;
        if info.class == ElementClass::Float && info.rank() == 3 {
            names.push(name);
        } else {
            warn!("Skipping {name}, not a 3D float dataset");
        }
    }
    Ok(names)
}

fn init_logging(cli: &Cli) {
    let result = stderrlog::new()
        .modules([
            module_path!(),
            "voxmerge_container",
            "voxmerge_grid",
            "voxmerge_merge",
        ])
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_module_names(cli.verbose > 1)
        .init();

    if let Err(e) = result {
        eprintln!("Failed to initialise logging: {e}");
    }
}
