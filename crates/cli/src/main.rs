//! cellmap - Detect tables among form field candidates
//!
//! Reads a JSON array of field candidates (each with `id`, optional `label`
//! and a `bbox` or `position`), finds table grids, and writes the generated
//! per-cell form fields as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use cellmap_core::api::{ExtractOptions, Extraction, extract_table_fields_from_json};
use cellmap_core::table::{GroupingStrategy, ProximityMeasure};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// What to write to the output.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Field mappings per table plus standalone candidates (default)
    #[default]
    Mappings,
    /// Detected tables with their cells
    Tables,
    /// Flat list of every field, table cells and standalone candidates alike
    Fields,
    /// Everything: tables, mappings and standalone candidates
    Full,
}

/// How candidate regions are grown.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Grouping {
    /// One expansion around each seed candidate
    Single,
    /// Connected components of the proximity graph
    Connected,
}

impl From<Grouping> for GroupingStrategy {
    fn from(g: Grouping) -> Self {
        match g {
            Grouping::Single => GroupingStrategy::SingleExpansion,
            Grouping::Connected => GroupingStrategy::ConnectedComponents,
        }
    }
}

/// Distance between two candidates.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Measure {
    /// Between top-left corners
    Origin,
    /// Between nearest edges
    Gap,
}

impl From<Measure> for ProximityMeasure {
    fn from(m: Measure) -> Self {
        match m {
            Measure::Origin => ProximityMeasure::Origin,
            Measure::Gap => ProximityMeasure::Gap,
        }
    }
}

/// Detect table grids among field candidates and emit one form field per cell.
#[derive(Parser, Debug)]
#[command(name = "cellmap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with the candidates, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with extraction settings; flags below override it
    #[arg(short = 's', long)]
    settings: Option<PathBuf>,

    // === Detection options ===
    /// Maximum distance between neighbouring candidates
    #[arg(long)]
    proximity: Option<f64>,

    /// Minimum number of candidates in a table region
    #[arg(long = "min-group-size")]
    min_group_size: Option<usize>,

    /// Tolerance for merging coordinates into one row or column
    #[arg(long = "band-tolerance")]
    band_tolerance: Option<f64>,

    /// Minimum share of grid slots that must be occupied (0-1]
    #[arg(long = "min-fill-ratio")]
    min_fill_ratio: Option<f64>,

    /// Grouping strategy for table regions
    #[arg(short = 'g', long, value_enum)]
    grouping: Option<Grouping>,

    /// Distance measure used with --proximity
    #[arg(short = 'm', long, value_enum)]
    measure: Option<Measure>,

    /// Mark every generated field as required
    #[arg(long, action = ArgAction::SetTrue)]
    required: bool,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "mappings")]
    output_type: OutputType,

    /// Pretty-print the JSON output
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build ExtractOptions from the settings file and command line flags.
fn build_options(args: &Args) -> Result<ExtractOptions> {
    let mut options = match &args.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => ExtractOptions::default(),
    };

    if let Some(v) = args.proximity {
        options.table.proximity_threshold = v;
    }
    if let Some(v) = args.min_group_size {
        options.table.min_group_size = v;
    }
    if let Some(v) = args.band_tolerance {
        options.table.band_tolerance = v;
    }
    if let Some(v) = args.min_fill_ratio {
        options.table.min_fill_ratio = v;
    }
    if let Some(g) = args.grouping {
        options.table.grouping = g.into();
    }
    if let Some(m) = args.measure {
        options.table.proximity = m.into();
    }
    if args.required {
        options.fields.required = true;
    }

    options.validate()?;
    Ok(options)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read candidates from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn write_json<W: Write, T: Serialize>(writer: W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MappingsOutput<'a> {
    mappings: &'a [cellmap_core::fields::TableFieldMapping],
    standalone: &'a [cellmap_core::FieldCandidate],
}

fn write_output<W: Write>(
    writer: &mut W,
    extraction: &Extraction,
    options: &ExtractOptions,
    args: &Args,
) -> Result<()> {
    match args.output_type {
        OutputType::Mappings => write_json(
            &mut *writer,
            &MappingsOutput {
                mappings: &extraction.mappings,
                standalone: &extraction.standalone,
            },
            args.pretty,
        ),
        OutputType::Tables => write_json(&mut *writer, &extraction.tables, args.pretty),
        OutputType::Fields => write_json(
            &mut *writer,
            &extraction.all_fields(&options.fields),
            args.pretty,
        ),
        OutputType::Full => write_json(&mut *writer, extraction, args.pretty),
    }?;
    writeln!(writer)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let options = build_options(&args)?;
    debug!(?options, "resolved options");

    let json = read_input(&args.input)?;
    let extraction = extract_table_fields_from_json(&json, &options)
        .with_context(|| format!("failed to process {}", args.input))?;
    info!(
        tables = extraction.tables.len(),
        standalone = extraction.standalone.len(),
        "extraction finished"
    );

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    write_output(&mut output, &extraction, &options, &args)?;
    output.flush()?;
    Ok(())
}
