//! Classify a GeoJSON FeatureCollection from the command line.
//!
//! Prints the legend rows to stdout; `--output` also writes the full result
//! as JSON. Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use choro_core::{ClassSpec, Classification, ClassificationOptions, Classifier, FeatureCollection, Method};

#[derive(Parser, Debug)]
#[command(name = "classify", about = "Classify GeoJSON features by a numeric attribute and print the legend")]
struct Args {
    /// GeoJSON FeatureCollection.
    #[arg(short, long)]
    input: PathBuf,

    /// Options JSON file (camelCase keys, every key optional).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Attribute to classify; overrides the options file.
    #[arg(short, long)]
    field: Option<String>,

    /// Classification method; overrides the options file.
    #[arg(short, long)]
    method: Option<Method>,

    /// Class count, or comma-separated boundaries for `manual`.
    #[arg(short, long)]
    classes: Option<String>,

    /// Write the full classification as JSON here.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_classes(text: &str) -> Result<ClassSpec> {
    let text = text.trim();
    if !text.contains(',') {
        if let Ok(n) = text.parse::<usize>() {
            return Ok(ClassSpec::Count(n));
        }
    }
    let boundaries = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid class boundary {part:?}"))
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(ClassSpec::Boundaries(boundaries))
}

/// Apply command-line overrides on top of the options file.
fn apply_overrides(mut opts: ClassificationOptions, args: &Args) -> Result<ClassificationOptions> {
    if let Some(field) = &args.field {
        opts.field = field.clone();
    }
    if let Some(method) = args.method {
        opts.mode = method;
    }
    if let Some(classes) = &args.classes {
        opts.classes = parse_classes(classes)?;
    }
    if opts.field.is_empty() {
        bail!("no attribute field given; use --field or set \"field\" in the options file");
    }
    Ok(opts)
}

fn load_options(path: Option<&PathBuf>) -> Result<ClassificationOptions> {
    let Some(path) = path else {
        return Ok(ClassificationOptions::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("cannot read options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid options in {}", path.display()))
}

fn print_legend(result: &Classification) {
    if let Some(title) = &result.legend.title {
        println!("{title}");
    }
    for row in &result.legend.rows {
        println!("  {:<28} {:>6}", row.text, row.count);
    }
    for d in &result.diagnostics {
        println!("  ! {d}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let opts = apply_overrides(load_options(args.options.as_ref())?, &args)?;

    let text = fs::read_to_string(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;
    let collection: FeatureCollection =
        serde_json::from_str(&text).with_context(|| format!("{} is not a GeoJSON FeatureCollection", args.input.display()))?;

    let result = Classifier::new(opts)
        .run(&collection.features)
        .with_context(|| format!("classifying {}", args.input.display()))?;

    print_legend(&result);

    if let Some(out) = &args.output {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(out, json).with_context(|| format!("cannot write {}", out.display()))?;
        tracing::info!(path = %out.display(), "classification written");
    }
    Ok(())
}
