// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-annotate CLI
//!
//! Annotates tab-separated variant lines against a transcript database and
//! prints each variant followed by its `ANN` value.

use clap::Parser;
use ferro_annotate::annotation::{AnnotationCollector, VariantAnnotator};
use ferro_annotate::config::AnnotationOptions;
use ferro_annotate::reference::TranscriptDb;
use ferro_annotate::vcf::{AnnEncoder, VariantRecord, ANN_HEADER, INFO_ANN};
use ferro_annotate::AnnotateError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "ferro-annotate")]
#[command(author, version, about = "Functional annotation of genomic variants")]
#[command(
    long_about = "Annotate small and structural variants against transcript models.

Input lines are tab-separated CHROM POS REF ALT [INFO]. Structural variants
carry SVTYPE and SVLEN or END in INFO, optionally CIPOS, CIEND and CT.

Examples:
  ferro-annotate --transcripts hg19_chr1.json.gz -i variants.tsv
  printf 'chr1\\t6640063\\tA\\tC\\n' | ferro-annotate --transcripts hg19_chr1.json"
)]
struct Cli {
    /// Transcript database (JSON, optionally gzip-compressed)
    #[arg(long)]
    transcripts: PathBuf,

    /// Input file (default: stdin; `.gz` is decompressed)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Options file (TOML); otherwise the default locations are searched
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write ANN values without escaping (for debugging)
    #[arg(long)]
    no_escape: bool,

    /// Override the size from which small variants count as structural
    #[arg(long)]
    sv_size_threshold: Option<usize>,
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}

fn load_options(cli: &Cli) -> Result<AnnotationOptions, AnnotateError> {
    let options = match &cli.config {
        Some(path) => AnnotationOptions::load_from_path(path)?,
        None => AnnotationOptions::load().unwrap_or_default(),
    };
    let options = options.merge_with_cli(cli.no_escape, cli.sv_size_threshold);
    options.validate()?;
    Ok(options)
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    let Some(path) = path else {
        return Ok(Box::new(BufReader::new(io::stdin())));
    };
    let file = File::open(path)?;
    let name = path.to_string_lossy();
    if name.ends_with(".gz") || name.ends_with(".bgz") {
        Ok(Box::new(BufReader::with_capacity(
            1024 * 1024,
            MultiGzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(1024 * 1024, file)))
    }
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::with_capacity(
            1024 * 1024,
            File::create(path)?,
        ))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Annotate one input line, returning the `ANN` value
fn annotate_line(
    record: &VariantRecord,
    db: &TranscriptDb,
    annotator: &VariantAnnotator<'_>,
    encoder: &AnnEncoder,
    collector: &mut AnnotationCollector,
) -> Result<String, AnnotateError> {
    let variant = record.to_variant(db.dict())?;
    let annotations = annotator.annotate(&variant, collector)?;
    Ok(encoder.encode_all(&annotations, &record.alternate))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let options = load_options(&cli)?;
    debug!(?options, "annotation options");

    let db = TranscriptDb::from_json_file(&cli.transcripts)?;
    info!(
        transcripts = db.len(),
        path = %cli.transcripts.display(),
        "loaded transcript database"
    );

    let encoder = AnnEncoder::new(options.escape_ann);
    let annotator = VariantAnnotator::new(&db, options);
    let mut collector = AnnotationCollector::new();

    let reader = open_input(cli.input.as_deref())?;
    let mut writer = open_output(cli.output.as_deref())?;
    writeln!(writer, "{}", ANN_HEADER)?;

    let mut processed: u64 = 0;
    let mut failed: u64 = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if !VariantRecord::is_data_line(&line) {
            continue;
        }
        let record = match VariantRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping malformed line");
                failed += 1;
                continue;
            }
        };
        processed += 1;

        let ann = match annotate_line(&record, &db, &annotator, &encoder, &mut collector) {
            Ok(ann) => ann,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "annotation failed");
                failed += 1;
                encoder.error_entry(&record.alternate, &e)
            }
        };
        writeln!(writer, "{}\t{}={}", record, INFO_ANN, ann)?;
    }
    writer.flush()?;

    info!(processed, failed, "done");
    Ok(())
}
