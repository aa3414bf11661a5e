//! samplecount - Count sample identifiers across TCGA data files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use samplecount::config::{Config, OutputFormat, DEFAULT_SAMPLE};
use samplecount::output::render_to_stdout;
use samplecount::pipeline;
use samplecount::SampleSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSource {
    Clinical,
    Mutation,
    Sequence,
}

impl From<CliSource> for SampleSource {
    fn from(s: CliSource) -> Self {
        match s {
            CliSource::Clinical => SampleSource::Clinical,
            CliSource::Mutation => SampleSource::Mutation,
            CliSource::Sequence => SampleSource::Sequence,
        }
    }
}

/// Count sample identifiers across TCGA clinical, mutation and expression files
#[derive(Parser, Debug)]
#[command(name = "samplecount")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the data files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Clinical matrix file name
    #[arg(long, default_value = "PANCAN_clinicalMatrix.tsv")]
    clinical_file: PathBuf,

    /// Mutation table file name
    #[arg(long, default_value = "PANCAN_mutation.tsv")]
    mutation_file: PathBuf,

    /// Sequence-expression file name
    #[arg(long, default_value = "HiSeqV2.tsv")]
    sequence_file: PathBuf,

    /// Sample identifier to look up
    #[arg(short, long, default_value = DEFAULT_SAMPLE)]
    sample: String,

    /// Source whose counts the lookup reads
    #[arg(long, value_enum, default_value = "sequence")]
    lookup_in: CliSource,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Outer-merge the clinical and mutation counts and print the result
    #[arg(long)]
    merge: bool,

    /// Print per-source duplicate statistics instead of the lookup
    #[arg(long)]
    summary: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new(cli.data_dir)
        .with_file(SampleSource::Clinical, cli.clinical_file)
        .with_file(SampleSource::Mutation, cli.mutation_file)
        .with_file(SampleSource::Sequence, cli.sequence_file)
        .with_sample(cli.sample)
        .with_lookup_in(cli.lookup_in.into())
        .with_output_format(cli.format.into())
        .with_merge(cli.merge)
        .with_summary(cli.summary);

    let report = pipeline::run(&config)?;
    render_to_stdout(&report, config.output_format)
}
