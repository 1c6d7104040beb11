use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use read_tiler::align::AlignParams;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tile paired reads onto assembled contigs with a k-mer index")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the contig spans of every read pair
    Align(AlignCommand),

    /// Build the contig k-mer index and report its statistics
    Index(IndexCommand),
}

#[derive(Args, Debug)]
pub struct KmerArgs {
    /// Assembled contigs (FASTA)
    #[arg(short, long, required = true)]
    pub contigs: Vec<PathBuf>,

    /// K-mer size to use (odd, at most 31)
    #[arg(short, long, default_value = "31")]
    pub kmer_size: usize,
}

#[derive(Parser, Debug)]
pub struct AlignCommand {
    #[command(flatten)]
    pub kmer: KmerArgs,

    /// Reads: one interleaved FASTQ, or a mate 1 and a mate 2 FASTQ
    #[arg(required = true, num_args = 1..=2)]
    pub reads: Vec<PathBuf>,

    /// Reads are trimmed before the first base below this quality
    #[arg(long, default_value = "10")]
    pub min_quality: u8,

    /// Drop spans whose summed mismatch quality exceeds this
    #[arg(long, default_value = "60")]
    pub max_quality_sum: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AlignCommand {
    pub fn params(&self) -> AlignParams {
        AlignParams {
            kmer_size: self.kmer.kmer_size,
            min_quality: self.min_quality,
            max_quality_sum: self.max_quality_sum,
        }
    }
}

#[derive(Parser, Debug)]
pub struct IndexCommand {
    #[command(flatten)]
    pub kmer: KmerArgs,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for read_tiler::io::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}
