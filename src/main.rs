mod cli;

use anyhow::{Result, Context};
use clap::Parser;
use log::info;
use std::io::Write;
use std::fs::File;
use std::path::PathBuf;

use read_tiler::align::{AlignParams, PairAligner, SpanFinder};
use read_tiler::io::{read_pairs, write_index_stats, write_report, FastxReader};
use read_tiler::kmer::{Contig, KmerIndex};

use crate::cli::{AlignCommand, Cli, Commands, IndexCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(log_file) = cli.log_file {
        let file = File::create(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    // Set up parallel processing
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    match cli.command {
        Commands::Align(align_cmd) => handle_align_command(align_cmd)?,
        Commands::Index(index_cmd) => handle_index_command(index_cmd)?,
    }

    Ok(())
}

fn handle_align_command(cmd: AlignCommand) -> Result<()> {
    let params = cmd.params();
    params.validate()?;

    let contigs = load_contigs(&cmd.kmer.contigs)?;
    let reads = read_pairs(&cmd.reads)?;
    info!("Loaded {} reads", reads.len());

    let index = KmerIndex::build(&contigs, params.kmer_size);
    let aligner = PairAligner::new(SpanFinder::new(&index, &contigs, params));
    let reports = aligner.align_pairs(&reads)?;

    let mut writer = open_output(cmd.output)?;
    write_report(&mut writer, &reports, &params, cmd.format.into())?;

    Ok(())
}

fn handle_index_command(cmd: IndexCommand) -> Result<()> {
    let params = AlignParams {
        kmer_size: cmd.kmer.kmer_size,
        ..AlignParams::default()
    };
    params.validate()?;

    let contigs = load_contigs(&cmd.kmer.contigs)?;
    let index = KmerIndex::build(&contigs, params.kmer_size);

    let mut writer = std::io::stdout().lock();
    write_index_stats(&mut writer, index.kmer_size(), &index.stats())?;

    Ok(())
}

fn load_contigs(paths: &[PathBuf]) -> Result<Vec<Contig>> {
    let contigs = FastxReader::new(paths.to_vec()).read_contigs()?;
    info!("Loaded {} contigs", contigs.len());
    Ok(contigs)
}

fn open_output(output: Option<PathBuf>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    Ok(writer)
}
