use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use needletail::{parse_fastx_file, Sequence};
use log::{info, warn};

use crate::align::ReadRecord;
use crate::error::TilerError;
use crate::kmer::Contig;

/// Phred+33 quality encoding offset
const QUALITY_OFFSET: u8 = 33;

/// Represents a FASTA/FASTQ sequence reader that can handle multiple files
pub struct FastxReader {
    files: Vec<PathBuf>
}

impl FastxReader {
    /// Create a new FastxReader from a list of input files
    pub fn new<P: AsRef<Path>>(files: Vec<P>) -> Self {
        let files = files.into_iter()
            .map(|p| p.as_ref().to_owned())
            .collect();

        FastxReader {
            files
        }
    }

    /// Load every record of every file as a contig, numbering them in file order
    pub fn read_contigs(&self) -> Result<Vec<Contig>> {
        let mut contigs = Vec::new();
        self.process_all(|id, sequence, _qual| {
            if sequence.is_empty() {
                warn!("Contig {} is empty", id);
            }
            contigs.push(Contig::new(contigs.len(), id, sequence));
            Ok(())
        })?;
        Ok(contigs)
    }

    /// Load every record of every file as a read with decoded quality scores
    pub fn read_reads(&self) -> Result<Vec<ReadRecord>> {
        let mut reads = Vec::new();
        self.process_all(|id, sequence, qual| {
            let name = read_name(id);
            let qual = qual.ok_or_else(|| TilerError::MissingQualities(name.to_string()))?;
            let quals: Vec<u8> = qual.iter().map(|q| q.saturating_sub(QUALITY_OFFSET)).collect();
            reads.push(ReadRecord::new(name, sequence, quals)?);
            Ok(())
        })?;
        Ok(reads)
    }

    /// Process each sequence in all input files
    pub fn process_all<F>(&self, mut callback: F) -> Result<()>
    where
        F: FnMut(&str, &[u8], Option<&[u8]>) -> Result<()>
    {
        for file in &self.files {
            self.process_file(file, &mut callback)
                .with_context(|| format!("Failed to process file: {}", file.display()))?;
        }
        Ok(())
    }

    /// Process a single FASTA/FASTQ file
    fn process_file<F>(&self, path: &Path, callback: &mut F) -> Result<()>
    where
        F: FnMut(&str, &[u8], Option<&[u8]>) -> Result<()>
    {
        info!("Processing file: {}", path.display());

        let mut reader = parse_fastx_file(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let mut num_sequences = 0;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "Failed to parse sequence record")?;

            // Normalize sequence to uppercase; ambiguity codes become N
            let sequence = record.normalize(false);
            let id = String::from_utf8_lossy(record.id());

            callback(&id, &sequence, record.qual())?;
            num_sequences += 1;
        }

        info!("Processed {} sequences from {}", num_sequences, path.display());
        Ok(())
    }
}

/// Load interleaved read pairs from one interleaved file, or from a mate 1 and
/// a mate 2 file whose records are interleaved positionally.
pub fn read_pairs<P: AsRef<Path>>(files: &[P]) -> Result<Vec<ReadRecord>> {
    match files {
        [interleaved] => FastxReader::new(vec![interleaved]).read_reads(),
        [first, second] => {
            let first = FastxReader::new(vec![first]).read_reads()?;
            let second = FastxReader::new(vec![second]).read_reads()?;
            if first.len() != second.len() {
                warn!(
                    "Mate files hold different numbers of reads ({} and {})",
                    first.len(),
                    second.len()
                );
                return Err(TilerError::MateCountMismatch {
                    first: first.len(),
                    second: second.len(),
                }
                .into());
            }
            Ok(first
                .into_iter()
                .zip(second)
                .flat_map(|(a, b)| [a, b])
                .collect())
        }
        _ => Err(anyhow::anyhow!(
            "Expected one interleaved reads file or two mate files, got {}",
            files.len()
        )),
    }
}

/// The read name shared by both mates: the first header token without a /1 or /2 suffix
fn read_name(id: &str) -> &str {
    let name = id.split_whitespace().next().unwrap_or("");
    name.strip_suffix("/1")
        .or_else(|| name.strip_suffix("/2"))
        .unwrap_or(name)
}
