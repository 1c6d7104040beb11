use std::io::Write;
use anyhow::Result;
use serde::Serialize;

use crate::align::{AlignParams, PairReport};
use crate::kmer::IndexStats;

/// How pair reports are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per pair: mate 1 spans, ` | `, mate 2 spans
    Text,
    /// A single JSON document with the run parameters and every pair
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    params: &'a AlignParams,
    pairs: &'a [PairReport],
}

pub fn write_report<W: Write>(
    writer: &mut W,
    reports: &[PairReport],
    params: &AlignParams,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => {
            for report in reports {
                writeln!(writer, "{}", report)?;
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &JsonReport { params, pairs: reports })?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_index_stats<W: Write>(writer: &mut W, k: usize, stats: &IndexStats) -> Result<()> {
    writeln!(writer, "metric\tvalue")?;
    writeln!(writer, "kmer_size\t{}", k)?;
    writeln!(writer, "contigs\t{}", stats.contigs)?;
    writeln!(writer, "total_kmers\t{}", stats.entries)?;
    writeln!(writer, "distinct_kmers\t{}", stats.distinct_kmers)?;
    writeln!(writer, "repeated_kmers\t{}", stats.repeated_kmers)?;
    writeln!(writer, "max_locations\t{}", stats.max_locations)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{MateReport, MismatchStats, ReadSpan, SpanHit};
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use tempfile::tempdir;

    fn reports() -> Vec<PairReport> {
        let span = ReadSpan {
            read_start: 0,
            contig_start: 2,
            length: 5,
            read_len: 5,
            contig_len: 9,
            contig_id: 1,
            is_rc: true,
        };
        let hit = SpanHit { span, stats: MismatchStats { mismatches: 1, quality_sum: 30 } };
        vec![
            PairReport {
                name: "p1".to_string(),
                first: MateReport { hits: vec![hit] },
                second: MateReport::default(),
            },
            PairReport {
                name: "p2".to_string(),
                first: MateReport::default(),
                second: MateReport { hits: vec![hit, hit] },
            },
        ]
    }

    #[test]
    fn test_text_report() -> Result<()> {
        let mut out = Vec::new();
        write_report(&mut out, &reports(), &AlignParams::default(), ReportFormat::Text)?;
        assert_eq!(
            String::from_utf8(out)?,
            "0-5/5 -> -1:2-7/9 | \n | 0-5/5 -> -1:2-7/9; 0-5/5 -> -1:2-7/9\n"
        );
        Ok(())
    }

    #[test]
    fn test_json_report_to_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("report.json");
        let mut file = File::create(&path)?;
        write_report(&mut file, &reports(), &AlignParams::default(), ReportFormat::Json)?;

        let value: serde_json::Value = serde_json::from_reader(File::open(&path)?)?;
        assert_eq!(value["params"]["kmer_size"], 31);
        assert_eq!(value["params"]["max_quality_sum"], 60);
        assert_eq!(value["pairs"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["pairs"][0]["first"][0]["contig_start"], 2);
        assert_eq!(value["pairs"][0]["first"][0]["quality_sum"], 30);
        assert_eq!(value["pairs"][1]["second"].as_array().map(Vec::len), Some(2));
        Ok(())
    }

    #[test]
    fn test_index_stats_table() -> Result<()> {
        let stats = IndexStats {
            contigs: 2,
            entries: 6,
            distinct_kmers: 3,
            repeated_kmers: 2,
            max_locations: 3,
        };
        let mut out = Vec::new();
        write_index_stats(&mut out, 3, &stats)?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("metric\tvalue\nkmer_size\t3\n"));
        assert!(text.contains("distinct_kmers\t3\n"));
        assert_eq!(text.lines().count(), 7);
        Ok(())
    }
}
