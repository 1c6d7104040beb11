use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

use super::spans::SpanFinder;
use super::types::{MismatchStats, ReadRecord, ReadSpan, SpanMap};
use crate::error::{Result, TilerError};

/// A span together with its mismatch statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpanHit {
    #[serde(flatten)]
    pub span: ReadSpan,
    #[serde(flatten)]
    pub stats: MismatchStats,
}

/// Surviving spans of one mate, in span order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MateReport {
    pub hits: Vec<SpanHit>,
}

impl From<SpanMap> for MateReport {
    fn from(spans: SpanMap) -> Self {
        MateReport {
            hits: spans
                .into_iter()
                .map(|(span, stats)| SpanHit { span, stats })
                .collect(),
        }
    }
}

impl fmt::Display for MateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for hit in &self.hits {
            write!(f, "{}{}", sep, hit.span)?;
            sep = "; ";
        }
        Ok(())
    }
}

/// Spans of both mates of one read pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub name: String,
    pub first: MateReport,
    pub second: MateReport,
}

impl fmt::Display for PairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.first, self.second)
    }
}

/// Check that reads are interleaved pairs: an even count, and equal names
/// within each pair.
pub fn validate_pairs(reads: &[ReadRecord]) -> Result<()> {
    if reads.len() % 2 != 0 {
        return Err(TilerError::OddReadCount(reads.len()));
    }
    for (pair_idx, pair) in reads.chunks_exact(2).enumerate() {
        if pair[0].name() != pair[1].name() {
            return Err(TilerError::MismatchedPairNames {
                first: 2 * pair_idx,
                second: 2 * pair_idx + 1,
                first_name: pair[0].name().to_string(),
                second_name: pair[1].name().to_string(),
            });
        }
    }
    Ok(())
}

/// Runs span finding over interleaved read pairs
pub struct PairAligner<'a> {
    finder: SpanFinder<'a>,
}

impl<'a> PairAligner<'a> {
    pub fn new(finder: SpanFinder<'a>) -> Self {
        PairAligner { finder }
    }

    /// Validate the whole input, then report every pair in input order.
    ///
    /// Nothing is matched if any pair is malformed.
    pub fn align_pairs(&self, reads: &[ReadRecord]) -> Result<Vec<PairReport>> {
        validate_pairs(reads)?;

        info!("Tiling {} read pairs onto contigs", reads.len() / 2);
        let reports: Vec<PairReport> = reads
            .par_chunks_exact(2)
            .map(|pair| self.align_pair(&pair[0], &pair[1]))
            .collect();

        let spans: usize = reports
            .iter()
            .map(|r| r.first.hits.len() + r.second.hits.len())
            .sum();
        info!("Reported {} spans across {} pairs", spans, reports.len());
        Ok(reports)
    }

    fn align_pair(&self, first: &ReadRecord, second: &ReadRecord) -> PairReport {
        PairReport {
            name: first.name().to_string(),
            first: self.finder.find_spans(first).into(),
            second: self.finder.find_spans(second).into(),
        }
    }
}
