use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, TilerError};
use crate::kmer::MAX_KMER_SIZE;

/// Parameters of a tiling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignParams {
    /// K-mer size used for the index and read seeding
    pub kmer_size: usize,
    /// Reads are trimmed before the first base with quality below this
    pub min_quality: u8,
    /// Spans whose quality-weighted mismatch sum exceeds this are dropped
    pub max_quality_sum: u32,
}

impl Default for AlignParams {
    fn default() -> Self {
        AlignParams {
            kmer_size: 31,
            min_quality: 10,
            max_quality_sum: 60,
        }
    }
}

impl AlignParams {
    pub fn validate(&self) -> Result<()> {
        let k = self.kmer_size;
        if k == 0 || k % 2 == 0 || k >= MAX_KMER_SIZE {
            return Err(TilerError::InvalidKmerSize(k));
        }
        Ok(())
    }
}

/// One sequenced read with decoded Phred quality scores.
///
/// Bases are stored upper case and always match the qualities in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecord {
    name: String,
    bases: Vec<u8>,
    quals: Vec<u8>,
}

impl ReadRecord {
    pub fn new(name: impl Into<String>, bases: impl Into<Vec<u8>>, quals: impl Into<Vec<u8>>) -> Result<Self> {
        let name = name.into();
        let mut bases: Vec<u8> = bases.into();
        bases.make_ascii_uppercase();
        let quals = quals.into();
        if bases.len() != quals.len() {
            return Err(TilerError::QualityLengthMismatch {
                name,
                bases: bases.len(),
                quals: quals.len(),
            });
        }
        Ok(ReadRecord { name, bases, quals })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn quals(&self) -> &[u8] {
        &self.quals
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Length of the leading run of bases whose quality is at least `min_quality`
    pub fn trimmed_len(&self, min_quality: u8) -> usize {
        self.quals
            .iter()
            .position(|&q| q < min_quality)
            .unwrap_or(self.quals.len())
    }
}

/// An aligned window between a read and a contig.
///
/// Two spans are the same span when read start, contig start, length, contig and
/// strand agree; `read_len` and `contig_len` only describe the sequences.
/// Spans sort by read start, then length, then the remaining identity fields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReadSpan {
    pub read_start: usize,
    pub contig_start: usize,
    pub length: usize,
    pub read_len: usize,
    pub contig_len: usize,
    pub contig_id: usize,
    pub is_rc: bool,
}

impl ReadSpan {
    pub fn read_end(&self) -> usize {
        self.read_start + self.length
    }

    pub fn contig_end(&self) -> usize {
        self.contig_start + self.length
    }

    fn identity(&self) -> (usize, usize, usize, usize, bool) {
        (self.read_start, self.length, self.contig_id, self.contig_start, self.is_rc)
    }
}

impl PartialEq for ReadSpan {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ReadSpan {}

impl Hash for ReadSpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl Ord for ReadSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl PartialOrd for ReadSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReadSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}/{} -> {}{}:{}-{}/{}",
            self.read_start,
            self.read_end(),
            self.read_len,
            if self.is_rc { '-' } else { '+' },
            self.contig_id,
            self.contig_start,
            self.contig_end(),
            self.contig_len
        )
    }
}

/// Mismatch count and the sum of read qualities at mismatching positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MismatchStats {
    pub mismatches: u32,
    pub quality_sum: u32,
}

/// Spans of one read, in span order
pub type SpanMap = BTreeMap<ReadSpan, MismatchStats>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(read_start: usize, contig_start: usize, length: usize, contig_id: usize, is_rc: bool) -> ReadSpan {
        ReadSpan {
            read_start,
            contig_start,
            length,
            read_len: 100,
            contig_len: 200,
            contig_id,
            is_rc,
        }
    }

    #[test]
    fn test_default_params() {
        let params = AlignParams::default();
        assert_eq!(params.kmer_size, 31);
        assert_eq!(params.min_quality, 10);
        assert_eq!(params.max_quality_sum, 60);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_kmer_sizes() {
        for k in [0, 4, 32, 33] {
            let params = AlignParams { kmer_size: k, ..AlignParams::default() };
            assert_eq!(params.validate(), Err(TilerError::InvalidKmerSize(k)));
        }
        let params = AlignParams { kmer_size: 1, ..AlignParams::default() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_read_quality_length_mismatch() {
        let err = ReadRecord::new("r1", "ACGT", vec![30, 30]).unwrap_err();
        assert_eq!(
            err,
            TilerError::QualityLengthMismatch { name: "r1".to_string(), bases: 4, quals: 2 }
        );
    }

    #[test]
    fn test_read_bases_are_upper_case() {
        let read = ReadRecord::new("r1", "acgTn", vec![30; 5]).unwrap();
        assert_eq!(read.bases(), b"ACGTN");
        assert_eq!(read.quals(), &[30; 5]);
        assert_eq!(read.name(), "r1");
    }

    #[test]
    fn test_trimmed_len() {
        let read = ReadRecord::new("r1", "ACGTAC", vec![30, 30, 12, 9, 30, 30]).unwrap();
        assert_eq!(read.trimmed_len(10), 3);
        assert_eq!(read.trimmed_len(5), 6);
        assert_eq!(read.trimmed_len(31), 0);
    }

    #[test]
    fn test_span_identity_ignores_lengths_of_sequences() {
        let a = span(0, 5, 10, 1, false);
        let b = ReadSpan { read_len: 50, contig_len: 60, ..a };
        assert_eq!(a, b);
        assert_ne!(a, span(0, 5, 10, 1, true));
        assert_ne!(a, span(0, 5, 10, 2, false));
        assert_ne!(a, span(0, 6, 10, 1, false));
    }

    #[test]
    fn test_span_ordering() {
        let mut spans = vec![
            span(3, 0, 5, 0, false),
            span(0, 9, 8, 1, false),
            span(0, 2, 4, 0, true),
            span(0, 1, 8, 0, false),
        ];
        spans.sort();
        assert_eq!(
            spans,
            vec![
                span(0, 2, 4, 0, true),
                span(0, 1, 8, 0, false),
                span(0, 9, 8, 1, false),
                span(3, 0, 5, 0, false),
            ]
        );
    }

    #[test]
    fn test_distinct_spans_with_same_start_and_length_are_kept() {
        let mut map = SpanMap::new();
        map.insert(span(0, 0, 10, 0, false), MismatchStats::default());
        map.insert(span(0, 0, 10, 1, false), MismatchStats::default());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_span_display() {
        let fwd = ReadSpan { read_len: 4, contig_len: 7, ..span(0, 0, 4, 0, false) };
        assert_eq!(fwd.to_string(), "0-4/4 -> +0:0-4/7");
        let rc = ReadSpan { read_len: 151, contig_len: 900, ..span(10, 400, 141, 3, true) };
        assert_eq!(rc.to_string(), "10-151/151 -> -3:400-541/900");
    }
}
