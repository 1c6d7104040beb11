use bio::alphabets::dna;
use log::debug;

use super::types::{AlignParams, MismatchStats, ReadRecord, ReadSpan, SpanMap};
use crate::kmer::{Contig, ContigLocation, KmerIndex, Kmerizer};

/// Finds the contig spans of single reads using a shared k-mer index
pub struct SpanFinder<'a> {
    index: &'a KmerIndex,
    contigs: &'a [Contig],
    params: AlignParams,
}

impl<'a> SpanFinder<'a> {
    /// `contigs` must be the arena the index was built from
    pub fn new(index: &'a KmerIndex, contigs: &'a [Contig], params: AlignParams) -> Self {
        debug_assert_eq!(index.kmer_size(), params.kmer_size);
        SpanFinder {
            index,
            contigs,
            params,
        }
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    /// Every span seeded by a k-mer of the read's high-quality prefix whose
    /// quality-weighted mismatch sum is within `max_quality_sum`.
    ///
    /// Only the prefix before the first base under `min_quality` seeds hits, but
    /// spans extend over, and are scored against, the whole read.
    pub fn find_spans(&self, read: &ReadRecord) -> SpanMap {
        let k = self.params.kmer_size;
        let trimmed = &read.bases()[..read.trimmed_len(self.params.min_quality)];

        let mut spans = SpanMap::new();
        for (read_offset, read_kmer) in Kmerizer::new(trimmed, k) {
            let (canonical, read_is_canonical) = read_kmer.canonical(k);
            for location in self.index.lookup(&canonical) {
                let (span, contig_start) = self.span_for_hit(read, read_offset, read_is_canonical, location);
                if spans.contains_key(&span) {
                    continue;
                }
                let contig = &self.contigs[location.contig_idx].sequence;
                let stats = score_span(read, contig, &span, contig_start);
                spans.insert(span, stats);
            }
        }

        let found = spans.len();
        let max_quality_sum = self.params.max_quality_sum;
        let spans: SpanMap = spans
            .into_iter()
            .filter(|(_, stats)| stats.quality_sum <= max_quality_sum)
            .collect();
        debug!(
            "Read {}: {} candidate spans, {} within quality sum {}",
            read.name(),
            found,
            spans.len(),
            max_quality_sum
        );
        spans
    }

    /// Widen a single k-mer hit to the maximal overlap of read and contig.
    ///
    /// Returns the span and its contig start in the hit's own orientation, which
    /// for reverse-complement hits is a coordinate on the reversed contig.
    fn span_for_hit(
        &self,
        read: &ReadRecord,
        read_offset: usize,
        read_is_canonical: bool,
        location: &ContigLocation,
    ) -> (ReadSpan, usize) {
        let k = self.params.kmer_size;
        let contig = &self.contigs[location.contig_idx];
        let contig_len = contig.len();
        let read_len = read.len();

        let is_rc = read_is_canonical != location.canonical;
        let contig_offset = if is_rc {
            contig_len - location.offset - k
        } else {
            location.offset
        };

        let left = read_offset.min(contig_offset);
        let read_start = read_offset - left;
        let contig_start = contig_offset - left;
        let length = left + (read_len - read_offset).min(contig_len - contig_offset);

        let span = ReadSpan {
            read_start,
            contig_start: if is_rc {
                contig_len - contig_start - length
            } else {
                contig_start
            },
            length,
            read_len,
            contig_len,
            contig_id: contig.id,
            is_rc,
        };
        (span, contig_start)
    }
}

/// Count mismatches between the read and the contig over a span, summing the
/// read's quality at each mismatch. `contig_start` is in the span's orientation.
fn score_span(read: &ReadRecord, contig: &[u8], span: &ReadSpan, contig_start: usize) -> MismatchStats {
    let read_bases = &read.bases()[span.read_start..span.read_end()];
    let read_quals = &read.quals()[span.read_start..span.read_end()];

    if span.is_rc {
        // walk the contig backwards from the mirrored start
        let rc_end = contig.len() - contig_start;
        let contig_bases = contig[rc_end - span.length..rc_end]
            .iter()
            .rev()
            .map(|&base| dna::complement(base));
        tally(read_bases, read_quals, contig_bases)
    } else {
        let contig_bases = contig[contig_start..contig_start + span.length].iter().copied();
        tally(read_bases, read_quals, contig_bases)
    }
}

fn tally<I>(read_bases: &[u8], read_quals: &[u8], contig_bases: I) -> MismatchStats
where
    I: Iterator<Item = u8>,
{
    let mut stats = MismatchStats::default();
    for ((&read_base, &qual), contig_base) in read_bases.iter().zip(read_quals).zip(contig_bases) {
        if read_base != contig_base {
            stats.mismatches += 1;
            stats.quality_sum += u32::from(qual);
        }
    }
    stats
}
