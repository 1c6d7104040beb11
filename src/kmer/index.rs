use fxhash::FxHashMap;
use log::{debug, info};
use rayon::prelude::*;

use super::kmerizer::Kmerizer;
use super::types::CanonicalKmer;

/// An assembled sequence, stored upper case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub id: usize,
    pub name: String,
    pub sequence: Vec<u8>,
}

impl Contig {
    pub fn new(id: usize, name: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        let mut sequence: Vec<u8> = sequence.into();
        sequence.make_ascii_uppercase();
        Contig {
            id,
            name: name.into(),
            sequence,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Where a k-mer occurs: the contig's position in the slice the index was
/// built from, the window offset, and whether the contig's own orientation
/// of the k-mer was the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContigLocation {
    pub contig_idx: usize,
    pub offset: usize,
    pub canonical: bool,
}

/// Summary of an index's shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub contigs: usize,
    pub entries: usize,
    pub distinct_kmers: usize,
    pub repeated_kmers: usize,
    pub max_locations: usize,
}

/// Multimap from canonical k-mer to every contig location where it occurs.
///
/// Built once from the final contig set and read-only afterwards, so it can be
/// shared across rayon workers without locking.
pub struct KmerIndex {
    k: usize,
    contigs: usize,
    entries: usize,
    locations: FxHashMap<CanonicalKmer, Vec<ContigLocation>>,
}

impl KmerIndex {
    /// Index every valid window of every contig
    pub fn build(contigs: &[Contig], k: usize) -> Self {
        let capacity: usize = contigs
            .iter()
            .map(|tig| (tig.len() + 1).saturating_sub(k))
            .sum();
        debug!("Sizing k-mer index for {} windows", capacity);

        // Each contig is kmerized on its own worker; the merge below is sequential
        // and in contig order so every location list keeps insertion order.
        let shards: Vec<Vec<(CanonicalKmer, ContigLocation)>> = contigs
            .par_iter()
            .enumerate()
            .map(|(contig_idx, tig)| {
                Kmerizer::new(&tig.sequence, k)
                    .map(|(offset, kmer)| {
                        let (canonical, is_canonical) = kmer.canonical(k);
                        let location = ContigLocation {
                            contig_idx,
                            offset,
                            canonical: is_canonical,
                        };
                        (canonical, location)
                    })
                    .collect()
            })
            .collect();

        let mut locations: FxHashMap<CanonicalKmer, Vec<ContigLocation>> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut entries = 0;
        for shard in shards {
            entries += shard.len();
            for (kmer, location) in shard {
                locations.entry(kmer).or_default().push(location);
            }
        }

        info!(
            "Indexed {} k-mer occurrences ({} distinct) from {} contigs",
            entries,
            locations.len(),
            contigs.len()
        );

        KmerIndex {
            k,
            contigs: contigs.len(),
            entries,
            locations,
        }
    }

    /// All locations of a canonical k-mer, in insertion order
    pub fn lookup(&self, kmer: &CanonicalKmer) -> impl Iterator<Item = &ContigLocation> + '_ {
        self.locations
            .get(kmer)
            .map(|locs| locs.as_slice())
            .unwrap_or(&[])
            .iter()
    }

    /// Get the k-mer size
    pub fn kmer_size(&self) -> usize {
        self.k
    }

    /// Total number of stored occurrences
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of distinct canonical k-mers
    pub fn distinct_kmers(&self) -> usize {
        self.locations.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            contigs: self.contigs,
            entries: self.entries,
            distinct_kmers: self.locations.len(),
            repeated_kmers: self.locations.values().filter(|locs| locs.len() > 1).count(),
            max_locations: self.locations.values().map(Vec::len).max().unwrap_or(0),
        }
    }
}
