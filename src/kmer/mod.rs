pub(crate) mod types;
pub(crate) mod kmerizer;
pub(crate) mod index;

pub use types::{CanonicalKmer, Kmer, MAX_KMER_SIZE};
pub use kmerizer::Kmerizer;
pub use index::{Contig, ContigLocation, IndexStats, KmerIndex};
