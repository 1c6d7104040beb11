use std::fmt;

/// Largest k-mer that fits two bits per base in a `u64`
pub const MAX_KMER_SIZE: usize = 32;

/// Encode a base as A=0, C=1, G=2, T=3. Anything else is not a valid k-mer base.
#[inline]
pub fn encode_base(base: u8) -> Option<u64> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

#[inline]
fn decode_base(code: u64) -> u8 {
    match code & 0b11 {
        0 => b'A',
        1 => b'C',
        2 => b'G',
        _ => b'T',
    }
}

#[inline]
pub(crate) fn kmer_mask(k: usize) -> u64 {
    if k >= MAX_KMER_SIZE {
        u64::MAX
    } else {
        (1u64 << (2 * k)) - 1
    }
}

/// A k-mer packed two bits per base, first base in the most significant position.
///
/// The packed value orders the same way as the base string, so numeric comparison
/// is lexicographic comparison. The length is not stored; callers pass `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kmer(u64);

impl Kmer {
    pub fn from_bits(bits: u64) -> Self {
        Kmer(bits)
    }

    /// Pack a slice of bases. Returns `None` if any base is not A, C, G or T,
    /// or if the slice is too long to pack.
    pub fn from_bases(bases: &[u8]) -> Option<Self> {
        if bases.len() > MAX_KMER_SIZE {
            return None;
        }
        bases
            .iter()
            .try_fold(0u64, |bits, &base| Some((bits << 2) | encode_base(base)?))
            .map(Kmer)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Reverse complement of a k-mer of length `k`
    pub fn reverse_complement(&self, k: usize) -> Self {
        // complementing 2-bit codes is xor with 0b11
        let mut fwd = !self.0 & kmer_mask(k);
        let mut rc = 0u64;
        for _ in 0..k {
            rc = (rc << 2) | (fwd & 0b11);
            fwd >>= 2;
        }
        Kmer(rc)
    }

    /// Strand-independent representative of this k-mer, plus whether this
    /// orientation is the canonical one. Self-complementary k-mers report `true`.
    pub fn canonical(&self, k: usize) -> (CanonicalKmer, bool) {
        let rc = self.reverse_complement(k);
        if *self <= rc {
            (CanonicalKmer(*self), true)
        } else {
            (CanonicalKmer(rc), false)
        }
    }

    /// Unpack into a base string of length `k`
    pub fn sequence(&self, k: usize) -> String {
        (0..k)
            .rev()
            .map(|shift| decode_base(self.0 >> (2 * shift)) as char)
            .collect()
    }
}

/// The smaller of a k-mer and its reverse complement; the key of the k-mer index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKmer(Kmer);

impl CanonicalKmer {
    pub fn kmer(&self) -> Kmer {
        self.0
    }
}

impl fmt::Display for CanonicalKmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.bits())
    }
}
