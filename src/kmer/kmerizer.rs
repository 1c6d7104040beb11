use super::types::{encode_base, kmer_mask, Kmer, MAX_KMER_SIZE};

/// Iterator over the k-mers of a base sequence, left to right.
///
/// Yields `(offset, kmer)` for every window that contains only A, C, G or T.
/// Windows touching any other symbol are skipped. Sequences shorter than `k`
/// produce nothing.
pub struct Kmerizer<'a> {
    bases: &'a [u8],
    k: usize,
    mask: u64,
    next: usize,
    bits: u64,
    valid_run: usize,
}

impl<'a> Kmerizer<'a> {
    pub fn new(bases: &'a [u8], k: usize) -> Self {
        debug_assert!(k >= 1 && k <= MAX_KMER_SIZE);
        Kmerizer {
            bases,
            k,
            mask: kmer_mask(k),
            next: 0,
            bits: 0,
            valid_run: 0,
        }
    }
}

impl Iterator for Kmerizer<'_> {
    type Item = (usize, Kmer);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.bases.len() {
            let base = self.bases[self.next];
            self.next += 1;
            match encode_base(base) {
                Some(code) => {
                    self.bits = ((self.bits << 2) | code) & self.mask;
                    self.valid_run += 1;
                    if self.valid_run >= self.k {
                        return Some((self.next - self.k, Kmer::from_bits(self.bits)));
                    }
                }
                None => {
                    self.bits = 0;
                    self.valid_run = 0;
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bases.len() - self.next;
        let pending = self.valid_run.min(self.k - 1);
        (0, Some((remaining + pending + 1).saturating_sub(self.k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(bases: &[u8], k: usize) -> Vec<(usize, String)> {
        Kmerizer::new(bases, k)
            .map(|(offset, kmer)| (offset, kmer.sequence(k)))
            .collect()
    }

    #[test]
    fn test_every_window() {
        assert_eq!(
            collect(b"ACGTA", 3),
            vec![
                (0, "ACG".to_string()),
                (1, "CGT".to_string()),
                (2, "GTA".to_string()),
            ]
        );
    }

    #[test]
    fn test_skips_windows_with_invalid_bases() {
        assert_eq!(
            collect(b"ACGNTACN", 2),
            vec![
                (0, "AC".to_string()),
                (1, "CG".to_string()),
                (4, "TA".to_string()),
                (5, "AC".to_string()),
            ]
        );
    }

    #[test]
    fn test_short_sequence() {
        assert!(collect(b"AC", 3).is_empty());
        assert!(collect(b"", 3).is_empty());
        assert!(collect(b"NNNNN", 3).is_empty());
    }

    #[test]
    fn test_full_length_kmer() {
        let seq = b"ACGTACGTACGTACGTACGTACGTACGTACGTA";
        let kmers = collect(seq, 32);
        assert_eq!(kmers.len(), 2);
        assert_eq!(kmers[1].1, String::from_utf8(seq[1..].to_vec()).unwrap());
    }

    #[test]
    fn test_size_hint_is_upper_bound() {
        let seq = b"ACGTNACGTACG";
        let hint = Kmerizer::new(seq, 3).size_hint().1.unwrap();
        assert!(Kmerizer::new(seq, 3).count() <= hint);
        assert_eq!(hint, 10);
    }
}
