use thiserror::Error;

/// Errors raised when inputs violate the contracts of the tiling run
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TilerError {
    #[error("read input must have interleaved pairs, but it holds an odd number of reads ({0})")]
    OddReadCount(usize),

    #[error(
        "read input must have interleaved pairs, but records {first} and {second} have different names ({first_name} vs {second_name})"
    )]
    MismatchedPairNames {
        first: usize,
        second: usize,
        first_name: String,
        second_name: String,
    },

    #[error("mate files must hold the same number of reads, but they hold {first} and {second}")]
    MateCountMismatch { first: usize, second: usize },

    #[error("invalid k-mer size {0}: must be odd and between 1 and 31")]
    InvalidKmerSize(usize),

    #[error("read {0} has no quality scores")]
    MissingQualities(String),

    #[error("read {name} has {bases} bases but {quals} quality scores")]
    QualityLengthMismatch {
        name: String,
        bases: usize,
        quals: usize,
    },
}

pub type Result<T> = std::result::Result<T, TilerError>;
