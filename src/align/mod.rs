pub(crate) mod types;
pub(crate) mod spans;
pub(crate) mod pairs;

pub use types::{AlignParams, MismatchStats, ReadRecord, ReadSpan, SpanMap};
pub use spans::SpanFinder;
pub use pairs::{validate_pairs, MateReport, PairAligner, PairReport, SpanHit};
