pub(crate) mod reader;
pub(crate) mod writer;

pub use reader::{read_pairs, FastxReader};
pub use writer::{write_index_stats, write_report, ReportFormat};
