pub mod align;
pub mod error;
pub mod io;
pub mod kmer;

pub use error::TilerError;
