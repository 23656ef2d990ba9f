//! Dataset files
//!
//! `;`-delimited CSV with a header row. Questions and examples are read
//! whole before the run starts; results are written once at the end.

mod reader;
mod writer;

pub use reader::{read_examples, read_questions};
pub use writer::write_results;
