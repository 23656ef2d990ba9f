//! Classification pipeline: answer parsing, per-question classification,
//! grouped concurrent scheduling and the end-to-end run.

pub mod classifier;
pub mod parser;
pub mod run;
pub mod scheduler;

pub use classifier::{Classification, Classifier, Outcome};
pub use parser::{parse_response, try_parse_response};
pub use run::{RunReport, run_classification};
pub use scheduler::BatchScheduler;
