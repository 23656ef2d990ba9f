pub mod commands;
pub mod logging;
pub mod progress;
pub mod ui;

pub use logging::{LogFilterHandle, QuietLogs, init_tracing};
pub use progress::{ConsoleRenderer, ProgressState, ProgressTracker};
