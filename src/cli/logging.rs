//! Tracing setup
//!
//! The level filter sits behind a reload layer so the classify command can
//! hold back info lines while the progress bar owns the status line.

use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

pub type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter applied while the progress bar is drawn
const PROGRESS_FILTER: &str = "warn";

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins over `default_directive` and is never adjusted later, so a
/// handle is only returned when the default directive is in effect.
pub fn init_tracing(default_directive: &str) -> Option<LogFilterHandle> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
        Err(_) => {
            let (filter, handle) = reload::Layer::new(EnvFilter::new(default_directive));
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            Some(handle)
        }
    }
}

/// Raises the log filter to `warn` until dropped, then restores the previous one
pub struct QuietLogs {
    handle: LogFilterHandle,
    previous: Option<String>,
}

impl QuietLogs {
    pub fn new(handle: LogFilterHandle) -> Self {
        let previous = handle.with_current(|filter| filter.to_string()).ok();
        if previous.is_some() {
            let _ = handle.reload(EnvFilter::new(PROGRESS_FILTER));
        }
        Self { handle, previous }
    }
}

impl Drop for QuietLogs {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let _ = self.handle.reload(EnvFilter::new(previous));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(handle: &LogFilterHandle) -> String {
        handle.with_current(|filter| filter.to_string()).unwrap()
    }

    #[test]
    fn test_quiet_logs_raises_and_restores_filter() {
        let (_layer, handle): (reload::Layer<EnvFilter, Registry>, LogFilterHandle) =
            reload::Layer::new(EnvFilter::new("info"));
        let info = current(&handle);

        let quiet = QuietLogs::new(handle.clone());
        assert_eq!(current(&handle), EnvFilter::new(PROGRESS_FILTER).to_string());

        drop(quiet);
        assert_eq!(current(&handle), info);
    }

    #[test]
    fn test_quiet_logs_without_layer_is_noop() {
        let (layer, handle): (reload::Layer<EnvFilter, Registry>, LogFilterHandle) =
            reload::Layer::new(EnvFilter::new("info"));
        drop(layer);

        let quiet = QuietLogs::new(handle);
        assert!(quiet.previous.is_none());
    }
}
