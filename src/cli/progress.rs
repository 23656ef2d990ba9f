//! Batch Progress Reporting
//!
//! The scheduler updates group-level state; the console renderer polls it
//! and redraws a single status line.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    /// 1-based index of the current group
    pub group: usize,
    pub total_groups: usize,
    /// Questions with a final descriptor
    pub completed: usize,
    pub total: usize,
    /// Questions that degraded to the fallback descriptor after a fault
    pub faults: usize,
    /// Questions per second
    pub throughput: f32,
    pub eta_secs: Option<u64>,
    pub is_running: bool,
    pub elapsed_secs: u64,
}

impl ProgressState {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f32 / self.total as f32).min(1.0)
        }
    }
}

#[derive(Clone)]
pub struct ProgressTracker {
    state: Arc<RwLock<ProgressState>>,
    start_time: Arc<RwLock<Option<Instant>>>,
    active: Arc<AtomicBool>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ProgressState::default())),
            start_time: Arc::new(RwLock::new(None)),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(Instant::elapsed)
            .unwrap_or_default()
    }

    pub fn start(&self, total_items: usize, total_groups: usize) {
        self.active.store(true, Ordering::SeqCst);
        *self
            .start_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Instant::now());

        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = ProgressState {
            total: total_items,
            total_groups,
            is_running: true,
            ..ProgressState::default()
        };
    }

    pub fn start_group(&self, group: usize) {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .group = group;
    }

    /// `completed` is the running total of classified questions
    pub fn complete_group(&self, completed: usize, faults: usize) {
        let elapsed = self.elapsed().as_secs_f32();
        let throughput = completed as f32 / elapsed.max(0.1);

        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.completed = completed;
        state.faults += faults;
        state.throughput = throughput;
        state.elapsed_secs = elapsed as u64;

        let remaining = state.total.saturating_sub(completed);
        state.eta_secs = if throughput > 0.0 && remaining > 0 {
            Some((remaining as f32 / throughput) as u64)
        } else {
            None
        };
    }

    /// Stop the tracker; the render loop exits on its next tick
    pub fn finish(&self) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.is_running = false;
        state.elapsed_secs = self.elapsed().as_secs();
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Single-line console renderer
pub struct ConsoleRenderer {
    tracker: ProgressTracker,
    show_eta: bool,
}

impl ConsoleRenderer {
    pub fn new(tracker: ProgressTracker) -> Self {
        Self {
            tracker,
            show_eta: true,
        }
    }

    pub fn with_eta(mut self, show: bool) -> Self {
        self.show_eta = show;
        self
    }

    pub fn render(&self) -> String {
        let state = self.tracker.state();

        if !state.is_running {
            return String::new();
        }

        let bar = render_progress_bar(state.completed, state.total, 30);

        let eta = if self.show_eta {
            state
                .eta_secs
                .map(|s| format!(" ETA: {}", format_duration(s)))
                .unwrap_or_default()
        } else {
            String::new()
        };

        let throughput = if state.throughput > 0.0 {
            format!(" ({:.1}/s)", state.throughput)
        } else {
            String::new()
        };

        let faults = if state.faults > 0 {
            format!(" {} fallback", state.faults)
        } else {
            String::new()
        };

        format!(
            "[group {}/{}] {} {}/{}{}{}{}",
            state.group,
            state.total_groups,
            bar,
            state.completed,
            state.total,
            throughput,
            faults,
            eta
        )
    }

    /// Redraw every 100ms until the tracker finishes
    pub fn start_render_loop(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while self.tracker.is_active() {
                let output = self.render();
                if !output.is_empty() {
                    eprint!("\r\x1B[K{}", output);
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            eprintln!();
        })
    }
}

fn render_progress_bar(completed: usize, total: usize, width: usize) -> String {
    if total == 0 {
        return format!("[{}]", " ".repeat(width));
    }

    let progress = (completed as f32 / total as f32).min(1.0);
    let filled = (progress * width as f32) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
