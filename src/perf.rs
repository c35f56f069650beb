//! Timing instrumentation for event dispatch.
//!
//! Dispatch is the hot path while a gesture is live: every pointer move goes
//! through a spatial query or a batch of node moves. This module provides
//!
//! - `profile_scope!` for per-block timing, compiled out unless the
//!   `profiling` feature is enabled
//! - [`ScopedTimer`], the RAII timer behind the macro
//! - [`DispatchStats`], rolling per-event-kind timings kept by the store
//!
//! ```ignore
//! fn handle_pointer_move(&mut self) {
//!     profile_scope!("pointer_move");
//!     // ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

/// Dispatch taking longer than this is reported as slow.
pub const SLOW_DISPATCH_MS: f64 = 4.0;

/// Samples kept per event kind.
const STATS_SAMPLE_COUNT: usize = 100;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// A timer that logs its duration on drop when over a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with a 1ms threshold, used by `profile_scope!`.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);

        #[cfg(not(feature = "profiling"))]
        warn!(
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

// ============================================================================
// Dispatch Statistics
// ============================================================================

/// Rolling timing samples for one event kind.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Total invocations, including samples that rolled out of the window.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    /// Average over the recent window.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }
}

/// Per-event-kind dispatch timings.
#[derive(Debug, Clone, Default)]
pub struct DispatchStats {
    operations: HashMap<&'static str, OperationStats>,
}

impl DispatchStats {
    pub fn record(&mut self, kind: &'static str, elapsed_ms: f64) {
        self.operations.entry(kind).or_default().record(elapsed_ms);
        if elapsed_ms > SLOW_DISPATCH_MS {
            warn!(event = kind, elapsed_ms = format!("{:.2}", elapsed_ms), "Slow dispatch");
        }
    }

    pub fn get(&self, kind: &str) -> Option<&OperationStats> {
        self.operations.get(kind)
    }

    pub fn reset(&mut self) {
        self.operations.clear();
    }
}
