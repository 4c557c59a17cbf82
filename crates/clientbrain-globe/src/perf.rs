//! Rolling frame-time statistics for headless benchmarking.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples kept when no window is given.
pub const DEFAULT_WINDOW: usize = 120;

/// Rolling window of frame durations.
///
/// Durations can be measured wall-clock between [`FrameTimer::begin_frame`]
/// calls or fed in directly with [`FrameTimer::record`] when the caller
/// times the work itself.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    window: usize,
    last_mark: Option<Instant>,
    total_frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    /// A timer keeping the last `window` samples (at least one).
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
            last_mark: None,
            total_frames: 0,
        }
    }

    /// Mark a frame boundary. The first call only starts the clock.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        if let Some(prev) = self.last_mark.replace(now) {
            self.record(now - prev);
        }
    }

    /// Add one frame duration.
    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
        self.total_frames += 1;
    }

    /// Frames per second implied by the mean sample, 0 when empty.
    pub fn fps(&self) -> f64 {
        let mean = self.mean_secs();
        if mean > 0.0 {
            1.0 / mean
        } else {
            0.0
        }
    }

    /// Mean frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        self.mean_secs() * 1000.0
    }

    /// Frame time at quantile `q` (0.0 to 1.0) in milliseconds, nearest rank.
    pub fn percentile_ms(&self, q: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<Duration> = self.samples.iter().copied().collect();
        sorted.sort_unstable();
        let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
        let rank = ((q * sorted.len() as f64).ceil() as usize).clamp(1, sorted.len());
        sorted[rank - 1].as_secs_f64() * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Frames recorded over the timer's lifetime, including evicted ones.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    fn mean_secs(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.samples.iter().map(Duration::as_secs_f64).sum();
        total / self.samples.len() as f64
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.0);
        assert_eq!(timer.frame_time_ms(), 0.0);
        assert_eq!(timer.percentile_ms(0.99), 0.0);
    }

    #[test]
    fn fps_from_recorded_durations() {
        let mut timer = FrameTimer::new();
        for _ in 0..10 {
            timer.record(Duration::from_millis(20));
        }
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn window_evicts_oldest() {
        let mut timer = FrameTimer::with_window(3);
        for ms in [100, 1, 1, 1] {
            timer.record(Duration::from_millis(ms));
        }
        assert_eq!(timer.sample_count(), 3);
        assert_eq!(timer.total_frames(), 4);
        assert!((timer.frame_time_ms() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn percentiles_use_nearest_rank() {
        let mut timer = FrameTimer::new();
        for ms in 1..=100 {
            timer.record(Duration::from_millis(ms));
        }
        assert!((timer.percentile_ms(0.5) - 50.0).abs() < 1e-9);
        assert!((timer.percentile_ms(0.99) - 99.0).abs() < 1e-9);
        assert!((timer.percentile_ms(1.0) - 100.0).abs() < 1e-9);
        assert!((timer.percentile_ms(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn first_mark_only_starts_clock() {
        let mut timer = FrameTimer::new();
        timer.begin_frame();
        assert_eq!(timer.sample_count(), 0);
        std::thread::sleep(Duration::from_millis(1));
        timer.begin_frame();
        assert_eq!(timer.sample_count(), 1);
        assert!(timer.fps() > 0.0);
    }
}
