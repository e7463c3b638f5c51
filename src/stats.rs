//! Frame timing readout.

use std::time::{Duration, Instant};

/// Frames per window before the FPS figure refreshes.
const WINDOW: u32 = 30;

/// Marks the start and end of each frame's timing sample and keeps a
/// windowed frames-per-second average plus the last measured frame cost.
pub struct FrameStats {
    last_begin: Option<Instant>,
    frame_start: Option<Instant>,
    interval_sum: Duration,
    intervals: u32,
    fps: f32,
    frame_ms: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            last_begin: None,
            frame_start: None,
            interval_sum: Duration::ZERO,
            intervals: 0,
            fps: 0.0,
            frame_ms: 0.0,
        }
    }

    /// Mark the start of a frame's timing sample.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        if let Some(prev) = self.last_begin {
            self.interval_sum += now.duration_since(prev);
            self.intervals += 1;
            if self.intervals >= WINDOW {
                let secs = self.interval_sum.as_secs_f32();
                if secs > 0.0 {
                    self.fps = self.intervals as f32 / secs;
                }
                self.interval_sum = Duration::ZERO;
                self.intervals = 0;
            }
        }
        self.last_begin = Some(now);
        self.frame_start = Some(now);
    }

    /// Mark the end of the sample started by `begin_frame`.
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.frame_ms = start.elapsed().as_secs_f32() * 1000.0;
        }
    }

    /// Windowed frames-per-second figure; 0 until the first window fills.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Cost of the most recent frame in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_starts_at_zero() {
        let stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_fps_after_a_window_of_frames() {
        let mut stats = FrameStats::new();
        for _ in 0..(WINDOW + 2) {
            stats.begin_frame();
            std::thread::sleep(Duration::from_millis(1));
            stats.end_frame();
        }
        assert!(stats.fps() > 0.0);
        assert!(stats.fps().is_finite());
    }

    #[test]
    fn test_frame_ms_tracks_work() {
        let mut stats = FrameStats::new();
        stats.begin_frame();
        std::thread::sleep(Duration::from_millis(2));
        stats.end_frame();
        assert!(stats.frame_ms() >= 1.0);
    }
}
