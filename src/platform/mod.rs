//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame vs. a fixed-rate loop)
//! - Turning host timestamps into fixed simulation ticks

pub mod clock;

use std::time::{Duration, Instant};

pub use clock::FrameClock;

/// What a frame callback wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Runs a frame callback, scheduling the next call from within the current one.
///
/// The callback receives the host timestamp in milliseconds.
pub trait Scheduler {
    fn run<F>(self, frame: F)
    where
        F: FnMut(f64) -> LoopControl + 'static;
}

/// Native scheduler: calls the frame at a fixed interval on the current thread
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    pub interval: Duration,
    /// Stop after this many frames (None = until the callback stops)
    pub max_frames: Option<u64>,
}

impl FixedRateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

impl Scheduler for FixedRateScheduler {
    fn run<F>(self, mut frame: F)
    where
        F: FnMut(f64) -> LoopControl + 'static,
    {
        let start = Instant::now();
        let mut frames = 0u64;

        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                log::debug!("Frame limit {} reached", frames);
                break;
            }
            let frame_start = Instant::now();
            let now_ms = start.elapsed().as_secs_f64() * 1000.0;
            frames += 1;
            if frame(now_ms) == LoopControl::Stop {
                break;
            }
            if let Some(rest) = self.interval.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
