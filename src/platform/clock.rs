//! Frame pacing
//!
//! One blocking wait per frame keeps the loop at or under the frame cap.
//! The clock sleeps briefly when it starts, so the first frame never
//! measures zero time.

use std::thread;
use std::time::{Duration, Instant};

/// Delay before the first frame sample
const STARTUP_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct FrameClock {
    max_fps: u32,
    last: Instant,
    last_frame_ms: f32,
}

impl FrameClock {
    pub fn start(max_fps: u32) -> Self {
        let last = Instant::now();
        thread::sleep(STARTUP_DELAY);
        Self {
            max_fps: max_fps.max(1),
            last,
            last_frame_ms: 0.0,
        }
    }

    /// Shortest frame the cap allows
    pub fn min_frame(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.max_fps as f64)
    }

    /// Wait out the rest of the frame and return the frame time in ms
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        let min_frame = self.min_frame();
        if elapsed < min_frame {
            thread::sleep(min_frame - elapsed);
        }

        let now = Instant::now();
        let frame = now.duration_since(self.last);
        self.last = now;
        self.last_frame_ms = (frame.as_secs_f64() * 1000.0) as f32;
        self.last_frame_ms
    }

    /// Frame time of the last tick
    pub fn frame_ms(&self) -> f32 {
        self.last_frame_ms
    }

    /// Frames per second implied by the last tick
    pub fn fps(&self) -> f32 {
        if self.last_frame_ms > 0.0 {
            1000.0 / self.last_frame_ms
        } else {
            0.0
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }
}
