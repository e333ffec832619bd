//! Frame rate cap.
//!
//! `next_frame` already waits for vsync, which on a fast display is quicker than
//! the target rate. Since the physics takes one fixed step per frame, running
//! faster would speed up the simulation, so the loop sleeps off the rest of
//! each frame.

use std::time::Duration;

pub struct FrameLimiter {
    frame: f64,
    started: f64,
}

impl FrameLimiter {
    /// `now` is the current time in seconds, from any monotonic clock
    pub fn new(fps: u32, now: f64) -> Self {
        Self {
            frame: 1.0 / fps.max(1) as f64,
            started: now,
        }
    }

    pub fn frame_time(&self) -> f64 {
        self.frame
    }

    /// Time left in the current frame, zero if it already ran long
    pub fn remaining(&self, now: f64) -> Duration {
        let left = self.frame - (now - self.started);
        if left > 0.0 {
            Duration::from_secs_f64(left)
        } else {
            Duration::ZERO
        }
    }

    /// Start timing the next frame
    pub fn restart(&mut self, now: f64) {
        self.started = now;
    }

    /// Sleep until the frame is over. The browser paces frames on wasm.
    pub fn wait(&mut self, now: f64) {
        let left = self.remaining(now);
        #[cfg(not(target_arch = "wasm32"))]
        {
            if !left.is_zero() {
                std::thread::sleep(left);
            }
        }
        self.restart(now + left.as_secs_f64());
    }
}
