//! Fixed-rate frame pacing.

use std::thread;
use std::time::{Duration, Instant};

/// Paces a cooperative loop by sleeping off the remainder of each frame.
///
/// Call [`start_frame`](FramePacer::start_frame) at the top of the loop
/// and [`finish_frame`](FramePacer::finish_frame) at the bottom. A frame
/// that overruns its slot returns immediately; there is no catch-up, the
/// loop just runs slow.
#[derive(Debug)]
pub struct FramePacer {
    target: Duration,
    frame_start: Instant,
}

impl FramePacer {
    /// A pacer for `fps` frames per second. `fps` must be nonzero.
    pub fn new(fps: u32) -> Self {
        debug_assert!(fps > 0);
        Self { target: Duration::from_secs(1) / fps, frame_start: Instant::now() }
    }

    pub fn start_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    pub fn finish_frame(&self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.target {
            thread::sleep(self.target - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_take_at_least_the_target() {
        let mut pacer = FramePacer::new(100);
        pacer.start_frame();
        let begun = Instant::now();
        pacer.finish_frame();
        assert!(begun.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn late_frames_do_not_sleep() {
        let mut pacer = FramePacer::new(100);
        pacer.start_frame();
        thread::sleep(Duration::from_millis(15));
        let begun = Instant::now();
        pacer.finish_frame();
        assert!(begun.elapsed() < Duration::from_millis(10));
    }
}
