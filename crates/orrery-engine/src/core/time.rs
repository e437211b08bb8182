/// Per-frame clock.
///
/// One `advance` per display refresh. Elapsed time keeps running regardless of
/// what the game does with it, mirroring a page-lifetime `performance.now()`.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Seconds since the clock started.
    elapsed: f64,
    /// Number of frames advanced so far.
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `frame_dt` seconds. Negative deltas count as zero.
    /// Long gaps (a backgrounded tab) are taken whole: positions derived from
    /// elapsed time jump rather than drift.
    pub fn advance(&mut self, frame_dt: f32) {
        self.elapsed += frame_dt.max(0.0) as f64;
        self.frames += 1;
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_elapsed() {
        let mut clock = FrameClock::new();
        clock.advance(0.1);
        clock.advance(0.1);
        assert_eq!(clock.frames(), 2);
        assert!((clock.elapsed_ms() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn long_frames_count_whole_and_negative_ones_not_at_all() {
        let mut clock = FrameClock::new();
        clock.advance(5.0);
        clock.advance(-1.0);
        assert_eq!(clock.frames(), 2);
        assert!((clock.elapsed_ms() - 5000.0).abs() < 1e-6);
    }
}
