//! Frame timing

/// One frames-per-second measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSample {
    /// Reciprocal of the most recent frame delta
    pub fps: f64,
    /// The most recent frame delta in seconds
    pub frame_time: f64,
}

/// Frame timer driven by an external monotonic clock
///
/// The caller feeds the current clock reading once per frame. Frame deltas
/// accumulate until they reach the report interval, at which point one
/// [`FpsSample`] is produced and the accumulator is reset to zero. Time past
/// the interval is discarded, so the next sample needs a full interval.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_frame: f64,
    delta_time: f64,
    elapsed: f64,
    total_time: f64,
    frame_count: u64,
    samples_emitted: u64,
    report_interval: f64,
}

impl FrameTimer {
    /// Default seconds between FPS samples
    pub const DEFAULT_REPORT_INTERVAL: f64 = 1.0;

    /// Create a timer whose first frame starts at `start`
    pub fn new(start: f64) -> Self {
        Self::with_interval(start, Self::DEFAULT_REPORT_INTERVAL)
    }

    /// Create a timer with a custom report interval
    ///
    /// Non-positive or non-finite intervals fall back to the default.
    pub fn with_interval(start: f64, report_interval: f64) -> Self {
        let report_interval = if report_interval.is_finite() && report_interval > 0.0 {
            report_interval
        } else {
            log::warn!(
                "Invalid FPS report interval {}, using {}",
                report_interval,
                Self::DEFAULT_REPORT_INTERVAL
            );
            Self::DEFAULT_REPORT_INTERVAL
        };

        Self {
            last_frame: start,
            delta_time: 0.0,
            elapsed: 0.0,
            total_time: 0.0,
            frame_count: 0,
            samples_emitted: 0,
            report_interval,
        }
    }

    /// Advance the timer to `now` (should be called once per frame)
    ///
    /// A clock reading earlier than the previous one counts as a zero-length
    /// frame.
    pub fn tick(&mut self, now: f64) -> Option<FpsSample> {
        self.delta_time = (now - self.last_frame).max(0.0);
        self.last_frame = now;
        self.elapsed += self.delta_time;
        self.total_time += self.delta_time;
        self.frame_count += 1;

        if self.elapsed < self.report_interval {
            return None;
        }

        self.elapsed = 0.0;
        self.samples_emitted += 1;
        Some(FpsSample {
            fps: self.current_fps(),
            frame_time: self.delta_time,
        })
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Time accumulated toward the next FPS sample
    pub fn accumulated(&self) -> f64 {
        self.elapsed
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of FPS samples produced so far
    pub fn samples_emitted(&self) -> u64 {
        self.samples_emitted
    }

    /// Seconds between FPS samples
    pub fn report_interval(&self) -> f64 {
        self.report_interval
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f64 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_delta_and_accumulation() {
        let mut timer = FrameTimer::new(0.0);
        assert!(timer.tick(0.25).is_none());
        assert!(timer.tick(0.5).is_none());

        assert_relative_eq!(timer.delta_time(), 0.25, epsilon = EPSILON);
        assert_relative_eq!(timer.accumulated(), 0.5, epsilon = EPSILON);
        assert_eq!(timer.frame_count(), 2);
    }

    #[test]
    fn test_sample_emitted_once_per_cycle() {
        let mut timer = FrameTimer::new(0.0);
        let mut sampled_frames = Vec::new();

        // 0.3s frames: 1.2s accumulated at frame 4, reset, 1.2s again at frame 8
        for frame in 1..=8 {
            if let Some(sample) = timer.tick(f64::from(frame) * 0.3) {
                assert_relative_eq!(sample.fps, 1.0 / 0.3, epsilon = 1e-6);
                assert_relative_eq!(sample.frame_time, 0.3, epsilon = 1e-6);
                sampled_frames.push(frame);
            }
        }

        assert_eq!(sampled_frames, vec![4, 8]);
        assert_eq!(timer.samples_emitted(), 2);
    }

    #[test]
    fn test_overshoot_is_not_carried_into_next_cycle() {
        let mut timer = FrameTimer::new(0.0);
        let mut sampled_frames = Vec::new();

        for frame in 1..=7 {
            if timer.tick(f64::from(frame) * 0.3).is_some() {
                sampled_frames.push(frame);
            }
        }

        // 0.2s past the interval at frame 4 is dropped, so frame 7 sits at 0.9s
        assert_eq!(sampled_frames, vec![4]);
        assert_relative_eq!(timer.accumulated(), 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_accumulator_reset_after_emission() {
        let mut timer = FrameTimer::new(0.0);
        timer.tick(0.75);
        let sample = timer.tick(1.5);

        assert!(sample.is_some());
        assert_relative_eq!(timer.accumulated(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_exact_interval_resets_to_zero() {
        let mut timer = FrameTimer::new(0.0);
        assert!(timer.tick(0.5).is_none());
        assert!(timer.tick(1.0).is_some());
        assert_relative_eq!(timer.accumulated(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_long_frame_emits_single_sample() {
        let mut timer = FrameTimer::new(0.0);
        let sample = timer.tick(3.5).expect("sample after a 3.5s frame");

        assert_eq!(timer.samples_emitted(), 1);
        assert_relative_eq!(sample.fps, 1.0 / 3.5, epsilon = EPSILON);
        assert_relative_eq!(timer.accumulated(), 0.0, epsilon = EPSILON);
        assert!(timer.tick(4.0).is_none());
    }

    #[test]
    fn test_backwards_clock_is_zero_delta() {
        let mut timer = FrameTimer::new(2.0);
        assert!(timer.tick(1.0).is_none());
        assert_eq!(timer.delta_time(), 0.0);
        assert_eq!(timer.current_fps(), 0.0);
    }

    #[test]
    fn test_invalid_interval_falls_back() {
        let timer = FrameTimer::with_interval(0.0, 0.0);
        assert_relative_eq!(timer.report_interval(), FrameTimer::DEFAULT_REPORT_INTERVAL);

        let timer = FrameTimer::with_interval(0.0, f64::NAN);
        assert_relative_eq!(timer.report_interval(), FrameTimer::DEFAULT_REPORT_INTERVAL);
    }

    #[test]
    fn test_custom_interval() {
        let mut timer = FrameTimer::with_interval(0.0, 0.5);
        assert!(timer.tick(0.5).is_some());
        assert!(timer.tick(0.75).is_none());
        assert!(timer.tick(1.0).is_some());
        assert_eq!(timer.samples_emitted(), 2);
    }
}
