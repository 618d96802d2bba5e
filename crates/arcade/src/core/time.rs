use crate::api::game::GameConfig;

/// Slack when dividing the accumulator, so a frame of exactly `n * dt`
/// yields `n` steps despite rounding.
const STEP_SLACK: f64 = 1e-9;

/// Turns variable frame times into a whole number of fixed simulation steps.
///
/// Time beyond `max_steps` steps in a single frame is dropped rather than
/// carried, so a stalled host does not make the next frames run long. The
/// dropped total is kept for diagnostics.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f64,
    max_steps: u32,
    accumulator: f64,
    dropped: f64,
}

impl FixedTimestep {
    pub fn new(dt: f64, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            dropped: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.fixed_dt, config.max_steps_per_frame)
    }

    /// Add one frame's elapsed seconds and return how many steps to run.
    /// Negative frame times count as zero; non-finite ones are ignored.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() {
            log::warn!("ignoring frame time {}", frame_dt);
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);

        let cap = self.dt * f64::from(self.max_steps);
        if self.accumulator > cap + self.dt {
            let excess = self.accumulator - cap;
            self.dropped += excess;
            self.accumulator = cap;
            log::debug!("frame over budget, dropped {:.4}s", excess);
        }

        let steps = ((self.accumulator / self.dt + STEP_SLACK).floor() as u32).min(self.max_steps);
        self.accumulator = (self.accumulator - f64::from(steps) * self.dt).max(0.0);
        steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Seconds discarded by the per-frame cap since construction.
    pub fn dropped(&self) -> f64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn whole_frames_give_whole_steps() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(DT), 1);
        assert_eq!(ts.accumulate(3.0 * DT), 3);
        let total: u32 = (0..3).map(|_| ts.accumulate(1.0 / 60.0)).sum();
        assert_eq!(total, 3);
        assert_eq!(ts.dropped(), 0.0);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn long_frame_is_capped_and_the_rest_dropped() {
        let mut ts = FixedTimestep::new(DT, 4);
        assert_eq!(ts.accumulate(1.0), 4);
        assert!((ts.dropped() - (1.0 - 4.0 * DT)).abs() < 1e-9, "{}", ts.dropped());
        // Nothing left over for the next frame.
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn bad_frame_times_are_ignored() {
        let mut ts = FixedTimestep::new(DT, 10);
        assert_eq!(ts.accumulate(f64::NAN), 0);
        assert_eq!(ts.accumulate(f64::INFINITY), 0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(DT), 1);
        assert_eq!(ts.dropped(), 0.0);
    }

    #[test]
    fn built_from_config() {
        let config = GameConfig {
            fixed_dt: 0.01,
            max_steps_per_frame: 3,
            ..GameConfig::default()
        };
        let ts = FixedTimestep::from_config(&config);
        assert_eq!(ts.dt(), 0.01);
        assert_eq!(ts.max_steps(), 3);
    }
}
