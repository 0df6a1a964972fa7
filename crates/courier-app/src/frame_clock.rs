//! Frame timing for the game loop: counts frames and hands out fixed steps.

/// Accumulates frame time and releases it in fixed-size steps.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_dt: f64,
    accumulator: f64,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            frame_count: 0,
        }
    }

    /// Record one frame of `frame_dt` seconds.
    pub fn update(&mut self, frame_dt: f64) {
        self.frame_count += 1;
        self.accumulator += frame_dt;
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.fixed_dt > 0.0 && self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            true
        } else {
            false
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FrameClock) -> u32 {
        let mut steps = 0;
        while clock.should_fixed_update() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_fixed_steps_follow_accumulated_time() {
        let mut clock = FrameClock::new(0.25);
        let mut steps = Vec::new();
        for _ in 0..8 {
            clock.update(0.125);
            steps.push(drain(&mut clock));
        }
        assert_eq!(steps, vec![0, 1, 0, 1, 0, 1, 0, 1]);
        assert_eq!(clock.frame_count(), 8);
    }

    #[test]
    fn test_long_frame_yields_several_steps() {
        let mut clock = FrameClock::new(0.25);
        clock.update(1.0);
        assert_eq!(drain(&mut clock), 4);
    }

    #[test]
    fn test_zero_step_never_fires() {
        let mut clock = FrameClock::new(0.0);
        clock.update(1.0);
        assert!(!clock.should_fixed_update());
    }
}
