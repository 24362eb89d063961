use std::time::Instant;

/// Animation time for one frame, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the clock started.
    pub seconds: f32,
    /// Time since the previous frame.
    pub delta: f32,
}

/// Accumulates frame time, either from the wall clock or from fixed steps.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    seconds: f32,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by a fixed `delta`. Negative steps are treated as zero.
    pub fn advance(&mut self, delta: f32) -> FrameTime {
        let delta = delta.max(0.0);
        self.seconds += delta;
        FrameTime {
            seconds: self.seconds,
            delta,
        }
    }

    /// Advance by the wall time elapsed since the previous call. The first
    /// call reports a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.advance(delta)
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_steps_accumulate() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        let time = clock.advance(0.25);
        assert_eq!(time.seconds, 0.75);
        assert_eq!(time.delta, 0.25);
    }

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().delta, 0.0);
        let second = clock.tick();
        assert!(second.delta >= 0.0);
        assert_eq!(second.seconds, clock.seconds());
    }

    #[test]
    fn negative_steps_do_not_rewind() {
        let mut clock = FrameClock::new();
        clock.advance(1.0);
        assert_eq!(clock.advance(-3.0).seconds, 1.0);
    }
}
