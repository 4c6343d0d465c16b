/// Frame clock driven by the host's animation-frame timestamps.
///
/// Motion is scaled by the returned delta directly; there is no fixed-step
/// accumulation, so a slow frame yields one larger step rather than several.
pub struct FrameClock {
    /// Timestamp of the previous tick, in milliseconds.
    last_ms: Option<f64>,
    /// Seconds elapsed between the two most recent ticks.
    delta: f32,
    /// Seconds elapsed since the first tick.
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            delta: 0.0,
            elapsed: 0.0,
        }
    }

    /// Record a new frame timestamp (milliseconds). Returns the delta in seconds.
    /// The first tick yields zero; a timestamp going backwards also yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        self.delta = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.elapsed += self.delta as f64;
        self.delta
    }

    /// Seconds since the previous frame.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Seconds since the first frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.5), 0.0);
    }

    #[test]
    fn delta_in_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        let dt = clock.tick(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
        assert!((clock.elapsed() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_clamps_to_zero() {
        let mut clock = FrameClock::new();
        clock.tick(2000.0);
        assert_eq!(clock.tick(1500.0), 0.0);
        let dt = clock.tick(1550.0);
        assert!((dt - 0.05).abs() < 1e-6);
    }
}
