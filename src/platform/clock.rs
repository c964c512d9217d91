//! Fixed-rate tick pacing

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Converts variable frame deltas into whole fixed ticks
///
/// Used by the browser loop where frames arrive from `requestAnimationFrame`.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    tick_dt: f64,
    accumulator: f64,
    last_time: Option<f64>,
}

impl TickAccumulator {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            tick_dt: 1.0 / f64::from(tick_rate_hz.max(1)),
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn tick_dt(&self) -> f64 {
        self.tick_dt
    }

    /// Feed a frame timestamp (milliseconds) and get the number of ticks to run
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (time_ms - last) / 1000.0,
            // First frame runs exactly one tick
            None => self.tick_dt,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }

    /// Add `dt` seconds and drain whole ticks (capped at `MAX_SUBSTEPS`)
    pub fn advance(&mut self, dt: f64) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.tick_dt && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.tick_dt;
            ticks += 1;
        }
        // Drop backlog beyond the cap instead of carrying it forward
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        ticks
    }
}

/// Sleeps the native loop until the next tick deadline
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FramePacer {
    period: std::time::Duration,
    next: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FramePacer {
    pub fn new(tick_rate_hz: u32) -> Self {
        let period = std::time::Duration::from_secs_f64(1.0 / f64::from(tick_rate_hz.max(1)));
        Self {
            period,
            next: std::time::Instant::now() + period,
        }
    }

    pub fn period(&self) -> std::time::Duration {
        self.period
    }

    /// Block until the next tick. Resyncs instead of bursting after a stall.
    pub fn wait(&mut self) {
        let now = std::time::Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut acc = TickAccumulator::new(60);
        assert_eq!(acc.advance_to(1000.0), 1);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut acc = TickAccumulator::new(60);
        assert_eq!(acc.advance(0.01), 0);
        assert_eq!(acc.advance(0.01), 1);
    }

    #[test]
    fn test_caps_substeps() {
        let mut acc = TickAccumulator::new(60);
        // 0.1s would be 6 ticks; capped
        assert_eq!(acc.advance(5.0), MAX_SUBSTEPS);
        assert!(acc.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut acc = TickAccumulator::new(60);
        assert_eq!(acc.advance(-1.0), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_pacer_period() {
        let pacer = FramePacer::new(50);
        assert_eq!(pacer.period(), std::time::Duration::from_millis(20));
    }
}
