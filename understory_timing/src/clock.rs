// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Timing information handed to a frame handler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Seconds since the previous frame, `0.0` for the first frame.
    pub delta: f64,
    /// Seconds accumulated since the loop was started.
    pub time: f64,
    /// Zero‑based index of this frame.
    pub count: u64,
}

/// Elapsed‑time and frame‑count accumulator for one run of a frame loop.
///
/// A fresh clock is installed every time a loop is (re)started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    previous_ms: Option<u64>,
    elapsed: f64,
    count: u64,
}

impl FrameClock {
    /// Creates a clock that has not ticked yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous_ms: None,
            elapsed: 0.0,
            count: 0,
        }
    }

    /// Advances the clock to `now_ms` and returns the event for this frame.
    ///
    /// A timestamp earlier than the previous one counts as no time passing.
    pub fn tick(&mut self, now_ms: u64) -> FrameEvent {
        let delta_ms = self
            .previous_ms
            .map_or(0, |previous| now_ms.saturating_sub(previous));
        let delta = millis_to_seconds(delta_ms);
        self.elapsed += delta;
        let count = self.count;
        self.count += 1;
        self.previous_ms = Some(now_ms);
        FrameEvent {
            delta,
            time: self.elapsed,
            count,
        }
    }

    /// Seconds accumulated so far.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames ticked so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}

fn millis_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::FrameClock;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let ev = clock.tick(5_000);
        assert_eq!(ev.delta, 0.0);
        assert_eq!(ev.time, 0.0);
        assert_eq!(ev.count, 0);
        assert_eq!(clock.count(), 1);
    }

    #[test]
    fn ticks_accumulate_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick(0);
        let a = clock.tick(250);
        let b = clock.tick(1_000);
        assert_eq!(a.delta, 0.25);
        assert_eq!(b.delta, 0.75);
        assert_eq!(b.time, 1.0);
        assert_eq!(b.count, 2);
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn backwards_timestamp_counts_as_no_time() {
        let mut clock = FrameClock::new();
        clock.tick(100);
        let ev = clock.tick(40);
        assert_eq!(ev.delta, 0.0);
        assert_eq!(ev.count, 1);
    }
}
