// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self‑rescheduling frame loop.
//!
//! ## Usage
//!
//! 1) Install a handler with [`FrameScheduler::set_handler`]. When it returns
//!    `true`, run the first frame straight away with [`FrameMode::Scheduled`].
//! 2) Whenever [`FrameScheduler::is_pending`] is `true`, ask the host for an
//!    animation frame and call [`FrameScheduler::begin_frame`] from it.
//! 3) Invoke the returned handler with the returned [`FrameEvent`], then redraw.
//! 4) Install `None` to stop. Stray continuations are ignored.

use crate::{FrameClock, FrameEvent};

/// How a frame invocation interacts with continuation scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// A regular loop iteration: the next frame is requested.
    #[default]
    Scheduled,
    /// A one‑off refresh (for example after a resize). No continuation is
    /// requested and an outstanding request is left as is.
    OutOfBand,
}

/// A frame loop driving an optional handler `H`.
///
/// The scheduler is "running" while a handler is installed. It keeps a
/// [`FrameClock`] per run and a flag recording whether a continuation has
/// been requested from the host and not yet delivered.
#[derive(Clone, Debug)]
pub struct FrameScheduler<H> {
    handler: Option<H>,
    clock: FrameClock,
    pending: bool,
}

impl<H> FrameScheduler<H> {
    /// Creates a stopped scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handler: None,
            clock: FrameClock::new(),
            pending: false,
        }
    }

    /// Installs or clears the frame handler.
    ///
    /// Installing a handler (re)starts the loop with a fresh clock and
    /// returns `true`: the caller must run the first frame immediately so
    /// that it reports a delta of zero. Clearing the handler stops the loop,
    /// drops any outstanding request, and returns `false`.
    pub fn set_handler(&mut self, handler: Option<H>) -> bool {
        self.clock = FrameClock::new();
        match handler {
            Some(handler) => {
                tracing::debug!("frame loop started");
                self.handler = Some(handler);
                true
            }
            None => {
                if self.handler.take().is_some() {
                    tracing::debug!("frame loop stopped");
                }
                self.pending = false;
                false
            }
        }
    }

    /// Returns the installed handler, if any.
    #[must_use]
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// Returns `true` while a handler is installed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handler.is_some()
    }

    /// Returns `true` if the loop wants the host to deliver another frame.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the clock of the current run.
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Starts one frame at `now_ms`.
    ///
    /// Returns `None` without touching the clock when no handler is
    /// installed. Otherwise ticks the clock, requests the next frame unless
    /// `mode` is [`FrameMode::OutOfBand`], and returns the handler together
    /// with the event it should receive. The caller redraws afterwards.
    pub fn begin_frame(&mut self, now_ms: u64, mode: FrameMode) -> Option<(&mut H, FrameEvent)> {
        if mode == FrameMode::Scheduled {
            // This call consumes the outstanding request, if any.
            self.pending = false;
        }
        let handler = self.handler.as_mut()?;
        if mode == FrameMode::Scheduled {
            self.pending = true;
        }
        let event = self.clock.tick(now_ms);
        tracing::trace!(
            delta = event.delta,
            time = event.time,
            count = event.count,
            "frame"
        );
        Some((handler, event))
    }
}

impl<H> Default for FrameScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameMode, FrameScheduler};

    #[test]
    fn new_scheduler_is_stopped() {
        let mut frames: FrameScheduler<u8> = FrameScheduler::new();
        assert!(!frames.is_running());
        assert!(!frames.is_pending());
        assert!(frames.begin_frame(0, FrameMode::Scheduled).is_none());
        assert!(!frames.is_pending());
    }

    #[test]
    fn first_frame_is_immediate_with_zero_delta() {
        let mut frames = FrameScheduler::new();
        assert!(frames.set_handler(Some(7_u8)));

        let (handler, ev) = frames.begin_frame(500, FrameMode::Scheduled).unwrap();
        assert_eq!(*handler, 7);
        assert_eq!(ev.delta, 0.0);
        assert_eq!(ev.count, 0);
        assert!(frames.is_pending());

        let (_, ev) = frames.begin_frame(750, FrameMode::Scheduled).unwrap();
        assert_eq!(ev.delta, 0.25);
        assert_eq!(ev.time, 0.25);
        assert_eq!(ev.count, 1);
    }

    #[test]
    fn clearing_handler_cancels_pending_continuation() {
        let mut frames = FrameScheduler::new();
        frames.set_handler(Some(()));
        frames.begin_frame(0, FrameMode::Scheduled);
        assert!(frames.is_pending());

        assert!(!frames.set_handler(None));
        assert!(!frames.is_pending());
        // A continuation that was already in flight does nothing.
        assert!(frames.begin_frame(16, FrameMode::Scheduled).is_none());
        assert!(!frames.is_pending());
        assert_eq!(frames.clock().count(), 0);
    }

    #[test]
    fn out_of_band_frame_does_not_request_continuation() {
        let mut frames = FrameScheduler::new();
        frames.set_handler(Some(()));
        let (_, ev) = frames.begin_frame(0, FrameMode::OutOfBand).unwrap();
        assert_eq!(ev.count, 0);
        assert!(!frames.is_pending());

        // An outstanding request survives an out-of-band refresh.
        frames.begin_frame(10, FrameMode::Scheduled);
        frames.begin_frame(20, FrameMode::OutOfBand);
        assert!(frames.is_pending());
        assert_eq!(frames.clock().count(), 3);
    }

    #[test]
    fn reinstalling_handler_resets_clock() {
        let mut frames = FrameScheduler::new();
        frames.set_handler(Some(1_u8));
        frames.begin_frame(0, FrameMode::Scheduled);
        frames.begin_frame(100, FrameMode::Scheduled);

        frames.set_handler(Some(2_u8));
        let (handler, ev) = frames.begin_frame(5_000, FrameMode::Scheduled).unwrap();
        assert_eq!(*handler, 2);
        assert_eq!(ev.delta, 0.0);
        assert_eq!(ev.time, 0.0);
        assert_eq!(ev.count, 0);
    }
}
