// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic frame loop and timer queue primitives.
//!
//! This crate never reads a clock and never registers anything with a
//! platform. Hosts own the real scheduling primitives (an animation frame
//! callback, a timer, an event loop wakeup) and feed timestamps in; this
//! crate does the bookkeeping.
//!
//! - [`FrameScheduler`]: a self‑rescheduling animation loop around an
//!   optional handler. Each frame produces a [`FrameEvent`] with the time
//!   since the previous frame, the accumulated time, and a frame counter.
//!   Clearing the handler stops the loop; a continuation that arrives
//!   afterwards finds no handler and does nothing.
//! - [`TimerQueue`]: one‑shot and repeating timers keyed by caller data,
//!   drained with [`TimerQueue::pop_due`].
//!
//! All timestamps are caller‑supplied milliseconds on a monotonic clock.
//!
//! ## Frame loop
//!
//! ```rust
//! use understory_timing::{FrameMode, FrameScheduler};
//!
//! let mut frames: FrameScheduler<&str> = FrameScheduler::new();
//!
//! // Installing a handler starts the loop; the owner runs the first frame now.
//! assert!(frames.set_handler(Some("spin")));
//! let (_, first) = frames.begin_frame(1_000, FrameMode::Scheduled).unwrap();
//! assert_eq!((first.delta, first.count), (0.0, 0));
//!
//! // The loop asked for a continuation; the host delivers it before the next paint.
//! assert!(frames.is_pending());
//! let (_, second) = frames.begin_frame(1_016, FrameMode::Scheduled).unwrap();
//! assert_eq!(second.count, 1);
//! assert!((second.delta - 0.016).abs() < 1e-12);
//!
//! // Clearing the handler stops the loop.
//! frames.set_handler(None);
//! assert!(frames.begin_frame(1_032, FrameMode::Scheduled).is_none());
//! ```
//!
//! ## Timers
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule_repeating(0, 10, "poll");
//! assert_eq!(timers.next_deadline(), Some(10));
//!
//! let fired = timers.pop_due(10).unwrap();
//! assert_eq!((fired.id, fired.key), (id, "poll"));
//! assert_eq!(timers.next_deadline(), Some(20));
//!
//! timers.cancel(id);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod clock;
mod frame;
mod timer;

pub use clock::{FrameClock, FrameEvent};
pub use frame::{FrameMode, FrameScheduler};
pub use timer::{FiredTimer, TimerId, TimerQueue};
