// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Where a pointer event came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    /// Mouse or pen.
    #[default]
    Mouse,
    /// Touch screen. Touch start/move/end map onto down/move/up.
    Touch,
    /// Synthesized by a poll timer; carries no device position.
    Poll,
}

/// A raw pointer event in view/device space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Source of the event.
    pub kind: PointerKind,
    /// Device‑space position, or `None` for synthesized events.
    pub position: Option<Point>,
    /// Host timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// A mouse event at `position`.
    #[must_use]
    pub const fn mouse(position: Point, time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            position: Some(position),
            time_ms,
        }
    }

    /// A touch event at `position`.
    #[must_use]
    pub const fn touch(position: Point, time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Touch,
            position: Some(position),
            time_ms,
        }
    }

    /// A synthetic move produced by a poll timer.
    #[must_use]
    pub const fn poll(time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Poll,
            position: None,
            time_ms,
        }
    }

    /// Returns `true` for touch events.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }
}
