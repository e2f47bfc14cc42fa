// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input dispatcher: turn raw pointer events into tool actions.
//!
//! ## Usage
//!
//! 1) Keep one [`InputDispatcher`] per view, constructed with the key under
//!    which that view's poll timers are filed.
//! 2) Feed device events to [`InputDispatcher::pointer_down`],
//!    [`InputDispatcher::pointer_move`] and [`InputDispatcher::pointer_up`],
//!    together with the active tool (if any), the view's viewport, and the
//!    timer queue.
//! 3) Redraw when the returned [`Dispatch`] asks for it.
//! 4) When a poll timer filed under the view's key fires, feed
//!    [`PointerEvent::poll`] to [`InputDispatcher::pointer_move`].
//!
//! ## Semantics
//!
//! - Idle + down: start a session at the converted point, emit `Down`.
//! - Dragging + move: emit `Drag` at the latest point if the tool declares
//!   [`ToolCapabilities::DRAG`]; otherwise emit `Move`.
//! - Idle + move: emit `Move`.
//! - Dragging + up: cancel the poll timer, emit `Up`, end the session.
//! - Idle + up: nothing.
//! - Down while dragging: the previous session is closed with an `Up` at its
//!   last point before the new session starts.
//!
//! Device positions are converted with
//! [`Viewport::view_to_artwork`](understory_viewport::Viewport::view_to_artwork)
//! before any state changes, so a conversion error leaves the dispatcher as it was.

use kurbo::Point;
use smallvec::SmallVec;
use understory_timing::{TimerId, TimerQueue};
use understory_viewport::{Viewport, ViewportError};

use crate::{ActiveTool, PointerEvent, ToolAction, ToolCapabilities};

/// State of an active drag session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Last known artwork‑space point of the pointer.
    pub last_point: Point,
    /// Repeating timer synthesizing moves, if the tool asked for one.
    pub poll_timer: Option<TimerId>,
}

/// What a single pointer event produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatch {
    /// Actions delivered to the tool, in order, with their artwork points.
    pub actions: SmallVec<[(ToolAction, Point); 2]>,
    /// Whether the view should be redrawn.
    pub redraw: bool,
    /// Whether the host should suppress the platform default (touch scrolling).
    pub prevent_default: bool,
}

impl Dispatch {
    fn record(&mut self, action: ToolAction, point: Point, redraw: bool) {
        self.actions.push((action, point));
        self.redraw |= redraw;
    }

    /// Returns `true` if no action was delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Per‑view drag state machine.
///
/// `K` is the key attached to poll timers in the shared [`TimerQueue`], so
/// the owner can route fired timers back to the right dispatcher.
#[derive(Clone, Debug)]
pub struct InputDispatcher<K> {
    key: K,
    session: Option<DragSession>,
}

impl<K: Copy> InputDispatcher<K> {
    /// Creates an idle dispatcher filing its poll timers under `key`.
    #[must_use]
    pub fn new(key: K) -> Self {
        Self { key, session: None }
    }

    /// Key used for this dispatcher's poll timers.
    #[must_use]
    pub fn key(&self) -> K {
        self.key
    }

    /// Returns `true` between a down and its matching up.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Handles pointer down (or touch start).
    ///
    /// Ignored when no tool is active or the event has no position.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewportError::SingularTransform`] from coordinate conversion.
    pub fn pointer_down(
        &mut self,
        tool: Option<&mut ActiveTool>,
        viewport: &Viewport,
        timers: &mut TimerQueue<K>,
        event: &PointerEvent,
    ) -> Result<Dispatch, ViewportError> {
        let mut dispatch = Dispatch::default();
        let (Some(tool), Some(position)) = (tool, event.position) else {
            return Ok(dispatch);
        };
        let point = viewport.view_to_artwork(position)?;

        if let Some(previous) = self.session.take() {
            tracing::debug!("pointer down during an active drag; closing previous session");
            close(previous, tool, timers, previous.last_point, event, &mut dispatch);
        }

        tool.emit(ToolAction::Down, point, event);
        let redraw = tool
            .capabilities()
            .intersects(ToolCapabilities::DOWN | ToolCapabilities::DRAG);
        dispatch.record(ToolAction::Down, point, redraw);

        let poll_timer = tool
            .poll_interval()
            .map(|interval| timers.schedule_repeating(event.time_ms, interval, self.key));
        self.session = Some(DragSession {
            last_point: point,
            poll_timer,
        });
        tracing::trace!(?point, ?poll_timer, "drag session started");
        Ok(dispatch)
    }

    /// Handles pointer move (or touch move, or a poll tick).
    ///
    /// Events without a position reuse the session's last point; outside a
    /// session they produce nothing.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewportError::SingularTransform`] from coordinate conversion.
    pub fn pointer_move(
        &mut self,
        tool: Option<&mut ActiveTool>,
        viewport: &Viewport,
        event: &PointerEvent,
    ) -> Result<Dispatch, ViewportError> {
        let Some(tool) = tool else {
            return Ok(Dispatch::default());
        };
        let point = event
            .position
            .map(|position| viewport.view_to_artwork(position))
            .transpose()?;
        let mut dispatch = Dispatch {
            prevent_default: event.is_touch(),
            ..Dispatch::default()
        };

        if let (Some(session), Some(point)) = (self.session.as_mut(), point) {
            session.last_point = point;
        }
        let last_point = self.session.map(|session| session.last_point);

        match last_point {
            Some(last_point) if tool.capabilities().contains(ToolCapabilities::DRAG) => {
                let redraw = tool.emit(ToolAction::Drag, last_point, event);
                dispatch.record(ToolAction::Drag, last_point, redraw);
            }
            _ => {
                // Move-only tools still see motion while the pointer is down.
                if let Some(point) = point.or(last_point) {
                    let redraw = tool.emit(ToolAction::Move, point, event);
                    dispatch.record(ToolAction::Move, point, redraw);
                }
            }
        }
        Ok(dispatch)
    }

    /// Handles pointer up (or touch end).
    ///
    /// Does nothing outside a session. Without an active tool the session is
    /// closed silently. Events without a position end at the last point.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewportError::SingularTransform`] from coordinate conversion.
    pub fn pointer_up(
        &mut self,
        tool: Option<&mut ActiveTool>,
        viewport: &Viewport,
        timers: &mut TimerQueue<K>,
        event: &PointerEvent,
    ) -> Result<Dispatch, ViewportError> {
        let mut dispatch = Dispatch::default();
        let Some(session) = self.session else {
            return Ok(dispatch);
        };
        let Some(tool) = tool else {
            self.cancel(timers);
            return Ok(dispatch);
        };
        let point = match event.position {
            Some(position) => viewport.view_to_artwork(position)?,
            None => session.last_point,
        };
        self.session = None;
        close(session, tool, timers, point, event, &mut dispatch);
        tracing::trace!(?point, "drag session ended");
        Ok(dispatch)
    }

    /// Ends any active session without notifying the tool.
    ///
    /// Returns `true` if a session was active.
    pub fn cancel(&mut self, timers: &mut TimerQueue<K>) -> bool {
        match self.session.take() {
            Some(session) => {
                if let Some(timer) = session.poll_timer {
                    timers.cancel(timer);
                }
                true
            }
            None => false,
        }
    }
}

fn close<K: Copy>(
    session: DragSession,
    tool: &mut ActiveTool,
    timers: &mut TimerQueue<K>,
    point: Point,
    event: &PointerEvent,
    dispatch: &mut Dispatch,
) {
    if let Some(timer) = session.poll_timer {
        timers.cancel(timer);
    }
    let redraw = tool.emit(ToolAction::Up, point, event);
    dispatch.record(ToolAction::Up, point, redraw);
}
