// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tool_input --heading-base-level=0

//! Understory Tool Input: normalize pointer input into a drag protocol for tools.
//!
//! This crate turns raw mouse and touch events into the four actions a
//! pluggable [`Tool`] understands: [`ToolAction::Down`], [`ToolAction::Drag`],
//! [`ToolAction::Move`] and [`ToolAction::Up`]. Device positions are converted
//! into artwork space through an [`understory_viewport::Viewport`] before they
//! reach the tool.
//!
//! - [`Tool`]: the contract a tool implements.
//! - [`ToolCapabilities`]: which phases a tool has handlers for, read once on
//!   activation by [`ActiveTool::new`]. Capabilities pick the dispatch branch
//!   for moves and decide whether a phase asks for a redraw.
//! - [`InputDispatcher`]: the per‑view state machine (idle / dragging), with
//!   optional poll timers that synthesize moves at a fixed interval while the
//!   pointer is down.
//! - [`Dispatch`]: what one event produced (actions, redraw, prevent‑default).
//!
//! It does not route events between views, hit test, or recognize gestures
//! beyond a single pointer's down/move/up sequence.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_timing::TimerQueue;
//! use understory_tool_input::{
//!     ActiveTool, InputDispatcher, PointerEvent, Tool, ToolAction, ToolCapabilities,
//! };
//! use understory_viewport::Viewport;
//!
//! struct Pencil(Vec<Point>);
//!
//! impl Tool for Pencil {
//!     fn capabilities(&self) -> ToolCapabilities {
//!         ToolCapabilities::DOWN | ToolCapabilities::DRAG
//!     }
//!
//!     fn on_action(&mut self, action: ToolAction, point: Point, _: &PointerEvent) {
//!         if matches!(action, ToolAction::Down | ToolAction::Drag) {
//!             self.0.push(point);
//!         }
//!     }
//! }
//!
//! let viewport = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut timers = TimerQueue::new();
//! let mut tool = ActiveTool::new(Box::new(Pencil(Vec::new())));
//! let mut input = InputDispatcher::new(());
//!
//! let down = PointerEvent::mouse(Point::new(10.0, 10.0), 0);
//! let d = input.pointer_down(Some(&mut tool), &viewport, &mut timers, &down).unwrap();
//! assert!(d.redraw);
//!
//! let drag = PointerEvent::mouse(Point::new(20.0, 15.0), 16);
//! let d = input.pointer_move(Some(&mut tool), &viewport, &drag).unwrap();
//! assert_eq!(d.actions[0].0, ToolAction::Drag);
//!
//! let up = PointerEvent::mouse(Point::new(20.0, 15.0), 32);
//! let d = input.pointer_up(Some(&mut tool), &viewport, &mut timers, &up).unwrap();
//! assert_eq!(d.actions[0].0, ToolAction::Up);
//! assert!(!input.is_dragging());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod event;
mod tool;

pub use dispatcher::{Dispatch, DragSession, InputDispatcher};
pub use event::{PointerEvent, PointerKind};
pub use tool::{ActiveTool, Tool, ToolAction, ToolCapabilities};
