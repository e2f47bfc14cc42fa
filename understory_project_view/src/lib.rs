// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_project_view --heading-base-level=0

//! Understory Project View: interactive views over a shared document.
//!
//! A [`Project`] owns one document and any number of [`ProjectView`]s. Each
//! view pairs a host [`Surface`] with an [`understory_viewport::Viewport`],
//! its own drag state machine, and an optional animation loop. The project
//! ties them together:
//!
//! - Pointer input is normalized by [`understory_tool_input`] and delivered to
//!   the single active [`Tool`](understory_tool_input::Tool), converted into
//!   artwork space through the view's viewport.
//! - Keyboard focus moves to the last view that received a pointer down
//!   ([`FocusRegistry`]).
//! - Frame handlers ([`FrameHandler`]) run once per host frame with timing
//!   from [`understory_timing`], and every frame ends with a redraw.
//! - Window resizes update the view, notify its resize callback, and refresh
//!   it immediately.
//!
//! The crate is headless. It never schedules anything itself: hosts poll
//! [`Project::pending_frames`] and [`Project::next_timer_deadline`] and call
//! back into the project when the time comes. Drawing goes through the
//! [`Document`] and [`Surface`] traits.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_project_view::{Document, Project, Surface, ViewConfig};
//! use understory_tool_input::{PointerEvent, Tool, ToolAction, ToolCapabilities};
//! use understory_viewport::Viewport;
//!
//! #[derive(Debug, Default)]
//! struct Canvas {
//!     clears: usize,
//! }
//!
//! impl Surface for Canvas {
//!     fn resize(&mut self, _size: Size) {}
//!     fn clear(&mut self, _rect: Rect) {
//!         self.clears += 1;
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Drawing {
//!     draws: usize,
//! }
//!
//! impl Document<Canvas> for Drawing {
//!     fn draw(&mut self, _surface: &mut Canvas, _viewport: &Viewport) {
//!         self.draws += 1;
//!     }
//! }
//!
//! struct Dots;
//!
//! impl Tool for Dots {
//!     fn capabilities(&self) -> ToolCapabilities {
//!         ToolCapabilities::DOWN
//!     }
//!     fn on_action(&mut self, _: ToolAction, _: Point, _: &PointerEvent) {}
//! }
//!
//! let mut project = Project::new(Drawing::default());
//! let view = project.create_view(Canvas::default(), ViewConfig::default());
//! project.set_tool(Some(Box::new(Dots)));
//!
//! // Pan so that artwork (0, 0) sits at device (100, 0).
//! project.view_mut(view).unwrap().viewport_mut().scroll_by(kurbo::Vec2::new(-100.0, 0.0));
//!
//! let down = PointerEvent::mouse(Point::new(150.0, 20.0), 0);
//! let dispatch = project.pointer_down(view, &down).unwrap();
//! assert_eq!(dispatch.actions[0], (ToolAction::Down, Point::new(50.0, 20.0)));
//! assert!(dispatch.redraw);
//! assert_eq!(project.document().draws, 1);
//! assert_eq!(project.focused_view(), Some(view));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod focus;
mod host;
mod project;
mod registry;
mod view;

pub use config::ViewConfig;
pub use error::ProjectError;
pub use focus::FocusRegistry;
pub use host::{Document, Surface};
pub use project::Project;
pub use registry::ViewId;
pub use view::{FrameHandler, ProjectView, ResizeHandler};
