// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Rect, Size};
use understory_timing::{FrameEvent, FrameScheduler};
use understory_tool_input::{DragSession, InputDispatcher};
use understory_viewport::{ResizeEvent, Viewport};

use crate::{Surface, ViewId};

/// Frame callback: may animate the viewport; the view redraws afterwards.
pub type FrameHandler = Box<dyn FnMut(&mut Viewport, &FrameEvent)>;

/// Resize callback, invoked with the new size and its change.
pub type ResizeHandler = Box<dyn FnMut(&ResizeEvent)>;

/// One view of a [`Project`](crate::Project): a surface looking at the document.
///
/// A view owns its [`Viewport`], its drag state, and its frame loop. Host
/// events are routed to it through the project, which also performs the
/// redraws.
pub struct ProjectView<S> {
    pub(crate) id: ViewId,
    pub(crate) surface: S,
    pub(crate) viewport: Viewport,
    pub(crate) input: InputDispatcher<ViewId>,
    pub(crate) frames: FrameScheduler<FrameHandler>,
    on_resize: Option<ResizeHandler>,
}

impl<S: Surface> ProjectView<S> {
    pub(crate) fn new(id: ViewId, mut surface: S, size: Size) -> Self {
        surface.resize(size);
        Self {
            id,
            surface,
            viewport: Viewport::new(Rect::from_origin_size((0.0, 0.0), size)),
            input: InputDispatcher::new(id),
            frames: FrameScheduler::new(),
            on_resize: None,
        }
    }

    /// Id of this view in its project.
    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// The view's surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The view's surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The view's viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The view's viewport, mutably (pan, zoom, transform).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Replaces the view bounds, resizing the surface and notifying `on_resize`.
    pub fn set_view_bounds(&mut self, bounds: Rect) -> ResizeEvent {
        let event = self.viewport.set_view_bounds(bounds);
        self.surface.resize(event.size);
        if let Some(on_resize) = self.on_resize.as_mut() {
            on_resize(&event);
        }
        tracing::debug!(view = ?self.id, size = ?event.size, "view resized");
        event
    }

    /// Resizes the view, keeping the origin of its bounds.
    pub fn set_view_size(&mut self, size: Size) -> ResizeEvent {
        let origin = self.viewport.view_bounds().origin();
        self.set_view_bounds(Rect::from_origin_size(origin, size))
    }

    /// Installs or clears the resize callback.
    pub fn set_on_resize(&mut self, on_resize: Option<ResizeHandler>) {
        self.on_resize = on_resize;
    }

    /// Returns `true` if a resize callback is installed.
    #[must_use]
    pub fn has_on_resize(&self) -> bool {
        self.on_resize.is_some()
    }

    /// Returns `true` between a pointer down and its matching up.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.input.session()
    }

    /// Returns `true` while a frame handler is installed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    /// Returns `true` if the frame loop wants another frame from the host.
    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frames.is_pending()
    }
}

impl<S: fmt::Debug> fmt::Debug for ProjectView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectView")
            .field("id", &self.id)
            .field("surface", &self.surface)
            .field("viewport", &self.viewport)
            .field("input", &self.input)
            .field("animating", &self.frames.is_running())
            .field("frame_requested", &self.frames.is_pending())
            .field("on_resize", &self.on_resize.is_some())
            .finish()
    }
}
