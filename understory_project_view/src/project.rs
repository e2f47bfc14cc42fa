// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use kurbo::Size;
use understory_timing::{FrameMode, TimerQueue};
use understory_tool_input::{ActiveTool, Dispatch, PointerEvent, Tool};

use crate::registry::ViewRegistry;
use crate::{
    Document, FocusRegistry, FrameHandler, ProjectError, ProjectView, Surface, ViewConfig, ViewId,
};

/// A document together with the views looking at it.
///
/// The project is the single owner of all runtime state: the document, the
/// active tool, every [`ProjectView`], the [`FocusRegistry`], and the queue
/// of poll timers. Hosts drive it with plain method calls:
///
/// - Input: [`Project::pointer_down`], [`Project::pointer_move`], [`Project::pointer_up`].
/// - Animation: [`Project::pending_frames`] / [`Project::frame`].
/// - Timers: [`Project::next_timer_deadline`] / [`Project::advance_timers`].
/// - Window changes: [`Project::window_resized`].
///
/// Every call addressed to a removed or unknown [`ViewId`] does nothing.
pub struct Project<D, S> {
    document: D,
    views: ViewRegistry<ProjectView<S>>,
    active_view: Option<ViewId>,
    focus: FocusRegistry,
    tool: Option<ActiveTool>,
    timers: TimerQueue<ViewId>,
}

impl<D: Document<S>, S: Surface> Project<D, S> {
    /// Creates a project with no views and no active tool.
    #[must_use]
    pub fn new(document: D) -> Self {
        Self {
            document,
            views: ViewRegistry::new(),
            active_view: None,
            focus: FocusRegistry::new(),
            tool: None,
            timers: TimerQueue::new(),
        }
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The document, mutably.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Activates `tool` (or none), returning the previously active tool.
    ///
    /// Drag sessions in progress are ended without notifying either tool.
    pub fn set_tool(&mut self, tool: Option<Box<dyn Tool>>) -> Option<Box<dyn Tool>> {
        for view in self.views.values_mut() {
            view.input.cancel(&mut self.timers);
        }
        mem::replace(&mut self.tool, tool.map(ActiveTool::new)).map(ActiveTool::into_inner)
    }

    /// The active tool, if any.
    #[must_use]
    pub fn tool(&self) -> Option<&ActiveTool> {
        self.tool.as_ref()
    }

    /// Creates a view drawing into `surface` and registers it with the project.
    ///
    /// The first view focuses itself when no view has focus yet.
    pub fn create_view(&mut self, surface: S, config: ViewConfig) -> ViewId {
        let size = config.resolved_size();
        let id = self.views.insert_with(|id| ProjectView::new(id, surface, size));
        self.focus.focus_if_unset(id);
        tracing::debug!(view = ?id, ?size, "view created");
        id
    }

    /// Removes a view.
    ///
    /// Cancels its poll timers, stops its frame loop, and clears focus and
    /// active‑view links pointing at it. Returns `true` if the view existed.
    pub fn remove_view(&mut self, id: ViewId) -> bool {
        let Some(mut view) = self.views.remove(id) else {
            return false;
        };
        view.input.cancel(&mut self.timers);
        self.timers.cancel_where(|key| *key == id);
        view.frames.set_handler(None);
        self.focus.clear_if(id);
        if self.active_view == Some(id) {
            self.active_view = None;
        }
        tracing::debug!(view = ?id, "view removed");
        true
    }

    /// Returns the view with `id`, if it is still registered.
    #[must_use]
    pub fn view(&self, id: ViewId) -> Option<&ProjectView<S>> {
        self.views.get(id)
    }

    /// Returns the view with `id` mutably, if it is still registered.
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut ProjectView<S>> {
        self.views.get_mut(id)
    }

    /// Iterates over registered views in index order.
    pub fn views(&self) -> impl Iterator<Item = (ViewId, &ProjectView<S>)> + '_ {
        self.views.iter()
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if the project has no views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.len() == 0
    }

    /// Makes `id` the project's active view. Returns `false` for unknown ids.
    pub fn activate(&mut self, id: ViewId) -> bool {
        if self.views.get(id).is_none() {
            return false;
        }
        self.active_view = Some(id);
        true
    }

    /// The project's active view, if any.
    #[must_use]
    pub fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    /// The keyboard focus registry.
    #[must_use]
    pub fn focus(&self) -> &FocusRegistry {
        &self.focus
    }

    /// The view receiving keyboard input, if any.
    #[must_use]
    pub fn focused_view(&self) -> Option<ViewId> {
        self.focus.focused()
    }

    /// Redraws a view: clears its bounds and lets the document paint.
    ///
    /// Returns `false` for unknown ids.
    pub fn draw(&mut self, id: ViewId) -> bool {
        let Some(view) = self.views.get_mut(id) else {
            return false;
        };
        draw_view(&mut self.document, view);
        true
    }

    /// Installs or clears a view's frame handler.
    ///
    /// Installing a handler restarts the view's frame loop and runs the first
    /// frame right away at `now_ms` (delta `0`, count `0`), followed by a
    /// redraw. Clearing it stops the loop. Returns `false` for unknown ids.
    pub fn set_on_frame(
        &mut self,
        id: ViewId,
        handler: Option<FrameHandler>,
        now_ms: u64,
    ) -> bool {
        let Some(view) = self.views.get_mut(id) else {
            return false;
        };
        if view.frames.set_handler(handler) {
            self.run_frame(id, now_ms, FrameMode::Scheduled);
        }
        true
    }

    /// Returns `true` if the view's frame loop asked the host for a frame.
    #[must_use]
    pub fn frame_requested(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(ProjectView::frame_requested)
    }

    /// Views whose frame loop asked the host for a frame.
    pub fn pending_frames(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views
            .iter()
            .filter(|(_, view)| view.frame_requested())
            .map(|(id, _)| id)
    }

    /// Delivers a requested animation frame to a view.
    ///
    /// Runs the frame handler and redraws. Returns `false` (and does
    /// nothing) if the view is gone or its loop was stopped meanwhile.
    pub fn frame(&mut self, id: ViewId, now_ms: u64) -> bool {
        self.run_frame(id, now_ms, FrameMode::Scheduled)
    }

    fn run_frame(&mut self, id: ViewId, now_ms: u64, mode: FrameMode) -> bool {
        let Some(view) = self.views.get_mut(id) else {
            return false;
        };
        let Some((handler, event)) = view.frames.begin_frame(now_ms, mode) else {
            return false;
        };
        handler(&mut view.viewport, &event);
        draw_view(&mut self.document, view);
        true
    }

    /// Handles a host window resize for a view.
    ///
    /// Resizes the view (notifying its resize callback), then refreshes it
    /// immediately: through one out‑of‑band frame if a frame handler is
    /// installed, otherwise with a plain redraw. Returns `false` for unknown ids.
    pub fn window_resized(&mut self, id: ViewId, size: Size, now_ms: u64) -> bool {
        let Some(view) = self.views.get_mut(id) else {
            return false;
        };
        view.set_view_size(size);
        if view.is_animating() {
            self.run_frame(id, now_ms, FrameMode::OutOfBand);
        } else {
            draw_view(&mut self.document, view);
        }
        true
    }

    /// Routes a pointer down (or touch start) to a view.
    ///
    /// The view takes keyboard focus even when no tool is active.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Viewport`] if the view's transform is singular.
    pub fn pointer_down(
        &mut self,
        id: ViewId,
        event: &PointerEvent,
    ) -> Result<Dispatch, ProjectError> {
        let Some(view) = self.views.get_mut(id) else {
            return Ok(Dispatch::default());
        };
        self.focus.focus(id);
        let dispatch = view.input.pointer_down(
            self.tool.as_mut(),
            &view.viewport,
            &mut self.timers,
            event,
        )?;
        finish_dispatch(&mut self.document, view, &dispatch);
        Ok(dispatch)
    }

    /// Routes a pointer move (or touch move) to a view.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Viewport`] if the view's transform is singular.
    pub fn pointer_move(
        &mut self,
        id: ViewId,
        event: &PointerEvent,
    ) -> Result<Dispatch, ProjectError> {
        let Some(view) = self.views.get_mut(id) else {
            return Ok(Dispatch::default());
        };
        let dispatch = view
            .input
            .pointer_move(self.tool.as_mut(), &view.viewport, event)?;
        finish_dispatch(&mut self.document, view, &dispatch);
        Ok(dispatch)
    }

    /// Routes a pointer up (or touch end) to a view.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Viewport`] if the view's transform is singular.
    pub fn pointer_up(
        &mut self,
        id: ViewId,
        event: &PointerEvent,
    ) -> Result<Dispatch, ProjectError> {
        let Some(view) = self.views.get_mut(id) else {
            return Ok(Dispatch::default());
        };
        let dispatch =
            view
                .input
                .pointer_up(self.tool.as_mut(), &view.viewport, &mut self.timers, event)?;
        finish_dispatch(&mut self.document, view, &dispatch);
        Ok(dispatch)
    }

    /// Earliest deadline among poll timers, for arming a host wakeup.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires every poll timer due at `now_ms` as a synthetic pointer move.
    ///
    /// Returns the number of timers fired.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Viewport`] if a view's transform is singular;
    /// remaining due timers stay queued for the next call.
    pub fn advance_timers(&mut self, now_ms: u64) -> Result<usize, ProjectError> {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now_ms) {
            self.pointer_move(timer.key, &PointerEvent::poll(timer.deadline))?;
            fired += 1;
        }
        Ok(fired)
    }
}

fn draw_view<D: Document<S>, S: Surface>(document: &mut D, view: &mut ProjectView<S>) {
    let bounds = view.viewport.view_bounds();
    view.surface.clear(bounds);
    document.draw(&mut view.surface, &view.viewport);
}

fn finish_dispatch<D: Document<S>, S: Surface>(
    document: &mut D,
    view: &mut ProjectView<S>,
    dispatch: &Dispatch,
) {
    if !dispatch.is_empty() {
        tracing::trace!(
            view = ?view.id,
            actions = ?dispatch.actions,
            redraw = dispatch.redraw,
            "dispatched"
        );
    }
    if dispatch.redraw {
        draw_view(document, view);
    }
}

impl<D: fmt::Debug, S: fmt::Debug> fmt::Debug for Project<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("document", &self.document)
            .field("views", &self.views)
            .field("active_view", &self.active_view)
            .field("focus", &self.focus)
            .field("tool", &self.tool)
            .field("timers", &self.timers.len())
            .finish()
    }
}
