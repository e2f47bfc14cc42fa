// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators supplied by the host: the drawing surface and the document.

use kurbo::{Rect, Size};
use understory_viewport::Viewport;

/// A render target owned by one view.
pub trait Surface {
    /// Resizes the backing store to `size` device pixels.
    fn resize(&mut self, size: Size);

    /// Clears `rect` (in device pixels) before the document paints.
    fn clear(&mut self, rect: Rect);
}

/// The content painted into every view of a project.
pub trait Document<S: ?Sized> {
    /// Paints into `surface`, as seen through `viewport`.
    fn draw(&mut self, surface: &mut S, viewport: &Viewport);
}
