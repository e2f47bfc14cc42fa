// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_viewport --heading-base-level=0

//! Understory Viewport: an affine mapping between view space and artwork space.
//!
//! This crate provides a small, headless model of a rendering surface looking
//! at a document. View space is the device‑pixel space of the surface; artwork
//! space is the logical coordinate space of the document. The two are related
//! by a single forward [`Affine`](kurbo::Affine) that may contain any mix of
//! translation, rotation, scale and skew.
//!
//! It focuses on:
//! - Composing transforms onto the viewport (pan, zoom, arbitrary affines).
//! - Converting points between artwork and view space.
//! - Lazily deriving the transformed bounds and the inverse transform, with
//!   explicit cache slots that are emptied by every mutation.
//!
//! It does **not** own any scene graph, surface, or input handling. Callers
//! are expected to:
//! - Resize the viewport when their surface changes size and forward the
//!   returned [`ResizeEvent`] to whoever cares.
//! - Convert device positions with [`Viewport::view_to_artwork`] before
//!   handing them to tools or hit testing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_viewport::Viewport;
//!
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Scroll the visible window and zoom around its center.
//! view.scroll_by(Vec2::new(100.0, 50.0));
//! view.set_zoom(2.0).unwrap();
//!
//! // Device-space point into artwork space and back again.
//! let device = Point::new(400.0, 300.0);
//! let artwork = view.view_to_artwork(device).unwrap();
//! let back = view.artwork_to_view(artwork);
//! assert!((back - device).hypot() < 1e-9);
//! ```
//!
//! ## Caching
//!
//! [`Viewport::bounds`] and the inverse transform are computed on first read
//! and memoized in a [`CacheSlot`]. A slot is either empty or consistent with
//! the current transform and view bounds; there is no stale state and no
//! sentinel value. Reading twice without a mutation in between returns the
//! identical cached value.
//!
//! ## Errors
//!
//! Inverting a transform with a zero (or non‑finite) determinant fails with
//! [`ViewportError::SingularTransform`]. Zoom factors that are not finite and
//! positive are rejected with [`ViewportError::InvalidZoom`].
//!
//! This crate is `no_std`.

#![no_std]

mod cache;
mod error;
mod viewport;

pub use cache::CacheSlot;
pub use error::ViewportError;
pub use viewport::{ResizeEvent, Viewport, ViewportDebugInfo};
