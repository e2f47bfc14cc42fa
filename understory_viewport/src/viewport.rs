// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::{CacheSlot, ViewportError};

/// Size change reported when a [`Viewport`]'s view bounds are replaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// New size of the view bounds.
    pub size: Size,
    /// New size minus old size.
    pub delta: Size,
}

/// Affine viewport over an artwork‑space plane.
///
/// `Viewport` tracks a rectangle in view/device space (the raw view bounds)
/// and a forward transform mapping artwork coordinates into view coordinates.
/// It can be used to:
/// - Compose pans, zooms and arbitrary affines onto the current transform.
/// - Convert points between artwork and view coordinates.
/// - Query the transformed bounds and their size and center.
///
/// Derived values (the transformed bounds and the inverse transform) are
/// computed lazily and cached until the next mutation that affects them.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_bounds: Rect,
    matrix: Affine,
    zoom: f64,
    bounds: CacheSlot<Rect>,
    inverse: CacheSlot<Affine>,
}

impl Viewport {
    /// Creates a viewport over `view_bounds` with an identity transform.
    ///
    /// Initial zoom is `1.0`.
    #[must_use]
    pub fn new(view_bounds: Rect) -> Self {
        Self {
            view_bounds,
            matrix: Affine::IDENTITY,
            zoom: 1.0,
            bounds: CacheSlot::empty(),
            inverse: CacheSlot::empty(),
        }
    }

    /// Returns the raw view bounds in device coordinates.
    #[must_use]
    pub fn view_bounds(&self) -> Rect {
        self.view_bounds
    }

    /// Returns the size of the raw view bounds.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_bounds.size()
    }

    /// Replaces the raw view bounds.
    ///
    /// Returns the new size together with its change relative to the old
    /// size. The transformed bounds are invalidated; the inverse transform
    /// does not depend on the bounds and is kept.
    pub fn set_view_bounds(&mut self, view_bounds: Rect) -> ResizeEvent {
        let size = view_bounds.size();
        let delta = size - self.view_bounds.size();
        self.view_bounds = view_bounds;
        self.bounds.invalidate();
        tracing::trace!(?size, ?delta, "viewport resized");
        ResizeEvent { size, delta }
    }

    /// Resizes the raw view bounds, keeping their origin.
    pub fn set_view_size(&mut self, size: Size) -> ResizeEvent {
        self.set_view_bounds(Rect::from_origin_size(self.view_bounds.origin(), size))
    }

    /// Returns the raw view bounds mapped through the forward transform.
    ///
    /// For rotating or skewing transforms this is the axis‑aligned bounding
    /// box of the mapped rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
            .get_or_insert_with(|| self.matrix.transform_rect_bbox(self.view_bounds))
    }

    /// Returns the size of [`Viewport::bounds`].
    #[must_use]
    pub fn size(&self) -> Size {
        self.bounds().size()
    }

    /// Returns the center of [`Viewport::bounds`].
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Scrolls so that [`Viewport::center`] lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        self.scroll_by(self.center() - center);
    }

    /// Returns the current forward (artwork → view) transform.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Composes `matrix` onto the forward transform.
    ///
    /// The new operation is applied after the accumulated transform, in view
    /// space: `forward = matrix * forward`. Both caches are invalidated.
    pub fn transform(&mut self, matrix: Affine) {
        self.matrix = matrix * self.matrix;
        self.bounds.invalidate();
        self.inverse.invalidate();
    }

    /// Moves the visible window by `offset` in the current (transformed) space.
    pub fn scroll_by(&mut self, offset: Vec2) {
        if offset == Vec2::ZERO {
            return;
        }
        self.transform(Affine::translate(-offset));
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor, scaling around the current center.
    ///
    /// The scale composed onto the transform is `zoom / self.zoom()`, so
    /// zooming back to a previous factor undoes the change.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidZoom`] if `zoom` is not finite and
    /// strictly positive. The viewport is left unchanged.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ViewportError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            tracing::debug!(zoom, "rejecting zoom factor");
            return Err(ViewportError::InvalidZoom(zoom));
        }
        let center = self.center();
        self.transform(Affine::scale_about(zoom / self.zoom, center));
        self.zoom = zoom;
        Ok(())
    }

    /// Converts an artwork‑space point into view/device coordinates.
    #[must_use]
    pub fn artwork_to_view(&self, point: Point) -> Point {
        self.matrix * point
    }

    /// Converts a view/device‑space point into artwork coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::SingularTransform`] if the forward transform
    /// cannot be inverted.
    pub fn view_to_artwork(&self, point: Point) -> Result<Point, ViewportError> {
        Ok(self.inverse()? * point)
    }

    /// Returns the inverse (view → artwork) transform, computing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::SingularTransform`] if the determinant of the
    /// forward transform is zero or not finite.
    pub fn inverse(&self) -> Result<Affine, ViewportError> {
        self.inverse.get_or_try_insert_with(|| invert(self.matrix))
    }

    /// Returns `true` if the transformed bounds are currently cached.
    #[must_use]
    pub fn is_bounds_cached(&self) -> bool {
        self.bounds.is_filled()
    }

    /// Returns `true` if the inverse transform is currently cached.
    #[must_use]
    pub fn is_inverse_cached(&self) -> bool {
        self.inverse.is_filled()
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    ///
    /// Taking a snapshot does not fill the caches.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view_bounds: self.view_bounds,
            bounds: self
                .bounds
                .get()
                .unwrap_or_else(|| self.matrix.transform_rect_bbox(self.view_bounds)),
            matrix: self.matrix,
            zoom: self.zoom,
            bounds_cached: self.bounds.is_filled(),
            inverse_cached: self.inverse.is_filled(),
        }
    }
}

fn invert(matrix: Affine) -> Result<Affine, ViewportError> {
    let det = matrix.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(ViewportError::SingularTransform);
    }
    let inverse = matrix.inverse();
    if inverse.is_finite() {
        Ok(inverse)
    } else {
        Err(ViewportError::SingularTransform)
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Raw view bounds in device coordinates.
    pub view_bounds: Rect,
    /// View bounds mapped through the forward transform.
    pub bounds: Rect,
    /// Forward transform.
    pub matrix: Affine,
    /// Current zoom factor.
    pub zoom: f64,
    /// Whether the transformed bounds were cached when the snapshot was taken.
    pub bounds_cached: bool,
    /// Whether the inverse was cached when the snapshot was taken.
    pub inverse_cached: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Rect, Size, Vec2};

    use super::{Viewport, ViewportError};

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn identity_viewport_maps_points_unchanged() {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let p = Point::new(12.5, -3.0);
        assert_eq!(vp.artwork_to_view(p), p);
        assert_eq!(vp.view_to_artwork(p), Ok(p));
        assert_eq!(vp.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn roundtrip_through_mixed_transform_sequence() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 640.0, 480.0));
        vp.transform(Affine::rotate(0.3));
        vp.scroll_by(Vec2::new(25.0, -40.0));
        vp.set_zoom(3.5).unwrap();
        vp.transform(Affine::skew(0.2, 0.0));
        vp.set_zoom(0.25).unwrap();
        vp.scroll_by(Vec2::new(-7.0, 11.0));

        for &(x, y) in &[(0.0, 0.0), (1.0, 2.0), (-300.0, 150.0), (1e4, -1e3)] {
            let p = Point::new(x, y);
            let view = vp.artwork_to_view(p);
            assert_close(vp.view_to_artwork(view).unwrap(), p);
        }
    }

    #[test]
    fn transform_composes_on_the_left() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.transform(Affine::scale(2.0));
        vp.transform(Affine::translate((10.0, 0.0)));
        // Scale first, then translate in view space.
        assert_close(vp.artwork_to_view(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }

    #[test]
    fn scroll_by_moves_the_visible_window() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.scroll_by(Vec2::new(30.0, 20.0));
        assert_close(vp.artwork_to_view(Point::new(30.0, 20.0)), Point::ORIGIN);
        assert_eq!(vp.bounds(), Rect::new(-30.0, -20.0, 70.0, 80.0));
    }

    #[test]
    fn set_center_scrolls_center_into_place() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        vp.set_center(Point::new(500.0, -50.0));
        assert_close(vp.center(), Point::new(500.0, -50.0));
        assert_eq!(vp.size(), Size::new(200.0, 100.0));
    }

    #[test]
    fn caches_fill_on_read_and_empty_on_mutation() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        assert!(!vp.is_bounds_cached());
        assert!(!vp.is_inverse_cached());

        let b0 = vp.bounds();
        let i0 = vp.inverse().unwrap();
        assert!(vp.is_bounds_cached());
        assert!(vp.is_inverse_cached());
        // Repeated reads hand back the cached values.
        assert_eq!(vp.bounds(), b0);
        assert_eq!(vp.inverse().unwrap(), i0);

        vp.transform(Affine::scale(2.0));
        assert!(!vp.is_bounds_cached());
        assert!(!vp.is_inverse_cached());
        assert_eq!(vp.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(vp.inverse().unwrap(), Affine::scale(0.5));
    }

    #[test]
    fn resize_keeps_inverse_but_drops_bounds() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        vp.transform(Affine::scale(2.0));
        let _ = vp.bounds();
        let _ = vp.inverse().unwrap();

        let ev = vp.set_view_size(Size::new(500.0, 250.0));
        assert_eq!(ev.size, Size::new(500.0, 250.0));
        assert_eq!(ev.delta, Size::new(100.0, -50.0));
        assert!(!vp.is_bounds_cached());
        assert!(vp.is_inverse_cached());
        assert_eq!(vp.bounds(), Rect::new(0.0, 0.0, 1000.0, 500.0));
    }

    #[test]
    fn set_view_bounds_reports_delta_and_keeps_new_origin() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let ev = vp.set_view_bounds(Rect::new(5.0, 5.0, 25.0, 15.0));
        assert_eq!(ev.size, Size::new(20.0, 10.0));
        assert_eq!(ev.delta, Size::new(10.0, 0.0));
        assert_eq!(vp.view_bounds(), Rect::new(5.0, 5.0, 25.0, 15.0));
    }

    #[test]
    fn zoom_then_unzoom_restores_center_and_scale() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        vp.scroll_by(Vec2::new(13.0, 7.0));
        let center = vp.center();
        let before = vp.matrix();

        vp.set_zoom(4.0).unwrap();
        assert_eq!(vp.zoom(), 4.0);
        assert_close(vp.center(), center);

        vp.set_zoom(1.0).unwrap();
        assert_close(vp.center(), center);
        let after = vp.matrix().as_coeffs();
        for (a, b) in after.iter().zip(before.as_coeffs().iter()) {
            assert!((a - b).abs() < 1e-9, "{after:?} vs {before:?}");
        }
    }

    #[test]
    fn invalid_zoom_is_rejected_without_change() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let _ = vp.inverse().unwrap();
        for z in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(vp.set_zoom(z), Err(ViewportError::InvalidZoom(_))));
        }
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.matrix(), Affine::IDENTITY);
        assert!(vp.is_inverse_cached(), "rejected zoom must not invalidate");
    }

    #[test]
    fn singular_transform_fails_conversion_and_caches_nothing() {
        let mut vp = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        vp.transform(Affine::scale_non_uniform(1.0, 0.0));
        assert_eq!(
            vp.view_to_artwork(Point::new(1.0, 1.0)),
            Err(ViewportError::SingularTransform)
        );
        assert!(!vp.is_inverse_cached());
        // Forward mapping still works.
        assert_eq!(vp.artwork_to_view(Point::new(3.0, 4.0)), Point::new(3.0, 0.0));
    }

    #[test]
    fn debug_info_does_not_fill_caches() {
        let vp = Viewport::new(Rect::new(0.0, 0.0, 50.0, 40.0));
        let info = vp.debug_info();
        assert_eq!(info.bounds, Rect::new(0.0, 0.0, 50.0, 40.0));
        assert!(!info.bounds_cached);
        assert!(!vp.is_bounds_cached());
    }
}
