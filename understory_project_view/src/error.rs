// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_viewport::ViewportError;

/// Errors reported by [`Project`](crate::Project) operations.
///
/// Calls addressed to removed or unknown views are not errors; they do
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ProjectError {
    /// Coordinate conversion or zoom failed in a view's viewport.
    #[error(transparent)]
    Viewport(#[from] ViewportError),
}
