// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported by [`Viewport`](crate::Viewport) operations.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// The forward transform has no inverse (zero scale on some axis).
    ///
    /// Returned from artwork‑space conversion; the inverse cache stays empty.
    #[error("viewport transform is not invertible")]
    SingularTransform,
    /// A zoom factor that is not finite and strictly positive.
    #[error("invalid zoom factor {0}: zoom must be finite and positive")]
    InvalidZoom(f64),
}
