// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Initial configuration of a view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Initial view size in device pixels.
    ///
    /// A size with zero area falls back to [`ViewConfig::DEFAULT_SIZE`].
    pub size: Size,
}

impl ViewConfig {
    /// Size used when none (or a degenerate one) is given.
    pub const DEFAULT_SIZE: Size = Size::new(1024.0, 768.0);

    /// Returns this config with `size` as the initial view size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// The size the view is actually created with.
    #[must_use]
    pub fn resolved_size(&self) -> Size {
        if self.size.is_zero_area() {
            Self::DEFAULT_SIZE
        } else {
            self.size
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::ViewConfig;

    #[test]
    fn zero_area_falls_back_to_default() {
        let config = ViewConfig::default().with_size(Size::ZERO);
        assert_eq!(config.resolved_size(), ViewConfig::DEFAULT_SIZE);
        let config = ViewConfig::default().with_size(Size::new(0.0, 300.0));
        assert_eq!(config.resolved_size(), ViewConfig::DEFAULT_SIZE);
        let config = ViewConfig::default().with_size(Size::new(320.0, 240.0));
        assert_eq!(config.resolved_size(), Size::new(320.0, 240.0));
    }
}
