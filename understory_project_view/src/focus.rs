// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus across the views of a project.
//!
//! Exactly one view (or none) receives keyboard‑class input at a time. The
//! last view to see a pointer down wins. Keyboard routing reads
//! [`FocusRegistry::focused`]; nothing else in this crate consults it.

use crate::ViewId;

/// The single "focused view" pointer of a project.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusRegistry {
    focused: Option<ViewId>,
}

impl FocusRegistry {
    /// Creates a registry with nothing focused.
    #[must_use]
    pub const fn new() -> Self {
        Self { focused: None }
    }

    /// The focused view, if any.
    #[must_use]
    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// Focuses `view`, returning the previously focused view.
    pub fn focus(&mut self, view: ViewId) -> Option<ViewId> {
        self.focused.replace(view)
    }

    /// Focuses `view` only if nothing is focused yet. Returns `true` if it did.
    pub fn focus_if_unset(&mut self, view: ViewId) -> bool {
        if self.focused.is_some() {
            return false;
        }
        self.focused = Some(view);
        true
    }

    /// Clears focus if it points at `view`. Returns `true` if it did.
    pub fn clear_if(&mut self, view: ViewId) -> bool {
        if self.focused != Some(view) {
            return false;
        }
        self.focused = None;
        true
    }

    /// Clears focus.
    pub fn clear(&mut self) -> Option<ViewId> {
        self.focused.take()
    }
}

#[cfg(test)]
mod tests {
    use super::FocusRegistry;
    use crate::registry::ViewRegistry;

    #[test]
    fn focus_if_unset_clear_if_and_clear() {
        let mut views = ViewRegistry::new();
        let a = views.insert_with(|_| ());
        let b = views.insert_with(|_| ());
        let mut focus = FocusRegistry::new();

        assert!(focus.focus_if_unset(a));
        assert!(!focus.focus_if_unset(b));
        assert_eq!(focus.focused(), Some(a));

        assert_eq!(focus.focus(b), Some(a));
        assert!(!focus.clear_if(a));
        assert_eq!(focus.focused(), Some(b));
        assert!(focus.clear_if(b));
        assert_eq!(focus.focused(), None);

        focus.focus(a);
        assert_eq!(focus.clear(), Some(a));
        assert_eq!(focus.clear(), None);
        assert_eq!(focus, FocusRegistry::default());
    }
}
