// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tool contract: the actions a tool receives and the capabilities it declares.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;

use crate::PointerEvent;

/// Phase of the normalized pointer protocol delivered to a tool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// The pointer went down; a drag session starts.
    Down,
    /// The pointer moved (or a poll tick elapsed) during a drag session.
    Drag,
    /// The pointer moved and the tool is not dragging.
    Move,
    /// The pointer went up; the drag session ends.
    Up,
}

impl ToolAction {
    /// The capability flag that names a handler for this phase.
    #[must_use]
    pub const fn capability(self) -> ToolCapabilities {
        match self {
            Self::Down => ToolCapabilities::DOWN,
            Self::Drag => ToolCapabilities::DRAG,
            Self::Move => ToolCapabilities::MOVE,
            Self::Up => ToolCapabilities::UP,
        }
    }
}

bitflags::bitflags! {
    /// Which phases a tool has handlers for.
    ///
    /// Capabilities decide both the dispatch branch for pointer moves and
    /// whether a dispatched phase warrants a redraw. Every phase is still
    /// delivered to [`Tool::on_action`]; tools ignore the ones they do not
    /// care about.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// The tool reacts to pointer down.
        const DOWN = 0b0000_0001;
        /// The tool reacts to drags; moves during a session become `Drag`.
        const DRAG = 0b0000_0010;
        /// The tool reacts to plain pointer motion.
        const MOVE = 0b0000_0100;
        /// The tool reacts to pointer up.
        const UP   = 0b0000_1000;
    }
}

impl Default for ToolCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

/// A pluggable interaction handler.
///
/// Points are always in artwork space. The raw [`PointerEvent`] that caused
/// the action is passed along for modifiers and timestamps.
pub trait Tool {
    /// The phases this tool has handlers for.
    ///
    /// Read once when the tool is activated.
    fn capabilities(&self) -> ToolCapabilities;

    /// Interval, in milliseconds, at which the tool wants synthetic moves
    /// while the pointer is down, or `None` for native events only.
    ///
    /// Read once when the tool is activated.
    fn poll_interval(&self) -> Option<u64> {
        None
    }

    /// Handles one normalized action.
    fn on_action(&mut self, action: ToolAction, point: Point, event: &PointerEvent);
}

/// A tool together with the capabilities it declared on activation.
pub struct ActiveTool {
    tool: Box<dyn Tool>,
    capabilities: ToolCapabilities,
    poll_interval: Option<u64>,
}

impl ActiveTool {
    /// Activates `tool`, reading its capabilities and poll interval.
    #[must_use]
    pub fn new(tool: Box<dyn Tool>) -> Self {
        let capabilities = tool.capabilities();
        let poll_interval = tool.poll_interval();
        tracing::debug!(?capabilities, ?poll_interval, "tool activated");
        Self {
            tool,
            capabilities,
            poll_interval,
        }
    }

    /// Capabilities declared on activation.
    #[must_use]
    pub fn capabilities(&self) -> ToolCapabilities {
        self.capabilities
    }

    /// Poll interval declared on activation.
    #[must_use]
    pub fn poll_interval(&self) -> Option<u64> {
        self.poll_interval
    }

    /// Returns the wrapped tool.
    #[must_use]
    pub fn tool(&self) -> &dyn Tool {
        &*self.tool
    }

    /// Returns the wrapped tool mutably.
    pub fn tool_mut(&mut self) -> &mut dyn Tool {
        &mut *self.tool
    }

    /// Unwraps the tool.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn Tool> {
        self.tool
    }

    /// Delivers `action` and reports whether it warrants a redraw.
    pub(crate) fn emit(&mut self, action: ToolAction, point: Point, event: &PointerEvent) -> bool {
        self.tool.on_action(action, point, event);
        self.capabilities.contains(action.capability())
    }
}

impl fmt::Debug for ActiveTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTool")
            .field("capabilities", &self.capabilities)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kurbo::Point;

    use super::{ActiveTool, Tool, ToolAction, ToolCapabilities};
    use crate::PointerEvent;

    struct Probe {
        probes: Rc<Cell<u32>>,
    }

    impl Tool for Probe {
        fn capabilities(&self) -> ToolCapabilities {
            self.probes.set(self.probes.get() + 1);
            ToolCapabilities::DRAG | ToolCapabilities::UP
        }

        fn poll_interval(&self) -> Option<u64> {
            Some(30)
        }

        fn on_action(&mut self, _: ToolAction, _: Point, _: &PointerEvent) {}
    }

    #[test]
    fn capabilities_are_read_once_on_activation() {
        let probes = Rc::new(Cell::new(0));
        let mut active = ActiveTool::new(Box::new(Probe {
            probes: Rc::clone(&probes),
        }));
        assert_eq!(probes.get(), 1);

        let ev = PointerEvent::mouse(Point::ORIGIN, 0);
        assert!(active.emit(ToolAction::Drag, Point::ORIGIN, &ev));
        assert!(!active.emit(ToolAction::Move, Point::ORIGIN, &ev));
        assert!(active.emit(ToolAction::Up, Point::ORIGIN, &ev));
        assert_eq!(probes.get(), 1, "dispatch must not re-probe the tool");
        assert_eq!(active.poll_interval(), Some(30));
    }

    #[test]
    fn action_capability_mapping() {
        assert_eq!(ToolAction::Down.capability(), ToolCapabilities::DOWN);
        assert_eq!(ToolAction::Drag.capability(), ToolCapabilities::DRAG);
        assert_eq!(ToolAction::Move.capability(), ToolCapabilities::MOVE);
        assert_eq!(ToolAction::Up.capability(), ToolCapabilities::UP);
        assert!(ToolCapabilities::default().is_empty());
    }
}
