//! Side-pane resize state machine.
//!
//! The side pane borders the right edge of the screen and is separated
//! from the content area by a one-column divider. Dragging the divider
//! resizes the pane: the machine goes Idle -> Dragging on a left-button
//! press on the divider column, adjusts the width on each drag event,
//! and returns to Idle on release anywhere on the screen. Mouse capture
//! covers the whole terminal, so the release is seen even when a fast
//! drag leaves the divider column.
//!
//! Because the pane sits against the right edge, moving the pointer left
//! grows it: the candidate width is `width_at_start - delta`. A candidate
//! outside the configured bounds is ignored and the previous in-range
//! width is retained; the drag itself stays live.

/// Inclusive width bounds for the resizable pane, in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBounds {
    pub min: u16,
    pub max: u16,
}

impl ResizeBounds {
    pub fn contains(self, width: u16) -> bool {
        width >= self.min && width <= self.max
    }

    pub fn clamp(self, width: u16) -> u16 {
        width.clamp(self.min, self.max)
    }
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self { min: 20, max: 120 }
    }
}

/// An in-progress divider drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    anchor_x: u16,
    width_at_start: u16,
}

#[derive(Debug, Clone)]
pub struct LayoutState {
    pane_width: u16,
    bounds: ResizeBounds,
    drag: Option<Drag>,
}

impl LayoutState {
    pub fn new(pane_width: u16, bounds: ResizeBounds) -> Self {
        Self {
            pane_width: bounds.clamp(pane_width),
            bounds,
            drag: None,
        }
    }

    pub fn pane_width(&self) -> u16 {
        self.pane_width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Left-button press at the given column. Enters Dragging when the
    /// press lands on the divider.
    pub fn on_mouse_down(&mut self, column: u16, divider_x: u16) {
        if column == divider_x {
            self.drag = Some(Drag {
                anchor_x: column,
                width_at_start: self.pane_width,
            });
        }
    }

    /// Pointer moved while the button is held. Returns true when the
    /// width changed.
    pub fn on_mouse_drag(&mut self, column: u16) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        let delta = i32::from(column) - i32::from(drag.anchor_x);
        let candidate = i32::from(drag.width_at_start) - delta;

        let Ok(candidate) = u16::try_from(candidate) else {
            return false;
        };
        if !self.bounds.contains(candidate) || candidate == self.pane_width {
            return false;
        }
        self.pane_width = candidate;
        true
    }

    /// Button released anywhere. Always exits Dragging.
    pub fn on_mouse_up(&mut self) {
        self.drag = None;
    }

    /// The terminal was resized mid-drag; the anchor column no longer
    /// means anything, so the drag is abandoned.
    pub fn on_terminal_resize(&mut self) {
        self.drag = None;
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new(40, ResizeBounds::default())
    }
}
