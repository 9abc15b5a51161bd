//! Pointer input delivered by the host for the current frame.

use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Mouse event types.
#[derive(Debug, Clone, PartialEq)]
pub enum MouseEvent {
    /// Mouse button pressed.
    ButtonPressed {
        button: MouseButton,
        position: Point,
    },

    /// Mouse button released.
    ButtonReleased {
        button: MouseButton,
        position: Point,
    },

    /// Mouse cursor moved.
    CursorMoved {
        position: Point,
    },
}

impl MouseEvent {
    pub fn position(&self) -> Point {
        match self {
            MouseEvent::ButtonPressed { position, .. }
            | MouseEvent::ButtonReleased { position, .. }
            | MouseEvent::CursorMoved { position } => *position,
        }
    }

    /// A left press at `position`.
    pub fn press(position: Point) -> Self {
        MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            position,
        }
    }

    /// A left release at `position`.
    pub fn release(position: Point) -> Self {
        MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            position,
        }
    }
}
