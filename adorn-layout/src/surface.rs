//! The drawing surface a host lends to decorations during the draw phase.
//!
//! A [`Surface`] both renders buttons and answers whether one was activated
//! this frame. Activation is consumed on read so that a single click can
//! never activate two overlapping buttons: the first one asked wins.

use crate::button_group::ButtonContent;
use crate::event::{MouseButton, MouseEvent};
use crate::primitives::{Point, Rect};
use crate::style::ButtonStyle;

/// Host rendering and input for one frame.
pub trait Surface {
    /// Draw one button.
    fn draw_button(&mut self, rect: Rect, content: &ButtonContent, style: &ButtonStyle, selected: bool);

    /// Consume a pending activation inside `rect`, if there is one.
    fn take_activation(&mut self, rect: Rect) -> bool;
}

/// A button drawn into a [`FrameRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub rect: Rect,
    pub content: ButtonContent,
    /// Name of the style the button was drawn with.
    pub style: String,
    pub selected: bool,
    pub hovered: bool,
}

/// A headless surface that records draw calls and replays queued pointer
/// input.
///
/// A click is a left press followed by a left release, both inside the
/// button's rectangle.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    commands: Vec<DrawCommand>,
    pending: Vec<MouseEvent>,
    cursor: Option<Point>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: drop last frame's commands and any input nobody
    /// consumed.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.pending.clear();
    }

    /// Queue input for the current frame.
    pub fn push_event(&mut self, event: MouseEvent) {
        self.cursor = Some(event.position());
        if !matches!(event, MouseEvent::CursorMoved { .. }) {
            self.pending.push(event);
        }
    }

    /// Queue a full left click at `position`.
    pub fn click(&mut self, position: Point) {
        self.push_event(MouseEvent::press(position));
        self.push_event(MouseEvent::release(position));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Labels of the buttons drawn this frame, in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.content.text.as_str()).collect()
    }

    /// Tooltip of the button under the cursor, if it has one.
    pub fn hovered_tooltip(&self) -> Option<&str> {
        self.commands
            .iter()
            .rev()
            .find(|c| c.hovered && !c.content.tooltip.is_empty())
            .map(|c| c.content.tooltip.as_str())
    }

    /// Number of queued input events not yet consumed.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }
}

impl Surface for FrameRecorder {
    fn draw_button(&mut self, rect: Rect, content: &ButtonContent, style: &ButtonStyle, selected: bool) {
        let hovered = self.cursor.is_some_and(|p| rect.contains(p));
        self.commands.push(DrawCommand {
            rect,
            content: content.clone(),
            style: style.name.clone(),
            selected,
            hovered,
        });
    }

    fn take_activation(&mut self, rect: Rect) -> bool {
        let left_inside = |event: &MouseEvent| match event {
            MouseEvent::ButtonPressed { button, position }
            | MouseEvent::ButtonReleased { button, position } => {
                *button == MouseButton::Left && rect.contains(*position)
            }
            MouseEvent::CursorMoved { .. } => false,
        };

        let Some(press) = self
            .pending
            .iter()
            .position(|e| matches!(e, MouseEvent::ButtonPressed { .. }) && left_inside(e))
        else {
            return false;
        };
        let Some(release) = self.pending[press + 1..]
            .iter()
            .position(|e| matches!(e, MouseEvent::ButtonReleased { .. }) && left_inside(e))
            .map(|offset| press + 1 + offset)
        else {
            return false;
        };

        self.pending.remove(release);
        self.pending.remove(press);
        true
    }
}
