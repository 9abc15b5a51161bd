//! Button Group - a row (or grid) of uniformly sized buttons.
//!
//! Every button takes the size of the largest one, so labels of different
//! lengths still produce an even row. With `column < 1` the buttons flow in a
//! single row; with `column = k` they wrap into `k` columns.
//!
//! A group alternates between the measure and draw phases every host frame:
//!
//! ```text
//! Unbuilt --update--> Measured --render--> Drawn --update--> Measured ...
//! ```
//!
//! Rendering a group that was never measured draws nothing.

use crate::primitives::{Point, Rect, Size};
use crate::style::{ButtonStyle, Icon};
use crate::surface::Surface;

/// What one button shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonContent {
    pub text: String,
    pub icon: Option<Icon>,
    pub tooltip: String,
}

impl ButtonContent {
    /// A label-only button.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Where a group is in the measure/draw alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPhase {
    #[default]
    Unbuilt,
    Measured,
    Drawn,
}

/// Columns and rows used to arrange `count` buttons.
fn grid(count: usize, column: i32) -> (usize, usize) {
    if column > 0 {
        let cols = column as usize;
        (cols, count.div_ceil(cols))
    } else {
        (count, 1)
    }
}

/// Bounding box of `count` buttons of size `button` arranged by `column`.
///
/// Single row (`column < 1`): `count × width` by one button height.
/// Wrapped (`column = k`): `k × width` by `ceil(count / k) × height`.
/// No buttons take no space.
pub fn row_size(count: usize, column: i32, button: Size) -> Size {
    if count == 0 {
        return Size::ZERO;
    }
    let (cols, rows) = grid(count, column);
    Size::new(cols as f32 * button.width, rows as f32 * button.height)
}

/// A row of buttons sharing one intrinsic size.
#[derive(Debug, Clone, Default)]
pub struct ButtonGroup {
    contents: Vec<ButtonContent>,
    /// Style per button; the last entry covers any buttons beyond the list.
    styles: Vec<ButtonStyle>,
    button_size: Size,
    /// Horizontal nudge applied to every button.
    pub h_offset: f32,
    /// Vertical nudge applied to every button.
    pub v_offset: f32,
    phase: RowPhase,
}

impl ButtonGroup {
    /// Create an unbuilt group. An empty style list means unstyled buttons.
    pub fn new(styles: Vec<ButtonStyle>) -> Self {
        Self {
            styles,
            ..Self::default()
        }
    }

    /// Style used for button `index`.
    pub fn style(&self, index: usize) -> ButtonStyle {
        self.styles
            .get(index)
            .or_else(|| self.styles.last())
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the contents and re-measure.
    pub fn update(&mut self, contents: &[ButtonContent]) {
        self.contents.clear();
        self.contents.extend_from_slice(contents);
        self.button_size = self
            .contents
            .iter()
            .enumerate()
            .map(|(i, content)| self.style(i).measure(content))
            .fold(Size::ZERO, Size::max);
        self.phase = RowPhase::Measured;
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contents(&self) -> &[ButtonContent] {
        &self.contents
    }

    pub fn phase(&self) -> RowPhase {
        self.phase
    }

    /// Intrinsic size of a single button (the largest across all contents).
    pub fn button_size(&self) -> Size {
        self.button_size
    }

    /// Bounding box of the whole group.
    pub fn size(&self, column: i32) -> Size {
        row_size(self.contents.len(), column, self.button_size)
    }

    /// Rectangle of every button when the group fills `rect`.
    ///
    /// Cells divide `rect` evenly, so a group drawn wider than its intrinsic
    /// size stretches its buttons rather than leaving a gap.
    pub fn layout(&self, rect: Rect, column: i32) -> Vec<Rect> {
        let (cols, rows) = grid(self.contents.len(), column);
        if cols == 0 || rows == 0 {
            return Vec::new();
        }
        let cell = Size::new(rect.width / cols as f32, rect.height / rows as f32);
        let nudge = Point::new(self.h_offset, self.v_offset);

        (0..self.contents.len())
            .map(|i| {
                let (col, row) = (i % cols, i / cols);
                Rect::new(
                    rect.x + col as f32 * cell.width,
                    rect.y + row as f32 * cell.height,
                    cell.width,
                    cell.height,
                )
                .translate(nudge)
            })
            .collect()
    }

    /// Draw every button into `rect` and return the index activated this
    /// frame, if any.
    pub fn render(
        &mut self,
        rect: Rect,
        selected: Option<usize>,
        column: i32,
        surface: &mut dyn Surface,
    ) -> Option<usize> {
        if self.phase == RowPhase::Unbuilt {
            tracing::debug!("Skipping draw of a button group that was never measured");
            return None;
        }

        let mut activated = None;
        for (i, cell) in self.layout(rect, column).into_iter().enumerate() {
            let style = self.style(i);
            surface.draw_button(cell, &self.contents[i], &style, selected == Some(i));
            if activated.is_none() && surface.take_activation(cell) {
                activated = Some(i);
            }
        }
        self.phase = RowPhase::Drawn;
        activated
    }
}
