//! Button styles, icons, and the host services that resolve them by name.
//!
//! Lookups never fail hard: a missing style falls back to
//! [`ButtonStyle::unstyled`] and a missing icon simply isn't drawn.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::button_group::ButtonContent;
use crate::primitives::{Padding, Size};

// Text metrics used when a style doesn't override them.
pub const CHAR_WIDTH: f32 = 8.4;
pub const LINE_HEIGHT: f32 = 18.0;

/// Estimate display width in cell units (1 for Latin, 2 for CJK, 0 for combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

/// Visual metrics for one button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub name: String,
    /// Padding around the icon and label.
    pub padding: Padding,
    pub char_width: f32,
    pub line_height: f32,
    /// Gap between icon and label when both are present.
    pub icon_spacing: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl ButtonStyle {
    /// Style used when a lookup fails: bare text metrics, no padding.
    pub fn unstyled() -> Self {
        Self {
            name: String::new(),
            padding: Padding::default(),
            char_width: CHAR_WIDTH,
            line_height: LINE_HEIGHT,
            icon_spacing: 2.0,
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    /// The default push-button look.
    pub fn button() -> Self {
        Self {
            name: "button".into(),
            padding: Padding::new(3.0, 14.0, 3.0, 14.0),
            ..Self::unstyled()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn min_size(mut self, min: Size) -> Self {
        self.min_width = min.width;
        self.min_height = min.height;
        self
    }

    /// Intrinsic size of one button showing `content`.
    pub fn measure(&self, content: &ButtonContent) -> Size {
        let text_width = unicode_display_width(&content.text) * self.char_width;
        let icon = content.icon.as_ref().map(|icon| icon.size).unwrap_or(Size::ZERO);
        let gap = if icon.width > 0.0 && text_width > 0.0 {
            self.icon_spacing
        } else {
            0.0
        };
        let text_height = if content.text.is_empty() && icon.height > 0.0 {
            0.0
        } else {
            self.line_height
        };

        Size::new(
            (icon.width + gap + text_width + self.padding.horizontal()).max(self.min_width),
            (text_height.max(icon.height) + self.padding.vertical()).max(self.min_height),
        )
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::unstyled()
    }
}

/// An image resource resolved from an icon name.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub name: String,
    pub size: Size,
}

/// Host service resolving style names.
pub trait Skin {
    fn style(&self, name: &str) -> Option<ButtonStyle>;
}

/// Host service resolving icon names.
pub trait IconCatalog {
    fn icon(&self, name: &str) -> Option<Icon>;
}

/// A named collection of button styles.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, ButtonStyle>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock styles: `button`, the segmented `buttonleft` / `buttonmid` /
    /// `buttonright` trio, and `minibutton`.
    pub fn standard() -> Self {
        let segment = ButtonStyle::button().padding(Padding::new(3.0, 8.0, 3.0, 8.0));
        Self::new()
            .with(ButtonStyle::button())
            .with(segment.clone().named("buttonleft"))
            .with(segment.clone().named("buttonmid"))
            .with(segment.named("buttonright"))
            .with(
                ButtonStyle::button()
                    .named("minibutton")
                    .padding(Padding::symmetric(6.0, 1.0))
                    .line_height(14.0),
            )
    }

    pub fn with(mut self, style: ButtonStyle) -> Self {
        self.insert(style);
        self
    }

    pub fn insert(&mut self, style: ButtonStyle) {
        self.styles.insert(style.name.clone(), style);
    }
}

impl Skin for StyleSheet {
    fn style(&self, name: &str) -> Option<ButtonStyle> {
        self.styles.get(name).cloned()
    }
}

/// A fixed set of icons.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: HashMap<String, Icon>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, name: impl Into<String>, size: Size) -> Self {
        let name = name.into();
        self.icons.insert(name.clone(), Icon { name, size });
        self
    }
}

impl IconCatalog for IconSet {
    fn icon(&self, name: &str) -> Option<Icon> {
        self.icons.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(label: &str) -> ButtonContent {
        ButtonContent::text(label)
    }

    #[test]
    fn text_width_uses_display_cells() {
        let style = ButtonStyle::unstyled();
        assert_eq!(style.measure(&text("ab")).width, 2.0 * CHAR_WIDTH);
        // Wide glyphs take two cells.
        assert_eq!(style.measure(&text("日")).width, 2.0 * CHAR_WIDTH);
    }

    #[test]
    fn padding_and_minimums_apply() {
        let style = ButtonStyle::button().min_size(Size::new(100.0, 0.0));
        let size = style.measure(&text("OK"));
        assert_eq!(size.width, 100.0);
        assert_eq!(size.height, LINE_HEIGHT + 6.0);
    }

    #[test]
    fn icon_only_button_sizes_to_icon() {
        let style = ButtonStyle::unstyled();
        let content = ButtonContent {
            icon: Some(Icon {
                name: "gear".into(),
                size: Size::new(16.0, 30.0),
            }),
            ..ButtonContent::default()
        };
        assert_eq!(style.measure(&content), Size::new(16.0, 30.0));

        let labelled = ButtonContent {
            text: "a".into(),
            ..content
        };
        assert_eq!(
            style.measure(&labelled),
            Size::new(16.0 + 2.0 + CHAR_WIDTH, 30.0)
        );
    }

    #[test]
    fn stock_sheet_resolves_names() {
        let sheet = StyleSheet::standard();
        assert_eq!(sheet.style("button"), Some(ButtonStyle::button()));
        assert!(sheet.style("buttonmid").is_some());
        assert!(sheet.style("fancy").is_none());
    }
}
