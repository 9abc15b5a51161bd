//! Buttons decoration: a row of action buttons drawn above or below a field.
//!
//! One decoration is shared by every record it decorates, so per-record
//! layout lives in a [`DecorationCache`] keyed by the record's path. Each
//! path also keeps its own bindings (visibility, titles, icons, tooltips,
//! actions), so a binding that fails on one record and resolves on another
//! still warns once per record rather than every frame. Style names resolve
//! once per decoration.
//!
//! The host drives two phases per frame:
//!
//! 1. [`measure`](ButtonsDecoration::measure) refreshes every binding,
//!    re-measures the record's row and reports the height it needs.
//! 2. [`draw`](ButtonsDecoration::draw) places the row inside the field's
//!    rectangle, invokes the action of an activated button and shrinks the
//!    rectangle by the space it consumed.

use std::collections::HashMap;

use adorn_api::Record;
use adorn_kernel::{DynamicAction, DynamicValue};
use adorn_layout::{
    ButtonContent, ButtonGroup, ButtonStyle, DecorationCache, IconCatalog, Rect, Size, Skin,
};

use crate::config::{Alignment, ButtonsConfig};
use crate::services::{DrawContext, Services};

/// Bindings of one button.
#[derive(Debug)]
struct DynamicContent {
    title: DynamicValue<String>,
    icon: DynamicValue<String>,
    tooltip: DynamicValue<String>,
}

/// Parsed bindings of one record path.
#[derive(Debug)]
struct Dynamics {
    visible: DynamicValue<bool>,
    contents: Vec<DynamicContent>,
    actions: Vec<DynamicAction>,
    /// What each button shows this frame.
    resolved: Vec<ButtonContent>,
    /// Cache generation of the last measure or draw.
    last_seen: u64,
}

impl Dynamics {
    fn build(config: &ButtonsConfig) -> Self {
        let titles = config.title_list();
        let icons = config.icon_list();
        let tooltips = config.tooltip_list();

        let contents = titles
            .iter()
            .zip(&icons)
            .zip(&tooltips)
            .map(|((title, icon), tooltip)| DynamicContent {
                title: DynamicValue::new(title),
                icon: DynamicValue::new(icon),
                tooltip: DynamicValue::new(tooltip),
            })
            .collect();
        let actions = config
            .action_list()
            .into_iter()
            .map(DynamicAction::new)
            .collect();

        Self {
            visible: DynamicValue::with_default(&config.visible, true),
            contents,
            actions,
            resolved: vec![ButtonContent::default(); titles.len()],
            last_seen: 0,
        }
    }

    fn is_visible(&mut self, record: &dyn Record) -> bool {
        self.visible.update(record);
        *self.visible.value()
    }

    /// Refresh every binding, then rebuild what the buttons show.
    fn refresh(&mut self, record: &dyn Record, icons: &dyn IconCatalog) {
        for content in &mut self.contents {
            content.title.update(record);
            content.icon.update(record);
            content.tooltip.update(record);
        }
        for action in &mut self.actions {
            action.update(record);
        }

        for (content, out) in self.contents.iter().zip(&mut self.resolved) {
            out.text.clone_from(content.title.value());
            out.tooltip.clone_from(content.tooltip.value());
            out.icon = resolve_icon(icons, content.icon.value());
        }
    }
}

fn resolve_style(skin: &dyn Skin, name: &str) -> ButtonStyle {
    skin.style(name).unwrap_or_else(|| {
        tracing::warn!("Unknown button style {:?}, drawing unstyled", name);
        ButtonStyle::unstyled()
    })
}

fn resolve_icon(icons: &dyn IconCatalog, name: &str) -> Option<adorn_layout::Icon> {
    if name.is_empty() {
        return None;
    }
    let icon = icons.icon(name);
    if icon.is_none() {
        tracing::debug!("Icon {:?} not found", name);
    }
    icon
}

/// Rectangle the row occupies inside `indent` (the field rectangle after
/// indentation), given the row's measured size.
pub fn row_rect(config: &ButtonsConfig, indent: Rect, measured: Size) -> Rect {
    let width = if config.width < 0.0 {
        measured.width
    } else if config.width <= 1.0 {
        indent.width * config.width
    } else {
        config.width
    };
    let height = if config.height < 0.0 {
        measured.height
    } else {
        config.height
    };

    let mut rect = Rect::new(indent.x, indent.y, width, height);
    match config.alignment {
        Alignment::Left => {}
        Alignment::Center => rect.x += (indent.width - width) / 2.0,
        Alignment::Right => rect.x = indent.right() - width,
    }
    rect.set_left(rect.x + config.left);
    let right = rect.right() - config.right;
    rect.set_right(right);
    rect.width = rect.width.max(0.0);

    if config.below {
        rect.y = indent.bottom() - height - config.top - config.bottom;
    }
    rect.y += config.top;
    rect
}

/// A row of buttons bound to the record being edited.
#[derive(Debug)]
pub struct ButtonsDecoration {
    config: ButtonsConfig,
    /// Resolved on first measure.
    styles: Option<Vec<ButtonStyle>>,
    bindings: HashMap<String, Dynamics>,
    cache: DecorationCache,
}

impl ButtonsDecoration {
    pub fn new(config: ButtonsConfig) -> Self {
        Self {
            config,
            styles: None,
            bindings: HashMap::new(),
            cache: DecorationCache::new(),
        }
    }

    pub fn config(&self) -> &ButtonsConfig {
        &self.config
    }

    pub fn cache(&self) -> &DecorationCache {
        &self.cache
    }

    /// Bindings for `path`, created on first use and marked as seen.
    fn bindings_for(&mut self, path: &str) -> &mut Dynamics {
        let generation = self.cache.generation();
        let config = &self.config;
        let dynamics = self
            .bindings
            .entry(path.to_owned())
            .or_insert_with(|| Dynamics::build(config));
        dynamics.last_seen = generation;
        dynamics
    }

    /// Height the field needs once this decoration is added to `height`.
    ///
    /// An invisible decoration returns `height` unchanged.
    pub fn measure(
        &mut self,
        path: &str,
        record: &dyn Record,
        services: &Services<'_>,
        height: f32,
    ) -> f32 {
        if !self.bindings_for(path).is_visible(record) {
            return height;
        }

        let config = &self.config;
        let styles = self.styles.get_or_insert_with(|| {
            config
                .style_names()
                .into_iter()
                .map(|name| resolve_style(services.skin, name))
                .collect()
        });
        let Some(dynamics) = self.bindings.get_mut(path) else {
            return height;
        };
        dynamics.refresh(record, services.icons);

        let entry = self
            .cache
            .get_or_insert_with(path, || ButtonGroup::new(styles.clone()));
        entry.group.h_offset = config.h_offset;
        entry.group.v_offset = config.v_offset;
        entry.group.update(&dynamics.resolved);
        entry.size = entry.group.size(config.column);
        tracing::trace!("Measured {} buttons for {}: {:?}", entry.group.len(), path, entry.size);

        let row_height = if config.height < 0.0 {
            entry.size.height
        } else {
            config.height
        };
        height + (row_height + config.top + config.bottom).max(0.0)
    }

    /// Draw the row into `position` and run the action of an activated
    /// button.
    ///
    /// Returns whether the row was drawn. An invisible decoration or an
    /// invisible field returns `false` without touching `position` or the
    /// layout cache.
    pub fn draw(
        &mut self,
        position: &mut Rect,
        path: &str,
        record: &mut dyn Record,
        field_visible: bool,
        ctx: &mut DrawContext<'_>,
    ) -> bool {
        if !self.bindings_for(path).is_visible(&*record) {
            return false;
        }
        if !field_visible {
            return false;
        }

        let config = &self.config;
        let indent = if config.indented {
            position.indented(ctx.indent)
        } else {
            *position
        };

        let (rect, activated) = match self.cache.get_mut(path) {
            Some(entry) => {
                let rect = row_rect(config, indent, entry.size);
                let activated = entry.group.render(rect, None, config.column, &mut *ctx.surface);
                (rect, activated)
            }
            None => {
                tracing::debug!("Drawing {} before it was measured", path);
                (row_rect(config, indent, Size::ZERO), None)
            }
        };

        if let Some(index) = activated {
            tracing::debug!("Button {} activated for {}", index, path);
            let action = self
                .bindings
                .get_mut(path)
                .and_then(|dynamics| dynamics.actions.get_mut(index));
            if let Some(action) = action {
                action.update(&*record);
                action.invoke(record);
            }
        }

        let consumed = (rect.height + config.top + config.bottom).max(0.0);
        if !config.below {
            position.y += consumed;
        }
        position.height = (position.height - consumed).max(0.0);
        true
    }

    /// Drop the layout and bindings of a record that no longer exists.
    pub fn forget_record(&mut self, path: &str) -> bool {
        let had_bindings = self.bindings.remove(path).is_some();
        self.cache.forget(path) || had_bindings
    }

    /// Finish a host frame: collect rows and bindings not used in the last
    /// `max_age` frames and start the next generation. Returns how many rows
    /// were dropped.
    pub fn end_frame(&mut self, max_age: u64) -> usize {
        let dropped = self.cache.gc(max_age);
        let cutoff = self.cache.generation().saturating_sub(max_age);
        self.bindings.retain(|_, dynamics| dynamics.last_seen >= cutoff);
        self.cache.begin_frame();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indent() -> Rect {
        Rect::new(0.0, 100.0, 200.0, 40.0)
    }

    #[test]
    fn measured_width_by_default() {
        let config = ButtonsConfig::default();
        let rect = row_rect(&config, indent(), Size::new(60.0, 20.0));
        assert_eq!(rect, Rect::new(0.0, 100.0, 60.0, 20.0));
    }

    #[test]
    fn fractional_and_absolute_width() {
        let mut config = ButtonsConfig {
            width: 0.5,
            ..ButtonsConfig::default()
        };
        assert_eq!(row_rect(&config, indent(), Size::new(60.0, 20.0)).width, 100.0);

        config.width = 1.0;
        assert_eq!(row_rect(&config, indent(), Size::new(60.0, 20.0)).width, 200.0);

        config.width = 80.0;
        config.height = 30.0;
        let rect = row_rect(&config, indent(), Size::new(60.0, 20.0));
        assert_eq!(rect.size(), Size::new(80.0, 30.0));
    }

    #[test]
    fn alignment() {
        let mut config = ButtonsConfig {
            alignment: Alignment::Right,
            ..ButtonsConfig::default()
        };
        let measured = Size::new(60.0, 20.0);
        assert_eq!(row_rect(&config, indent(), measured).x, 140.0);

        config.alignment = Alignment::Center;
        assert_eq!(row_rect(&config, indent(), measured).x, 70.0);
    }

    #[test]
    fn margins_shrink_horizontally_and_shift_down() {
        let config = ButtonsConfig {
            left: 5.0,
            right: 10.0,
            top: 4.0,
            ..ButtonsConfig::default()
        };
        let rect = row_rect(&config, indent(), Size::new(60.0, 20.0));
        assert_eq!(rect, Rect::new(5.0, 104.0, 45.0, 20.0));
    }

    #[test]
    fn below_anchors_to_bottom() {
        let config = ButtonsConfig {
            below: true,
            top: 2.0,
            bottom: 3.0,
            ..ButtonsConfig::default()
        };
        let rect = row_rect(&config, indent(), Size::new(60.0, 20.0));
        // bottom edge 140, minus height and both margins, plus top margin
        assert_eq!(rect.y, 140.0 - 20.0 - 3.0);
    }

    #[test]
    fn oversized_margins_clamp_width() {
        let config = ButtonsConfig {
            left: 50.0,
            right: 50.0,
            ..ButtonsConfig::default()
        };
        assert_eq!(row_rect(&config, indent(), Size::new(60.0, 20.0)).width, 0.0);
    }
}
