//! Declarative configuration of a buttons decoration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a decoration configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid decoration config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Horizontal placement of the row inside the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Options of a buttons decoration.
///
/// `titles`, `icons`, `tooltips` and `actions` are comma-separated parallel
/// lists. Each entry of the first three is a binding: literal text, or a
/// `$member` reference resolved against the record every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonsConfig {
    pub titles: String,
    pub icons: String,
    pub tooltips: String,
    pub actions: String,
    /// Style name per button (comma list). `None` uses [`style`](Self::style).
    #[serde(alias = "buttonStyles")]
    pub button_style: Option<String>,
    /// Columns before wrapping; `-1` keeps every button on one row.
    pub column: i32,
    pub h_offset: f32,
    pub v_offset: f32,
    /// `< 0`: measured width; `0..=1`: fraction of the field; `> 1`: pixels.
    pub width: f32,
    /// `< 0`: measured height; otherwise pixels.
    pub height: f32,
    pub indented: bool,
    pub below: bool,
    pub alignment: Alignment,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Boolean binding; empty means always visible.
    pub visible: String,
    /// Decoration style, the fallback for `button_style`.
    pub style: String,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            titles: String::new(),
            icons: String::new(),
            tooltips: String::new(),
            actions: String::new(),
            button_style: None,
            column: -1,
            h_offset: 0.0,
            v_offset: 0.0,
            width: -1.0,
            height: -1.0,
            indented: true,
            below: false,
            alignment: Alignment::Left,
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            visible: String::new(),
            style: "button".into(),
        }
    }
}

impl ButtonsConfig {
    /// A configuration with the given titles and actions, everything else
    /// default.
    pub fn new(titles: impl Into<String>, actions: impl Into<String>) -> Self {
        Self {
            titles: titles.into(),
            actions: actions.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of buttons: one per title. An empty `titles` means no buttons.
    pub fn button_count(&self) -> usize {
        if self.titles.is_empty() {
            0
        } else {
            split_list(&self.titles).len()
        }
    }

    pub fn title_list(&self) -> Vec<&str> {
        padded(&self.titles, self.button_count())
    }

    pub fn icon_list(&self) -> Vec<&str> {
        padded(&self.icons, self.button_count())
    }

    pub fn tooltip_list(&self) -> Vec<&str> {
        padded(&self.tooltips, self.button_count())
    }

    pub fn action_list(&self) -> Vec<&str> {
        padded(&self.actions, self.button_count())
    }

    /// Style name for every button. Names are trimmed; missing trailing
    /// entries repeat the last one given, and with no list at all every
    /// button uses the decoration style.
    pub fn style_names(&self) -> Vec<&str> {
        let count = self.button_count();
        let names: Vec<&str> = match self.button_style.as_deref() {
            Some(list) if !list.trim().is_empty() => list.split(',').map(str::trim).collect(),
            _ => vec![self.style.as_str()],
        };
        let last = names.last().copied().unwrap_or(self.style.as_str());
        (0..count)
            .map(|i| names.get(i).copied().unwrap_or(last))
            .map(|name| if name.is_empty() { self.style.as_str() } else { name })
            .collect()
    }
}

/// Split a comma list. Entries are kept verbatim, and empty entries are kept
/// so that positions line up across parallel lists.
pub fn split_list(list: &str) -> Vec<&str> {
    list.split(',').collect()
}

/// `list` split and cut or right-padded with `""` to `len` entries.
fn padded(list: &str, len: usize) -> Vec<&str> {
    let mut items = split_list(list);
    items.resize(len, "");
    items
}
