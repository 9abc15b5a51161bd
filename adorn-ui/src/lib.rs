//! Adorn UI - Declarative decorations for record fields.
//!
//! A decoration is configured once (usually from JSON), shared across every
//! record a host edits, and driven through the host's measure/draw phases.

pub mod buttons;
pub mod config;
pub mod services;

pub use buttons::{row_rect, ButtonsDecoration};
pub use config::{split_list, Alignment, ButtonsConfig, ConfigError};
pub use services::{DrawContext, Services};
