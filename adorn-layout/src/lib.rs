//! Adorn Layout: geometry, styles and the button row used by decorations.
//!
//! The host owns rendering. This crate measures and arranges widgets and
//! hands draw calls to a [`Surface`] the host implements. [`FrameRecorder`]
//! is a headless surface for tests and demos.
//!
//! # Two-Phase Protocol
//!
//! 1. **Measure**: [`ButtonGroup::update`] sizes every button under its style
//!    and [`ButtonGroup::size`] reports the row's bounding box.
//! 2. **Draw**: [`ButtonGroup::render`] places each button inside the
//!    rectangle the host reserved and reports which one was activated.
//!
//! Per-record row state lives in a [`DecorationCache`] keyed by record path.

// Core primitives
pub mod primitives;
pub mod event;

// Styles and host services
pub mod style;
pub mod surface;

// Layout
pub mod button_group;
pub mod cache;

// Re-export core types
pub use primitives::{Padding, Point, Rect, Size};
pub use event::{MouseButton, MouseEvent};
pub use style::{ButtonStyle, Icon, IconCatalog, IconSet, Skin, StyleSheet};
pub use surface::{DrawCommand, FrameRecorder, Surface};
pub use button_group::{row_size, ButtonContent, ButtonGroup, RowPhase};
pub use cache::{DecorationCache, LayoutEntry};
