//! Host services lent to a decoration for one phase.

use adorn_layout::{IconCatalog, Skin, Surface};

/// Lookups used while measuring.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub skin: &'a dyn Skin,
    pub icons: &'a dyn IconCatalog,
}

impl<'a> Services<'a> {
    pub fn new(skin: &'a dyn Skin, icons: &'a dyn IconCatalog) -> Self {
        Self { skin, icons }
    }
}

/// Everything the draw phase needs from the host.
pub struct DrawContext<'a> {
    pub surface: &'a mut dyn Surface,
    /// Indentation of the current field, applied when the decoration is
    /// `indented`.
    pub indent: f32,
}

impl<'a> DrawContext<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface, indent: 0.0 }
    }

    pub fn with_indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }
}
