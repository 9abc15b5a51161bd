//! Adorn API - Shared value model and the record capability that decorations
//! resolve their bindings against.

mod record;
mod value;

pub use record::*;
pub use value::*;
