//! Emitter for the declarative object syntax
//!
//! Turns converted [`Object`](crate::transform::Object)s into
//! `object <type> "<name>" inherits ... { key = value, }` statements.

pub mod escape;
pub mod writer;

pub use escape::{escape, unescape, EscapePolicy};
pub use writer::{render_object, ObjectWriter};
