//! Layout - text measurement for self-sizing widgets.

pub mod text_measure;

pub use text_measure::{content_size, string_width};
