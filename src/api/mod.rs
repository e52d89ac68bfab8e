//! Measure Editor WASM API
//!
//! JavaScript-facing surface of the editor.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `render`: `JsRenderer`, the rendering adapter backed by JS callbacks
//! - `core`: the `MeasureEditor` object and free duration functions

pub mod helpers;
pub mod render;
pub mod core;

pub use core::{length_of_symbol, split_duration, MeasureEditor};
pub use render::JsRenderer;
