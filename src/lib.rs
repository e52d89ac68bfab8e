//! Measure Editor WASM Module
//!
//! Single-measure staff editor: hover over the staff to preview a note, click to
//! place it. The measure is always exactly full; rests fill whatever the notes
//! leave.

pub mod api;
pub mod editor;
pub mod errors;
pub mod models;
pub mod placement;
pub mod renderers;
pub mod splitter;

// Re-export commonly used types
pub use editor::{EditorSession, EventOutcome, InputEvent};
pub use errors::{EditorError, EditorResult};
pub use models::*;
pub use placement::{PlacementCandidate, PlacementTranslator};
pub use renderers::{RenderingAdapter, StaffGeometry, SvgStaffRenderer};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            wasm_warn!("logger already initialized");
        }
    }

    log::info!("Measure editor WASM module initialized");
}
