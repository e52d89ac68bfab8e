//! WASM API for the measure editor
//!
//! JS owns a `MeasureEditor`; every call runs one editor event synchronously
//! and returns the outcome as a plain object:
//!
//! ```js
//! const editor = new MeasureEditor({ beatsPerMeasure: 3 }, drawVoice, showMarker);
//! editor.pointerMove(x, y);   // { kind: "previewing", beat, pitch, ... }
//! editor.click();             // { kind: "inserted", beat, pitch, duration, index }
//! ```

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, editor_error, serialize};
use crate::api::render::JsRenderer;
use crate::editor::{EditorSession, EventOutcome, InputEvent};
use crate::models::{beats_from_f64, beats_to_f64, length_of, EditorConfig};
use crate::renderers::voice_spec;
use crate::splitter;
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct MeasureEditor {
    session: EditorSession<JsRenderer>,
}

#[wasm_bindgen]
impl MeasureEditor {
    /// Create an editor and draw its initial all-rest measure
    ///
    /// `config_js` may be `undefined` for the 4/4 defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_js: JsValue,
        render_callback: Function,
        placeholder_callback: Function,
    ) -> Result<MeasureEditor, JsValue> {
        let config: EditorConfig = if config_js.is_undefined() || config_js.is_null() {
            EditorConfig::default()
        } else {
            deserialize(config_js, "Invalid editor config")?
        };

        let renderer = JsRenderer::new(render_callback, placeholder_callback);
        let session = EditorSession::new(&config, renderer).map_err(editor_error)?;

        wasm_info!(
            "MeasureEditor created: {} with {} pitch positions",
            config.time_signature(),
            config.pitch_positions.len()
        );

        Ok(MeasureEditor { session })
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let outcome = self.session.pointer_move(x, y);
        serialize(&outcome, "Failed to serialize outcome")
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.pointer_leave();
        serialize(&outcome, "Failed to serialize outcome")
    }

    pub fn click(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.click().map_err(editor_error)?;
        report(&outcome);
        serialize(&outcome, "Failed to serialize outcome")
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.session.reset().map_err(editor_error)?;
        report(&outcome);
        serialize(&outcome, "Failed to serialize outcome")
    }

    #[wasm_bindgen(js_name = selectDuration)]
    pub fn select_duration(&mut self, symbol: &str) -> Result<JsValue, JsValue> {
        let outcome = self.session.select_duration(symbol).map_err(editor_error)?;
        report(&outcome);
        serialize(&outcome, "Failed to serialize outcome")
    }

    /// Dispatch an `InputEvent` object, e.g. `{ type: "pointerMove", x, y }`
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_js: JsValue) -> Result<JsValue, JsValue> {
        let event: InputEvent = deserialize(event_js, "Invalid input event")?;
        let outcome = self.session.handle(event).map_err(editor_error)?;
        report(&outcome);
        serialize(&outcome, "Failed to serialize outcome")
    }

    /// Current entries in order, e.g. `[{ kind: "rest", duration: "w" }]`
    pub fn entries(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.measure().entries(), "Failed to serialize entries")
    }

    /// The measure as a VexFlow voice descriptor
    pub fn voice(&self) -> Result<JsValue, JsValue> {
        serialize(&voice_spec(self.session.measure()), "Failed to serialize voice")
    }

    /// The pending placement candidate, or `null`
    #[wasm_bindgen(js_name = pendingPlacement)]
    pub fn pending_placement(&self) -> Result<JsValue, JsValue> {
        match self.session.pending() {
            Some(candidate) => serialize(candidate, "Failed to serialize placement"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = selectedDuration)]
    pub fn selected_duration(&self) -> String {
        self.session.selected_duration().symbol().to_string()
    }
}

fn report(outcome: &EventOutcome) {
    match outcome {
        EventOutcome::Inserted { beat, pitch, duration, index } => {
            wasm_log!("inserted {} {} at beat {} (entry {})", pitch, duration, beat, index);
        }
        EventOutcome::Overflow { beat, pitch, duration } => {
            wasm_warn!("{} {} does not fit at beat {}; measure unchanged", pitch, duration, beat);
        }
        EventOutcome::Reset => wasm_log!("measure reset"),
        EventOutcome::DurationChanged { duration } => wasm_log!("selected duration {}", duration),
        EventOutcome::Idle | EventOutcome::Previewing(_) => {}
    }
}

/// Length in beats of a duration symbol (`w`, `h`, `q`, `8`, `16`)
#[wasm_bindgen(js_name = lengthOf)]
pub fn length_of_symbol(symbol: &str) -> Result<f64, JsValue> {
    length_of(symbol).map(beats_to_f64).map_err(editor_error)
}

/// Decompose a beat count into duration symbols, longest first
#[wasm_bindgen(js_name = splitDuration)]
pub fn split_duration(beats: f64) -> Result<JsValue, JsValue> {
    let durations = splitter::split(beats_from_f64(beats)).map_err(editor_error)?;
    serialize(&durations, "Failed to serialize durations")
}
