//! JavaScript rendering bridge
//!
//! `JsRenderer` lets a browser front end (typically VexFlow) do the drawing.
//! The render callback receives a `VoiceSpec` object and must return the staff
//! geometry it drew:
//!
//! ```js
//! (voice) => ({ staveX, staveWidth, noteStartX, topLineY, bottomLineY })
//! ```
//!
//! The placeholder callback is called as `(x, y)` to show the hover marker and
//! with no arguments to clear it.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::errors::EditorError;
use crate::models::Measure;
use crate::renderers::{voice_spec, RenderingAdapter, StaffGeometry};
use crate::wasm_warn;

pub struct JsRenderer {
    render_callback: Function,
    placeholder_callback: Function,
}

impl JsRenderer {
    pub fn new(render_callback: Function, placeholder_callback: Function) -> Self {
        Self {
            render_callback,
            placeholder_callback,
        }
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl RenderingAdapter for JsRenderer {
    fn render(&mut self, measure: &Measure) -> Result<StaffGeometry, EditorError> {
        let voice = serde_wasm_bindgen::to_value(&voice_spec(measure))
            .map_err(|e| EditorError::Render(format!("voice serialization failed: {}", e)))?;

        let returned = self
            .render_callback
            .call1(&JsValue::NULL, &voice)
            .map_err(|e| EditorError::Render(format!("render callback threw: {}", js_message(&e))))?;

        serde_wasm_bindgen::from_value(returned)
            .map_err(|e| EditorError::Render(format!("render callback returned bad geometry: {}", e)))
    }

    fn show_placeholder(&mut self, x: f64, y: f64) {
        let result = self.placeholder_callback.call2(
            &JsValue::NULL,
            &JsValue::from_f64(x),
            &JsValue::from_f64(y),
        );
        if let Err(e) = result {
            wasm_warn!("placeholder callback threw: {}", js_message(&e));
        }
    }

    fn clear_placeholder(&mut self) {
        if let Err(e) = self.placeholder_callback.call0(&JsValue::NULL) {
            wasm_warn!("placeholder callback threw: {}", js_message(&e));
        }
    }
}
