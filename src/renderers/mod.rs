//! Renderers module for the measure editor
//!
//! The editor core never draws anything itself. It hands the measure to a
//! `RenderingAdapter` and reads back the staff geometry it needs for hover
//! snapping.
//!
//! - `vexflow`: stave-note descriptors for a VexFlow front end
//! - `svg`: self-contained SVG staff renderer

pub mod svg;
pub mod vexflow;

use serde::{Deserialize, Serialize};

use crate::errors::EditorError;
use crate::models::Measure;

pub use svg::SvgStaffRenderer;
pub use vexflow::{voice_spec, StaveNoteSpec, VoiceSpec};

/// Pixel layout of the drawn staff, as reported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffGeometry {
    /// Left edge of the stave
    pub stave_x: f64,
    /// Full stave width, including clef and time signature
    pub stave_width: f64,
    /// Where the first note may be drawn (after clef and time signature)
    pub note_start_x: f64,
    /// y of the top staff line
    pub top_line_y: f64,
    /// y of the bottom staff line
    pub bottom_line_y: f64,
}

impl StaffGeometry {
    /// Width available for note layout, less `right_margin`
    pub fn available_width(&self, right_margin: f64) -> f64 {
        self.stave_width - (self.note_start_x - self.stave_x) - right_margin
    }

    pub fn stave_end_x(&self) -> f64 {
        self.stave_x + self.stave_width
    }

    /// Distance between adjacent staff lines
    pub fn line_spacing(&self) -> f64 {
        (self.bottom_line_y - self.top_line_y) / 4.0
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        let values = [
            self.stave_x,
            self.stave_width,
            self.note_start_x,
            self.top_line_y,
            self.bottom_line_y,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EditorError::Render(format!("non-finite staff geometry: {:?}", self)));
        }
        if self.stave_width <= 0.0 || self.bottom_line_y <= self.top_line_y {
            return Err(EditorError::Render(format!("degenerate staff geometry: {:?}", self)));
        }
        if self.note_start_x < self.stave_x || self.note_start_x >= self.stave_end_x() {
            return Err(EditorError::Render(format!(
                "note area starts at {:.1}, outside the stave {:.1}..{:.1}",
                self.note_start_x,
                self.stave_x,
                self.stave_end_x()
            )));
        }
        Ok(())
    }
}

/// Drawing collaborator for the editor session
pub trait RenderingAdapter {
    /// Redraw the staff for `measure` and report where things landed
    fn render(&mut self, measure: &Measure) -> Result<StaffGeometry, EditorError>;

    /// Show the hover marker at the given pixel position
    fn show_placeholder(&mut self, x: f64, y: f64);

    fn clear_placeholder(&mut self);
}
