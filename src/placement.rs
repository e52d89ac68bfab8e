//! Hover placement
//!
//! Turns a pointer position over the drawn staff into a discrete placement:
//! a beat on the snap grid and a pitch from the configured staff positions.

use serde::Serialize;

use crate::errors::EditorError;
use crate::models::serde_helpers::serialize_beats;
use crate::models::{beats_to_f64, Beats, Duration, EditorConfig, Pitch};
use crate::renderers::StaffGeometry;

/// What a click would insert right now
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementCandidate {
    #[serde(serialize_with = "serialize_beats")]
    pub beat: Beats,
    pub pitch: Pitch,
    pub duration: Duration,
    /// Preview marker position in staff pixels
    pub marker_x: f64,
    pub marker_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementTranslator {
    measure_beats: Beats,
    granularity: Beats,
    pitch_positions: Vec<Pitch>,
    right_margin: f64,
}

impl PlacementTranslator {
    pub fn from_config(config: &EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            measure_beats: config.time_signature().measure_beats(),
            granularity: config.snap_beats(),
            pitch_positions: config.pitch_ladder()?,
            right_margin: config.right_margin,
        })
    }

    pub fn granularity(&self) -> Beats {
        self.granularity
    }

    pub fn pitch_positions(&self) -> &[Pitch] {
        &self.pitch_positions
    }

    /// Nearest grid beat for pointer `x`, or `None` outside the note area
    pub fn snap_beat(&self, geometry: &StaffGeometry, x: f64) -> Option<Beats> {
        if !x.is_finite() || x < geometry.note_start_x || x > geometry.stave_end_x() {
            return None;
        }

        let available = geometry.available_width(self.right_margin);
        if available <= 0.0 {
            log::warn!("no room for notes: available width {:.1}px", available);
            return None;
        }

        let measure_beats = beats_to_f64(self.measure_beats);
        // x may sit past the usable width; keep the step count inside the measure
        let raw = ((x - geometry.note_start_x) / available * measure_beats).clamp(0.0, measure_beats);
        let steps = (raw / beats_to_f64(self.granularity)).round() as i32;

        let last = self.measure_beats - self.granularity;
        let snapped = (self.granularity * steps).min(last).max(Beats::from_integer(0));
        Some(snapped)
    }

    /// Nearest staff position for pointer `y`: its index, pitch and y
    pub fn snap_pitch(&self, geometry: &StaffGeometry, y: f64) -> (usize, Pitch, f64) {
        let half_space = geometry.line_spacing() / 2.0;
        let position_y = |i: usize| geometry.top_line_y + i as f64 * half_space;

        // Strict comparison keeps the higher position on ties
        let mut closest = 0;
        for i in 1..self.pitch_positions.len() {
            if (position_y(i) - y).abs() < (position_y(closest) - y).abs() {
                closest = i;
            }
        }

        (closest, self.pitch_positions[closest], position_y(closest))
    }

    /// Placement for a pointer at (`x`, `y`), if it is over the note area
    pub fn translate(
        &self,
        geometry: &StaffGeometry,
        x: f64,
        y: f64,
        duration: Duration,
    ) -> Option<PlacementCandidate> {
        let beat = self.snap_beat(geometry, x)?;
        let (_, pitch, marker_y) = self.snap_pitch(geometry, y);

        // Centre the marker inside its grid cell
        let centre = beats_to_f64(beat + self.granularity / 2);
        let marker_x = geometry.note_start_x
            + centre / beats_to_f64(self.measure_beats) * geometry.available_width(self.right_margin);

        Some(PlacementCandidate { beat, pitch, duration, marker_x, marker_y })
    }
}
