//! Editor session
//!
//! Single-threaded event processor tying the pieces together:
//!
//! ```text
//! InputEvent → PlacementTranslator → PlacementCandidate
//!            → (click) Measure::insert_at → RenderingAdapter::render
//! ```
//!
//! A click only does something if a hover produced a candidate since the last
//! leave, out-of-area move or click.

use serde::{Deserialize, Serialize};

use crate::errors::EditorError;
use crate::models::serde_helpers::serialize_beats;
use crate::models::{Beats, Duration, EditorConfig, InsertOutcome, Measure, Pitch};
use crate::placement::{PlacementCandidate, PlacementTranslator};
use crate::renderers::{RenderingAdapter, StaffGeometry};

/// Discrete input delivered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    Click,
    ResetRequested,
    DurationSelected { symbol: String },
}

/// What handling an event did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventOutcome {
    /// Nothing to show (no candidate, or a click without one)
    Idle,
    /// Pointer is over the staff; this is what a click would insert
    Previewing(PlacementCandidate),
    Inserted {
        #[serde(serialize_with = "serialize_beats")]
        beat: Beats,
        pitch: Pitch,
        duration: Duration,
        index: usize,
    },
    /// The note did not fit the slot under the pointer; measure unchanged
    Overflow {
        #[serde(serialize_with = "serialize_beats")]
        beat: Beats,
        pitch: Pitch,
        duration: Duration,
    },
    Reset,
    DurationChanged { duration: Duration },
}

pub struct EditorSession<R: RenderingAdapter> {
    measure: Measure,
    translator: PlacementTranslator,
    renderer: R,
    geometry: StaffGeometry,
    pending: Option<PlacementCandidate>,
    selected_duration: Duration,
}

impl<R: RenderingAdapter> EditorSession<R> {
    /// Validate `config`, build an all-rest measure and draw it
    pub fn new(config: &EditorConfig, mut renderer: R) -> Result<Self, EditorError> {
        config.validate()?;

        let measure = Measure::new(config.time_signature())?;
        let translator = PlacementTranslator::from_config(config)?;
        let geometry = renderer.render(&measure)?;
        geometry.validate()?;

        log::info!(
            "editor session started: {} measure, {} snap positions, {} beat grid",
            config.time_signature(),
            translator.pitch_positions().len(),
            translator.granularity()
        );

        Ok(Self {
            measure,
            translator,
            renderer,
            geometry,
            pending: None,
            selected_duration: config.default_duration,
        })
    }

    pub fn measure(&self) -> &Measure {
        &self.measure
    }

    pub fn pending(&self) -> Option<&PlacementCandidate> {
        self.pending.as_ref()
    }

    pub fn selected_duration(&self) -> Duration {
        self.selected_duration
    }

    pub fn geometry(&self) -> StaffGeometry {
        self.geometry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<EventOutcome, EditorError> {
        match event {
            InputEvent::PointerMove { x, y } => Ok(self.pointer_move(x, y)),
            InputEvent::PointerLeave => Ok(self.pointer_leave()),
            InputEvent::Click => self.click(),
            InputEvent::ResetRequested => self.reset(),
            InputEvent::DurationSelected { symbol } => self.select_duration(&symbol),
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> EventOutcome {
        match self.translator.translate(&self.geometry, x, y, self.selected_duration) {
            Some(candidate) => {
                self.renderer.show_placeholder(candidate.marker_x, candidate.marker_y);
                self.pending = Some(candidate);
                EventOutcome::Previewing(candidate)
            }
            None => {
                self.invalidate();
                EventOutcome::Idle
            }
        }
    }

    pub fn pointer_leave(&mut self) -> EventOutcome {
        self.invalidate();
        EventOutcome::Idle
    }

    /// Insert the pending candidate with the currently selected duration.
    ///
    /// The candidate and its marker are gone afterwards, even on error. A
    /// render error after a successful insert leaves the insert committed;
    /// the next successful redraw shows it.
    pub fn click(&mut self) -> Result<EventOutcome, EditorError> {
        let Some(candidate) = self.pending.take() else {
            log::debug!("click ignored: no placement candidate");
            return Ok(EventOutcome::Idle);
        };
        self.renderer.clear_placeholder();

        let duration = self.selected_duration;
        let outcome = self.measure.insert_at(candidate.beat, candidate.pitch, duration)?;

        if let Err(e) = self.redraw() {
            log::error!(
                "redraw after {} {} at beat {} failed: {}",
                candidate.pitch,
                duration,
                candidate.beat,
                e
            );
            return Err(e);
        }

        Ok(match outcome {
            InsertOutcome::Inserted { index, start } => EventOutcome::Inserted {
                beat: start,
                pitch: candidate.pitch,
                duration,
                index,
            },
            InsertOutcome::Overflow { .. } => EventOutcome::Overflow {
                beat: candidate.beat,
                pitch: candidate.pitch,
                duration,
            },
            InsertOutcome::OutOfRange => EventOutcome::Idle,
        })
    }

    pub fn reset(&mut self) -> Result<EventOutcome, EditorError> {
        self.measure.reset()?;
        self.invalidate();
        self.redraw()?;
        Ok(EventOutcome::Reset)
    }

    /// Change the duration used by the next click; unknown symbols change nothing
    pub fn select_duration(&mut self, symbol: &str) -> Result<EventOutcome, EditorError> {
        let duration = Duration::from_symbol(symbol)?;
        self.selected_duration = duration;
        if let Some(candidate) = self.pending.as_mut() {
            candidate.duration = duration;
        }
        log::debug!("selected duration {}", duration);
        Ok(EventOutcome::DurationChanged { duration })
    }

    fn invalidate(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("placement candidate invalidated");
        }
        self.renderer.clear_placeholder();
    }

    fn redraw(&mut self) -> Result<(), EditorError> {
        let geometry = self.renderer.render(&self.measure)?;
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    /// Records calls and reports a fixed geometry (170px per beat from x=90)
    #[derive(Default)]
    struct RecordingRenderer {
        renders: usize,
        placeholder: Option<(f64, f64)>,
        fail: bool,
    }

    impl RenderingAdapter for RecordingRenderer {
        fn render(&mut self, _measure: &Measure) -> Result<StaffGeometry, EditorError> {
            if self.fail {
                return Err(EditorError::Render("boom".to_string()));
            }
            self.renders += 1;
            Ok(StaffGeometry {
                stave_x: 10.0,
                stave_width: 780.0,
                note_start_x: 90.0,
                top_line_y: 80.0,
                bottom_line_y: 120.0,
            })
        }

        fn show_placeholder(&mut self, x: f64, y: f64) {
            self.placeholder = Some((x, y));
        }

        fn clear_placeholder(&mut self) {
            self.placeholder = None;
        }
    }

    fn session() -> EditorSession<RecordingRenderer> {
        EditorSession::new(&EditorConfig::default(), RecordingRenderer::default()).unwrap()
    }

    fn beat_x(beat: f64) -> f64 {
        90.0 + beat * 170.0
    }

    #[test]
    fn test_new_session_renders_rests() {
        let s = session();
        assert_eq!(s.renderer().renders, 1);
        assert_eq!(s.measure().entries(), &[Entry::rest(Duration::Whole)]);
        assert_eq!(s.selected_duration(), Duration::Quarter);
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EditorConfig { beats_per_measure: 0, ..EditorConfig::default() };
        assert!(matches!(
            EditorSession::new(&config, RecordingRenderer::default()),
            Err(EditorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_hover_then_click_inserts() {
        let mut s = session();

        let outcome = s.handle(InputEvent::PointerMove { x: beat_x(1.0), y: 120.0 }).unwrap();
        assert!(matches!(outcome, EventOutcome::Previewing(_)));
        assert!(s.renderer().placeholder.is_some());

        let outcome = s.handle(InputEvent::Click).unwrap();
        let e4 = Pitch::parse("e/4").unwrap();
        assert_eq!(
            outcome,
            EventOutcome::Inserted {
                beat: Beats::from_integer(1),
                pitch: e4,
                duration: Duration::Quarter,
                index: 1
            }
        );
        assert_eq!(
            s.measure().entries(),
            &[
                Entry::rest(Duration::Quarter),
                Entry::note(e4, Duration::Quarter),
                Entry::rest(Duration::Half),
            ]
        );
        assert!(s.pending().is_none());
        assert!(s.renderer().placeholder.is_none());
        assert_eq!(s.renderer().renders, 2);
    }

    #[test]
    fn test_click_without_hover_is_ignored() {
        let mut s = session();
        assert_eq!(s.handle(InputEvent::Click).unwrap(), EventOutcome::Idle);
        assert_eq!(s.renderer().renders, 1);
    }

    #[test]
    fn test_leave_invalidates_candidate() {
        let mut s = session();
        s.pointer_move(beat_x(2.0), 100.0);
        assert!(s.pending().is_some());

        s.handle(InputEvent::PointerLeave).unwrap();
        assert!(s.pending().is_none());
        assert_eq!(s.click().unwrap(), EventOutcome::Idle);
        assert!(s.measure().is_all_rests());
    }

    #[test]
    fn test_moving_off_the_staff_invalidates_candidate() {
        let mut s = session();
        s.pointer_move(beat_x(2.0), 100.0);
        assert_eq!(s.pointer_move(30.0, 100.0), EventOutcome::Idle);
        assert!(s.pending().is_none());
        assert!(s.renderer().placeholder.is_none());
    }

    #[test]
    fn test_click_consumes_candidate() {
        let mut s = session();
        s.pointer_move(beat_x(0.0), 100.0);
        s.click().unwrap();
        assert_eq!(s.click().unwrap(), EventOutcome::Idle);
        assert_eq!(s.measure().notes().count(), 1);
    }

    #[test]
    fn test_overflow_click_keeps_measure() {
        let mut s = session();
        s.select_duration("w").unwrap();
        s.pointer_move(beat_x(3.75), 100.0);
        let before = s.measure().clone();

        let outcome = s.click().unwrap();
        assert!(matches!(outcome, EventOutcome::Overflow { duration: Duration::Whole, .. }));
        assert_eq!(s.measure(), &before);
        // Redrawn and placeholder cleared all the same
        assert_eq!(s.renderer().renders, 2);
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_duration_change_applies_to_pending_candidate() {
        let mut s = session();
        s.pointer_move(beat_x(0.5), 100.0);
        assert_eq!(
            s.handle(InputEvent::DurationSelected { symbol: "16".to_string() }).unwrap(),
            EventOutcome::DurationChanged { duration: Duration::Sixteenth }
        );
        assert_eq!(s.pending().unwrap().duration, Duration::Sixteenth);

        s.click().unwrap();
        let note = s.measure().notes().next().unwrap();
        assert_eq!(note.entry.duration(), Duration::Sixteenth);
        assert_eq!(note.start, Beats::new(1, 2));
    }

    #[test]
    fn test_unknown_duration_changes_nothing() {
        let mut s = session();
        s.pointer_move(beat_x(0.0), 100.0);
        let err = s.select_duration("3").unwrap_err();
        assert_eq!(err, EditorError::InvalidDuration("3".to_string()));
        assert_eq!(s.selected_duration(), Duration::Quarter);
        assert_eq!(s.pending().unwrap().duration, Duration::Quarter);
    }

    #[test]
    fn test_reset_clears_notes_and_candidate() {
        let mut s = session();
        s.pointer_move(beat_x(1.0), 100.0);
        s.click().unwrap();
        s.pointer_move(beat_x(3.0), 100.0);

        assert_eq!(s.handle(InputEvent::ResetRequested).unwrap(), EventOutcome::Reset);
        assert!(s.measure().is_all_rests());
        assert!(s.pending().is_none());
        assert_eq!(s.renderer().renders, 3);
    }

    #[test]
    fn test_render_failure_propagates() {
        let mut s = session();
        s.renderer_mut().fail = true;
        assert!(matches!(s.reset(), Err(EditorError::Render(_))));
    }

    #[test]
    fn test_render_failure_after_click_keeps_insert() {
        let mut s = session();
        s.pointer_move(beat_x(2.0), 100.0);
        assert!(s.renderer().placeholder.is_some());

        // Initial draw succeeded; the redraw after the insert fails
        s.renderer_mut().fail = true;
        assert!(matches!(s.click(), Err(EditorError::Render(_))));

        assert_eq!(s.measure().notes().count(), 1);
        assert!(s.pending().is_none());
        assert!(s.renderer().placeholder.is_none());

        s.renderer_mut().fail = false;
        assert_eq!(s.click().unwrap(), EventOutcome::Idle);
        assert_eq!(s.reset().unwrap(), EventOutcome::Reset);
        assert!(s.measure().is_all_rests());
    }

    #[test]
    fn test_outcome_json() {
        let mut s = session();
        let json = serde_json::to_value(s.pointer_move(beat_x(1.5), 80.0)).unwrap();
        assert_eq!(json["kind"], "previewing");
        assert_eq!(json["beat"], 1.5);
        assert_eq!(json["pitch"], "f/5");

        let json = serde_json::to_value(s.click().unwrap()).unwrap();
        assert_eq!(json["kind"], "inserted");
        assert_eq!(json["index"], 2);

        let json = serde_json::to_value(s.select_duration("h").unwrap()).unwrap();
        assert_eq!(json["kind"], "durationChanged");
        assert_eq!(json["duration"], "h");
    }

    #[test]
    fn test_input_event_json() {
        let event: InputEvent = serde_json::from_str(r#"{"type":"pointerMove","x":1.5,"y":2}"#).unwrap();
        assert_eq!(event, InputEvent::PointerMove { x: 1.5, y: 2.0 });

        let event: InputEvent =
            serde_json::from_str(r#"{"type":"durationSelected","symbol":"h"}"#).unwrap();
        assert_eq!(event, InputEvent::DurationSelected { symbol: "h".to_string() });

        let event: InputEvent = serde_json::from_str(r#"{"type":"resetRequested"}"#).unwrap();
        assert_eq!(event, InputEvent::ResetRequested);
    }
}
