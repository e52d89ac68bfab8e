//! SVG staff document
//!
//! Lays out one treble-clef measure on a fixed 800x200 surface. Entries are
//! placed proportionally to their start beat so the drawing lines up with the
//! hover grid.

use super::elements::*;
use crate::models::{beats_to_f64, Duration, Entry, Measure, NoteLetter, Pitch};
use crate::renderers::StaffGeometry;

pub(super) const SURFACE_WIDTH: f64 = 800.0;
pub(super) const SURFACE_HEIGHT: f64 = 200.0;

const STAVE_X: f64 = 10.0;
const STAVE_Y: f64 = 40.0;
const STAVE_WIDTH: f64 = 780.0;
const LINE_SPACING: f64 = 10.0;
/// Staff lines above the top line (matches VexFlow's default stave padding)
const SPACE_ABOVE_STAFF: f64 = 4.0;
const CLEF_SPACE: f64 = 45.0;
const TIME_SIG_SPACE: f64 = 35.0;
/// Unused space kept at the right end of the note area
const NOTE_AREA_PADDING: f64 = 20.0;

const STEM_LENGTH: f64 = 30.0;
const LEDGER_LINE_EXTEND: f64 = 5.0;

/// Geometry of the fixed stave this renderer draws
pub(super) fn default_geometry() -> StaffGeometry {
    let top_line_y = STAVE_Y + SPACE_ABOVE_STAFF * LINE_SPACING;
    StaffGeometry {
        stave_x: STAVE_X,
        stave_width: STAVE_WIDTH,
        note_start_x: STAVE_X + CLEF_SPACE + TIME_SIG_SPACE,
        top_line_y,
        bottom_line_y: top_line_y + 4.0 * LINE_SPACING,
    }
}

/// Staff step of the top line (f/5)
fn top_line_step() -> i32 {
    Pitch::new(NoteLetter::F, 5).staff_step()
}

fn pitch_y(geometry: &StaffGeometry, pitch: Pitch) -> f64 {
    let steps_below_top = top_line_step() - pitch.staff_step();
    geometry.top_line_y + steps_below_top as f64 * geometry.line_spacing() / 2.0
}

fn rest_glyph(duration: Duration) -> &'static str {
    match duration {
        Duration::Whole => "\u{1D13B}",
        Duration::Half => "\u{1D13C}",
        Duration::Quarter => "\u{1D13D}",
        Duration::Eighth => "\u{1D13E}",
        Duration::Sixteenth => "\u{1D13F}",
    }
}

pub(super) fn render_staff(svg: &mut SvgBuilder, geometry: &StaffGeometry, measure: &Measure) {
    let spacing = geometry.line_spacing();
    for i in 0..5 {
        let y = geometry.top_line_y + i as f64 * spacing;
        svg.line(geometry.stave_x, y, geometry.stave_end_x(), y, STAFF_COLOR, STAFF_LINE_WIDTH);
    }
    for x in [geometry.stave_x, geometry.stave_end_x()] {
        svg.line(x, geometry.top_line_y, x, geometry.bottom_line_y, STAFF_COLOR, STAFF_LINE_WIDTH);
    }

    // Treble clef curls around the g/4 line
    svg.text(geometry.stave_x + 5.0, geometry.bottom_line_y + 8.0, "\u{1D11E}", 52.0, "start");

    let time_signature = measure.time_signature();
    let time_sig_x = geometry.stave_x + CLEF_SPACE + TIME_SIG_SPACE / 2.0;
    let middle_y = geometry.top_line_y + 2.0 * spacing;
    svg.text(time_sig_x, middle_y - 2.0, &time_signature.beats_per_measure.to_string(), 22.0, "middle");
    svg.text(time_sig_x, geometry.bottom_line_y - 2.0, &time_signature.beat_value.to_string(), 22.0, "middle");
}

pub(super) fn render_entries(svg: &mut SvgBuilder, geometry: &StaffGeometry, measure: &Measure) {
    let note_area = geometry.available_width(NOTE_AREA_PADDING);
    let measure_beats = beats_to_f64(measure.beats_per_measure());

    for slot in measure.slots() {
        let x = geometry.note_start_x
            + beats_to_f64(slot.start) / measure_beats * note_area
            + NOTEHEAD_RX
            + 4.0;

        match slot.entry {
            Entry::Rest { duration } => {
                let middle_y = geometry.top_line_y + 2.0 * geometry.line_spacing();
                svg.text(x, middle_y + 6.0, rest_glyph(duration), 30.0, "middle");
            }
            Entry::Note { pitch, duration } => render_note(svg, geometry, x, pitch, duration),
        }
    }
}

fn render_note(svg: &mut SvgBuilder, geometry: &StaffGeometry, x: f64, pitch: Pitch, duration: Duration) {
    let y = pitch_y(geometry, pitch);
    render_ledger_lines(svg, geometry, x, pitch);
    svg.notehead(x, y, duration.is_filled_notehead());

    if !duration.has_stem() {
        return;
    }

    // Below the middle line stems go up on the right, otherwise down on the left
    let stem_up = pitch.staff_step() < Pitch::REST_POSITION.staff_step();
    let (stem_x, tip_y) = if stem_up {
        (x + NOTEHEAD_RX - 0.6, y - STEM_LENGTH)
    } else {
        (x - NOTEHEAD_RX + 0.6, y + STEM_LENGTH)
    };
    svg.line(stem_x, y, stem_x, tip_y, NOTE_COLOR, STEM_WIDTH);

    let direction = if stem_up { 1.0 } else { -1.0 };
    for i in 0..duration.flag_count() {
        let flag_y = tip_y + direction * i as f64 * 7.0;
        svg.line(stem_x, flag_y, stem_x + 8.0, flag_y + direction * 12.0, NOTE_COLOR, 2.0);
    }
}

fn render_ledger_lines(svg: &mut SvgBuilder, geometry: &StaffGeometry, x: f64, pitch: Pitch) {
    let top = top_line_step();
    let bottom = top - 8;
    let step = pitch.staff_step();

    let ledger_steps: Vec<i32> = if step > top {
        ((top + 2)..=step).step_by(2).collect()
    } else if step < bottom {
        (step..=(bottom - 2)).rev().filter(|s| (bottom - s) % 2 == 0).collect()
    } else {
        Vec::new()
    };

    for ledger in ledger_steps {
        let y = geometry.top_line_y + (top - ledger) as f64 * geometry.line_spacing() / 2.0;
        svg.line(
            x - NOTEHEAD_RX - LEDGER_LINE_EXTEND,
            y,
            x + NOTEHEAD_RX + LEDGER_LINE_EXTEND,
            y,
            STAFF_COLOR,
            STAFF_LINE_WIDTH,
        );
    }
}
