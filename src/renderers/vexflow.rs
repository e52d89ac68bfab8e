//! VexFlow voice descriptors
//!
//! The browser front end draws with VexFlow. This module turns a measure into
//! the plain data it needs to build `StaveNote`s and a `Voice`:
//!
//! ```text
//! { "numBeats": 4, "beatValue": 4, "timeSignature": "4/4",
//!   "notes": [ { "keys": ["b/4"], "duration": "qr" },
//!              { "keys": ["c/4"], "duration": "q" }, ... ] }
//! ```

use serde::Serialize;

use crate::models::{Entry, Measure, Pitch};

/// Arguments for one `new VexFlow.StaveNote(...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaveNoteSpec {
    pub keys: Vec<String>,
    /// Duration symbol, with an `r` suffix for rests
    pub duration: String,
}

impl From<&Entry> for StaveNoteSpec {
    fn from(entry: &Entry) -> Self {
        match entry {
            Entry::Rest { duration } => StaveNoteSpec {
                keys: vec![Pitch::REST_POSITION.token()],
                duration: format!("{}r", duration.symbol()),
            },
            Entry::Note { pitch, duration } => StaveNoteSpec {
                keys: vec![pitch.token()],
                duration: duration.symbol().to_string(),
            },
        }
    }
}

/// Everything needed to build and format one voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSpec {
    pub num_beats: u32,
    pub beat_value: u32,
    pub time_signature: String,
    pub notes: Vec<StaveNoteSpec>,
}

pub fn voice_spec(measure: &Measure) -> VoiceSpec {
    let time_signature = measure.time_signature();
    VoiceSpec {
        num_beats: time_signature.beats_per_measure,
        beat_value: time_signature.beat_value,
        time_signature: time_signature.to_string(),
        notes: measure.entries().iter().map(StaveNoteSpec::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Beats, Duration, TimeSignature};

    #[test]
    fn test_fresh_measure_is_whole_rest_on_b4() {
        let measure = Measure::new(TimeSignature::default()).unwrap();
        let voice = voice_spec(&measure);
        assert_eq!(voice.num_beats, 4);
        assert_eq!(voice.time_signature, "4/4");
        assert_eq!(
            voice.notes,
            vec![StaveNoteSpec { keys: vec!["b/4".to_string()], duration: "wr".to_string() }]
        );
    }

    #[test]
    fn test_notes_and_rests() {
        let mut measure = Measure::new(TimeSignature::default()).unwrap();
        measure
            .insert_at(Beats::from_integer(1), Pitch::parse("c/4").unwrap(), Duration::Quarter)
            .unwrap();

        let durations: Vec<String> =
            voice_spec(&measure).notes.into_iter().map(|n| n.duration).collect();
        assert_eq!(durations, vec!["qr", "q", "hr"]);
    }

    #[test]
    fn test_json_shape() {
        let measure = Measure::new(TimeSignature::new(3, 8)).unwrap();
        let json = serde_json::to_value(voice_spec(&measure)).unwrap();
        assert_eq!(json["numBeats"], 3);
        assert_eq!(json["beatValue"], 8);
        assert_eq!(json["notes"][0]["keys"][0], "b/4");
        assert_eq!(json["notes"][0]["duration"], "hr");
        assert_eq!(json["notes"][1]["duration"], "qr");
    }
}
