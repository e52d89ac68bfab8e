//! Measure entries
//!
//! One slot in a measure: a rest or a single-pitch note. Entries are small
//! `Copy` values; measures replace them wholesale rather than editing them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::duration::{Beats, Duration};
use super::pitch::Pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Rest { duration: Duration },
    Note { pitch: Pitch, duration: Duration },
}

impl Entry {
    pub fn rest(duration: Duration) -> Self {
        Entry::Rest { duration }
    }

    pub fn note(pitch: Pitch, duration: Duration) -> Self {
        Entry::Note { pitch, duration }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Entry::Rest { duration } | Entry::Note { duration, .. } => *duration,
        }
    }

    pub fn beats(&self) -> Beats {
        self.duration().beats()
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Entry::Rest { .. })
    }

    pub fn pitch(&self) -> Option<Pitch> {
        match self {
            Entry::Note { pitch, .. } => Some(*pitch),
            Entry::Rest { .. } => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Rest { duration } => write!(f, "Rest({})", duration),
            Entry::Note { pitch, duration } => write!(f, "Note({}, {})", pitch, duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accessors() {
        let c4 = Pitch::parse("c/4").unwrap();
        let note = Entry::note(c4, Duration::Quarter);
        let rest = Entry::rest(Duration::Half);

        assert!(!note.is_rest());
        assert_eq!(note.pitch(), Some(c4));
        assert_eq!(note.beats(), Beats::from_integer(1));

        assert!(rest.is_rest());
        assert_eq!(rest.pitch(), None);
        assert_eq!(rest.duration(), Duration::Half);
    }

    #[test]
    fn test_entry_json_shape() {
        let note = Entry::note(Pitch::parse("e/4").unwrap(), Duration::Eighth);
        let json = serde_json::to_value(note).unwrap();
        assert_eq!(json["kind"], "note");
        assert_eq!(json["pitch"], "e/4");
        assert_eq!(json["duration"], "8");

        let rest: Entry = serde_json::from_str(r#"{"kind":"rest","duration":"w"}"#).unwrap();
        assert_eq!(rest, Entry::rest(Duration::Whole));
        assert_eq!(rest.to_string(), "Rest(w)");
    }
}
