//! Measure model
//!
//! A measure is an ordered run of entries that exactly covers
//! `[0, beats_per_measure)`. The entry list is never edited in place: every
//! change builds a complete new list, checks coverage, then swaps it in.

use serde::{Deserialize, Serialize};

use super::duration::{Beats, Duration};
use super::entry::Entry;
use super::pitch::Pitch;
use crate::errors::EditorError;
use crate::splitter::split;

/// Meter of the measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    /// Measure length in quarter-note beats
    pub beats_per_measure: u32,
    /// Denominator shown on the staff (does not change beat arithmetic)
    pub beat_value: u32,
}

impl TimeSignature {
    pub fn new(beats_per_measure: u32, beat_value: u32) -> Self {
        Self { beats_per_measure, beat_value }
    }

    pub fn measure_beats(&self) -> Beats {
        Beats::from_integer(self.beats_per_measure as i32)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.beats_per_measure, self.beat_value)
    }
}

/// An entry together with where it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: usize,
    pub start: Beats,
    pub entry: Entry,
}

impl Slot {
    pub fn end(&self) -> Beats {
        self.start + self.entry.beats()
    }

    pub fn contains(&self, beat: Beats) -> bool {
        self.start <= beat && beat < self.end()
    }
}

/// Result of `Measure::insert_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Note placed; `index` is its position in the new entry list
    Inserted { index: usize, start: Beats },
    /// Note would spill past the slot it targets; measure unchanged
    Overflow { slot_start: Beats, slot_beats: Beats },
    /// Target beat outside the measure; measure unchanged
    OutOfRange,
}

/// Serialize-only: deserializing would bypass the coverage check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    time_signature: TimeSignature,
    entries: Vec<Entry>,
}

impl Measure {
    /// Create a measure filled with rests
    pub fn new(time_signature: TimeSignature) -> Result<Self, EditorError> {
        let entries = rests_for(time_signature.measure_beats())?;
        Ok(Self { time_signature, entries })
    }

    /// Create a measure from existing entries, checking coverage
    pub fn from_entries(
        time_signature: TimeSignature,
        entries: Vec<Entry>,
    ) -> Result<Self, EditorError> {
        check_coverage(&entries, time_signature.measure_beats())?;
        Ok(Self { time_signature, entries })
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn beats_per_measure(&self) -> Beats {
        self.time_signature.measure_beats()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn total_beats(&self) -> Beats {
        self.entries.iter().map(Entry::beats).sum()
    }

    /// Entries with their start beats, left to right
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.entries
            .iter()
            .enumerate()
            .scan(Beats::from_integer(0), |start, (index, entry)| {
                let slot = Slot { index, start: *start, entry: *entry };
                *start += entry.beats();
                Some(slot)
            })
    }

    /// The slot whose span contains `beat`
    pub fn slot_at(&self, beat: Beats) -> Option<Slot> {
        self.slots().find(|slot| slot.contains(beat))
    }

    pub fn notes(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots().filter(|slot| !slot.entry.is_rest())
    }

    pub fn is_all_rests(&self) -> bool {
        self.entries.iter().all(Entry::is_rest)
    }

    /// Refill the measure with rests
    pub fn reset(&mut self) -> Result<(), EditorError> {
        self.entries = rests_for(self.beats_per_measure())?;
        log::info!("measure reset to {} rest(s)", self.entries.len());
        Ok(())
    }

    /// Place a note at `target`, replacing the entry that contains it.
    ///
    /// The replaced entry becomes: rests covering the gap before `target`, the
    /// note, rests covering what is left of the entry. If the note would run
    /// past the end of that entry nothing changes.
    pub fn insert_at(
        &mut self,
        target: Beats,
        pitch: Pitch,
        duration: Duration,
    ) -> Result<InsertOutcome, EditorError> {
        let measure_beats = self.beats_per_measure();
        if target < Beats::from_integer(0) || target >= measure_beats {
            log::debug!("insert at {} ignored: outside 0..{}", target, measure_beats);
            return Ok(InsertOutcome::OutOfRange);
        }

        let slot = self.slot_at(target).ok_or_else(|| {
            EditorError::invariant(format!("no entry covers beat {} of {}", target, measure_beats))
        })?;

        let gap = target - slot.start;
        let note_beats = duration.beats();
        let slot_beats = slot.entry.beats();

        if gap + note_beats > slot_beats {
            log::warn!(
                "{} {} at beat {} overflows {} (starts {}, {} beats)",
                pitch,
                duration,
                target,
                slot.entry,
                slot.start,
                slot_beats
            );
            return Ok(InsertOutcome::Overflow { slot_start: slot.start, slot_beats });
        }

        let before = split(gap)?;
        let after = split(slot_beats - note_beats - gap)?;

        let mut rebuilt = Vec::with_capacity(self.entries.len() + before.len() + after.len());
        rebuilt.extend_from_slice(&self.entries[..slot.index]);
        rebuilt.extend(before.into_iter().map(Entry::rest));
        let note_index = rebuilt.len();
        rebuilt.push(Entry::note(pitch, duration));
        rebuilt.extend(after.into_iter().map(Entry::rest));
        rebuilt.extend_from_slice(&self.entries[slot.index + 1..]);

        check_coverage(&rebuilt, measure_beats)?;
        self.entries = rebuilt;

        let start = slot.start + gap;
        log::info!("inserted {} {} at beat {} (entry {})", pitch, duration, start, note_index);
        Ok(InsertOutcome::Inserted { index: note_index, start })
    }
}

/// Rest entries filling `beats`
fn rests_for(beats: Beats) -> Result<Vec<Entry>, EditorError> {
    Ok(split(beats)?.into_iter().map(Entry::rest).collect())
}

fn check_coverage(entries: &[Entry], expected: Beats) -> Result<(), EditorError> {
    let total: Beats = entries.iter().map(Entry::beats).sum();
    if total != expected {
        return Err(EditorError::invariant(format!(
            "entries cover {} beats, measure has {}",
            total, expected
        )));
    }
    Ok(())
}
