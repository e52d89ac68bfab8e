//! Duration splitter
//!
//! Decomposes a beat remainder into the representable durations that fill it,
//! longest first. Used to pad around inserted notes and to fill a fresh measure
//! with rests.

use crate::errors::EditorError;
use crate::models::duration::{Beats, Duration};

/// Split `remainder` beats into durations, longest first.
///
/// Greedy is exact because every table length divides the previous one. A
/// leftover smaller than a sixteenth means the meter or snap grid is off the
/// table's grid, which is a configuration bug rather than user error.
pub fn split(remainder: Beats) -> Result<Vec<Duration>, EditorError> {
    if remainder < Beats::from_integer(0) {
        return Err(EditorError::invariant(format!(
            "cannot split negative remainder {}",
            remainder
        )));
    }

    let mut durations = Vec::new();
    let mut remaining = remainder;

    for duration in Duration::LONGEST_FIRST {
        let length = duration.beats();
        while remaining >= length {
            durations.push(duration);
            remaining -= length;
        }
    }

    if remaining != Beats::from_integer(0) {
        return Err(EditorError::invariant(format!(
            "remainder {} leaves {} beats below the shortest duration ({})",
            remainder,
            remaining,
            Duration::shortest()
        )));
    }

    log::debug!("split {} beats into {:?}", remainder, durations);
    Ok(durations)
}

/// Whether `beats` can be expressed exactly with the duration table
pub fn is_representable(beats: Beats) -> bool {
    beats >= Beats::from_integer(0) && (beats / Duration::shortest().beats()).is_integer()
}
