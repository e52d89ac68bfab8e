//! Models module for the measure editor
//!
//! This module contains the value types of the editor: durations, pitches,
//! measure entries, the measure itself and the editor configuration.

pub mod config;
pub mod duration;
pub mod entry;
pub mod measure;
pub mod pitch;
pub mod serde_helpers;

// Re-export commonly used types
pub use config::EditorConfig;
pub use duration::{beats_from_f64, beats_to_f64, length_of, Beats, Duration, EPSILON};
pub use entry::Entry;
pub use measure::{InsertOutcome, Measure, Slot, TimeSignature};
pub use pitch::{NoteLetter, Pitch};
