//! Serde serialization helpers for ensuring consistent JSON output

use serde::Serializer;

use super::duration::{beats_to_f64, Beats};

/// Serialize exact beats as a plain number (JS has no rational type)
pub fn serialize_beats<S>(beats: &Beats, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(beats_to_f64(*beats))
}
