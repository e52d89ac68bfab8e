//! Duration table
//!
//! Fixed mapping from duration symbol to length in beats. A beat is a quarter
//! note. Lengths are exact rationals so splitting never drifts.
//!
//! | symbol | name      | beats |
//! |--------|-----------|-------|
//! | `w`    | whole     | 4     |
//! | `h`    | half      | 2     |
//! | `q`    | quarter   | 1     |
//! | `8`    | eighth    | 1/2   |
//! | `16`   | sixteenth | 1/4   |

use num_rational::Rational32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EditorError;

/// Beat position or length, in quarter-note beats
pub type Beats = Rational32;

/// Tolerance for comparisons against floating point input
pub const EPSILON: f64 = 1e-4;

/// Decimal places kept when converting floating beats to `Beats`
const FLOAT_PRECISION: i32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    #[serde(rename = "w")]
    Whole,
    #[serde(rename = "h")]
    Half,
    #[serde(rename = "q")]
    Quarter,
    #[serde(rename = "8")]
    Eighth,
    #[serde(rename = "16")]
    Sixteenth,
}

impl Duration {
    /// Longest to shortest. Each length divides the one before it, which is
    /// what lets the splitter decompose greedily.
    pub const LONGEST_FIRST: [Duration; 5] = [
        Duration::Whole,
        Duration::Half,
        Duration::Quarter,
        Duration::Eighth,
        Duration::Sixteenth,
    ];

    /// Length in beats
    pub fn beats(self) -> Beats {
        match self {
            Duration::Whole => Beats::from_integer(4),
            Duration::Half => Beats::from_integer(2),
            Duration::Quarter => Beats::from_integer(1),
            Duration::Eighth => Beats::new(1, 2),
            Duration::Sixteenth => Beats::new(1, 4),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Duration::Whole => "w",
            Duration::Half => "h",
            Duration::Quarter => "q",
            Duration::Eighth => "8",
            Duration::Sixteenth => "16",
        }
    }

    pub fn from_symbol(symbol: &str) -> Result<Duration, EditorError> {
        match symbol {
            "w" => Ok(Duration::Whole),
            "h" => Ok(Duration::Half),
            "q" => Ok(Duration::Quarter),
            "8" => Ok(Duration::Eighth),
            "16" => Ok(Duration::Sixteenth),
            other => Err(EditorError::InvalidDuration(other.to_string())),
        }
    }

    /// The grid unit every representable remainder is a multiple of
    pub fn shortest() -> Duration {
        Duration::LONGEST_FIRST[Duration::LONGEST_FIRST.len() - 1]
    }

    /// Whole and half notes are drawn hollow
    pub fn is_filled_notehead(self) -> bool {
        !matches!(self, Duration::Whole | Duration::Half)
    }

    pub fn has_stem(self) -> bool {
        self != Duration::Whole
    }

    pub fn flag_count(self) -> usize {
        match self {
            Duration::Eighth => 1,
            Duration::Sixteenth => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Duration {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Duration::from_symbol(s)
    }
}

/// Look up the beat length of a duration symbol
pub fn length_of(symbol: &str) -> Result<Beats, EditorError> {
    Duration::from_symbol(symbol).map(Duration::beats)
}

/// Convert a floating beat value, keeping 4 decimal places
pub fn beats_from_f64(value: f64) -> Beats {
    Beats::new((value * FLOAT_PRECISION as f64).round() as i32, FLOAT_PRECISION)
}

pub fn beats_to_f64(beats: Beats) -> f64 {
    *beats.numer() as f64 / *beats.denom() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_of_known_symbols() {
        assert_eq!(length_of("w").unwrap(), Beats::from_integer(4));
        assert_eq!(length_of("h").unwrap(), Beats::from_integer(2));
        assert_eq!(length_of("q").unwrap(), Beats::from_integer(1));
        assert_eq!(length_of("8").unwrap(), Beats::new(1, 2));
        assert_eq!(length_of("16").unwrap(), Beats::new(1, 4));
    }

    #[test]
    fn test_length_of_unknown_symbol() {
        assert_eq!(
            length_of("32"),
            Err(EditorError::InvalidDuration("32".to_string()))
        );
        // Rest suffix belongs to the renderer, not the table
        assert!(length_of("qr").is_err());
    }

    #[test]
    fn test_lengths_form_dividing_chain() {
        for pair in Duration::LONGEST_FIRST.windows(2) {
            let ratio = pair[0].beats() / pair[1].beats();
            assert!(ratio.is_integer(), "{} does not divide {}", pair[1], pair[0]);
            assert!(pair[0].beats() > pair[1].beats());
        }
    }

    #[test]
    fn test_symbol_round_trip_and_serde() {
        for d in Duration::LONGEST_FIRST {
            assert_eq!(d.symbol().parse::<Duration>().unwrap(), d);
        }
        assert_eq!(serde_json::to_string(&Duration::Eighth).unwrap(), "\"8\"");
        let d: Duration = serde_json::from_str("\"16\"").unwrap();
        assert_eq!(d, Duration::Sixteenth);
    }

    #[test]
    fn test_beats_from_f64_rounds_to_four_places() {
        assert_eq!(beats_from_f64(0.25), Beats::new(1, 4));
        assert_eq!(beats_from_f64(3.75), Beats::new(15, 4));
        assert_eq!(beats_from_f64(0.1 + 0.2), Beats::new(3, 10));
        assert!((beats_to_f64(Beats::new(3, 4)) - 0.75).abs() < EPSILON);
    }
}
