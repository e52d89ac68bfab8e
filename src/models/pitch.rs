//! Pitch tokens
//!
//! A pitch is a natural letter plus an octave, written `"c/4"` (the key format
//! VexFlow stave notes use). Accidentals are not modelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    /// Diatonic index within the octave (C = 0 .. B = 6)
    pub fn index(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 1,
            NoteLetter::E => 2,
            NoteLetter::F => 3,
            NoteLetter::G => 4,
            NoteLetter::A => 5,
            NoteLetter::B => 6,
        }
    }

    pub fn from_char(c: char) -> Option<NoteLetter> {
        match c.to_ascii_lowercase() {
            'c' => Some(NoteLetter::C),
            'd' => Some(NoteLetter::D),
            'e' => Some(NoteLetter::E),
            'f' => Some(NoteLetter::F),
            'g' => Some(NoteLetter::G),
            'a' => Some(NoteLetter::A),
            'b' => Some(NoteLetter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteLetter::C => 'c',
            NoteLetter::D => 'd',
            NoteLetter::E => 'e',
            NoteLetter::F => 'f',
            NoteLetter::G => 'g',
            NoteLetter::A => 'a',
            NoteLetter::B => 'b',
        }
    }
}

/// A single staff pitch, serialized as its token (`"e/4"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    pub letter: NoteLetter,
    pub octave: i8,
}

impl Pitch {
    /// Middle line of the treble staff; rests are drawn here
    pub const REST_POSITION: Pitch = Pitch::new(NoteLetter::B, 4);

    pub const fn new(letter: NoteLetter, octave: i8) -> Self {
        Self { letter, octave }
    }

    /// Parse a token like `"c/4"` or `"F/5"`
    pub fn parse(token: &str) -> Result<Pitch, EditorError> {
        let invalid = || EditorError::InvalidPitch(token.to_string());

        let (letter_part, octave_part) = token.trim().split_once('/').ok_or_else(invalid)?;

        let mut letters = letter_part.chars();
        let letter = match (letters.next(), letters.next()) {
            (Some(c), None) => NoteLetter::from_char(c).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        let octave: i8 = octave_part.parse().map_err(|_| invalid())?;
        if !(0..=9).contains(&octave) {
            return Err(invalid());
        }

        Ok(Pitch { letter, octave })
    }

    /// Diatonic step count from C0; one step per staff line or space
    pub fn staff_step(&self) -> i32 {
        self.octave as i32 * 7 + self.letter.index()
    }

    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.letter.as_char(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse(s)
    }
}

impl TryFrom<String> for Pitch {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pitch::parse(&value)
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.token()
    }
}
