//! Spelled pitches: letter, accidental, and octave.
//!
//! A [`Note`] is not a MIDI number. `C#5` and `Db5` share a MIDI number but
//! are different notes, and subtracting one spelled note from another must
//! produce a correctly spelled [`Interval`] (e.g. `Ab5 - D#5 = dd5`, not
//! `P4`). That's the whole reason this type exists instead of a bare pitch
//! index.

use core::fmt;

use crate::errors::{TheoryError, TheoryResult};
use crate::interval::Interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A natural letter name, `C` through `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Letter {
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// A
    A,
    /// B
    B,
}

impl Letter {
    const ORDER: [Self; 7] = [Self::C, Self::D, Self::E, Self::F, Self::G, Self::A, Self::B];
    const BASE_MIDI: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

    /// Zero-based position in the `C..B` cycle.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::C => 0,
            Self::D => 1,
            Self::E => 2,
            Self::F => 3,
            Self::G => 4,
            Self::A => 5,
            Self::B => 6,
        }
    }

    /// Letter at `index` (taken mod 7).
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        Self::ORDER[index.rem_euclid(7) as usize]
    }

    const fn base_midi(self) -> i32 {
        Self::BASE_MIDI[self.index() as usize]
    }

    pub(crate) fn from_char(c: char) -> TheoryResult<Self> {
        match c.to_ascii_uppercase() {
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            'F' => Ok(Self::F),
            'G' => Ok(Self::G),
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            other => Err(TheoryError::Parse(format!("'{other}' is not a note letter"))),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        };
        write!(f, "{c}")
    }
}

/// Accidental notation table: semitone offset -> token.
const ACCIDENTAL_NOTATION: [(i32, &str); 7] =
    [(3, "#x"), (2, "x"), (1, "#"), (0, ""), (-1, "b"), (-2, "bb"), (-3, "bbb")];

fn accidental_token(accidental: i32) -> TheoryResult<&'static str> {
    ACCIDENTAL_NOTATION
        .iter()
        .find(|(value, _)| *value == accidental)
        .map(|(_, token)| *token)
        .ok_or_else(|| TheoryError::DomainRange(format!("accidental {accidental} has no notation")))
}

fn parse_accidental(raw: &str) -> TheoryResult<i32> {
    let mut total = 0;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.peek().copied() {
        match c {
            '#' => {
                total += 1;
                chars.next();
            }
            'x' => {
                total += 2;
                chars.next();
            }
            'b' => {
                total -= 1;
                chars.next();
            }
            _ => break,
        }
    }
    if chars.peek().is_some() {
        return Err(TheoryError::Parse(format!("unrecognized accidental in '{raw}'")));
    }
    Ok(total)
}

/// A spelled pitch: letter, accidental (in semitones, `-3..=3`), and octave.
///
/// Equality, hashing, and ordering all go by `midi()`, not by spelling: `C#5`
/// and `Db5` are the same note.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Note {
    letter: Letter,
    accidental: i32,
    octave: i32,
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.midi() == other.midi()
    }
}

impl Eq for Note {}

impl core::hash::Hash for Note {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.midi().hash(state);
    }
}

impl Note {
    /// Construct a note, validating the accidental has a notation.
    pub fn new(letter: Letter, accidental: i32, octave: i32) -> TheoryResult<Self> {
        accidental_token(accidental)?;
        Ok(Self { letter, accidental, octave })
    }

    /// Letter name.
    #[must_use]
    pub const fn letter(&self) -> Letter {
        self.letter
    }

    /// Accidental, in semitones relative to the natural letter (`-3..=3`).
    #[must_use]
    pub const fn accidental(&self) -> i32 {
        self.accidental
    }

    /// Octave number (scientific pitch notation, middle C is `C5`).
    #[must_use]
    pub const fn octave(&self) -> i32 {
        self.octave
    }

    /// MIDI note number.
    #[must_use]
    pub const fn midi(&self) -> i32 {
        self.letter.base_midi() + self.accidental + 12 * self.octave
    }

    /// This note raised by one semitone, re-spelled with the same letter.
    pub fn sharp(&self) -> TheoryResult<Self> {
        Self::new(self.letter, self.accidental + 1, self.octave)
    }

    /// This note lowered by one semitone, re-spelled with the same letter.
    pub fn flat(&self) -> TheoryResult<Self> {
        Self::new(self.letter, self.accidental - 1, self.octave)
    }

    /// Position on the letter+octave ladder (`C` at octave 0 is `0`).
    const fn tone_index(&self) -> i64 {
        self.letter.index() as i64 + 7 * self.octave as i64
    }

    /// Parse scientific pitch notation: `LETTER[accidentals][octave]`, e.g.
    /// `"Ab5"`, `"F#-1"`, `"Cx4"`.
    pub fn parse(notation: &str) -> TheoryResult<Self> {
        let mut chars = notation.chars();
        let first = chars.next().ok_or_else(|| TheoryError::Parse("empty note".into()))?;
        let letter = Letter::from_char(first)?;
        let rest: String = chars.collect();
        let split_at = rest.find(|c: char| c == '-' || c.is_ascii_digit()).unwrap_or(rest.len());
        let (accidental_str, octave_str) = rest.split_at(split_at);
        let accidental = parse_accidental(accidental_str)?;
        let octave: i32 = if octave_str.is_empty() {
            0
        } else {
            octave_str.parse().map_err(|_| TheoryError::Parse(format!("bad octave in '{notation}'")))?
        };
        Self::new(letter, accidental, octave)
    }

    /// Add an interval, producing a correctly re-spelled note.
    ///
    /// Adding an inverted interval moves down the letter ladder; this is
    /// what makes `note + interval.invert() == note - interval`.
    pub fn add_interval(&self, interval: &Interval) -> TheoryResult<Self> {
        let steps = if interval.is_inverted() {
            -(interval.number() as i64 - 1)
        } else {
            interval.number() as i64 - 1
        };
        let target_index = self.tone_index() + steps;
        let target_letter = Letter::from_index(target_index);
        let target_octave = target_index.div_euclid(7);
        let unshifted_midi = target_letter.base_midi() + 12 * target_octave as i32;
        let desired_midi = self.midi() + interval.semitones();
        let accidental = desired_midi - unshifted_midi;
        Self::new(target_letter, accidental, target_octave as i32)
    }

    /// This note shifted by a whole number of octaves, same letter and accidental.
    pub fn add_octaves(&self, octaves: i32) -> TheoryResult<Self> {
        Self::new(self.letter, self.accidental, self.octave + octaves)
    }

    /// Octave-blind pitch class, `0..12`.
    #[must_use]
    pub const fn pitch_class(&self) -> i32 {
        self.midi().rem_euclid(12)
    }

    /// Subtract another note, producing the interval from `other` to `self`.
    pub fn sub_note(&self, other: &Self) -> TheoryResult<Interval> {
        if self.tone_index() >= other.tone_index() {
            Self::interval_from_ordered(self, other)
        } else {
            Ok(Self::interval_from_ordered(other, self)?.invert())
        }
    }

    /// Interval from `low` up to `high`, assuming `high.tone_index() >= low.tone_index()`.
    fn interval_from_ordered(high: &Self, low: &Self) -> TheoryResult<Interval> {
        let number = (high.tone_index() - low.tone_index() + 1) as u32;
        let halves = (number as i32 - 1) * 2 - (high.midi() - low.midi());
        let quality = Interval::quality_from_halves(number, halves)?;
        Interval::new(number, quality, false)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = accidental_token(self.accidental).unwrap_or("?");
        write!(f, "{}{}{}", self.letter, token, self.octave)
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.midi().cmp(&other.midi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Quality;

    #[test]
    fn parse_round_trips() {
        for notation in ["C5", "Ab5", "F#-1", "Cx4", "Bbb3"] {
            let parsed = Note::parse(notation).expect("parses");
            assert_eq!(parsed.to_string(), notation);
        }
    }

    #[test]
    fn subtraction_spells_diminished_fifth() {
        let ab5 = Note::parse("Ab5").expect("parses");
        let ds5 = Note::parse("D#5").expect("parses");
        let interval = ab5.sub_note(&ds5).expect("valid interval");
        assert_eq!(interval, Interval::new(5, Quality::DoublyDiminished, false).expect("valid"));
    }

    #[test]
    fn add_then_subtract_round_trips() {
        let c5 = Note::parse("C5").expect("parses");
        let m3 = Interval::parse("M3").expect("parses");
        let e5 = c5.add_interval(&m3).expect("valid note");
        assert_eq!(e5.to_string(), "E5");
        let back = e5.sub_note(&c5).expect("valid interval");
        assert_eq!(back.semitones(), m3.semitones());
    }

    #[test]
    fn add_inverted_interval_equals_subtract() {
        let g5 = Note::parse("G5").expect("parses");
        let m3 = Interval::parse("M3").expect("parses");
        let down = g5.add_interval(&m3.invert()).expect("valid note");
        assert_eq!(down.to_string(), "Eb5");
    }

    #[test]
    fn add_octaves_preserves_spelling() {
        let ab5 = Note::parse("Ab5").expect("parses");
        let ab7 = ab5.add_octaves(2).expect("valid note");
        assert_eq!(ab7.to_string(), "Ab7");
    }

    #[test]
    fn pitch_class_ignores_octave_and_spelling() {
        let cs5 = Note::parse("C#5").expect("parses");
        let db7 = Note::parse("Db7").expect("parses");
        assert_eq!(cs5.pitch_class(), db7.pitch_class());
    }

    #[test]
    fn ordering_is_by_midi() {
        let c5 = Note::parse("C5").expect("parses");
        let d5 = Note::parse("D5").expect("parses");
        assert!(c5 < d5);
    }

    #[test]
    fn enharmonically_equal_notes_compare_equal() {
        let cs5 = Note::parse("C#5").expect("parses");
        let db5 = Note::parse("Db5").expect("parses");
        assert_eq!(cs5, db5);
        assert_eq!(cs5.cmp(&db5), core::cmp::Ordering::Equal);

        let mut set = std::collections::HashSet::new();
        set.insert(cs5);
        assert!(set.contains(&db5));
    }
}
