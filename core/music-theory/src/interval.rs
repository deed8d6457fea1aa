//! Diatonic interval algebra: number + quality + direction.
//!
//! An [`Interval`] is a diatonic distance, not a semitone count: `M3` and
//! `d4` both span four semitones but are spelled differently, and
//! `music-theory` keeps that distinction so [`crate::note::Note`] arithmetic
//! can round-trip through letter names. Two intervals are still considered
//! equal when their *signed* semitone counts agree (enharmonic equality of
//! distance, not of spelling).

use core::fmt;

use crate::errors::{TheoryError, TheoryResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval quality, ordered from most-diminished to most-augmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quality {
    /// Doubly diminished (`dd`).
    DoublyDiminished,
    /// Diminished (`d`).
    Diminished,
    /// Minor (`m`) — only legal on non-perfect-capable numbers.
    Minor,
    /// Perfect (`P`) — only legal on perfect-capable numbers.
    Perfect,
    /// Major (`M`) — only legal on non-perfect-capable numbers.
    Major,
    /// Augmented (`A`).
    Augmented,
    /// Doubly augmented (`AA`).
    DoublyAugmented,
}

impl Quality {
    const fn token(self) -> &'static str {
        match self {
            Self::DoublyDiminished => "dd",
            Self::Diminished => "d",
            Self::Minor => "m",
            Self::Perfect => "P",
            Self::Major => "M",
            Self::Augmented => "A",
            Self::DoublyAugmented => "AA",
        }
    }

    fn from_token(token: &str) -> TheoryResult<Self> {
        match token {
            "dd" => Ok(Self::DoublyDiminished),
            "d" => Ok(Self::Diminished),
            "m" => Ok(Self::Minor),
            "P" => Ok(Self::Perfect),
            "M" => Ok(Self::Major),
            "A" => Ok(Self::Augmented),
            "AA" => Ok(Self::DoublyAugmented),
            other => Err(TheoryError::Parse(format!("unknown interval quality '{other}'"))),
        }
    }

    /// Ordered perfect-family qualities, from most to least diminished.
    const PERFECT_FAMILY: [Self; 5] =
        [Self::DoublyDiminished, Self::Diminished, Self::Perfect, Self::Augmented, Self::DoublyAugmented];

    /// Ordered major-family qualities, from most to least diminished.
    const MAJOR_FAMILY: [Self; 6] = [
        Self::DoublyDiminished,
        Self::Diminished,
        Self::Minor,
        Self::Major,
        Self::Augmented,
        Self::DoublyAugmented,
    ];
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Whether a diatonic number (mod 7, with 8 folding to 1) only accepts the
/// perfect-family qualities `{dd, d, P, A, AA}`.
#[must_use]
fn is_potentially_perfect(number: u32) -> bool {
    let corrected = ((number - 1) % 7) + 1;
    matches!(corrected, 1 | 4 | 5)
}

/// Diatonic interval: number, quality, and ascending/descending direction.
///
/// Equality and hashing go by `semitones()`, not by spelling: `M3` and `d4`
/// are equal, since both span four semitones.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    number: u32,
    quality: Quality,
    inverted: bool,
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.semitones() == other.semitones()
    }
}

impl Eq for Interval {}

impl core::hash::Hash for Interval {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.semitones().hash(state);
    }
}

impl Interval {
    /// Construct an interval, validating that `quality` is legal for `number`.
    pub fn new(number: u32, quality: Quality, inverted: bool) -> TheoryResult<Self> {
        if number == 0 {
            return Err(TheoryError::DomainRange("interval number must be >= 1".into()));
        }
        Self::quality_offset(number, quality)?;
        Ok(Self { number, quality, inverted })
    }

    /// Diatonic number (unbounded, ≥ 1).
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Interval quality.
    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Whether this interval descends.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Perfect unison, the identity element under addition.
    #[must_use]
    pub fn unison() -> Self {
        Self { number: 1, quality: Quality::Perfect, inverted: false }
    }

    /// Build an interval from parts known in advance to be legal, skipping
    /// the quality/number compatibility check (used for fixed scale tables).
    pub(crate) const fn new_unchecked(number: u32, quality: Quality, inverted: bool) -> Self {
        Self { number, quality, inverted }
    }

    /// Parse `[-]QUALITYNUMBER`, e.g. `"-P8"`, `"M3"`, `"dd5"`.
    pub fn parse(notation: &str) -> TheoryResult<Self> {
        let (inverted, rest) = match notation.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, notation),
        };
        // Longest-match first so "AA"/"dd" aren't swallowed by "A"/"d".
        const TOKENS: [&str; 7] = ["AA", "dd", "M", "m", "A", "d", "P"];
        let token = TOKENS
            .iter()
            .find(|t| rest.starts_with(*t))
            .ok_or_else(|| TheoryError::Parse(format!("no interval quality in '{notation}'")))?;
        let quality = Quality::from_token(token)?;
        let digits = &rest[token.len()..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TheoryError::Parse(format!("expected a diatonic number in '{notation}'")));
        }
        let number: u32 =
            digits.parse().map_err(|_| TheoryError::Parse(format!("bad interval number in '{notation}'")))?;
        Self::new(number, quality, inverted)
    }

    fn quality_offset(number: u32, quality: Quality) -> TheoryResult<i32> {
        let fundamental = ((number - 1) % 7) + 1;
        if is_potentially_perfect(number) {
            let pos = Quality::PERFECT_FAMILY.iter().position(|q| *q == quality).ok_or_else(|| {
                TheoryError::DomainRange(format!(
                    "quality {quality} is not valid for diatonic number {number} (fundamental {fundamental})"
                ))
            })?;
            Ok(pos as i32 - 2)
        } else {
            let pos = Quality::MAJOR_FAMILY.iter().position(|q| *q == quality).ok_or_else(|| {
                TheoryError::DomainRange(format!(
                    "quality {quality} is not valid for diatonic number {number} (fundamental {fundamental})"
                ))
            })?;
            Ok(pos as i32 - 3)
        }
    }

    const FUNDAMENTAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

    /// Signed semitone distance (negative when [`Interval::is_inverted`]).
    #[must_use]
    pub fn semitones(&self) -> i32 {
        let fundamental = ((self.number - 1) % 7) + 1;
        let octaves = (self.number - 1) / 7;
        let offset =
            Self::quality_offset(self.number, self.quality).expect("constructed intervals always have a valid quality");
        let magnitude = 12 * octaves as i32 + Self::FUNDAMENTAL_SEMITONES[(fundamental - 1) as usize] + offset;
        if self.inverted { -magnitude } else { magnitude }
    }

    /// Return the inverted (opposite-direction) interval.
    #[must_use]
    pub const fn invert(&self) -> Self {
        Self { number: self.number, quality: self.quality, inverted: !self.inverted }
    }

    /// Reduce to the interval within a single octave, preserving direction.
    #[must_use]
    pub fn fundamental(&self) -> Self {
        let fundamental = ((self.number - 1) % 7) + 1;
        Self { number: fundamental, quality: self.quality, inverted: self.inverted }
    }

    /// Resolve a quality from a diatonic number and a signed "halves"
    /// residual, using the same lookup the kernel's [`crate::note::Note`]
    /// subtraction relies on.
    pub(crate) fn quality_from_halves(number: u32, halves: i32) -> TheoryResult<Quality> {
        let mut number = number;
        let mut halves = halves;
        while number > 7 {
            number -= 7;
            halves -= 2;
        }
        // Unlike `quality_offset`'s uniform per-family base, this reverse
        // lookup's zero point shifts by fundamental: 1-3 sit at -2, 4-7 at -1.
        let base: i32 = if number <= 3 { -2 } else { -1 };
        let family: &[Quality] = if is_potentially_perfect(number) {
            &[Quality::DoublyAugmented, Quality::Augmented, Quality::Perfect, Quality::Diminished, Quality::DoublyDiminished]
        } else {
            &[
                Quality::DoublyAugmented,
                Quality::Augmented,
                Quality::Major,
                Quality::Minor,
                Quality::Diminished,
                Quality::DoublyDiminished,
            ]
        };
        let offset = halves - base;
        usize::try_from(offset)
            .ok()
            .and_then(|offset| family.get(offset))
            .copied()
            .ok_or_else(|| TheoryError::DomainRange(format!("no interval quality for number {number} at offset {halves}")))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "-{}{}", self.quality, self.number)
        } else {
            write!(f, "{}{}", self.quality, self.number)
        }
    }
}
