//! Symbolic chords: a root letter plus a set of qualitative tags.
//!
//! Realization turns tags into scale-degree notes by precedence (triad tag
//! first, then sevenths, then `b5`, then suspensions last) rather than by
//! tag-insertion order, so `"Cdimsus4M7"` and a hand-built tag set realize
//! identically.

use std::collections::BTreeSet;

use crate::errors::{TheoryError, TheoryResult};
use crate::interval::{Interval, Quality};
use crate::note::{Letter, Note};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single qualitative tag on a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tag {
    /// Major triad (`M`, `Maj`, `maj`).
    Major,
    /// Minor triad (`m`, `min`, `-`).
    Minor,
    /// Augmented triad (`+`, `aug`).
    Augmented,
    /// Diminished triad (`o`, `dim`).
    Diminished,
    /// Suspended second (`sus2`).
    Sus2,
    /// Suspended fourth (`sus4`).
    Sus4,
    /// Flatted fifth (`b5`).
    FlatFive,
    /// Dominant seventh (`7`, `dom`).
    Seventh,
    /// Major seventh (`M7`, `maj7`).
    SeventhMajor,
}

impl Tag {
    const fn is_triad(self) -> bool {
        matches!(self, Self::Major | Self::Minor | Self::Augmented | Self::Diminished)
    }
}

/// Longest-match lexing table, tried longest-symbol-first.
const SYMBOLS: &[(&str, Tag)] = &[
    ("sus2", Tag::Sus2),
    ("sus4", Tag::Sus4),
    ("maj7", Tag::SeventhMajor),
    ("dom", Tag::Seventh),
    ("aug", Tag::Augmented),
    ("dim", Tag::Diminished),
    ("min", Tag::Minor),
    ("Maj", Tag::Major),
    ("maj", Tag::Major),
    ("M7", Tag::SeventhMajor),
    ("b5", Tag::FlatFive),
    ("m", Tag::Minor),
    ("M", Tag::Major),
    ("+", Tag::Augmented),
    ("o", Tag::Diminished),
    ("7", Tag::Seventh),
    ("-", Tag::Minor),
];

/// A symbolic chord: root letter plus a set of tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chord {
    root: Letter,
    tags: BTreeSet<Tag>,
}

impl Chord {
    /// Construct a chord from an explicit tag set.
    #[must_use]
    pub fn new(root: Letter, tags: BTreeSet<Tag>) -> Self {
        Self { root, tags }
    }

    /// Root letter.
    #[must_use]
    pub const fn root(&self) -> Letter {
        self.root
    }

    /// Tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Parse a chord symbol: a root letter followed by longest-match tags,
    /// e.g. `"Cdimsus4M7"`, `"Dm7"`, `"F#aug"`. No triad tag defaults to major.
    pub fn parse(notation: &str) -> TheoryResult<Self> {
        let mut chars = notation.chars();
        let first = chars.next().ok_or_else(|| TheoryError::Parse("empty chord".into()))?;
        let root = Letter::from_char(first)
            .map_err(|_| TheoryError::Parse(format!("'{first}' is not a valid chord root letter")))?;
        let mut rest: &str = &notation[first.len_utf8()..];
        let mut tags = BTreeSet::new();
        while !rest.is_empty() {
            let (token, tag) = SYMBOLS
                .iter()
                .find(|(token, _)| rest.starts_with(token))
                .ok_or_else(|| TheoryError::Parse(format!("unrecognized chord tag at '{rest}' in '{notation}'")))?;
            tags.insert(*tag);
            rest = &rest[token.len()..];
        }
        Ok(Self::new(root, tags))
    }

    /// Realize at `octave`, returning notes ascending by scale degree.
    pub fn realize(&self, octave: i32) -> TheoryResult<Vec<Note>> {
        let root_note = Note::new(self.root, 0, octave)?;
        let mut degrees: std::collections::BTreeMap<u32, Note> = std::collections::BTreeMap::new();
        degrees.insert(1, root_note);

        let third = |q: Quality| Interval::new(3, q, false);
        let fifth = |q: Quality| Interval::new(5, q, false);

        let has_triad = self.tags.iter().any(|t| t.is_triad());
        if self.tags.contains(&Tag::Major) || !has_triad {
            degrees.insert(3, root_note.add_interval(&third(Quality::Major)?)?);
            degrees.insert(5, root_note.add_interval(&fifth(Quality::Perfect)?)?);
        }
        if self.tags.contains(&Tag::Minor) {
            degrees.insert(3, root_note.add_interval(&third(Quality::Minor)?)?);
            degrees.insert(5, root_note.add_interval(&fifth(Quality::Perfect)?)?);
        }
        if self.tags.contains(&Tag::Augmented) {
            degrees.insert(3, root_note.add_interval(&third(Quality::Major)?)?);
            degrees.insert(5, root_note.add_interval(&fifth(Quality::Augmented)?)?);
        }
        if self.tags.contains(&Tag::Diminished) {
            degrees.insert(3, root_note.add_interval(&third(Quality::Minor)?)?);
            degrees.insert(5, root_note.add_interval(&fifth(Quality::Diminished)?)?);
        }
        if self.tags.contains(&Tag::Seventh) {
            degrees.insert(7, root_note.add_interval(&Interval::new(7, Quality::Minor, false)?)?);
        }
        if self.tags.contains(&Tag::SeventhMajor) {
            degrees.insert(7, root_note.add_interval(&Interval::new(7, Quality::Major, false)?)?);
        }
        if self.tags.contains(&Tag::FlatFive) {
            degrees.insert(5, root_note.add_interval(&fifth(Quality::Diminished)?)?);
        }
        if self.tags.contains(&Tag::Sus2) {
            degrees.remove(&3);
            degrees.insert(2, root_note.add_interval(&Interval::new(2, Quality::Major, false)?)?);
        }
        if self.tags.contains(&Tag::Sus4) {
            degrees.remove(&3);
            degrees.insert(4, root_note.add_interval(&Interval::new(4, Quality::Perfect, false)?)?);
        }

        Ok(degrees.into_values().collect())
    }

    /// Lilypond-style chord-symbol tag suffix (e.g. `"m7"`, `"dim"`), empty
    /// for an untagged major triad. Duration is not included here; callers
    /// own the length-notation token.
    #[must_use]
    pub fn to_lilypond_tag(&self) -> String {
        self.tags
            .iter()
            .filter_map(|tag| match tag {
                Tag::Seventh => Some("7"),
                Tag::SeventhMajor => Some("M7"),
                Tag::Minor => Some("m"),
                Tag::Diminished => Some("dim"),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realizes_diminished_sus4_major_seventh() {
        let chord = Chord::parse("Cdimsus4M7").expect("parses");
        let notes = chord.realize(5).expect("realizes");
        let rendered: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["C5", "F5", "Gb5", "B5"]);
    }

    #[test]
    fn default_triad_is_major() {
        let chord = Chord::parse("Csus2").expect("parses");
        let notes = chord.realize(4).expect("realizes");
        let rendered: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["C4", "D4", "G4"]);
    }

    #[test]
    fn minor_seventh_chord() {
        let chord = Chord::parse("Dm7").expect("parses");
        let notes = chord.realize(4).expect("realizes");
        let rendered: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["D4", "F4", "A4", "C5"]);
    }

    #[test]
    fn lilypond_tag_maps_dominant_seventh() {
        let chord = Chord::parse("Dm7").expect("parses");
        assert_eq!(chord.to_lilypond_tag(), "m7");
    }

    #[test]
    fn lilypond_tag_is_empty_for_a_plain_major_triad() {
        let chord = Chord::parse("C").expect("parses");
        assert_eq!(chord.to_lilypond_tag(), "");
    }
}
