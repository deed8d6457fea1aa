//! Diatonic scales: a tonic plus a mode, with roman-numeral chord lookup,
//! voice-leading transitions, and tension-note tables.

use std::collections::HashMap;

use crate::chord::{Chord, Tag};
use crate::errors::{TheoryError, TheoryResult};
use crate::interval::{Interval, Quality};
use crate::note::Note;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A scale degree, `I` through `VII`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Degree {
    /// I
    I,
    /// II
    Ii,
    /// III
    Iii,
    /// IV
    Iv,
    /// V
    V,
    /// VI
    Vi,
    /// VII
    Vii,
}

impl Degree {
    const ALL: [Self; 7] = [Self::I, Self::Ii, Self::Iii, Self::Iv, Self::V, Self::Vi, Self::Vii];

    /// One-based scale degree index.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::I => 1,
            Self::Ii => 2,
            Self::Iii => 3,
            Self::Iv => 4,
            Self::V => 5,
            Self::Vi => 6,
            Self::Vii => 7,
        }
    }

    /// Zero-based scale-degree index (`I` is `0`, `VII` is `6`).
    #[must_use]
    pub const fn zero_based(self) -> u8 {
        self.index() as u8 - 1
    }

    /// The degree at a zero-based index (taken mod 7).
    #[must_use]
    pub fn from_zero_based(index: u8) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    const fn token(self) -> &'static str {
        match self {
            Self::I => "i",
            Self::Ii => "ii",
            Self::Iii => "iii",
            Self::Iv => "iv",
            Self::V => "v",
            Self::Vi => "vi",
            Self::Vii => "vii",
        }
    }

    fn from_token(token: &str) -> TheoryResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.token() == token)
            .ok_or_else(|| TheoryError::Parse(format!("'{token}' is not a roman numeral")))
    }
}

/// A roman-numeral chord label: diatonic degree (optionally a seventh
/// chord), or a secondary dominant applied to another degree (`v7/X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RomanNumeral {
    /// A diatonic chord built on `degree`.
    Diatonic {
        /// The degree the chord is built on.
        degree: Degree,
        /// Whether a seventh is included.
        seventh: bool,
    },
    /// An applied dominant-seventh chord resolving to `of`.
    SecondaryDominant {
        /// The degree this dominant resolves to.
        of: Degree,
    },
}

impl RomanNumeral {
    /// Longest-match tokens are unambiguous here since every degree has a
    /// distinct spelling, so a straightforward prefix/suffix parse suffices.
    pub fn parse(notation: &str) -> TheoryResult<Self> {
        let lower = notation.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("v7/") {
            let of = Degree::from_token(rest)?;
            return Ok(Self::SecondaryDominant { of });
        }
        let (base, seventh) = match lower.strip_suffix('7') {
            Some(base) => (base, true),
            None => (lower.as_str(), false),
        };
        let degree = Degree::from_token(base)?;
        Ok(Self::Diatonic { degree, seventh })
    }

    /// Strip the seventh flag, the form voice-leading transitions key on.
    #[must_use]
    fn sanitized(self) -> Self {
        match self {
            Self::Diatonic { degree, .. } => Self::Diatonic { degree, seventh: false },
            secondary => secondary,
        }
    }
}

/// A scale's diatonic mode, each with its own interval ladder, transition
/// table, and tension-note palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// The major (Ionian) scale.
    Major,
    /// Natural minor (Aeolian), with a raised-seventh dominant triad.
    NaturalMinor,
    /// Major restricted to the I-IV-V subset, for simple harmonizations.
    SimpleMajor,
}

fn major_note_interval(degree: u32) -> Interval {
    let table = [
        Interval::new_unchecked(1, Quality::Perfect, false),
        Interval::new_unchecked(2, Quality::Major, false),
        Interval::new_unchecked(3, Quality::Major, false),
        Interval::new_unchecked(4, Quality::Perfect, false),
        Interval::new_unchecked(5, Quality::Perfect, false),
        Interval::new_unchecked(6, Quality::Major, false),
        Interval::new_unchecked(7, Quality::Major, false),
    ];
    table[(degree - 1) as usize]
}

fn natural_minor_note_interval(degree: u32) -> Interval {
    let table = [
        Interval::new_unchecked(1, Quality::Perfect, false),
        Interval::new_unchecked(2, Quality::Major, false),
        Interval::new_unchecked(3, Quality::Minor, false),
        Interval::new_unchecked(4, Quality::Perfect, false),
        Interval::new_unchecked(5, Quality::Perfect, false),
        Interval::new_unchecked(6, Quality::Minor, false),
        Interval::new_unchecked(7, Quality::Minor, false),
    ];
    table[(degree - 1) as usize]
}

fn major_transitions() -> HashMap<Degree, Vec<Degree>> {
    use Degree::{I, Ii, Iii, Iv, V, Vi};
    HashMap::from([
        (I, vec![I, Iii, Vi, Ii, Iv, V]),
        (Ii, vec![Ii, Iii, V]),
        (Iii, vec![Iii, Vi, Ii, Iv]),
        (Iv, vec![Iv, I, Iii, Ii, V]),
        (V, vec![V, I, Iii, Vi]),
        (Vi, vec![Vi, Iii, Ii, Iv]),
    ])
}

fn simple_major_transitions() -> HashMap<Degree, Vec<Degree>> {
    use Degree::{I, Iv, V};
    HashMap::from([(I, vec![I, Iv, V]), (Iv, vec![I, Iv, V]), (V, vec![I, Iv, V])])
}

fn natural_minor_transitions() -> HashMap<Degree, Vec<Degree>> {
    use Degree::{I, Ii, Iii, Iv, V, Vi, Vii};
    HashMap::from([
        (I, vec![I, Ii, Iii, Iv, V, Vi, Vii]),
        (Ii, vec![Ii, Iii, V]),
        (Iii, vec![I, Ii, Iii, Iv, Vi]),
        (Iv, vec![I, Ii, Iv, V, Vii]),
        (V, vec![I, Iii, V, Vi]),
        (Vi, vec![Ii, Iv, V, Vi, Vii]),
        (Vii, vec![I, Iii, V, Vi, Vii]),
    ])
}

/// A tonic note plus a mode.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scale {
    tonic: Note,
    mode: Mode,
}

impl Scale {
    /// Construct a scale from a tonic note and a mode.
    #[must_use]
    pub const fn new(tonic: Note, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    /// Tonic note.
    #[must_use]
    pub const fn tonic(&self) -> Note {
        self.tonic
    }

    /// Mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    fn note_interval(&self, degree: u32) -> Interval {
        match self.mode {
            Mode::Major | Mode::SimpleMajor => major_note_interval(degree),
            Mode::NaturalMinor => natural_minor_note_interval(degree),
        }
    }

    /// Note at a (possibly > 7, wrapping through octaves) scale-degree index.
    pub fn note(&self, index: u32) -> TheoryResult<Note> {
        let octaves = (index - 1) / 7;
        let degree = ((index - 1) % 7) + 1;
        let interval = self.note_interval(degree);
        let shifted = Interval::new(interval.number() + 7 * octaves, interval.quality(), interval.is_inverted())?;
        self.tonic.add_interval(&shifted)
    }

    /// Triad (or seventh chord) built on a roman numeral.
    pub fn diatonic(&self, numeral: RomanNumeral) -> TheoryResult<Vec<Note>> {
        match numeral {
            RomanNumeral::Diatonic { degree, seventh } => {
                if degree == Degree::V && self.mode == Mode::NaturalMinor {
                    // Harmonic-minor dominant: raise the leading tone regardless
                    // of whether a seventh was requested.
                    return Ok(vec![self.note(5)?, self.note(7)?.sharp()?, self.note(9)?]);
                }
                let base = degree.index();
                let mut notes = vec![self.note(base)?, self.note(base + 2)?, self.note(base + 4)?];
                if seventh {
                    notes.push(self.note(base + 6)?);
                }
                Ok(notes)
            }
            RomanNumeral::SecondaryDominant { of } => self.secondary_dominant(of, 0),
        }
    }

    /// An applied dominant-seventh chord resolving to `of`, optionally
    /// extended further around the circle of fifths by `extend` steps.
    ///
    /// The chord root is respelled to `of`'s bare letter at the scale's own
    /// octave before realization, matching the reference implementation's
    /// handling of applied dominants (the root's accidental and octave from
    /// the scale-degree walk are not carried into the final chord).
    pub fn secondary_dominant(&self, of: Degree, extend: u32) -> TheoryResult<Vec<Note>> {
        let perfect_fifth = Interval::new(5, Quality::Perfect, false)?;
        let mut root = self.note(of.index() + 5)?.add_interval(&perfect_fifth)?;
        for _ in 0..extend {
            root = root.add_interval(&perfect_fifth)?;
        }
        let chord = Chord::new(root.letter(), [Tag::Major, Tag::Seventh].into_iter().collect());
        chord.realize(self.tonic.octave())
    }

    /// Parse and realize a roman-numeral chord symbol.
    pub fn chord(&self, notation: &str) -> TheoryResult<Vec<Note>> {
        self.diatonic(RomanNumeral::parse(notation)?)
    }

    /// Roman numerals this mode recognizes.
    #[must_use]
    pub fn possible_numbers(&self) -> Vec<RomanNumeral> {
        use Degree::{I, Ii, Iii, Iv, V, Vi, Vii};
        match self.mode {
            Mode::Major => [I, Ii, Iii, Iv, V, Vi]
                .into_iter()
                .map(|degree| RomanNumeral::Diatonic { degree, seventh: false })
                .chain([Ii, Iii, Iv, V, Vi].into_iter().map(|of| RomanNumeral::SecondaryDominant { of }))
                .collect(),
            Mode::SimpleMajor => {
                [I, Iv, V].into_iter().map(|degree| RomanNumeral::Diatonic { degree, seventh: false }).collect()
            }
            Mode::NaturalMinor => [I, Ii, Iii, Iv, V, Vi, Vii]
                .into_iter()
                .map(|degree| RomanNumeral::Diatonic { degree, seventh: false })
                .chain([Iii, Iv, V, Vi, Vii].into_iter().map(|of| RomanNumeral::SecondaryDominant { of }))
                .collect(),
        }
    }

    /// Cadential degrees (always `{I, V}` in this kernel's modes).
    #[must_use]
    pub fn possible_cadences(&self) -> Vec<Degree> {
        vec![Degree::I, Degree::V]
    }

    fn transitions(&self) -> HashMap<Degree, Vec<Degree>> {
        match self.mode {
            Mode::Major => major_transitions(),
            Mode::SimpleMajor => simple_major_transitions(),
            Mode::NaturalMinor => natural_minor_transitions(),
        }
    }

    /// Whether a voice-leading move from `a` to `b` is permitted.
    ///
    /// Secondary dominants resolve freely to their target (`v7/X -> X`) and
    /// may hold (`v7/X -> v7/X`); otherwise a dominant may substitute for
    /// its target wherever the target itself could go.
    #[must_use]
    pub fn is_transitable(&self, a: RomanNumeral, b: RomanNumeral) -> bool {
        let a = a.sanitized();
        let b = b.sanitized();
        let transitions = self.transitions();
        match (a, b) {
            (RomanNumeral::SecondaryDominant { of }, _) => {
                b == RomanNumeral::Diatonic { degree: of, seventh: false } || b == a
            }
            (RomanNumeral::Diatonic { degree: a_degree, .. }, RomanNumeral::SecondaryDominant { of }) => {
                transitions.get(&a_degree).is_some_and(|targets| targets.contains(&of))
            }
            (RomanNumeral::Diatonic { degree: a_degree, .. }, RomanNumeral::Diatonic { degree: b_degree, .. }) => {
                transitions.get(&a_degree).is_some_and(|targets| targets.contains(&b_degree))
            }
        }
    }

    fn tension_key(numeral: RomanNumeral) -> (bool, Degree) {
        match numeral.sanitized() {
            RomanNumeral::Diatonic { degree, .. } => (false, degree),
            RomanNumeral::SecondaryDominant { of } => (true, of),
        }
    }

    /// Primary available tension notes (absolute pitches) above the chord's root.
    pub fn available_tension_note_primary(&self, numeral: RomanNumeral) -> TheoryResult<Vec<Note>> {
        self.tension_notes(numeral, true)
    }

    /// Secondary (rarer) available tension notes above the chord's root.
    pub fn available_tension_note_secondary(&self, numeral: RomanNumeral) -> TheoryResult<Vec<Note>> {
        self.tension_notes(numeral, false)
    }

    /// All available tension notes, primary followed by secondary.
    pub fn available_tension_note(&self, numeral: RomanNumeral) -> TheoryResult<Vec<Note>> {
        let mut primary = self.available_tension_note_primary(numeral)?;
        primary.extend(self.available_tension_note_secondary(numeral)?);
        Ok(primary)
    }

    fn tension_notes(&self, numeral: RomanNumeral, primary: bool) -> TheoryResult<Vec<Note>> {
        let (is_secondary_dominant, degree) = Self::tension_key(numeral);
        let intervals = match self.mode {
            Mode::Major | Mode::SimpleMajor => major_tension_table(is_secondary_dominant, degree, primary),
            Mode::NaturalMinor => natural_minor_tension_table(is_secondary_dominant, degree, primary),
        };
        let base = match numeral.sanitized() {
            RomanNumeral::Diatonic { degree, .. } => self.note(degree.index())?,
            RomanNumeral::SecondaryDominant { of } => self.note(of.index() + 5)?,
        };
        intervals.into_iter().map(|interval| base.add_interval(&interval)).collect()
    }
}

fn m9() -> Interval {
    Interval::new_unchecked(9, Quality::Minor, false)
}
fn maj9() -> Interval {
    Interval::new_unchecked(9, Quality::Major, false)
}
fn a9() -> Interval {
    Interval::new_unchecked(9, Quality::Augmented, false)
}
fn p11() -> Interval {
    Interval::new_unchecked(11, Quality::Perfect, false)
}
fn a11() -> Interval {
    Interval::new_unchecked(11, Quality::Augmented, false)
}
fn m13() -> Interval {
    Interval::new_unchecked(13, Quality::Minor, false)
}
fn maj13() -> Interval {
    Interval::new_unchecked(13, Quality::Major, false)
}

fn major_tension_table(is_secondary_dominant: bool, degree: Degree, primary: bool) -> Vec<Interval> {
    use Degree::{I, Ii, Iii, Iv, V, Vi, Vii};
    if is_secondary_dominant {
        match (degree, primary) {
            (Ii, true) => vec![m9(), maj9(), a9(), m13()],
            (Ii, false) => vec![a11(), maj13()],
            (Iii, true) => vec![m9(), a9(), m13()],
            (Iii, false) => vec![a11()],
            (Iv, true) => vec![maj9(), maj13()],
            (Iv, false) => vec![m9(), a9(), a11(), m13()],
            (V, true) => vec![maj9(), maj13()],
            (V, false) => vec![m9(), a9(), a11(), m13()],
            (Vi, true) => vec![m9(), a9(), m13()],
            (Vi, false) => vec![maj9(), a11()],
            _ => vec![],
        }
    } else {
        match (degree, primary) {
            (I, true) => vec![maj9(), maj13()],
            (I, false) => vec![a11()],
            (Ii, true) => vec![maj9(), p11()],
            (Ii, false) => vec![],
            (Iii, true) => vec![p11()],
            (Iii, false) => vec![maj9()],
            (Iv, true) => vec![maj9(), a11(), maj13()],
            (Iv, false) => vec![],
            (V, true) => vec![maj9(), maj13()],
            (V, false) => vec![m9(), a9(), a11(), m13()],
            (Vi, true) => vec![maj9(), p11()],
            (Vi, false) => vec![maj13()],
            (Vii, true) => vec![p11(), m13()],
            (Vii, false) => vec![],
        }
    }
}

fn natural_minor_tension_table(is_secondary_dominant: bool, degree: Degree, primary: bool) -> Vec<Interval> {
    use Degree::{I, Ii, Iii, Iv, V, Vi, Vii};
    if is_secondary_dominant {
        match (degree, primary) {
            (Iii, true) => vec![maj9(), maj13()],
            (Iii, false) => vec![m9(), a11(), m13()],
            (Iv, true) => vec![m9(), maj9(), a9(), m13()],
            (Iv, false) => vec![a11(), maj13()],
            (V, true) => vec![m9(), a9(), m13()],
            (V, false) => vec![a11()],
            (Vi, true) => vec![maj9(), maj13()],
            (Vi, false) => vec![m9(), a11(), m13()],
            (Vii, true) => vec![maj9(), a9(), maj13()],
            (Vii, false) => vec![m9(), a9(), m13()],
            _ => vec![],
        }
    } else {
        match (degree, primary) {
            (I, true) => vec![maj9(), p11()],
            (I, false) => vec![maj13()],
            (Ii, true) => vec![p11(), m13()],
            (Ii, false) => vec![],
            (Iii, true) => vec![maj9(), maj13()],
            (Iii, false) => vec![a11()],
            (Iv, true) => vec![maj9(), p11(), maj13()],
            (Iv, false) => vec![],
            (V, true) => vec![m9(), a9(), m13()],
            (V, false) => vec![maj9(), a11()],
            (Vi, true) => vec![maj9(), a9(), maj13()],
            (Vi, false) => vec![],
            (Vii, true) => vec![maj9(), maj13()],
            (Vii, false) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_major() -> Scale {
        Scale::new(Note::parse("C5").expect("parses"), Mode::Major)
    }

    fn a_natural_minor() -> Scale {
        Scale::new(Note::parse("A4").expect("parses"), Mode::NaturalMinor)
    }

    #[test]
    fn major_one_chord_is_triad() {
        let scale = c_major();
        let notes = scale.chord("i").expect("valid numeral");
        let rendered: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["C5", "E5", "G5"]);
    }

    #[test]
    fn natural_minor_v_is_raised_major_triad() {
        let scale = a_natural_minor();
        let notes = scale.chord("v").expect("valid numeral");
        let rendered: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["E5", "G#5", "B5"]);
    }

    #[test]
    fn secondary_dominant_resolves_to_its_target() {
        let scale = c_major();
        let ii = RomanNumeral::Diatonic { degree: Degree::Ii, seventh: false };
        let v_of_ii = RomanNumeral::SecondaryDominant { of: Degree::Ii };
        assert!(scale.is_transitable(v_of_ii, ii));
    }

    #[test]
    fn is_transitable_respects_diatonic_table() {
        let scale = c_major();
        let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
        let vii = RomanNumeral::Diatonic { degree: Degree::Vii, seventh: false };
        assert!(!scale.is_transitable(i, vii));
    }
}
