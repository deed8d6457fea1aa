//! Lay out a motive pattern (`"AABA"`) into a flat melody, generating one
//! rhythm per distinct letter and reusing it for every occurrence.

use std::collections::HashMap;

use music_theory::{Mode, Note};
use music_time::RhythmicProgression;
use rand::Rng;

use crate::errors::MelodyResult;
use crate::melody::{Melody, MotiveOccurrence};
use crate::rhythm_synth::generate_rhythm;

/// Bars generated per motive rune, and beats per bar (4/4 throughout).
const MOTIVE_BARS: u32 = 2;
const BEATS_PER_BAR: f64 = 4.0;

/// Build the initial melody for `pattern` (e.g. `"AABA"`): one generated
/// rhythm per distinct letter, concatenated in pattern order, every note
/// starting on the tonic degree.
pub fn build_skeleton(mode: Mode, tonic: Note, pattern: &str, rng: &mut impl Rng) -> MelodyResult<Melody> {
    let mut rhythms: HashMap<char, RhythmicProgression<music_theory::Degree>> = HashMap::new();
    let mut progression = RhythmicProgression::new();
    let mut layout = Vec::new();

    for letter in pattern.chars() {
        if !rhythms.contains_key(&letter) {
            let rhythm = generate_rhythm(f64::from(MOTIVE_BARS) * BEATS_PER_BAR, rng)?;
            rhythms.insert(letter, rhythm);
        }
        let rhythm = &rhythms[&letter];
        let start = progression.len();
        for (degree, duration, _onset) in rhythm.iter() {
            progression.push(*degree, duration);
        }
        layout.push(MotiveOccurrence { letter, notes: start..progression.len() });
    }

    Ok(Melody::new(mode, tonic, progression, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::Letter;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn occurrences_of_the_same_letter_share_note_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let tonic = Note::new(Letter::C, 0, 5).expect("valid note");
        let melody = build_skeleton(Mode::Major, tonic, "AABA", &mut rng).expect("feasible");
        let counts: Vec<usize> = melody.layout().iter().map(|occ| occ.notes.len()).collect();
        assert_eq!(counts[0], counts[1]);
        assert_eq!(counts[0], counts[3]);
    }
}
