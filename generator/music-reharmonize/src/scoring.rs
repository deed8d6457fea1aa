//! Windowed melody scoring against a candidate chord.

use music_singable::Key;
use music_theory::{RomanNumeral, Scale, TheoryResult};

/// Per-tier scores, root/third highest, dissonance penalized.
const SCORE_CONSONANCE: f64 = 1.0;
const SCORE_FIFTH: f64 = 0.5;
const SCORE_PRIMARY: f64 = 0.25;
const SCORE_SECONDARY: f64 = 0.125;
const SCORE_DISSONANCE: f64 = -1.0;

/// Clip `melody` to `[start, start + length)`, truncating partially-overlapping
/// keys. A key that spans the whole window on both sides is dropped rather
/// than clipped twice; not one of the named fixes, so this keeps the
/// original's behavior.
pub(crate) fn slice_melody(melody: &[Key], start: f64, length: f64) -> Vec<Key> {
    let end = start + length;
    let mut out = Vec::new();
    for &k in melody {
        let k_end = k.end();
        if k.start >= start && k_end <= end {
            out.push(k);
        } else if k.start >= start && k.start < end && k_end > end {
            out.push(k.with_length(start + length - k.start));
        } else if k.start < start && k_end > start && k_end <= end {
            out.push(k.with_start(start).with_length(k.start + k.length - start));
        }
    }
    out
}

fn pitch_class_member(notes: &[music_theory::Note], note: music_theory::Note) -> bool {
    notes.iter().any(|n| n.pitch_class() == note.pitch_class())
}

/// Score how well `window` (already clipped, rests discarded) fits `numeral`,
/// weighted by each key's length. Empty windows score `0.0`.
pub(crate) fn score_window(scale: &Scale, window: &[Key], numeral: RomanNumeral) -> TheoryResult<f64> {
    if window.is_empty() {
        return Ok(0.0);
    }
    let base = scale.diatonic(numeral)?;
    let primary = scale.available_tension_note_primary(numeral)?;
    let secondary = scale.available_tension_note_secondary(numeral)?;
    let triad = &base[..2.min(base.len())];
    let extensions = &base[2.min(base.len())..];

    let mut weighted_total = 0.0;
    let mut weight_total = 0.0;
    for key in window {
        let Some(note) = key.note else { continue };
        let weight = key.length;
        let score = if pitch_class_member(triad, note) {
            SCORE_CONSONANCE
        } else if pitch_class_member(extensions, note) {
            SCORE_FIFTH
        } else if pitch_class_member(&primary, note) {
            SCORE_PRIMARY
        } else if pitch_class_member(&secondary, note) {
            SCORE_SECONDARY
        } else {
            SCORE_DISSONANCE
        };
        weighted_total += score * weight;
        weight_total += weight;
    }
    if weight_total == 0.0 {
        return Ok(0.0);
    }
    Ok(weighted_total / weight_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::{Degree, Letter, Mode, Note};

    fn c_major() -> Scale {
        Scale::new(Note::new(Letter::C, 0, 5).expect("valid note"), Mode::Major)
    }

    #[test]
    fn root_note_scores_full_consonance() {
        let scale = c_major();
        let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
        let window = [Key::note(0.0, 4.0, c5, 0, 0.8)];
        let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
        let score = score_window(&scale, &window, i).expect("valid numeral");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn non_chord_tone_scores_dissonance() {
        let scale = c_major();
        let db5 = Note::new(Letter::D, -1, 5).expect("valid note");
        let window = [Key::note(0.0, 4.0, db5, 0, 0.8)];
        let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
        let score = score_window(&scale, &window, i).expect("valid numeral");
        assert!((score - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn slice_melody_truncates_a_key_that_crosses_the_window_end() {
        let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
        let keys = [Key::note(0.0, 4.0, c5, 0, 0.8)];
        let sliced = slice_melody(&keys, 0.0, 2.0);
        assert_eq!(sliced.len(), 1);
        assert!((sliced[0].length - 2.0).abs() < 1e-9);
    }
}
