use music_theory::chord::Chord;
use music_theory::note::Note;
use music_theory::scale::{Degree, Mode, RomanNumeral, Scale};

#[test]
fn note_subtraction_matches_known_spellings() {
    let cases = [
        ("D5", "Bb4", "M3"),
        ("D#6", "F5", "A6"),
        ("D6", "E5", "m7"),
        ("Fb5", "Ab4", "m6"),
        ("G6", "A#5", "d7"),
        ("Ab5", "D#5", "dd5"),
    ];
    for (top, base, interval) in cases {
        let top = Note::parse(top).expect("valid note");
        let base = Note::parse(base).expect("valid note");
        let result = top.sub_note(&base).expect("valid interval");
        assert_eq!(result.to_string(), interval, "{top} - {base}");
    }
}

#[test]
fn note_addition_matches_known_spellings() {
    let cases = [
        ("D5", "Bb4", "M3"),
        ("D#6", "F5", "A6"),
        ("D6", "E5", "m7"),
        ("Fb5", "Ab4", "m6"),
        ("G6", "A#5", "d7"),
        ("Ab5", "D#5", "dd5"),
    ];
    for (top, base, interval) in cases {
        let base_note = Note::parse(base).expect("valid note");
        let interval = music_theory::interval::Interval::parse(interval).expect("valid interval");
        let result = base_note.add_interval(&interval).expect("valid note");
        assert_eq!(result.to_string(), top);
    }
}

#[test]
fn chord_realizations_match_reference_table() {
    let cases: &[(&str, &[&str])] = &[
        ("C", &["C5", "E5", "G5"]),
        ("Cmaj", &["C5", "E5", "G5"]),
        ("Cm", &["C5", "Eb5", "G5"]),
        ("C-", &["C5", "Eb5", "G5"]),
        ("Caug", &["C5", "E5", "G#5"]),
        ("C+", &["C5", "E5", "G#5"]),
        ("Cdim", &["C5", "Eb5", "Gb5"]),
        ("Co", &["C5", "Eb5", "Gb5"]),
        ("C7", &["C5", "E5", "G5", "Bb5"]),
        ("Cdom", &["C5", "E5", "G5", "Bb5"]),
        ("CM7", &["C5", "E5", "G5", "B5"]),
        ("Csus2", &["C5", "D5", "G5"]),
        ("Csus4", &["C5", "F5", "G5"]),
        ("Cdimsus4M7", &["C5", "F5", "Gb5", "B5"]),
    ];
    for (notation, expected) in cases {
        let chord = Chord::parse(notation).expect("valid chord");
        let rendered: Vec<String> = chord.realize(5).expect("realizes").iter().map(ToString::to_string).collect();
        assert_eq!(rendered, *expected, "{notation}");
    }
}

#[test]
fn scale_secondary_dominant_resolves_and_is_transitable() {
    let scale = Scale::new(Note::parse("C5").expect("valid note"), Mode::Major);
    let dominant_of_v = scale.chord("v7/v").expect("valid numeral");
    let rendered: Vec<String> = dominant_of_v.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["B5", "D#6", "F#6", "A6"]);

    let v7_of_v = RomanNumeral::SecondaryDominant { of: Degree::V };
    let v = RomanNumeral::Diatonic { degree: Degree::V, seventh: false };
    assert!(scale.is_transitable(v7_of_v, v));
}

#[test]
fn simple_major_scale_restricts_numerals() {
    let scale = Scale::new(Note::parse("F4").expect("valid note"), Mode::SimpleMajor);
    let numerals = scale.possible_numbers();
    assert_eq!(numerals.len(), 3);
}
