use music_reharmonize::{ChordDag, ReharmonizeOptions};
use music_theory::{Degree, Letter, Mode, Note, RomanNumeral, Scale};

#[test]
fn a_restricted_chord_forces_that_numeral_with_zero_score() {
    let scale = Scale::new(Note::new(Letter::C, 0, 5).expect("valid note"), Mode::Major);
    let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
    let melody = music_singable::Singable::key(music_singable::Key::note(0.0, 4.0, c5, 0, 0.8));
    let v = RomanNumeral::Diatonic { degree: Degree::V, seventh: false };
    let options = ReharmonizeOptions { restrictions: music_reharmonize::Restrictions::new().with(0.0, v), ..ReharmonizeOptions::default() };
    let graph = music_reharmonize::reharmonize(&melody, &scale, &[4.0], &options).expect("melody sings");
    let keys = graph.sing().expect("sings");
    let root = Note::new(Letter::G, 0, 4).expect("valid note");
    assert!(keys.iter().any(|k| k.note == Some(root)));
}

#[test]
fn total_value_along_a_solved_path_equals_the_sum_of_actual_values() {
    let scale = Scale::new(Note::new(Letter::C, 0, 5).expect("valid note"), Mode::Major);
    let mut dag = ChordDag::new();
    let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
    let iv = RomanNumeral::Diatonic { degree: Degree::Iv, seventh: false };
    dag.add_node(i, 1.0, 0.0, 4.0);
    dag.add_node(iv, 1.0, 4.0, 4.0);
    let path = dag.solve(&scale);
    let expected: f64 = path.iter().map(|&idx| dag.nodes()[idx].actual_value()).sum();
    let last = *path.last().expect("non-empty path");
    assert!((dag.nodes()[last].total_value() - expected).abs() < 1e-9);
}
