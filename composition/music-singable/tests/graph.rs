use music_singable::{multi_key, ArpeggioOutliers, Key, Singable};
use music_theory::{Interval, Letter, Note, Quality};

fn note(letter: Letter, accidental: i32, octave: i32) -> Note {
    Note::new(letter, accidental, octave).expect("valid note")
}

#[test]
fn repeat_advances_by_the_previous_groups_span_without_an_interval() {
    let c5 = note(Letter::C, 0, 5);
    let motif = Singable::Key(Key::note(0.0, 1.5, c5, 0, 0.8));
    let graph = Singable::repeat(motif, 3, None);
    let keys = graph.sing().expect("sings");
    let starts: Vec<f64> = keys.iter().map(|k| k.start).collect();
    assert_eq!(starts, vec![0.0, 1.5, 3.0]);
}

#[test]
fn select_time_applies_its_function_only_inside_the_window() {
    let c5 = note(Letter::C, 0, 5);
    let notes = Singable::enumerate(
        vec![
            vec![Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8))],
            vec![Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8))],
            vec![Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8))],
        ],
        None,
    );
    let octave_up = Interval::new(8, Quality::Perfect, false).expect("valid interval");
    let func: music_singable::KeyFn = std::rc::Rc::new(move |key: Key| {
        let transposed = key.note.map(|n| n.add_interval(&octave_up)).transpose()?;
        Ok(vec![key.with_note(transposed)])
    });
    let graph = Singable::select_time(notes, 1.0, 1.0, func);
    let keys = graph.sing().expect("sings");
    assert_eq!(keys[0].note, Some(c5));
    assert_eq!(keys[1].note, Some(note(Letter::C, 0, 6)));
    assert_eq!(keys[2].note, Some(c5));
}

#[test]
fn arpeggio_loop_outlier_wraps_through_the_chord() {
    let c5 = note(Letter::C, 0, 5);
    let e5 = note(Letter::E, 0, 5);
    let g5 = note(Letter::G, 0, 5);
    let chord_notes = [c5, e5, g5];
    let chord = Singable::parallel(multi_key(0.0, 4.0, &chord_notes, 0, 0.8));

    let pattern = Singable::enumerate(
        (0..6)
            .map(|i| {
                let offset = note(Letter::C, 0, 5 + i / 3);
                vec![Singable::Key(Key::note(0.0, 1.0, offset, 0, 0.9))]
            })
            .collect(),
        None,
    );
    let graph = Singable::arpeggio(chord, pattern, ArpeggioOutliers::Loop, music_singable::DEFAULT_ARPEGGIO_OFFSET);
    let keys = graph.sing().expect("sings");
    assert_eq!(keys.len(), 6);
    assert_eq!(keys[0].note, Some(c5));
    assert_eq!(keys[3].note, Some(c5));
}

#[test]
fn harmonize_then_transpose_composes_pitch_shifts() {
    let c5 = note(Letter::C, 0, 5);
    let fifth = Interval::new(5, Quality::Perfect, false).expect("valid interval");
    let key = Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8));
    let harmonized = Singable::harmonize(key, fifth);
    let up = Interval::new(2, Quality::Major, false).expect("valid interval");
    let graph = Singable::transpose(harmonized, up);
    let keys = graph.sing().expect("sings");
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].note, Some(note(Letter::D, 0, 5)));
    assert_eq!(keys[1].note, Some(note(Letter::A, 0, 5)));
}
