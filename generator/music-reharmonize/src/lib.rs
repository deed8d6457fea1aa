//! Reharmonization: score every candidate chord against a melodic window at
//! several granularities, then pick the highest-scoring sequence whose
//! transitions are diatonically legal.

pub mod dag;
pub mod options;
mod scoring;

pub use dag::{ChordDag, ChordNode};
pub use options::{authored_number_advantage, ReharmonizeOptions, Restrictions};

use music_singable::{multi_key, Singable, SingableResult};
use music_theory::Scale;

/// Default velocity for an emitted chord key, matching the reference
/// implementation's `MultiKey` default.
const CHORD_VELOCITY: f64 = 0.75;

/// Reharmonize `melody` against `scale`: build a DAG of candidate chords at
/// every granularity in `granularity`, solve the longest diatonically-legal
/// path, and emit one multi-note chord per path node via `Enumerate`.
pub fn reharmonize(
    melody: &Singable,
    scale: &Scale,
    granularity: &[f64],
    options: &ReharmonizeOptions,
) -> SingableResult<Singable> {
    let melody_keys = melody.sing()?;
    let time_max = melody_keys.iter().map(music_singable::Key::end).fold(f64::MIN, f64::max).trunc();
    let numbers = scale.possible_numbers();

    let mut dag = ChordDag::new();
    for &granule in granularity {
        let mut timing = options.offset;
        while timing < time_max {
            if let Some(forced) = options.restrictions.get(timing) {
                dag.add_node(forced, 0.0, timing, granule);
            } else {
                let window = scoring::slice_melody(&melody_keys, timing, granule);
                let sounding: Vec<_> = window.into_iter().filter(|k| k.note.is_some()).collect();
                for &number in &numbers {
                    let mut score = scoring::score_window(scale, &sounding, number)?;
                    score += options.number_advantage.get(&number).copied().unwrap_or(0.0);
                    if on_cadence_boundary(timing, granule, options) && !is_cadential(scale, number) {
                        score -= options.cadence_penalty;
                    }
                    dag.add_node(number, score, timing, granule);
                }
            }
            timing += granule;
        }
    }

    let path = dag.solve(scale);
    let mut groups = Vec::with_capacity(path.len());
    for index in path {
        let node = &dag.nodes()[index];
        let chord = scale.diatonic(node.number)?;
        groups.push(multi_key(0.0, node.length, &chord, 0, CHORD_VELOCITY));
    }
    Ok(Singable::enumerate(groups, None))
}

fn on_cadence_boundary(timing: f64, granule: f64, options: &ReharmonizeOptions) -> bool {
    let elapsed = timing + granule - options.offset;
    let remainder = elapsed.rem_euclid(options.cadence_at);
    remainder.abs() < 1e-9 || (options.cadence_at - remainder).abs() < 1e-9
}

fn is_cadential(scale: &Scale, number: music_theory::RomanNumeral) -> bool {
    match number {
        music_theory::RomanNumeral::Diatonic { degree, seventh: false } => {
            scale.possible_cadences().contains(&degree)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_singable::Key;
    use music_theory::{Letter, Mode, Note};

    fn c_major() -> Scale {
        Scale::new(Note::new(Letter::C, 0, 5).expect("valid note"), Mode::Major)
    }

    #[test]
    fn reharmonizer_minimal_scenario() {
        let scale = Scale::new(Note::new(Letter::C, 0, 4).expect("valid note"), Mode::Major);
        let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
        let melody = Singable::key(Key::note(0.0, 4.0, c5, 0, 0.8));
        let options = ReharmonizeOptions::default();
        let graph = reharmonize(&melody, &scale, &[4.0], &options).expect("melody sings");
        let keys = graph.sing().expect("sings");

        let root = Note::new(Letter::C, 0, 4).expect("valid note");
        let third = Note::new(Letter::E, 0, 4).expect("valid note");
        let fifth = Note::new(Letter::G, 0, 4).expect("valid note");
        let mut notes: Vec<_> = keys.iter().filter_map(|k| k.note).collect();
        notes.sort();
        let mut expected = vec![root, third, fifth];
        expected.sort();
        assert_eq!(notes, expected);
        for key in &keys {
            assert!((key.length - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn output_covers_the_full_melody_contiguously() {
        let scale = c_major();
        let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
        let melody = Singable::key(Key::note(0.0, 8.0, c5, 0, 0.8));
        let options = ReharmonizeOptions::default();
        let graph = reharmonize(&melody, &scale, &[4.0], &options).expect("melody sings");
        let keys = graph.sing().expect("sings");
        let end = keys.iter().map(Key::end).fold(0.0_f64, f64::max);
        assert!((end - 8.0).abs() < 1e-9);
    }
}
