use music_melody::generate;
use music_theory::{Letter, Mode, Note};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn motivic_repetition_pulls_a_occurrences_toward_equality() {
    let mut matches: u64 = 0;
    let trials: u64 = 20;
    for seed in 0..trials {
        let mut rng = StdRng::seed_from_u64(seed);
        let tonic = Note::new(Letter::C, 0, 5).expect("valid note");
        let melody = generate(Mode::Major, tonic, "AABA", 0.2, 0.8, &mut rng).expect("feasible");
        let occurrences: Vec<_> = melody.layout().iter().filter(|occ| occ.letter == 'A').collect();
        assert_eq!(occurrences.len(), 3);
        let degrees_of = |range: &std::ops::Range<usize>| -> Vec<_> {
            range.clone().map(|i| melody.degree(i)).collect()
        };
        let a0 = degrees_of(&occurrences[0].notes);
        let a1 = degrees_of(&occurrences[1].notes);
        if a0 == a1 {
            matches += 1;
        }
    }
    // Stochastic search is not guaranteed to fully converge every trial;
    // the constraint system should still make equality the common case.
    assert!(matches as f64 / f64::from(trials) >= 0.5, "only {matches}/{trials} trials converged");
}

#[test]
fn rhythm_totals_are_exact_across_many_seeds() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rhythm = music_melody::rhythm_synth::generate_rhythm(4.0, &mut rng).expect("feasible");
        assert!((rhythm.total_length() - 4.0).abs() < 1e-9);
    }
}
