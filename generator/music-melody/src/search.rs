//! Phase 3: stochastic hill-climbing over scale-degree assignments.

use music_theory::Degree;
use rand::Rng;

use crate::constraints::{total_cost, Constraint};
use crate::melody::Melody;

const ITERS: u32 = 50;
const NUM_MUTANTS: u32 = 128;
const MAX_MUTATIONS_PER_CANDIDATE: u32 = 8;

fn mutate(melody: &Melody, rng: &mut impl Rng) -> Melody {
    let mut mutant = melody.clone();
    let mutation_count = rng.random_range(1..=MAX_MUTATIONS_PER_CANDIDATE);
    for _ in 0..mutation_count {
        let index = rng.random_range(0..mutant.len());
        let degree = Degree::from_zero_based(rng.random_range(0u8..7));
        mutant.assign_scale_degree(index, degree);
    }
    mutant
}

/// Run the search loop: each trial samples `NUM_MUTANTS` candidates and
/// keeps the lowest-cost one, with the current melody itself always in
/// the running (so the objective never increases, and ties favor keeping
/// the current melody over a mutant).
#[must_use]
pub fn search(mut melody: Melody, constraints: &[Constraint], rng: &mut impl Rng) -> Melody {
    let mut best_cost = total_cost(&melody, constraints);
    for _ in 0..ITERS {
        for _ in 0..NUM_MUTANTS {
            let candidate = mutate(&melody, rng);
            let cost = total_cost(&candidate, constraints);
            if cost < best_cost {
                best_cost = cost;
                melody = candidate;
            }
        }
    }
    melody
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::build_constraints;
    use crate::skeleton::build_skeleton;
    use music_theory::{Letter, Mode, Note};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn search_never_increases_the_objective() {
        let mut rng = StdRng::seed_from_u64(3);
        let tonic = Note::new(Letter::C, 0, 5).expect("valid note");
        let skeleton = build_skeleton(Mode::Major, tonic, "AABA", &mut rng).expect("feasible");
        let constraints = build_constraints(&skeleton, 0.0, 1.0);
        let start_cost = total_cost(&skeleton, &constraints);
        let result = search(skeleton, &constraints, &mut rng);
        let end_cost = total_cost(&result, &constraints);
        assert!(end_cost <= start_cost);
    }
}
