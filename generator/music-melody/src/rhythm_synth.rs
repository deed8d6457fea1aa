//! Phase 1: sample a rhythm that fills a requested number of beats exactly.

use music_theory::Degree;
use music_time::{Duration, RhythmicProgression};
use rand::Rng;

use crate::errors::{MelodyError, MelodyResult};

/// Fixed primitive rhythmic groups, each a run of atomic durations (in
/// beats) that always appear together.
const PRIMITIVES: &[&[f64]] =
    &[&[4.0], &[1.5, 1.5, 1.0], &[3.0], &[2.0], &[1.5, 0.5], &[1.0], &[0.5, 0.5]];

const MIN_PRIMITIVE_TOTAL: f64 = 1.0;
const EPS: f64 = 1e-9;

fn group_total(group: &[f64]) -> f64 {
    group.iter().sum()
}

/// Sample primitive groups uniformly at random until `total_length` beats
/// are filled exactly, rejecting any group that would overflow the
/// remaining budget. Every note starts at scale degree `I`.
pub fn generate_rhythm(total_length: f64, rng: &mut impl Rng) -> MelodyResult<RhythmicProgression<Degree>> {
    let mut progression = RhythmicProgression::new();
    let mut remaining = total_length;
    while remaining > EPS {
        if remaining + EPS < MIN_PRIMITIVE_TOTAL {
            return Err(MelodyError::Infeasible(format!(
                "{remaining} beats remain, smaller than the shortest rhythm primitive"
            )));
        }
        let candidates: Vec<&[f64]> =
            PRIMITIVES.iter().copied().filter(|group| group_total(group) <= remaining + EPS).collect();
        if candidates.is_empty() {
            return Err(MelodyError::Infeasible(format!("no rhythm primitive fits {remaining} remaining beats")));
        }
        let chosen = candidates[rng.random_range(0..candidates.len())];
        for &beats in chosen {
            progression.push(Degree::I, Duration::from_beats(beats));
        }
        remaining -= group_total(chosen);
    }
    Ok(progression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generated_rhythm_sums_to_requested_length() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let rhythm = generate_rhythm(4.0, &mut rng).expect("feasible");
            assert!((rhythm.total_length() - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sub_half_beat_remainder_is_infeasible() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_rhythm(0.25, &mut rng).unwrap_err();
        assert!(matches!(err, MelodyError::Infeasible(_)));
    }
}
