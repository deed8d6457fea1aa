//! Constraint-satisfaction melody generation: synthesize a rhythm, build
//! scorers that reward motivic repetition and a target tension contour,
//! then hill-climb scale-degree assignments against them.

pub mod constraints;
pub mod errors;
pub mod melody;
pub mod rhythm_synth;
pub mod search;
pub mod skeleton;

pub use constraints::Constraint;
pub use errors::{MelodyError, MelodyResult};
pub use melody::{Melody, MotiveOccurrence};

use music_theory::{Mode, Note};
use rand::Rng;

/// Generate a melody: lay out `pattern` (e.g. `"AABA"`) into a rhythm, then
/// search for a scale-degree assignment that favors motivic repetition and
/// a tension contour within `[min_tension, max_tension]`.
pub fn generate(
    mode: Mode,
    tonic: Note,
    pattern: &str,
    min_tension: f64,
    max_tension: f64,
    rng: &mut impl Rng,
) -> MelodyResult<Melody> {
    let skeleton = skeleton::build_skeleton(mode, tonic, pattern, rng)?;
    let constraints = constraints::build_constraints(&skeleton, min_tension, max_tension);
    Ok(search::search(skeleton, &constraints, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::Letter;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generate_produces_a_melody_spanning_the_full_pattern() {
        let mut rng = StdRng::seed_from_u64(11);
        let tonic = Note::new(Letter::C, 0, 5).expect("valid note");
        let melody = generate(Mode::Major, tonic, "AABA", 0.2, 0.8, &mut rng).expect("feasible");
        assert_eq!(melody.layout().len(), 4);
        assert!((melody.total_length() - 32.0).abs() < 1e-9);
    }
}
