//! Phase 2: pure scorers from melody to a non-negative loss, built once
//! per generation and summed by the search.

use music_theory::Degree;

use crate::melody::Melody;

/// Per-degree perceived instability, tonic (`I`) lowest, leading-tone
/// (`VII`) highest.
const MELODIC_TENSION: [f64; 7] = [0.0, 4.0, 2.0, 3.0, 5.0, 1.0, 6.0];
const MAX_MELODIC_TENSION: f64 = 6.0;

/// Signed circular step count from degree `a` to `b`, favouring short
/// diatonic motion.
const DISTANCE_TABLE: [f64; 7] = [0.0, 1.0, 2.0, 3.0, -3.0, -2.0, 1.0];

/// Penalizes repeated/distant leaps, rewards stepwise motion.
const NEIGHBOR_TABLE: [f64; 7] = [2.0, 0.0, 1.0, 2.0, -2.0, -1.0, 1.0];

/// Default per-phrase weighting constants.
pub const PATTERN_WEIGHT: f64 = 1.0;
pub const TENSION_WEIGHT: f64 = 0.75;
pub const NEIGHBOR_WEIGHT: f64 = 1.0;
pub const MOMENTUM_WEIGHT: f64 = 0.5;
/// Carried from the source's weight table but wired to no constraint kind
/// (the source never references it either).
pub const HINGE_WEIGHT: f64 = 0.0;

fn melodic_tension(degree: Degree) -> f64 {
    MELODIC_TENSION[degree.zero_based() as usize]
}

fn step_distance(table: &[f64; 7], a: Degree, b: Degree) -> f64 {
    let index = (i32::from(a.zero_based()) - i32::from(b.zero_based())).rem_euclid(7) as usize;
    table[index]
}

/// One pure scorer from a melody to a non-negative loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Pulls two notes' tension toward equality (motivic repetition).
    EqualTension { i: usize, j: usize, weight: f64 },
    /// Pulls two melodic steps toward equal signed distance.
    EqualScaleMomentum { i: usize, j: usize, k: usize, l: usize, weight: f64 },
    /// Rewards stepwise motion between consecutive notes.
    NeighborScale { i: usize, j: usize, weight: f64 },
    /// Penalizes direction reversals across three consecutive notes.
    MomentumScale { i: usize, j: usize, k: usize, weight: f64 },
    /// Drags one note's tension toward a target value.
    AssignTension { i: usize, target: f64, weight: f64 },
}

impl Constraint {
    /// This constraint's loss against `melody`. Always `>= 0`.
    #[must_use]
    pub fn cost(&self, melody: &Melody) -> f64 {
        match *self {
            Self::EqualTension { i, j, weight } => {
                weight * (melodic_tension(melody.degree(i)) - melodic_tension(melody.degree(j))).abs()
            }
            Self::EqualScaleMomentum { i, j, k, l, weight } => {
                let d_ij = step_distance(&DISTANCE_TABLE, melody.degree(i), melody.degree(j));
                let d_kl = step_distance(&DISTANCE_TABLE, melody.degree(k), melody.degree(l));
                weight * (d_ij - d_kl).abs()
            }
            Self::NeighborScale { i, j, weight } => {
                weight * step_distance(&NEIGHBOR_TABLE, melody.degree(i), melody.degree(j)).abs()
            }
            Self::MomentumScale { i, j, k, weight } => {
                let d_ij = step_distance(&DISTANCE_TABLE, melody.degree(i), melody.degree(j));
                let d_jk = step_distance(&DISTANCE_TABLE, melody.degree(j), melody.degree(k));
                weight * (d_ij.signum() - d_jk.signum()).abs()
            }
            Self::AssignTension { i, target, weight } => {
                weight * (target - melodic_tension(melody.degree(i))).abs() * melody.duration(i).beats()
            }
        }
    }
}

/// Total loss summed across every constraint.
#[must_use]
pub fn total_cost(melody: &Melody, constraints: &[Constraint]) -> f64 {
    constraints.iter().map(|c| c.cost(melody)).sum()
}

/// Fractal self-concatenation of `base` to `depth` levels: each level
/// nests every existing value under every base value, multiplying length
/// by `base.len()` per level past the first.
fn fractal_contour(base: &[f64], depth: u32) -> Vec<f64> {
    let mut contour = base.to_vec();
    for _ in 1..depth {
        let mut next = Vec::with_capacity(contour.len() * base.len());
        for &outer in &contour {
            for &inner in base {
                next.push(outer + inner);
            }
        }
        contour = next;
    }
    contour
}

/// Build the full constraint set for a skeleton melody: motivic-repetition
/// pairs, a tension-contour target per note, neighbor-motion rewards, and
/// momentum (direction-consistency) penalties.
#[must_use]
pub fn build_constraints(melody: &Melody, min_tension: f64, max_tension: f64) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    // Motivic repetition: pair every two occurrences of the same letter at
    // each shared ordinal position.
    let mut occurrences_by_letter: std::collections::HashMap<char, Vec<std::ops::Range<usize>>> =
        std::collections::HashMap::new();
    for occurrence in melody.layout() {
        occurrences_by_letter.entry(occurrence.letter).or_default().push(occurrence.notes.clone());
    }
    for occurrences in occurrences_by_letter.values() {
        if occurrences.len() < 2 {
            continue;
        }
        let motive_length = occurrences[0].len();
        for ordinal in 0..motive_length {
            for a in 0..occurrences.len() {
                for b in (a + 1)..occurrences.len() {
                    let i = occurrences[a].start + ordinal;
                    let j = occurrences[b].start + ordinal;
                    constraints.push(Constraint::EqualTension { i, j, weight: PATTERN_WEIGHT });
                    if ordinal + 1 < motive_length {
                        constraints.push(Constraint::EqualScaleMomentum {
                            i,
                            j: i + 1,
                            k: j,
                            l: j + 1,
                            weight: PATTERN_WEIGHT,
                        });
                    }
                }
            }
        }
    }

    // Tension contour: fractal self-concatenation of [0,1,2,0] to depth 2
    // (length 16), normalized into [min_tension, max_tension] * max tension.
    let raw_contour = fractal_contour(&[0.0, 1.0, 2.0, 0.0], 2);
    let raw_max = 4.0; // two additions of a base value in [0, 2]
    let normalized: Vec<f64> = raw_contour
        .iter()
        .map(|&raw| (min_tension + (raw / raw_max) * (max_tension - min_tension)) * MAX_MELODIC_TENSION)
        .collect();
    let total_length = melody.total_length();
    if total_length > 0.0 {
        for i in 0..melody.len() {
            let timing = melody.onset(i);
            let index = ((timing * 16.0 / total_length).floor() as usize).min(normalized.len() - 1);
            constraints.push(Constraint::AssignTension { i, target: normalized[index], weight: TENSION_WEIGHT });
        }
    }

    // Stepwise-motion reward for every consecutive pair.
    for i in 0..melody.len().saturating_sub(1) {
        constraints.push(Constraint::NeighborScale { i, j: i + 1, weight: NEIGHBOR_WEIGHT });
    }

    // Direction-consistency penalty for every consecutive triple.
    for i in 0..melody.len().saturating_sub(2) {
        constraints.push(Constraint::MomentumScale { i, j: i + 1, k: i + 2, weight: MOMENTUM_WEIGHT });
    }

    constraints
}
