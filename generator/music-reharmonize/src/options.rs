//! Tunable knobs for [`crate::reharmonize`], separated from its required
//! arguments so a caller can ignore them entirely.

use std::collections::HashMap;

use music_theory::{Degree, RomanNumeral};

/// A caller-supplied `{time -> forced number}` override: at that time, skip
/// scoring entirely and force the given roman numeral.
#[derive(Debug, Clone, Default)]
pub struct Restrictions(Vec<(f64, RomanNumeral)>);

impl Restrictions {
    /// No restrictions.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Force `number` at `time`.
    #[must_use]
    pub fn with(mut self, time: f64, number: RomanNumeral) -> Self {
        self.0.push((time, number));
        self
    }

    pub(crate) fn get(&self, time: f64) -> Option<RomanNumeral> {
        self.0.iter().find(|(t, _)| (*t - time).abs() < 1e-9).map(|(_, n)| *n)
    }
}

/// Tunable parameters of a reharmonization pass.
#[derive(Debug, Clone)]
pub struct ReharmonizeOptions {
    /// Time the first window starts at.
    pub offset: f64,
    /// Beats between cadence boundaries.
    pub cadence_at: f64,
    /// Score subtracted from a non-cadential chord landing on a boundary.
    pub cadence_penalty: f64,
    /// Per-numeral score bias, defaulting to zero for every numeral.
    pub number_advantage: HashMap<RomanNumeral, f64>,
    /// Forced chords at specific times, bypassing scoring there.
    pub restrictions: Restrictions,
}

impl Default for ReharmonizeOptions {
    fn default() -> Self {
        Self {
            offset: 0.0,
            cadence_at: 16.0,
            cadence_penalty: 1.0,
            number_advantage: HashMap::new(),
            restrictions: Restrictions::new(),
        }
    }
}

/// The nonzero per-numeral biases the reference implementation once used,
/// before they were zeroed out by a dict comprehension. Opt into these with
/// `ReharmonizeOptions { number_advantage: authored_number_advantage(), ..Default::default() }`.
#[must_use]
pub fn authored_number_advantage() -> HashMap<RomanNumeral, f64> {
    use Degree::{Ii, Iii, Iv, V, Vi, Vii};
    let diatonic = |degree, bias| (RomanNumeral::Diatonic { degree, seventh: false }, bias);
    let secondary = |of, bias| (RomanNumeral::SecondaryDominant { of }, bias);
    HashMap::from([
        diatonic(Degree::I, 0.2),
        diatonic(Ii, -0.2),
        diatonic(Iii, -0.2),
        diatonic(Iv, 0.2),
        diatonic(V, 0.2),
        diatonic(Vi, -0.2),
        diatonic(Vii, -0.2),
        secondary(Ii, -0.2),
        secondary(Iii, -0.2),
        secondary(Iv, -0.2),
        secondary(V, -0.2),
        secondary(Vi, -0.2),
        secondary(Vii, -0.2),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_number_advantage_is_empty() {
        assert!(ReharmonizeOptions::default().number_advantage.is_empty());
    }

    #[test]
    fn authored_advantage_carries_the_source_biases() {
        let advantage = authored_number_advantage();
        let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
        assert_eq!(advantage.get(&i), Some(&0.2));
    }

    #[test]
    fn restrictions_lookup_finds_the_forced_time() {
        let i = RomanNumeral::Diatonic { degree: Degree::I, seventh: false };
        let restrictions = Restrictions::new().with(4.0, i);
        assert_eq!(restrictions.get(4.0), Some(i));
        assert_eq!(restrictions.get(5.0), None);
    }
}
