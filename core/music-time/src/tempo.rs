//! Tempo: converting beat-relative time into wall-clock seconds.

use crate::timespan::TimeSpan;

/// Tempo in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tempo(f64);

impl Tempo {
    /// Construct a tempo from a positive beats-per-minute value.
    ///
    /// # Panics
    ///
    /// Panics if `bpm` is not positive and finite.
    #[must_use]
    pub fn new(bpm: f64) -> Self {
        assert!(bpm.is_finite() && bpm > 0.0, "tempo must be a positive, finite beats-per-minute value");
        Self(bpm)
    }

    /// Beats per minute.
    #[must_use]
    pub fn bpm(&self) -> f64 {
        self.0
    }

    /// Convert a span of beats into seconds at this tempo.
    #[must_use]
    pub fn span_to_seconds(&self, span: TimeSpan) -> f64 {
        span.as_beats() * 60.0 / self.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(120.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_note_at_120_bpm_is_half_a_second() {
        let tempo = Tempo::new(120.0);
        let seconds = tempo.span_to_seconds(TimeSpan::new(1.0));
        assert!((seconds - 0.5).abs() < 1e-9);
    }
}
