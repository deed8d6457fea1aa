//! The generator's working melody: a rhythm whose notes carry a scale
//! degree rather than a resolved pitch, plus the motive layout the
//! constraint builder needs to find repeated material.

use std::ops::Range;

use music_theory::{Degree, Mode, Note};
use music_time::{Duration, RhythmicProgression};

/// One occurrence of a motive letter (e.g. the second `A` in `AABA`),
/// recorded as the span of note indices it contributed to the flattened
/// melody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotiveOccurrence {
    pub letter: char,
    pub notes: Range<usize>,
}

/// A generator-internal melody: degree-valued notes over a rhythm, tagged
/// with which motive occurrence each note belongs to.
#[derive(Debug, Clone)]
pub struct Melody {
    mode: Mode,
    tonic: Note,
    progression: RhythmicProgression<Degree>,
    layout: Vec<MotiveOccurrence>,
}

impl Melody {
    #[must_use]
    pub fn new(mode: Mode, tonic: Note, progression: RhythmicProgression<Degree>, layout: Vec<MotiveOccurrence>) -> Self {
        Self { mode, tonic, progression, layout }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn tonic(&self) -> Note {
        self.tonic
    }

    #[must_use]
    pub fn layout(&self) -> &[MotiveOccurrence] {
        &self.layout
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.progression.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.progression.is_empty()
    }

    #[must_use]
    pub fn degree(&self, index: usize) -> Degree {
        *self.progression.note(index)
    }

    #[must_use]
    pub fn onset(&self, index: usize) -> f64 {
        self.progression.onset(index)
    }

    #[must_use]
    pub fn duration(&self, index: usize) -> Duration {
        self.progression.duration(index)
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.progression.total_length()
    }

    /// The single mutation the search performs: reassign one note's scale degree.
    pub fn assign_scale_degree(&mut self, index: usize, degree: Degree) {
        self.progression.set_note(index, degree);
    }

    /// Iterate over `(degree, duration, onset)` triples in order.
    pub fn iter(&self) -> impl Iterator<Item = (Degree, Duration, f64)> + '_ {
        self.progression.iter().map(|(degree, duration, onset)| (*degree, duration, onset))
    }
}
