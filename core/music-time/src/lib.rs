//! Beat-relative time primitives shared by the composition and generator crates.

pub mod rhythm;
pub mod tempo;
pub mod timespan;

pub use rhythm::{Duration, RhythmicProgression};
pub use tempo::Tempo;
pub use timespan::{TimePoint, TimeSpan};
