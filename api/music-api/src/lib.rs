//! Serializers turning a sung composition graph into external formats:
//! MIDI events and a lilypond-flavored text score.

pub mod errors;
pub mod midi;
pub mod report;
pub mod score;

pub use errors::{ApiError, ApiResult};
pub use midi::{MidiEvent, MidiMessage, MidiOptions, to_midi_events};
pub use report::GenerationReport;
pub use score::{ScoreOptions, to_text_score};
