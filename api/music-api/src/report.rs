//! Generation summary DTO, shared between the CLI's JSON and text output.

use serde::{Deserialize, Serialize};

/// A compact summary of one end-to-end generation run: melody, harmony, and
/// rendered MIDI event counts, for the CLI's `--format json` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationReport {
    /// Tonic and mode the melody and harmony were generated in, e.g. `"C major"`.
    pub key: String,
    /// Rhythm skeleton pattern name used to generate the melody.
    pub pattern: String,
    /// Number of sounding (non-rest) notes in the generated melody.
    pub melody_note_count: usize,
    /// Total melody length, in beats.
    pub melody_length_beats: f64,
    /// Number of chords chosen by the reharmonizer.
    pub reharmonization_chord_count: usize,
    /// Number of MIDI events (notes, program changes, tempo) emitted.
    pub midi_event_count: usize,
}
