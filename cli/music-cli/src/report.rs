//! Builds and prints the `generate` command's summary report, following
//! the convention of summarizing a run in both human and JSON form.

use music_api::GenerationReport;
use music_singable::Singable;
use music_theory::{Mode, Note};

pub fn build_report(
    tonic: Note,
    mode: Mode,
    pattern: &str,
    melody_note_count: usize,
    melody_length_beats: f64,
    reharmonization_chord_count: usize,
    midi_event_count: usize,
) -> GenerationReport {
    GenerationReport {
        key: format!("{tonic} {mode:?}"),
        pattern: pattern.to_string(),
        melody_note_count,
        melody_length_beats,
        reharmonization_chord_count,
        midi_event_count,
    }
}

pub fn print_text_report(report: &GenerationReport) {
    println!("Key: {}", report.key);
    println!("Pattern: {}", report.pattern);
    println!("Melody notes: {} ({:.2} beats)", report.melody_note_count, report.melody_length_beats);
    println!("Reharmonization chords: {}", report.reharmonization_chord_count);
    println!("MIDI events: {}", report.midi_event_count);
}

pub fn count_sounding_notes(singable: &Singable) -> anyhow::Result<usize> {
    Ok(singable.sing()?.iter().filter(|key| key.note.is_some()).count())
}
