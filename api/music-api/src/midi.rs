//! MIDI event emission: flattens a composition graph into ordered,
//! delta-timed note and meta events. Grounded on `singable.py::to_midi`.
//!
//! This does not depend on a MIDI file-writer crate — it exposes the
//! ordered event list as plain data, leaving file emission to a
//! caller-supplied sink.

use std::collections::BTreeMap;

use music_singable::Singable;

use crate::errors::ApiResult;

/// One MIDI channel message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// A note starts sounding.
    NoteOn {
        /// MIDI note number.
        note: i32,
        /// MIDI velocity, `0..=127`.
        velocity: u8,
        /// MIDI channel.
        channel: u8,
    },
    /// A note stops sounding.
    NoteOff {
        /// MIDI note number.
        note: i32,
        /// MIDI velocity, `0..=127`.
        velocity: u8,
        /// MIDI channel.
        channel: u8,
    },
    /// Assigns an instrument program to a channel.
    ProgramChange {
        /// MIDI channel.
        channel: u8,
        /// MIDI program number.
        program: u8,
    },
    /// Sets the track tempo.
    SetTempo {
        /// Microseconds per quarter note.
        microseconds_per_beat: u32,
    },
}

/// One event in the emitted track: a message plus ticks elapsed since the
/// previous event (MIDI's native delta-time encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Ticks since the previous event in this track.
    pub delta_ticks: u32,
    /// The message itself.
    pub message: MidiMessage,
}

/// Tunable parameters of a MIDI emission pass.
#[derive(Debug, Clone)]
pub struct MidiOptions {
    /// MIDI velocity a `velocity = 1.0` key maps to.
    pub velocity_max: u8,
    /// Ticks per quarter-note beat.
    pub tick_per_beat: u32,
    /// Initial tempo, in beats per minute.
    pub initial_bpm: f64,
    /// Program to assign each channel, emitted before any note events.
    pub instruments: BTreeMap<u8, u8>,
}

impl Default for MidiOptions {
    fn default() -> Self {
        Self { velocity_max: 127, tick_per_beat: 480, initial_bpm: 144.0, instruments: BTreeMap::new() }
    }
}

fn bpm_to_microseconds_per_beat(bpm: f64) -> u32 {
    (60_000_000.0 / bpm).round() as u32
}

/// Render `singable` into a flat, delta-timed event list: a tempo message,
/// one program-change per configured instrument, then every note-on/note-off
/// pair in ascending absolute-tick order. Rest keys contribute nothing.
pub fn to_midi_events(singable: &Singable, options: &MidiOptions) -> ApiResult<Vec<MidiEvent>> {
    let keys = singable.sing()?;

    let mut timed_messages: Vec<(i64, MidiMessage)> = Vec::with_capacity(keys.len() * 2);
    for key in &keys {
        let Some(note) = key.note else { continue };
        let velocity = (key.velocity * f64::from(options.velocity_max)).round() as u8;
        let start_tick = (key.start * f64::from(options.tick_per_beat)).trunc() as i64;
        let end_tick = (key.end() * f64::from(options.tick_per_beat)).trunc() as i64;
        timed_messages.push((start_tick, MidiMessage::NoteOn { note: note.midi(), velocity, channel: key.channel }));
        timed_messages.push((end_tick, MidiMessage::NoteOff { note: note.midi(), velocity, channel: key.channel }));
    }
    timed_messages.sort_by_key(|(tick, _)| *tick);

    let mut events = Vec::with_capacity(timed_messages.len() + 1 + options.instruments.len());
    events.push(MidiEvent {
        delta_ticks: 0,
        message: MidiMessage::SetTempo { microseconds_per_beat: bpm_to_microseconds_per_beat(options.initial_bpm) },
    });
    for (&channel, &program) in &options.instruments {
        events.push(MidiEvent { delta_ticks: 0, message: MidiMessage::ProgramChange { channel, program } });
    }

    let mut previous_tick = 0i64;
    for (tick, message) in timed_messages {
        events.push(MidiEvent { delta_ticks: (tick - previous_tick) as u32, message });
        previous_tick = tick;
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_singable::Key;
    use music_theory::{Letter, Note};

    #[test]
    fn a_rest_contributes_no_note_events() {
        let graph = Singable::key(Key::rest(0.0, 1.0));
        let events = to_midi_events(&graph, &MidiOptions::default()).expect("sings");
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].message, MidiMessage::SetTempo { .. }));
    }

    #[test]
    fn note_on_and_off_are_ordered_by_absolute_tick() {
        let c5 = Note::new(Letter::C, 0, 5).expect("valid note");
        let graph = Singable::key(Key::note(0.0, 1.0, c5, 0, 1.0));
        let events = to_midi_events(&graph, &MidiOptions::default()).expect("sings");
        let note_events: Vec<_> = events.iter().filter(|e| !matches!(e.message, MidiMessage::SetTempo { .. })).collect();
        assert!(matches!(note_events[0].message, MidiMessage::NoteOn { velocity: 127, .. }));
        assert_eq!(note_events[1].delta_ticks, 480);
        assert!(matches!(note_events[1].message, MidiMessage::NoteOff { .. }));
    }

    #[test]
    fn instruments_emit_one_program_change_per_channel_in_channel_order() {
        let graph = Singable::key(Key::rest(0.0, 1.0));
        let mut options = MidiOptions::default();
        options.instruments.insert(2, 33);
        options.instruments.insert(0, 0);
        let events = to_midi_events(&graph, &options).expect("sings");
        let programs: Vec<_> = events
            .iter()
            .filter_map(|e| match e.message {
                MidiMessage::ProgramChange { channel, .. } => Some(channel),
                _ => None,
            })
            .collect();
        assert_eq!(programs, vec![0, 2]);
    }
}
