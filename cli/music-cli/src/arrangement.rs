//! Glue turning a generator-internal [`Melody`] into a [`Singable`] graph,
//! and assembling the full melody + reharmonization arrangement. Grounded
//! on `main.py`'s end-to-end `Parallel([AtChannel(0)(song),
//! AtChannel(1)(Transpose(...)(Reharmonize(scale)(song)))])` composition;
//! `main.py`'s literal arpeggio pattern is itself example song data (a
//! Non-goal to bundle), so the reharmonization is placed directly rather
//! than arpeggiated.

use anyhow::Result;
use music_melody::Melody;
use music_reharmonize::{reharmonize, ReharmonizeOptions};
use music_singable::{Key, Singable};
use music_theory::{Interval, Scale};

const MELODY_CHANNEL: u8 = 0;
const HARMONY_CHANNEL: u8 = 1;
const MELODY_VELOCITY: f64 = 0.9;

/// Default chord-scoring granularities, in beats, coarsest first.
const GRANULARITY: [f64; 3] = [4.0, 2.0, 1.0];

/// Count distinct onset times among `keys`, i.e. the number of simultaneous
/// chords in a chord-per-`multi_key`-group harmonization.
fn count_distinct_starts(keys: &[Key]) -> usize {
    let mut starts: Vec<f64> = keys.iter().map(|k| k.start).collect();
    starts.sort_by(|a, b| a.partial_cmp(b).expect("key start is never NaN"));
    starts.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    starts.len()
}

/// Realize a degree-valued [`Melody`] into absolute pitches against `scale`.
pub fn melody_to_singable(melody: &Melody, scale: &Scale) -> Result<Singable> {
    let mut keys = Vec::with_capacity(melody.len());
    for (degree, duration, onset) in melody.iter() {
        let note = scale.note(u32::from(degree.zero_based()) + 1)?;
        keys.push(Singable::key(Key::note(onset, duration.beats(), note, MELODY_CHANNEL, MELODY_VELOCITY)));
    }
    Ok(Singable::parallel(keys))
}

/// The melody plus its reharmonization, ready to render.
pub struct Arrangement {
    /// The full composition: melody on channel 0, harmony on channel 1.
    pub song: Singable,
    /// Number of chords the reharmonizer chose.
    pub chord_count: usize,
}

/// Build the full arrangement: the melody on channel 0, and a reharmonization
/// of it, transposed down two octaves, on channel 1.
pub fn arrange(melody: &Melody, scale: &Scale) -> Result<Arrangement> {
    let song = melody_to_singable(melody, scale)?;
    let harmony = reharmonize(&song, scale, &GRANULARITY, &ReharmonizeOptions::default())?;
    let chord_count = count_distinct_starts(&harmony.sing()?);
    let bass_register = Interval::parse("-P15")?;
    let harmony = Singable::at_channel(Singable::transpose(harmony, bass_register), HARMONY_CHANNEL);
    Ok(Arrangement { song: Singable::parallel(vec![song, harmony]), chord_count })
}
