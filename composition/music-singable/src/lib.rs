//! A lazily-described, eagerly-rendered graph of timed note events.
//!
//! A [`Singable`] is built up out of small combinators — shift, repeat,
//! transpose, bound, arpeggiate — and rendered with [`Singable::sing`] into
//! a flat [`Key`] list. Rendering is eager (it returns a `Vec`, not an
//! iterator) and non-destructive: the same graph can be sung as many times
//! as needed.

pub mod errors;
pub mod key;

pub use errors::{SingableError, SingableResult};
pub use key::Key;

use std::rc::Rc;

use music_theory::{Interval, Note};

/// A single-key transform used by the selector combinators. Conceptually
/// the same thing as passing `Transpose(iv)` or `Bound(lo, hi)` as a value
/// in the original graph: a function from one key to the keys it becomes.
pub type KeyFn = Rc<dyn Fn(Key) -> SingableResult<Vec<Key>>>;

/// How [`Singable::select_interval`] and [`Singable::arpeggio`] handle an
/// index that falls outside the available range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalOutliers {
    /// Wrap the index around modulo the available count.
    Loop,
    /// Clamp the index to the nearest valid one.
    Clip,
    /// Drop the key entirely.
    None,
}

/// How [`Singable::arpeggio`] maps a pattern note to a chord tone once its
/// computed index falls outside `0..keys_at_time.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpeggioOutliers {
    /// Wrap the index around modulo the chord width.
    Loop,
    /// Keep the raw (possibly negative, Python-style) index and shift the
    /// resulting note by the octave it would have wrapped through.
    Octave,
    /// Clamp the index to the nearest valid chord tone.
    Clip,
}

/// Default `number_offset` for [`Singable::arpeggio`]: the MIDI number an
/// arpeggio pattern note of `0` maps to before indexing into the chord.
pub const DEFAULT_ARPEGGIO_OFFSET: i32 = 60;

/// A composition graph: a tree of combinators over timed note events.
pub enum Singable {
    Key(Key),
    Parallel(Vec<Singable>),
    Enumerate { children: Vec<Vec<Singable>>, interval: Option<f64> },
    Repeat { child: Box<Singable>, repeat_num: u32, interval: Option<f64> },
    ShiftTime { child: Box<Singable>, time: f64 },
    Lengthen { child: Box<Singable>, scale: f64 },
    Longify { child: Box<Singable>, time: f64 },
    Amplify { child: Box<Singable>, magnitude: f64 },
    Transpose { child: Box<Singable>, interval: Interval },
    Bound { child: Box<Singable>, low: Note, high: Note },
    Harmonize { child: Box<Singable>, interval: Interval },
    Swing { child: Box<Singable>, interval: f64, rate: f64 },
    AtChannel { child: Box<Singable>, channel: u8 },
    AtNote { child: Box<Singable>, note: Note },
    SelectTime { child: Box<Singable>, start: f64, length: f64, func: KeyFn },
    SelectInterval { child: Box<Singable>, interval: f64, funcs: Vec<KeyFn>, outliers: IntervalOutliers },
    SelectIndex { child: Box<Singable>, index_start: usize, index_length: usize, func: KeyFn },
    Arpeggio { chord: Box<Singable>, pattern: Box<Singable>, outliers: ArpeggioOutliers, number_offset: i32 },
}

impl Singable {
    #[must_use]
    pub fn key(key: Key) -> Self {
        Self::Key(key)
    }

    #[must_use]
    pub fn parallel(children: Vec<Self>) -> Self {
        Self::Parallel(children)
    }

    #[must_use]
    pub fn enumerate(children: Vec<Vec<Self>>, interval: Option<f64>) -> Self {
        Self::Enumerate { children, interval }
    }

    #[must_use]
    pub fn repeat(child: Self, repeat_num: u32, interval: Option<f64>) -> Self {
        Self::Repeat { child: Box::new(child), repeat_num, interval }
    }

    #[must_use]
    pub fn shift_time(child: Self, time: f64) -> Self {
        Self::ShiftTime { child: Box::new(child), time }
    }

    #[must_use]
    pub fn lengthen(child: Self, scale: f64) -> Self {
        Self::Lengthen { child: Box::new(child), scale }
    }

    #[must_use]
    pub fn longify(child: Self, time: f64) -> Self {
        Self::Longify { child: Box::new(child), time }
    }

    #[must_use]
    pub fn amplify(child: Self, magnitude: f64) -> Self {
        Self::Amplify { child: Box::new(child), magnitude }
    }

    #[must_use]
    pub fn transpose(child: Self, interval: Interval) -> Self {
        Self::Transpose { child: Box::new(child), interval }
    }

    #[must_use]
    pub fn bound(child: Self, low: Note, high: Note) -> Self {
        Self::Bound { child: Box::new(child), low, high }
    }

    #[must_use]
    pub fn harmonize(child: Self, interval: Interval) -> Self {
        Self::Harmonize { child: Box::new(child), interval }
    }

    #[must_use]
    pub fn swing(child: Self, interval: f64, rate: f64) -> Self {
        Self::Swing { child: Box::new(child), interval, rate }
    }

    #[must_use]
    pub fn at_channel(child: Self, channel: u8) -> Self {
        Self::AtChannel { child: Box::new(child), channel }
    }

    #[must_use]
    pub fn at_note(child: Self, note: Note) -> Self {
        Self::AtNote { child: Box::new(child), note }
    }

    #[must_use]
    pub fn select_time(child: Self, start: f64, length: f64, func: KeyFn) -> Self {
        Self::SelectTime { child: Box::new(child), start, length, func }
    }

    #[must_use]
    pub fn select_interval(child: Self, interval: f64, funcs: Vec<KeyFn>, outliers: IntervalOutliers) -> Self {
        Self::SelectInterval { child: Box::new(child), interval, funcs, outliers }
    }

    #[must_use]
    pub fn select_index(child: Self, index_start: usize, index_length: usize, func: KeyFn) -> Self {
        Self::SelectIndex { child: Box::new(child), index_start, index_length, func }
    }

    #[must_use]
    pub fn arpeggio(chord: Self, pattern: Self, outliers: ArpeggioOutliers, number_offset: i32) -> Self {
        Self::Arpeggio { chord: Box::new(chord), pattern: Box::new(pattern), outliers, number_offset }
    }

    /// Render this graph into a flat, time-ordered-by-construction list of keys.
    pub fn sing(&self) -> SingableResult<Vec<Key>> {
        match self {
            Self::Key(key) => Ok(vec![*key]),

            Self::Parallel(children) => {
                let mut out = Vec::new();
                for child in children {
                    out.extend(child.sing()?);
                }
                Ok(out)
            }

            Self::Enumerate { children, interval } => {
                let mut out = Vec::new();
                let mut time = 0.0_f64;
                for group in children {
                    let mut time_max = 0.0_f64;
                    for child in group {
                        for key in child.sing()? {
                            let shifted = key.with_start(key.start + time);
                            time_max = time_max.max(shifted.end());
                            out.push(shifted);
                        }
                    }
                    time = match interval {
                        Some(iv) => time + iv,
                        None => time_max,
                    };
                }
                Ok(out)
            }

            Self::Repeat { child, repeat_num, interval } => {
                let mut out = Vec::new();
                let mut time = 0.0_f64;
                for _ in 0..*repeat_num {
                    let mut time_max = 0.0_f64;
                    for key in child.sing()? {
                        let shifted = key.with_start(key.start + time);
                        time_max = time_max.max(shifted.end());
                        out.push(shifted);
                    }
                    time = match interval {
                        Some(iv) => time + iv,
                        None => time_max,
                    };
                }
                Ok(out)
            }

            Self::ShiftTime { child, time } => {
                Ok(child.sing()?.into_iter().map(|k| k.with_start(k.start + time)).collect())
            }

            // Lengthen scales the key's *length*, not its start. The
            // original writes the scaled value back into `start`.
            Self::Lengthen { child, scale } => Ok(child
                .sing()?
                .into_iter()
                .map(|k| k.with_length((k.length * scale).max(0.0)))
                .collect()),

            // Same bug as Lengthen: the time offset belongs on `length`.
            Self::Longify { child, time } => {
                Ok(child.sing()?.into_iter().map(|k| k.with_length((k.length + time).max(0.0))).collect())
            }

            Self::Amplify { child, magnitude } => {
                Ok(child.sing()?.into_iter().map(|k| k.with_velocity(k.velocity * magnitude)).collect())
            }

            Self::Transpose { child, interval } => {
                child.sing()?.into_iter().map(|k| apply_transpose(k, interval)).collect()
            }

            Self::Bound { child, low, high } => {
                child.sing()?.into_iter().map(|k| apply_bound(k, *low, *high)).collect()
            }

            Self::Harmonize { child, interval } => {
                let originals = child.sing()?;
                let mut out = Vec::with_capacity(originals.len() * 2);
                for key in originals {
                    let transposed = apply_transpose(key, interval)?;
                    out.push(key);
                    out.push(transposed);
                }
                Ok(out)
            }

            Self::Swing { child, interval, rate } => Ok(child
                .sing()?
                .into_iter()
                .map(|k| {
                    let time_start = swing_time(k.start, *interval, *rate);
                    let time_end = swing_time(k.start + k.length, *interval, *rate);
                    k.with_start(time_start).with_length(time_end - time_start)
                })
                .collect()),

            Self::AtChannel { child, channel } => {
                Ok(child.sing()?.into_iter().map(|k| k.with_channel(*channel)).collect())
            }

            Self::AtNote { child, note } => {
                Ok(child.sing()?.into_iter().map(|k| k.with_note(Some(*note))).collect())
            }

            Self::SelectTime { child, start, length, func } => {
                let mut out = Vec::new();
                for key in child.sing()? {
                    if key.start >= *start && key.start < start + length {
                        out.extend(func(key)?);
                    } else {
                        out.push(key);
                    }
                }
                Ok(out)
            }

            Self::SelectInterval { child, interval, funcs, outliers } => {
                if funcs.is_empty() {
                    return Err(SingableError::EmptyFuncs);
                }
                let n = funcs.len() as f64;
                let mut out = Vec::new();
                for key in child.sing()? {
                    let raw_ind = (key.start / interval).floor();
                    let ind = if raw_ind < 0.0 || raw_ind >= n {
                        match outliers {
                            IntervalOutliers::Loop => raw_ind - (raw_ind / n).floor() * n,
                            IntervalOutliers::Clip => raw_ind.clamp(0.0, n - 1.0),
                            IntervalOutliers::None => continue,
                        }
                    } else {
                        raw_ind
                    };
                    out.extend(funcs[ind as usize](key)?);
                }
                Ok(out)
            }

            Self::SelectIndex { child, index_start, index_length, func } => {
                let mut out = Vec::new();
                for (i, key) in child.sing()?.into_iter().enumerate() {
                    if i >= *index_start && i < index_start + index_length {
                        out.extend(func(key)?);
                    } else {
                        out.push(key);
                    }
                }
                Ok(out)
            }

            Self::Arpeggio { chord, pattern, outliers, number_offset } => {
                let key_chord = chord.sing()?;
                let mut out = Vec::new();
                for arp_key in pattern.sing()? {
                    let Some(arp_note) = arp_key.note else {
                        out.push(arp_key);
                        continue;
                    };
                    let time = arp_key.start;
                    let keys_at_time: Vec<Key> =
                        key_chord.iter().copied().filter(|k| k.start <= time && k.start + k.length > time).collect();
                    if keys_at_time.is_empty() {
                        return Err(SingableError::EmptyChordWindow { at: time });
                    }
                    let n = keys_at_time.len() as i32;
                    let raw_ind = arp_note.midi() - number_offset;

                    let (target_key, note_override) = match outliers {
                        ArpeggioOutliers::Loop => (keys_at_time[raw_ind.rem_euclid(n) as usize], None),
                        ArpeggioOutliers::Octave => {
                            let octave = raw_ind.div_euclid(n);
                            let ind = python_list_index(raw_ind, keys_at_time.len())?;
                            let key = keys_at_time[ind];
                            let note = key.note.map(|note| note.add_octaves(octave)).transpose()?;
                            (key, note)
                        }
                        // Fixed: clamping to `n` (rather than `n - 1`) could
                        // index one past the end of the chord window.
                        ArpeggioOutliers::Clip => (keys_at_time[raw_ind.clamp(0, n - 1) as usize], None),
                    };

                    out.push(Key {
                        start: arp_key.start,
                        length: arp_key.length,
                        note: note_override.or(target_key.note),
                        channel: arp_key.channel,
                        velocity: target_key.velocity * arp_key.velocity,
                    });
                }
                Ok(out)
            }
        }
    }
}

/// Build a chord of simultaneous, identically-timed keys — one per note.
#[must_use]
pub fn multi_key(start: f64, length: f64, notes: &[Note], channel: u8, velocity: f64) -> Vec<Singable> {
    notes.iter().map(|&note| Singable::Key(Key::note(start, length, note, channel, velocity))).collect()
}

fn apply_transpose(key: Key, interval: &Interval) -> SingableResult<Key> {
    match key.note {
        Some(note) => Ok(key.with_note(Some(note.add_interval(interval)?))),
        None => Ok(key),
    }
}

fn apply_bound(key: Key, low: Note, high: Note) -> SingableResult<Key> {
    let Some(mut note) = key.note else { return Ok(key) };
    while note > high {
        note = note.add_octaves(-1)?;
    }
    while note < low {
        note = note.add_octaves(1)?;
    }
    Ok(key.with_note(Some(note)))
}

fn swing_time(time: f64, interval: f64, rate: f64) -> f64 {
    let index = (time / interval).floor();
    let frac = time / interval - index;
    let frac = if frac < 0.5 { frac / 0.5 * rate } else { 1.0 - ((1.0 - frac) / 0.5 * (1.0 - rate)) };
    (index + frac) * interval
}

/// Python-style single-wraparound list indexing: negative indices count
/// from the end, anything still out of range is an error.
fn python_list_index(ind: i32, len: usize) -> SingableResult<usize> {
    let len_i = len as i32;
    let resolved = if ind < 0 { ind + len_i } else { ind };
    if resolved < 0 || resolved >= len_i {
        return Err(SingableError::EmptyChordWindow { at: f64::from(ind) });
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_theory::Letter;

    fn note(letter: Letter, accidental: i32, octave: i32) -> Note {
        Note::new(letter, accidental, octave).expect("valid note")
    }

    #[test]
    fn enumerate_places_groups_back_to_back() {
        let c5 = note(Letter::C, 0, 5);
        let a = Singable::Key(Key::note(0.0, 2.0, c5, 0, 0.8));
        let b = Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8));
        let graph = Singable::enumerate(vec![vec![a], vec![b]], None);
        let keys = graph.sing().expect("sings");
        assert_eq!(keys[0].start, 0.0);
        assert_eq!(keys[1].start, 2.0);
    }

    #[test]
    fn lengthen_writes_to_length_not_start() {
        let c5 = note(Letter::C, 0, 5);
        let key = Singable::Key(Key::note(3.0, 2.0, c5, 0, 0.8));
        let graph = Singable::lengthen(key, 1.5);
        let keys = graph.sing().expect("sings");
        assert_eq!(keys[0].start, 3.0);
        assert!((keys[0].length - 3.0).abs() < 1e-9);
    }

    #[test]
    fn longify_writes_to_length_not_start() {
        let c5 = note(Letter::C, 0, 5);
        let key = Singable::Key(Key::note(3.0, 2.0, c5, 0, 0.8));
        let graph = Singable::longify(key, 0.5);
        let keys = graph.sing().expect("sings");
        assert_eq!(keys[0].start, 3.0);
        assert!((keys[0].length - 2.5).abs() < 1e-9);
    }

    #[test]
    fn transpose_then_inverse_transpose_round_trips() {
        let c5 = note(Letter::C, 0, 5);
        let key = Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8));
        let up = Interval::new(3, music_theory::Quality::Major, false).expect("valid interval");
        let down = up.invert();
        let graph = Singable::transpose(Singable::transpose(key, up), down);
        let keys = graph.sing().expect("sings");
        assert_eq!(keys[0].note, Some(c5));
    }

    #[test]
    fn bound_folds_into_range_by_octaves() {
        let high_c = note(Letter::C, 0, 8);
        let low = note(Letter::C, 0, 4);
        let high = note(Letter::B, 0, 5);
        let key = Singable::Key(Key::note(0.0, 1.0, high_c, 0, 0.8));
        let graph = Singable::bound(key, low, high);
        let keys = graph.sing().expect("sings");
        let bounded_note = keys[0].note.expect("has note");
        assert!(bounded_note >= low && bounded_note <= high);
    }

    #[test]
    fn arpeggio_clip_outlier_does_not_panic_on_last_index() {
        let c5 = note(Letter::C, 0, 5);
        let e5 = note(Letter::E, 0, 5);
        let g5 = note(Letter::G, 0, 5);
        let chord = Singable::parallel(vec![
            Singable::Key(Key::note(0.0, 4.0, c5, 0, 0.8)),
            Singable::Key(Key::note(0.0, 4.0, e5, 0, 0.8)),
            Singable::Key(Key::note(0.0, 4.0, g5, 0, 0.8)),
        ]);
        let far_above = note(Letter::C, 0, 9);
        let pattern = Singable::Key(Key::note(0.0, 1.0, far_above, 0, 0.9));
        let graph = Singable::arpeggio(chord, pattern, ArpeggioOutliers::Clip, DEFAULT_ARPEGGIO_OFFSET);
        let keys = graph.sing().expect("does not index out of bounds");
        assert_eq!(keys[0].note, Some(g5));
    }

    #[test]
    fn harmonize_interleaves_original_and_transposed() {
        let c5 = note(Letter::C, 0, 5);
        let key = Singable::Key(Key::note(0.0, 1.0, c5, 0, 0.8));
        let third = Interval::new(3, music_theory::Quality::Major, false).expect("valid interval");
        let graph = Singable::harmonize(key, third);
        let keys = graph.sing().expect("sings");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].note, Some(c5));
        assert_eq!(keys[1].note, Some(note(Letter::E, 0, 5)));
    }
}
