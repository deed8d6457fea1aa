//! Lilypond-flavored text score rendering. Grounded on
//! `singable.py::to_lilypond` and `utils.py::length_notation`.

use std::collections::BTreeMap;

use music_singable::{Key, Singable};
use music_theory::Note;

use crate::errors::{ApiError, ApiResult};

/// A nested pretty-printable document: a single token, a space-or-newline
/// joined list, or a header/body/footer block collapsed to one line when
/// short. Mirrors `output_to_string`'s recursion over dict/list/str.
enum Doc {
    Leaf(String),
    List(Vec<Doc>),
    Block { header: String, body: Box<Doc>, footer: String },
}

const WRAP_WIDTH: usize = 80;

fn render(doc: &Doc) -> String {
    match doc {
        Doc::Leaf(s) => s.clone(),
        Doc::List(items) => {
            let rendered: Vec<String> = items.iter().map(render).collect();
            let spaced = rendered.join(" ");
            if spaced.len() < WRAP_WIDTH {
                spaced
            } else {
                rendered.join("\n")
            }
        }
        Doc::Block { header, body, footer } => {
            let inner = render(body);
            let indented = inner.replace('\n', "\n\t");
            let mut s = format!("{header}\n\t{indented}\n{footer}");
            if s.len() < WRAP_WIDTH {
                s = s.replace('\n', "").replace('\t', "");
            }
            s
        }
    }
}

/// Tunable parameters of a text-score rendering pass.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// Clef name to print for each channel that has one, e.g. `{0: "treble"}`.
    pub clefs: BTreeMap<u8, String>,
}

/// Lilypond-style duration token for a beat length, e.g. `1.0 -> "4"`,
/// `1.5 -> "4."`. Only the canonical set the original renderer supports is
/// covered; other lengths are a modeling error at the call site.
fn length_notation(length: f64) -> ApiResult<&'static str> {
    const TABLE: &[(f64, &str)] = &[
        (0.125, "32"),
        (0.25, "16"),
        (0.375, "16."),
        (0.5, "8"),
        (0.75, "8."),
        (0.875, "8.."),
        (1.0, "4"),
        (1.5, "4."),
        (1.75, "4.."),
        (2.0, "2"),
        (3.0, "2."),
        (3.5, "2.."),
        (4.0, "1"),
    ];
    TABLE
        .iter()
        .find(|(value, _)| (*value - length).abs() < 1e-9)
        .map(|(_, token)| *token)
        .ok_or(ApiError::UnsupportedDuration(length))
}

/// Lilypond pitch token for one note: letter, sharp/flat markers, and
/// octave marks relative to `c'` (the octave carrying middle C, `C5` here).
fn pitch_token(note: Note) -> String {
    let mut token = note.letter().to_string().to_lowercase();
    let accidental = note.accidental();
    if accidental > 0 {
        token.push_str(&"is".repeat(accidental as usize));
    } else if accidental < 0 {
        token.push_str(&"es".repeat((-accidental) as usize));
    }
    let dots = note.octave() - 5;
    if dots > 0 {
        token.push_str(&"'".repeat(dots as usize));
    } else if dots < 0 {
        token.push_str(&",".repeat((-dots) as usize));
    }
    token
}

/// Group keys on one channel into simultaneous-start chords, windowed
/// against the next group's start so trailing silence becomes an explicit
/// rest. Mirrors `to_lilypond`'s per-channel windowing loop.
fn windowed_groups(mut keys: Vec<Key>) -> Vec<(f64, f64, Vec<Key>)> {
    keys.sort_by(|a, b| a.start.partial_cmp(&b.start).expect("key start is never NaN"));
    let mut starts: Vec<f64> = Vec::new();
    for key in &keys {
        if starts.last().is_none_or(|last| (*last - key.start).abs() > 1e-9) {
            starts.push(key.start);
        }
    }

    let mut groups = Vec::new();
    for (i, &timing) in starts.iter().enumerate() {
        let chord: Vec<Key> = keys.iter().copied().filter(|k| (k.start - timing).abs() < 1e-9).collect();
        let timing_next = starts.get(i + 1).copied();
        let natural_length = chord[0].length;
        let length = match timing_next {
            Some(next) if natural_length >= next - timing => next - timing,
            _ => natural_length,
        };
        groups.push((timing, length, chord));
        if let Some(next) = timing_next {
            let rest_length = next - timing - length;
            if rest_length > 1e-9 {
                groups.push((timing + length, rest_length, Vec::new()));
            }
        }
    }
    groups
}

fn render_group(length: f64, chord: &[Key]) -> ApiResult<Doc> {
    let token = length_notation(length)?.to_string();
    if chord.is_empty() {
        return Ok(Doc::Leaf(format!("r{token}")));
    }
    let pitches: Vec<Doc> = chord.iter().filter_map(|k| k.note).map(|n| Doc::Leaf(pitch_token(n))).collect();
    Ok(Doc::Block { header: "<".into(), body: Box::new(Doc::List(pitches)), footer: format!(">{token}") })
}

/// Render `singable` as a lilypond `GrandStaff` of per-channel staves, one
/// staff per distinct channel in ascending order, each voiced with `4/4`
/// and an optional clef.
pub fn to_text_score(singable: &Singable, options: &ScoreOptions) -> ApiResult<String> {
    let keys = singable.sing()?;

    let mut by_channel: BTreeMap<u8, Vec<Key>> = BTreeMap::new();
    for key in keys {
        by_channel.entry(key.channel).or_default().push(key);
    }

    let mut staves = Vec::new();
    for (channel, channel_keys) in by_channel {
        let mut body = Vec::new();
        if let Some(clef) = options.clefs.get(&channel) {
            body.push(Doc::Leaf("\\clef".into()));
            body.push(Doc::Leaf(clef.clone()));
        }
        body.push(Doc::Leaf("\\time".into()));
        body.push(Doc::Leaf("4/4".into()));
        for (_, length, chord) in windowed_groups(channel_keys) {
            body.push(render_group(length, &chord)?);
        }
        staves.push(Doc::List(vec![
            Doc::Leaf("\\new".into()),
            Doc::Leaf("Staff".into()),
            Doc::Block { header: "{".into(), body: Box::new(Doc::List(body)), footer: "}".into() },
        ]));
    }

    let channels_block =
        Doc::Block { header: "<<".into(), body: Box::new(Doc::List(staves)), footer: ">>".into() };
    let top = Doc::List(vec![
        Doc::Leaf("\\new".into()),
        Doc::Leaf("GrandStaff".into()),
        Doc::Block { header: "{".into(), body: Box::new(Doc::List(vec![channels_block])), footer: "}".into() },
    ]);
    Ok(render(&top))
}
