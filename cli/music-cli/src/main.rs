mod args;
mod arrangement;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use music_api::{to_midi_events, to_text_score, MidiOptions, ScoreOptions};
use music_theory::Note;
use rand::{rngs::StdRng, SeedableRng};

use crate::args::{Cli, Commands, GenerateArgs};
use crate::arrangement::{arrange, melody_to_singable};
use crate::report::{build_report, count_sounding_notes, print_text_report};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let tonic = Note::parse(&args.tonic).with_context(|| format!("'{}' is not a valid tonic note", args.tonic))?;
    let mode = args.mode.into();
    let scale = music_theory::Scale::new(tonic, mode);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let melody = music_melody::generate(mode, tonic, &args.pattern, args.min_tension, args.max_tension, &mut rng)
        .context("melody generation failed")?;

    let melody_singable = melody_to_singable(&melody, &scale)?;
    let melody_note_count = count_sounding_notes(&melody_singable)?;

    let arrangement = arrange(&melody, &scale).context("reharmonization failed")?;
    let song = arrangement.song;

    let midi_events = to_midi_events(&song, &MidiOptions::default())?;

    let report = build_report(
        tonic,
        mode,
        &args.pattern,
        melody_note_count,
        melody.total_length(),
        arrangement.chord_count,
        midi_events.len(),
    );

    if args.json {
        let serialized = serde_json::to_string_pretty(&report).context("failed to serialize JSON report")?;
        println!("{serialized}");
    } else {
        print_text_report(&report);
    }

    if args.score {
        let text_score = to_text_score(&song, &ScoreOptions::default())?;
        println!("\n{text_score}");
    }

    Ok(())
}
