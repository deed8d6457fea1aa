use clap::{Parser, Subcommand, ValueEnum};
use music_theory::Mode;

#[derive(Parser, Debug)]
#[command(name = "music-cli", version, about = "Generate, reharmonize, and render a melody")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a melody, reharmonize it, and print a report.
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Tonic note in scientific pitch notation, e.g. `C5`, `F#4`, `Bb5`.
    #[arg(long, default_value = "C5", value_name = "NOTE")]
    pub tonic: String,

    /// Scale mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Major)]
    pub mode: ModeArg,

    /// Phrase pattern, e.g. `AABA`, `ABAB`.
    #[arg(long, default_value = "AABA", value_name = "PATTERN")]
    pub pattern: String,

    /// Minimum target tension, `0.0..=1.0`.
    #[arg(long, default_value_t = 0.2)]
    pub min_tension: f64,

    /// Maximum target tension, `0.0..=1.0`.
    #[arg(long, default_value_t = 0.8)]
    pub max_tension: f64,

    /// Seed for the random number generator, for reproducible output.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Render a lilypond-style text score of the full arrangement.
    #[arg(long)]
    pub score: bool,

    /// Emit the report as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    Major,
    NaturalMinor,
    SimpleMajor,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Major => Mode::Major,
            ModeArg::NaturalMinor => Mode::NaturalMinor,
            ModeArg::SimpleMajor => Mode::SimpleMajor,
        }
    }
}
