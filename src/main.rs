// src/main.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Duration as TimeDelta, Local};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

use medsign::frame_source::{FrameReader, LandmarkFrame};
use medsign::transcript::format_line;
use medsign::{SmoothingScope, Transcript, TranscriptExporter, TranslatorConfig, TranslatorSession};

#[derive(Parser, Debug)]
#[command(name = "medsign", about = "Translate a hand landmark stream into medical phrases")]
struct Cli {
    /// JSON-lines landmark stream, or "-" for stdin
    input: String,

    /// Translator config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smooth and confirm each hand separately
    #[arg(long)]
    per_hand: bool,

    /// Export the transcript under this directory
    #[arg(long, conflicts_with = "save")]
    export: Option<PathBuf>,

    /// Export the transcript under the configured output directory
    #[arg(long)]
    save: bool,
}

/// Maps stream timestamps onto wall-clock time. The first stamped frame
/// lands on the replay start; unstamped frames use the current time.
struct StreamClock {
    started: DateTime<Local>,
    first_ms: Option<u64>,
}

impl StreamClock {
    fn new(started: DateTime<Local>) -> Self {
        Self {
            started,
            first_ms: None,
        }
    }

    fn stamp(&mut self, timestamp_ms: Option<u64>) -> DateTime<Local> {
        let Some(ms) = timestamp_ms else {
            return Local::now();
        };
        let first = *self.first_ms.get_or_insert(ms);
        self.started + TimeDelta::milliseconds(ms as i64 - first as i64)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean phrase stream
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TranslatorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TranslatorConfig::default(),
    };
    if cli.per_hand {
        config.smoothing_scope = SmoothingScope::PerHand;
    }

    let mut session = TranslatorSession::new(config.clone())?;
    let mut transcript = Transcript::new(config.history_limit);
    let mut clock = StreamClock::new(session.started_at());

    let frames: Box<dyn Iterator<Item = medsign::Result<LandmarkFrame>>> = if cli.input == "-" {
        Box::new(FrameReader::new(io::stdin().lock()))
    } else {
        Box::new(
            FrameReader::open(&cli.input)
                .with_context(|| format!("opening landmark stream {}", cli.input))?,
        )
    };

    let mut skipped = 0usize;
    for frame in frames {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping frame: {}", e);
                skipped += 1;
                continue;
            }
        };

        let now = clock.stamp(frame.timestamp_ms);
        let output = session.process_frame_at(&frame.hands, now);
        for phrase in output.confirmed {
            println!("{}", format_line(&phrase));
            transcript.push(phrase);
        }
    }

    info!(
        "Processed {} frames ({} skipped) at {:.1} fps, {} phrases confirmed",
        session.frame_count(),
        skipped,
        session.metrics().fps,
        transcript.len()
    );
    for (gesture, count) in transcript.counts() {
        info!("  {}: {}", gesture, count);
    }

    // --save writes under the configured output directory
    let export_dir = cli
        .export
        .or_else(|| cli.save.then(|| config.output_directory.clone()));
    if let Some(dir) = export_dir {
        let exporter = TranscriptExporter::new(&dir, Some(format!("session_{}", session.id())));
        let text = exporter.export_text(&transcript)?;
        let csv = exporter.export_csv(&transcript)?;
        let json = exporter.export_json(&transcript)?;
        eprintln!("Transcript exported:");
        for path in [text, csv, json] {
            eprintln!("  {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_around_the_input() {
        let cli = Cli::try_parse_from(["medsign", "--per-hand", "frames.jsonl", "--export", "out"])
            .unwrap();
        assert_eq!(cli.input, "frames.jsonl");
        assert!(cli.per_hand);
        assert_eq!(cli.export, Some(PathBuf::from("out")));
        assert!(!cli.save);
    }

    #[test]
    fn misspelled_flag_is_rejected() {
        assert!(Cli::try_parse_from(["medsign", "--per-hnad", "frames.jsonl"]).is_err());
        assert!(Cli::try_parse_from(["medsign"]).is_err());
    }

    #[test]
    fn export_and_save_conflict() {
        let err = Cli::try_parse_from(["medsign", "-", "--export", "out", "--save"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn stream_clock_follows_frame_spacing() {
        let started = Local::now();
        let mut clock = StreamClock::new(started);
        assert_eq!(clock.stamp(Some(1_000)), started);
        assert_eq!(clock.stamp(Some(1_033)), started + TimeDelta::milliseconds(33));
        assert_eq!(clock.stamp(Some(1_500)), started + TimeDelta::milliseconds(500));

        let before = Local::now();
        assert!(clock.stamp(None) >= before);
    }
}
