// src/transcript.rs - Confirmed phrase history and export
use chrono::Local;
use csv::Writer;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::confirm::ConfirmedPhrase;
use crate::error::Result;
use crate::gesture::Gesture;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded history of confirmed phrases, newest first.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: VecDeque<ConfirmedPhrase>,
    limit: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl Transcript {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, phrase: ConfirmedPhrase) {
        self.entries.push_front(phrase);
        while self.entries.len() > self.limit {
            self.entries.pop_back();
        }
    }

    pub fn extend<I: IntoIterator<Item = ConfirmedPhrase>>(&mut self, phrases: I) {
        for phrase in phrases {
            self.push(phrase);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ConfirmedPhrase> {
        self.entries.iter()
    }

    pub fn oldest_first(&self) -> impl Iterator<Item = &ConfirmedPhrase> {
        self.entries.iter().rev()
    }

    /// Occurrences of each sign still held in the history.
    pub fn counts(&self) -> Vec<(Gesture, usize)> {
        Gesture::ALL
            .into_iter()
            .map(|g| (g, self.entries.iter().filter(|p| p.label == g).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// Plain-text transcript, one "HH:MM:SS — LABEL" line per phrase in
    /// the order the phrases were confirmed.
    pub fn to_text(&self) -> String {
        self.oldest_first()
            .map(format_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn format_line(phrase: &ConfirmedPhrase) -> String {
    format!("{} — {}", phrase.timestamp.format("%H:%M:%S"), phrase.label)
}

#[derive(Debug, Serialize)]
struct TranscriptRecord {
    timestamp: String,
    time: String,
    label: &'static str,
    handedness: Option<&'static str>,
}

impl From<&ConfirmedPhrase> for TranscriptRecord {
    fn from(phrase: &ConfirmedPhrase) -> Self {
        Self {
            timestamp: phrase.timestamp.to_rfc3339(),
            time: phrase.timestamp.format("%H:%M:%S").to_string(),
            label: phrase.label.as_str(),
            handedness: phrase.handedness.map(|h| h.as_str()),
        }
    }
}

pub struct TranscriptExporter {
    output_dir: PathBuf,
    session_name: String,
}

impl TranscriptExporter {
    pub fn new(output_dir: impl AsRef<Path>, session_name: Option<String>) -> Self {
        let session_name = session_name.unwrap_or_else(|| {
            format!("session_{}", Local::now().format("%Y%m%d_%H%M%S"))
        });

        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            session_name,
        }
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn session_dir(&self) -> PathBuf {
        self.output_dir.join(&self.session_name)
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.session_dir().join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    pub fn export_text(&self, transcript: &Transcript) -> Result<PathBuf> {
        let file_name = format!(
            "translator_transcript_{}.txt",
            Local::now().timestamp_millis()
        );
        let path = self.prepare(&file_name)?;
        fs::write(&path, transcript.to_text())?;
        info!("Wrote {} phrases to {}", transcript.len(), path.display());
        Ok(path)
    }

    pub fn export_csv(&self, transcript: &Transcript) -> Result<PathBuf> {
        let path = self.prepare("transcript.csv")?;
        let file = File::create(&path)?;
        let mut writer = Writer::from_writer(file);

        for phrase in transcript.oldest_first() {
            writer.serialize(TranscriptRecord::from(phrase))?;
        }

        writer.flush()?;
        info!("Wrote {} phrases to {}", transcript.len(), path.display());
        Ok(path)
    }

    pub fn export_json(&self, transcript: &Transcript) -> Result<PathBuf> {
        let path = self.prepare("transcript.json")?;
        let phrases: Vec<&ConfirmedPhrase> = transcript.oldest_first().collect();
        fs::write(&path, serde_json::to_string_pretty(&phrases)?)?;
        info!("Wrote {} phrases to {}", transcript.len(), path.display());
        Ok(path)
    }
}
