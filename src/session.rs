// src/session.rs - Per-frame pipeline: classify, smooth, confirm
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{SmoothingScope, TranslatorConfig};
use crate::confirm::{ConfirmedPhrase, PhraseConfirmer};
use crate::error::Result;
use crate::gesture::{FrameClassification, Gesture, PoseClassifier};
use crate::landmarks::{HandObservation, Handedness};
use crate::metrics::PerformanceMetrics;
use crate::smoothing::{SmoothingWindow, StableState};

/// Label displayed for handedness when no hand is in view.
pub const NO_HAND_LABEL: &str = "–";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKey {
    Shared,
    Left,
    Right,
    Unlabeled,
}

impl TrackKey {
    fn for_hand(handedness: Option<Handedness>) -> Self {
        match handedness {
            Some(Handedness::Left) => TrackKey::Left,
            Some(Handedness::Right) => TrackKey::Right,
            None => TrackKey::Unlabeled,
        }
    }
}

struct HandTrack {
    window: SmoothingWindow,
    confirmer: PhraseConfirmer,
    last_state: StableState,
    last_handedness: Option<Handedness>,
}

impl HandTrack {
    fn new(config: &TranslatorConfig) -> Self {
        Self {
            window: SmoothingWindow::new(config.window_size),
            confirmer: PhraseConfirmer::new(config.confirm_threshold),
            last_state: StableState::neutral(),
            last_handedness: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HandDiagnostics {
    pub track: TrackKey,
    pub handedness: Option<Handedness>,
    pub landmark_count: usize,
    pub frame: FrameClassification,
    pub stable: StableState,
}

/// Live values for display, describing the most recent hand processed.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub frame_index: u64,
    pub stable: StableState,
    pub landmark_count: usize,
    pub handedness: Option<Handedness>,
    pub hands: Vec<HandDiagnostics>,
    pub fps: f32,
}

impl Diagnostics {
    pub fn stable_label(&self) -> &'static str {
        self.stable.label()
    }

    pub fn handedness_label(&self) -> &'static str {
        if self.hands.is_empty() {
            return NO_HAND_LABEL;
        }
        self.handedness.map(|h| h.as_str()).unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub diagnostics: Diagnostics,
    pub confirmed: Vec<ConfirmedPhrase>,
}

/// Owns all smoothing and confirmation state for one capture session.
pub struct TranslatorSession {
    id: Uuid,
    started_at: DateTime<Local>,
    config: TranslatorConfig,
    classifier: PoseClassifier,
    tracks: HashMap<TrackKey, HandTrack>,
    metrics: PerformanceMetrics,
    frame_counter: u64,
}

impl TranslatorSession {
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let session = Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            classifier: PoseClassifier::new(config.pinch_threshold),
            config,
            tracks: HashMap::new(),
            metrics: PerformanceMetrics::new(),
            frame_counter: 0,
        };
        info!(
            "Started translator session {} ({:?} smoothing, window {})",
            session.id, session.config.smoothing_scope, session.config.window_size
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Last confirmed sign on a track, if the track exists.
    pub fn last_confirmed(&self, track: TrackKey) -> Option<Gesture> {
        self.tracks
            .get(&track)
            .and_then(|t| t.confirmer.last_confirmed())
    }

    /// Number of labels currently held in a track's window.
    pub fn window_len(&self, track: TrackKey) -> usize {
        self.tracks.get(&track).map(|t| t.window.len()).unwrap_or(0)
    }

    /// Drops all smoothing and confirmation state and starts a new session id.
    pub fn reset(&mut self) {
        info!("Resetting translator session {}", self.id);
        self.tracks.clear();
        self.metrics.reset();
        self.frame_counter = 0;
        self.id = Uuid::new_v4();
        self.started_at = Local::now();
    }

    pub fn process_frame(&mut self, hands: &[HandObservation]) -> FrameOutput {
        self.process_frame_at(hands, Local::now())
    }

    /// Runs one frame through the pipeline, stamping confirmations with `now`.
    /// The fps diagnostic follows the spacing of successive `now` values.
    pub fn process_frame_at(&mut self, hands: &[HandObservation], now: DateTime<Local>) -> FrameOutput {
        let started = Instant::now();
        self.frame_counter += 1;

        let mut hand_diagnostics = Vec::with_capacity(hands.len());
        let mut touched: Vec<TrackKey> = Vec::new();

        for (i, observation) in hands.iter().enumerate() {
            let frame = self.classifier.classify(observation);
            let key = self.track_key(observation);
            let track = self.track_mut(key);

            let stable = track.window.push(frame.gesture);
            track.last_state = stable;
            track.last_handedness = observation.handedness;

            debug!(
                "Frame {} hand {} ({}): frame {} {:.2}, stable {} {:.2}",
                self.frame_counter,
                i,
                observation.handedness_label(),
                frame.label(),
                frame.confidence,
                stable.label(),
                stable.confidence
            );

            hand_diagnostics.push(HandDiagnostics {
                track: key,
                handedness: observation.handedness,
                landmark_count: observation.landmark_count(),
                frame,
                stable,
            });
            if !touched.contains(&key) {
                touched.push(key);
            }
        }

        // Tracks with no hand in view this frame record a neutral frame.
        if self.config.smoothing_scope == SmoothingScope::Shared {
            self.track_mut(TrackKey::Shared);
        }
        for (key, track) in self.tracks.iter_mut() {
            if !touched.contains(key) {
                track.last_state = track.window.push(None);
            }
        }

        let mut confirmed = Vec::new();
        for key in &touched {
            let Some(track) = self.tracks.get_mut(key) else {
                continue;
            };
            if let Some(label) = track.confirmer.check(&track.last_state) {
                info!(
                    "Confirmed phrase {} ({:.2}) on {:?} track",
                    label, track.last_state.confidence, key
                );
                confirmed.push(ConfirmedPhrase {
                    label,
                    timestamp: now,
                    handedness: track.last_handedness,
                });
            }
        }

        self.metrics.record(now, started.elapsed());

        let last = hand_diagnostics.last();
        let diagnostics = Diagnostics {
            frame_index: self.frame_counter,
            stable: last.map(|h| h.stable).unwrap_or_else(StableState::neutral),
            landmark_count: last.map(|h| h.landmark_count).unwrap_or(0),
            handedness: last.and_then(|h| h.handedness),
            fps: self.metrics.fps,
            hands: hand_diagnostics,
        };

        FrameOutput {
            diagnostics,
            confirmed,
        }
    }

    fn track_key(&self, observation: &HandObservation) -> TrackKey {
        match self.config.smoothing_scope {
            SmoothingScope::Shared => TrackKey::Shared,
            SmoothingScope::PerHand => TrackKey::for_hand(observation.handedness),
        }
    }

    fn track_mut(&mut self, key: TrackKey) -> &mut HandTrack {
        let config = &self.config;
        self.tracks
            .entry(key)
            .or_insert_with(|| HandTrack::new(config))
    }
}
