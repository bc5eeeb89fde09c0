// src/lib.rs
pub mod config;
pub mod confirm;
pub mod error;
pub mod frame_source;
pub mod gesture;
pub mod landmarks;
pub mod metrics;
pub mod session;
pub mod smoothing;
pub mod synthetic;
pub mod transcript;

pub use config::{SmoothingScope, TranslatorConfig};
pub use confirm::{ConfirmedPhrase, PhraseConfirmer};
pub use error::{Result, TranslatorError};
pub use gesture::{FrameClassification, Gesture, PoseClassifier, NEUTRAL_LABEL};
pub use landmarks::{HandObservation, Handedness, Landmark, LANDMARK_COUNT};
pub use session::{Diagnostics, FrameOutput, TrackKey, TranslatorSession};
pub use smoothing::{SmoothingWindow, StableState};
pub use transcript::{Transcript, TranscriptExporter};
