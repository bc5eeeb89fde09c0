// src/gesture.rs - Single-frame hand pose classification
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::landmarks::{
    planar_distance, HandObservation, Handedness, Landmark, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP,
};

/// Label shown whenever no sign is recognized.
pub const NEUTRAL_LABEL: &str = "—";

pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gesture {
    Help,
    Pain,
    Fever,
    Water,
    Medicine,
    Allergy,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Gesture::Help,
        Gesture::Pain,
        Gesture::Fever,
        Gesture::Water,
        Gesture::Medicine,
        Gesture::Allergy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Help => "HELP",
            Gesture::Pain => "PAIN",
            Gesture::Fever => "FEVER",
            Gesture::Water => "WATER",
            Gesture::Medicine => "MEDICINE",
            Gesture::Allergy => "ALLERGY",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// Fixed confidence reported when this sign matches a single frame.
    pub fn frame_confidence(&self) -> f64 {
        match self {
            Gesture::Allergy => 0.92,
            Gesture::Fever | Gesture::Water => 0.88,
            Gesture::Medicine => 0.86,
            Gesture::Help | Gesture::Pain => 0.90,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders an optional sign, using the neutral dash for `None`.
pub fn label_of(gesture: Option<Gesture>) -> &'static str {
    gesture.map(|g| g.as_str()).unwrap_or(NEUTRAL_LABEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// (tip, pip) landmark indices. The thumb's IP joint plays the PIP role.
    pub fn joints(&self) -> (usize, usize) {
        match self {
            Finger::Thumb => (THUMB_TIP, THUMB_IP),
            Finger::Index => (INDEX_TIP, INDEX_PIP),
            Finger::Middle => (MIDDLE_TIP, MIDDLE_PIP),
            Finger::Ring => (RING_TIP, RING_PIP),
            Finger::Pinky => (PINKY_TIP, PINKY_PIP),
        }
    }
}

/// Extension test for one finger. Incomplete hands report every finger
/// as closed.
///
/// Non-thumb fingers are open when the tip sits above the PIP joint in
/// image space. The thumb extends sideways, so its direction flips with
/// the hand side.
pub fn finger_open(landmarks: &[Landmark], finger: Finger, handedness: Handedness) -> bool {
    if landmarks.len() < LANDMARK_COUNT {
        return false;
    }
    let (tip_idx, pip_idx) = finger.joints();
    let tip = &landmarks[tip_idx];
    let pip = &landmarks[pip_idx];

    match (finger, handedness) {
        (Finger::Thumb, Handedness::Right) => tip.x < pip.x,
        (Finger::Thumb, Handedness::Left) => tip.x > pip.x,
        _ => tip.y < pip.y,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OpenFingers {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl OpenFingers {
    pub fn from_landmarks(landmarks: &[Landmark], handedness: Handedness) -> Self {
        Self {
            thumb: finger_open(landmarks, Finger::Thumb, handedness),
            index: finger_open(landmarks, Finger::Index, handedness),
            middle: finger_open(landmarks, Finger::Middle, handedness),
            ring: finger_open(landmarks, Finger::Ring, handedness),
            pinky: finger_open(landmarks, Finger::Pinky, handedness),
        }
    }

    pub fn count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|open| **open)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameClassification {
    pub gesture: Option<Gesture>,
    pub confidence: f64,
}

impl FrameClassification {
    pub fn neutral() -> Self {
        Self {
            gesture: None,
            confidence: 0.0,
        }
    }

    pub fn sign(gesture: Gesture) -> Self {
        Self {
            gesture: Some(gesture),
            confidence: gesture.frame_confidence(),
        }
    }

    pub fn label(&self) -> &'static str {
        label_of(self.gesture)
    }
}

/// Deterministic rule table mapping one hand pose to a sign.
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    pinch_threshold: f64,
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD)
    }
}

impl PoseClassifier {
    pub fn new(pinch_threshold: f64) -> Self {
        Self { pinch_threshold }
    }

    pub fn pinch_threshold(&self) -> f64 {
        self.pinch_threshold
    }

    /// Thumb and index tips closer than the threshold. Incomplete hands
    /// never pinch.
    pub fn is_pinch(&self, landmarks: &[Landmark]) -> bool {
        if landmarks.len() < LANDMARK_COUNT {
            return false;
        }
        planar_distance(&landmarks[THUMB_TIP], &landmarks[INDEX_TIP]) < self.pinch_threshold
    }

    pub fn classify(&self, observation: &HandObservation) -> FrameClassification {
        let Some(handedness) = observation.handedness else {
            return FrameClassification::neutral();
        };
        if observation.landmarks.is_empty() {
            return FrameClassification::neutral();
        }
        if !observation.is_complete() {
            warn!(
                "Ignoring hand with {} landmarks (expected 21)",
                observation.landmark_count()
            );
            return FrameClassification::neutral();
        }

        self.classify_landmarks(&observation.landmarks, handedness)
    }

    /// Evaluates the rules in priority order; the first match wins.
    fn classify_landmarks(&self, landmarks: &[Landmark], handedness: Handedness) -> FrameClassification {
        let open = OpenFingers::from_landmarks(landmarks, handedness);
        let pinch = self.is_pinch(landmarks);
        let open_count = open.count();

        let gesture = if pinch && open.thumb && !open.ring && !open.pinky {
            Some(Gesture::Allergy)
        } else if open.index && !open.middle && !open.ring && !open.pinky && !open.thumb {
            Some(Gesture::Fever)
        } else if open.index && open.middle && !open.ring && !open.pinky && !open.thumb {
            Some(Gesture::Water)
        } else if open.thumb && open_count <= 2 && !open.index && !open.middle {
            Some(Gesture::Medicine)
        } else if open_count == 5 {
            Some(Gesture::Help)
        } else if open_count == 0 {
            Some(Gesture::Pain)
        } else {
            None
        };

        gesture
            .map(FrameClassification::sign)
            .unwrap_or_else(FrameClassification::neutral)
    }
}
