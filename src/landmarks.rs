// src/landmarks.rs - Hand landmark layout and per-frame hand observations
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TranslatorError};

/// Normalized image-space keypoint. `z` is zero for 2D sources.
pub type Landmark = Vector3<f64>;

pub const LANDMARK_COUNT: usize = 21;

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parses a detector label. Anything other than "Left"/"Right"
    /// (ignoring case and surrounding whitespace) is unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("left") {
            Some(Handedness::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Handedness::Right)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame's landmarks for one detected hand.
///
/// `handedness` is `None` when the detector reported a side label that
/// could not be recognized; such hands always classify as neutral.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub landmarks: Vec<Landmark>,
    pub handedness: Option<Handedness>,
}

impl HandObservation {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness: Some(handedness),
        }
    }

    /// Builds an observation from a raw detector label. A missing or blank
    /// label falls back to `Right`, matching what the capture loop assumes.
    pub fn from_label(landmarks: Vec<Landmark>, label: Option<&str>) -> Self {
        let handedness = match label.map(str::trim) {
            None | Some("") => Some(Handedness::Right),
            Some(raw) => Handedness::from_label(raw),
        };
        Self { landmarks, handedness }
    }

    /// Strict check for callers that want to reject short or long
    /// landmark sets instead of letting them degrade to neutral.
    pub fn validate(&self) -> Result<()> {
        if self.landmarks.len() != LANDMARK_COUNT {
            return Err(TranslatorError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found: self.landmarks.len(),
            });
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT
    }

    pub fn landmark_count(&self) -> usize {
        self.landmarks.len()
    }

    pub fn handedness_label(&self) -> &'static str {
        self.handedness.map(|h| h.as_str()).unwrap_or("Unknown")
    }
}

/// Planar distance between two landmarks; depth is ignored.
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f64 {
    (a.xy() - b.xy()).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handedness_labels_parse_loosely() {
        assert_eq!(Handedness::from_label("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::from_label(" right "), Some(Handedness::Right));
        assert_eq!(Handedness::from_label("both"), None);
        assert_eq!(Handedness::from_label(""), None);
    }

    #[test]
    fn missing_label_defaults_to_right() {
        let obs = HandObservation::from_label(Vec::new(), None);
        assert_eq!(obs.handedness, Some(Handedness::Right));

        let obs = HandObservation::from_label(Vec::new(), Some(""));
        assert_eq!(obs.handedness, Some(Handedness::Right));
        let obs = HandObservation::from_label(Vec::new(), Some("   "));
        assert_eq!(obs.handedness, Some(Handedness::Right));

        let obs = HandObservation::from_label(Vec::new(), Some("Ambidextrous"));
        assert_eq!(obs.handedness, None);
        assert_eq!(obs.handedness_label(), "Unknown");
    }

    #[test]
    fn validate_rejects_wrong_landmark_count() {
        let obs = HandObservation::new(vec![Landmark::zeros(); 20], Handedness::Left);
        match obs.validate() {
            Err(TranslatorError::LandmarkCount { expected, found }) => {
                assert_eq!(expected, 21);
                assert_eq!(found, 20);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let obs = HandObservation::new(vec![Landmark::zeros(); 21], Handedness::Left);
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn planar_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 0.5);
        let b = Landmark::new(0.03, 0.04, -0.5);
        assert!((planar_distance(&a, &b) - 0.05).abs() < 1e-12);
    }
}
