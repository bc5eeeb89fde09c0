// src/confirm.rs - Turns stable labels into de-duplicated phrase events
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::gesture::Gesture;
use crate::landmarks::Handedness;
use crate::smoothing::StableState;

pub const DEFAULT_CONFIRM_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedPhrase {
    pub label: Gesture,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,
}

#[derive(Debug, Clone)]
pub struct PhraseConfirmer {
    threshold: f64,
    last_confirmed: Option<Gesture>,
}

impl Default for PhraseConfirmer {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_THRESHOLD)
    }
}

impl PhraseConfirmer {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_confirmed: None,
        }
    }

    pub fn last_confirmed(&self) -> Option<Gesture> {
        self.last_confirmed
    }

    /// Returns the sign to emit, if any. A sign is emitted once when it
    /// becomes stable with confidence strictly above the threshold, and
    /// not again until some other sign has been confirmed in between.
    pub fn check(&mut self, state: &StableState) -> Option<Gesture> {
        let gesture = state.gesture?;
        if state.confidence > self.threshold && self.last_confirmed != Some(gesture) {
            self.last_confirmed = Some(gesture);
            return Some(gesture);
        }
        None
    }

    pub fn reset(&mut self) {
        self.last_confirmed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stable(gesture: Gesture, confidence: f64) -> StableState {
        StableState {
            gesture: Some(gesture),
            confidence,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let mut confirmer = PhraseConfirmer::default();
        assert_eq!(confirmer.check(&stable(Gesture::Help, 0.7)), None);
        assert_eq!(confirmer.check(&stable(Gesture::Help, 0.71)), Some(Gesture::Help));
    }

    #[test]
    fn repeated_label_is_emitted_once() {
        let mut confirmer = PhraseConfirmer::default();
        assert_eq!(confirmer.check(&stable(Gesture::Pain, 0.9)), Some(Gesture::Pain));
        assert_eq!(confirmer.check(&stable(Gesture::Pain, 1.0)), None);
        assert_eq!(confirmer.check(&stable(Gesture::Water, 0.8)), Some(Gesture::Water));
        assert_eq!(confirmer.check(&stable(Gesture::Pain, 0.8)), Some(Gesture::Pain));
    }

    #[test]
    fn neutral_and_weak_states_do_not_reset_dedup() {
        let mut confirmer = PhraseConfirmer::default();
        confirmer.check(&stable(Gesture::Fever, 0.9));
        assert_eq!(confirmer.check(&StableState::neutral()), None);
        assert_eq!(
            confirmer.check(&StableState { gesture: None, confidence: 1.0 }),
            None
        );
        assert_eq!(confirmer.check(&stable(Gesture::Water, 0.5)), None);
        assert_eq!(confirmer.check(&stable(Gesture::Fever, 0.9)), None);
        assert_eq!(confirmer.last_confirmed(), Some(Gesture::Fever));
    }

    #[test]
    fn reset_allows_the_same_sign_again() {
        let mut confirmer = PhraseConfirmer::default();
        confirmer.check(&stable(Gesture::Allergy, 0.95));
        confirmer.reset();
        assert_eq!(confirmer.check(&stable(Gesture::Allergy, 0.95)), Some(Gesture::Allergy));
    }
}
