// src/smoothing.rs - Majority-vote smoothing of per-frame labels
use serde::Serialize;
use std::collections::VecDeque;

use crate::gesture::{label_of, Gesture};

pub const DEFAULT_WINDOW_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StableState {
    pub gesture: Option<Gesture>,
    pub confidence: f64,
}

impl StableState {
    pub fn neutral() -> Self {
        Self {
            gesture: None,
            confidence: 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        label_of(self.gesture)
    }
}

/// Bounded FIFO of the most recent frame labels. `None` entries are
/// frames where no sign was recognized and still take part in the vote.
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    entries: VecDeque<Option<Gesture>>,
    capacity: usize,
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl SmoothingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<Gesture>> {
        self.entries.iter()
    }

    /// Records one frame label and returns the recomputed stable state.
    pub fn push(&mut self, label: Option<Gesture>) -> StableState {
        self.entries.push_back(label);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.stable()
    }

    /// Label counts ordered by first occurrence, oldest entry first.
    pub fn histogram(&self) -> Vec<(Option<Gesture>, usize)> {
        let mut counts: Vec<(Option<Gesture>, usize)> = Vec::new();
        for label in &self.entries {
            match counts.iter_mut().find(|(seen, _)| seen == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((*label, 1)),
            }
        }
        counts
    }

    /// Majority vote over the window. On equal counts the label that
    /// appears earliest in the window wins.
    pub fn stable(&self) -> StableState {
        if self.entries.is_empty() {
            return StableState::neutral();
        }

        let mut best = None;
        let mut best_count = 0;
        for (label, count) in self.histogram() {
            if count > best_count {
                best = label;
                best_count = count;
            }
        }

        StableState {
            gesture: best,
            confidence: best_count as f64 / self.entries.len() as f64,
        }
    }
}
