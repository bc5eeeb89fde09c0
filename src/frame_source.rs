// src/frame_source.rs - JSON-lines landmark stream from an upstream detector
//
// One frame per line:
//   {"timestamp_ms": 1200, "hands": [{"handedness": "Right",
//     "landmarks": [{"x": 0.5, "y": 0.8, "z": 0.0}, ...]}]}
// Landmarks may also be given as [x, y] or [x, y, z] arrays.
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::warn;

use crate::error::{Result, TranslatorError};
use crate::landmarks::{HandObservation, Landmark};

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLandmark {
    Point {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
    },
    Array(Vec<f64>),
    // Anything else (missing coordinate, non-numeric value) is dropped
    Other(serde_json::Value),
}

impl RawLandmark {
    fn to_landmark(&self) -> Option<Landmark> {
        match self {
            RawLandmark::Point { x, y, z } => Some(Landmark::new(*x, *y, *z)),
            RawLandmark::Array(coords) => match coords.as_slice() {
                [x, y] => Some(Landmark::new(*x, *y, 0.0)),
                [x, y, z, ..] => Some(Landmark::new(*x, *y, *z)),
                _ => None,
            },
            RawLandmark::Other(_) => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawHand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handedness: Option<String>,
    #[serde(default)]
    landmarks: Vec<RawLandmark>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp_ms: Option<u64>,
    #[serde(default)]
    hands: Vec<RawHand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_ms: Option<u64>,
    pub hands: Vec<HandObservation>,
}

impl LandmarkFrame {
    pub fn decode(line: &str, line_no: usize) -> Result<Self> {
        let raw: RawFrame = serde_json::from_str(line)
            .map_err(|source| TranslatorError::Decode { line: line_no, source })?;

        let hands = raw
            .hands
            .into_iter()
            .map(|hand| {
                let landmarks: Vec<Landmark> =
                    hand.landmarks.iter().filter_map(RawLandmark::to_landmark).collect();
                if landmarks.len() != hand.landmarks.len() {
                    warn!(
                        "Line {}: dropped {} malformed landmarks",
                        line_no,
                        hand.landmarks.len() - landmarks.len()
                    );
                }
                HandObservation::from_label(landmarks, hand.handedness.as_deref())
            })
            .collect();

        Ok(Self {
            timestamp_ms: raw.timestamp_ms,
            hands,
        })
    }

    pub fn encode(&self) -> Result<String> {
        let raw = RawFrame {
            timestamp_ms: self.timestamp_ms,
            hands: self
                .hands
                .iter()
                .map(|hand| RawHand {
                    handedness: Some(hand.handedness_label().to_string()),
                    landmarks: hand
                        .landmarks
                        .iter()
                        .map(|lm| RawLandmark::Point { x: lm.x, y: lm.y, z: lm.z })
                        .collect(),
                })
                .collect(),
        };
        Ok(serde_json::to_string(&raw)?)
    }
}

/// Iterates frames from a line-oriented reader, skipping blank lines.
pub struct FrameReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl FrameReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<LandmarkFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(LandmarkFrame::decode(&line, self.line_no));
        }
    }
}
