// src/synthetic.rs - Canonical hand poses for demos and replay fixtures
use crate::gesture::Gesture;
use crate::landmarks::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticPose {
    Sign(Gesture),
    /// Thumb, index and pinky raised: matches no rule.
    Unrecognized,
}

// Finger columns for a right hand facing the camera, wrist at the bottom.
const INDEX_X: f64 = 0.45;
const MIDDLE_X: f64 = 0.50;
const RING_X: f64 = 0.55;
const PINKY_X: f64 = 0.60;

const MCP_Y: f64 = 0.65;
const PIP_Y: f64 = 0.50;

#[derive(Clone, Copy)]
struct Extension {
    thumb: bool,
    index: bool,
    middle: bool,
    ring: bool,
    pinky: bool,
    pinch: bool,
}

impl Extension {
    fn for_pose(pose: SyntheticPose) -> Self {
        let raised = |thumb, index, middle, ring, pinky| Extension {
            thumb,
            index,
            middle,
            ring,
            pinky,
            pinch: false,
        };

        match pose {
            SyntheticPose::Sign(Gesture::Help) => raised(true, true, true, true, true),
            SyntheticPose::Sign(Gesture::Pain) => raised(false, false, false, false, false),
            SyntheticPose::Sign(Gesture::Fever) => raised(false, true, false, false, false),
            SyntheticPose::Sign(Gesture::Water) => raised(false, true, true, false, false),
            SyntheticPose::Sign(Gesture::Medicine) => raised(true, false, false, false, false),
            SyntheticPose::Sign(Gesture::Allergy) => Extension {
                pinch: true,
                ..raised(true, false, false, false, false)
            },
            SyntheticPose::Unrecognized => raised(true, true, false, false, true),
        }
    }
}

fn finger(landmarks: &mut [Landmark], base: usize, x: f64, open: bool) {
    let (dip_y, tip_y) = if open { (0.42, 0.35) } else { (0.56, 0.60) };
    landmarks[base] = Landmark::new(x, MCP_Y, 0.0);
    landmarks[base + 1] = Landmark::new(x, PIP_Y, 0.0);
    landmarks[base + 2] = Landmark::new(x, dip_y, 0.0);
    landmarks[base + 3] = Landmark::new(x, tip_y, 0.0);
}

/// Builds 21 landmarks for `pose`. Left hands are the horizontal mirror
/// image of right hands.
pub fn hand_pose(pose: SyntheticPose, handedness: Handedness) -> Vec<Landmark> {
    let ext = Extension::for_pose(pose);
    let mut landmarks = vec![Landmark::zeros(); LANDMARK_COUNT];

    landmarks[WRIST] = Landmark::new(0.50, 0.85, 0.0);
    landmarks[THUMB_CMC] = Landmark::new(0.44, 0.80, 0.0);
    landmarks[THUMB_MCP] = Landmark::new(0.41, 0.72, 0.0);
    landmarks[THUMB_IP] = Landmark::new(0.40, 0.64, 0.0);
    landmarks[THUMB_TIP] = if ext.thumb {
        Landmark::new(0.33, 0.58, 0.0)
    } else {
        Landmark::new(0.47, 0.70, 0.0)
    };

    finger(&mut landmarks, INDEX_MCP, INDEX_X, ext.index);
    finger(&mut landmarks, MIDDLE_MCP, MIDDLE_X, ext.middle);
    finger(&mut landmarks, RING_MCP, RING_X, ext.ring);
    finger(&mut landmarks, PINKY_MCP, PINKY_X, ext.pinky);

    if ext.pinch {
        // Curled index resting against the thumb tip.
        landmarks[INDEX_DIP] = Landmark::new(0.40, 0.54, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(0.36, 0.56, 0.0);
    }

    if handedness == Handedness::Left {
        for lm in landmarks.iter_mut() {
            lm.x = 1.0 - lm.x;
        }
    }

    landmarks
}
