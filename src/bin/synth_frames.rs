// src/bin/synth_frames.rs - Writes a synthetic landmark stream for replay
//
//   synth_frames [--left] HELP:12 idle:6 PAIN:15 other:4 > frames.jsonl
//
// "idle" emits frames with no hand in view, "other" a pose matching no sign.
use anyhow::{bail, Context, Result};

use medsign::frame_source::LandmarkFrame;
use medsign::synthetic::{hand_pose, SyntheticPose};
use medsign::{Gesture, HandObservation, Handedness};

const FRAME_INTERVAL_MS: u64 = 33;

enum Segment {
    Idle(usize),
    Pose(SyntheticPose, usize),
}

fn parse_segment(spec: &str) -> Result<Segment> {
    let (name, count) = spec
        .split_once(':')
        .with_context(|| format!("expected NAME:FRAMES, got '{}'", spec))?;
    let count: usize = count
        .parse()
        .with_context(|| format!("bad frame count in '{}'", spec))?;

    let segment = match name.to_ascii_lowercase().as_str() {
        "idle" => Segment::Idle(count),
        "other" => Segment::Pose(SyntheticPose::Unrecognized, count),
        _ => match Gesture::from_label(name) {
            Some(gesture) => Segment::Pose(SyntheticPose::Sign(gesture), count),
            None => bail!("unknown sign '{}'", name),
        },
    };
    Ok(segment)
}

fn main() -> Result<()> {
    let mut handedness = Handedness::Right;
    let mut segments = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--left" => handedness = Handedness::Left,
            "--right" => handedness = Handedness::Right,
            spec => segments.push(parse_segment(spec)?),
        }
    }
    if segments.is_empty() {
        bail!("usage: synth_frames [--left|--right] NAME:FRAMES...");
    }

    let mut timestamp_ms = 0;
    for segment in segments {
        let (hands, count) = match segment {
            Segment::Idle(count) => (Vec::new(), count),
            Segment::Pose(pose, count) => (
                vec![HandObservation::new(hand_pose(pose, handedness), handedness)],
                count,
            ),
        };

        for _ in 0..count {
            let frame = LandmarkFrame {
                timestamp_ms: Some(timestamp_ms),
                hands: hands.clone(),
            };
            println!("{}", frame.encode()?);
            timestamp_ms += FRAME_INTERVAL_MS;
        }
    }

    Ok(())
}
