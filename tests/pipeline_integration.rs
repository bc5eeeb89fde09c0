//! End-to-end tests: synthetic landmark streams through the frame reader
//! and a translator session.

use std::io::Cursor;

use medsign::frame_source::{FrameReader, LandmarkFrame};
use medsign::synthetic::{hand_pose, SyntheticPose};
use medsign::{
    ConfirmedPhrase, Gesture, HandObservation, Handedness, SmoothingScope, Transcript,
    TranslatorConfig, TranslatorSession,
};

fn sign(gesture: Gesture) -> Vec<HandObservation> {
    vec![HandObservation::new(
        hand_pose(SyntheticPose::Sign(gesture), Handedness::Right),
        Handedness::Right,
    )]
}

fn run(session: &mut TranslatorSession, frames: &[Vec<HandObservation>]) -> Vec<(usize, ConfirmedPhrase)> {
    let mut confirmed = Vec::new();
    for (i, hands) in frames.iter().enumerate() {
        let output = session.process_frame(hands);
        confirmed.extend(output.confirmed.into_iter().map(|p| (i + 1, p)));
    }
    confirmed
}

fn session_with(config: TranslatorConfig) -> TranslatorSession {
    TranslatorSession::new(config).expect("valid config")
}

#[test]
fn replayed_stream_confirms_expected_phrases() {
    let mut lines = Vec::new();
    let mut push = |hands: Vec<HandObservation>, count: usize| {
        for _ in 0..count {
            let frame = LandmarkFrame {
                timestamp_ms: None,
                hands: hands.clone(),
            };
            lines.push(frame.encode().unwrap());
        }
    };
    push(Vec::new(), 12);
    push(sign(Gesture::Help), 12);
    push(sign(Gesture::Water), 15);
    let input = lines.join("\n");

    let mut session = session_with(TranslatorConfig::default());
    let mut transcript = Transcript::default();
    let mut confirmed_at = Vec::new();
    for (i, frame) in FrameReader::new(Cursor::new(input)).enumerate() {
        let frame = frame.expect("frame decodes");
        let output = session.process_frame(&frame.hands);
        for phrase in output.confirmed {
            confirmed_at.push((i + 1, phrase.label));
            transcript.push(phrase);
        }
    }

    // HELP lands on its 9th frame; WATER needs 9 of 12 frames too.
    assert_eq!(confirmed_at, vec![(21, Gesture::Help), (33, Gesture::Water)]);
    assert_eq!(transcript.len(), 2);
    assert!(transcript.to_text().ends_with("— WATER"));
}

#[test]
fn alternating_signs_never_repeat_back_to_back() {
    let mut frames = Vec::new();
    frames.extend(std::iter::repeat(sign(Gesture::Fever)).take(20));
    frames.extend(std::iter::repeat(sign(Gesture::Medicine)).take(20));

    let mut session = session_with(TranslatorConfig::default());
    let labels: Vec<_> = run(&mut session, &frames)
        .into_iter()
        .map(|(_, p)| p.label)
        .collect();
    assert_eq!(labels, vec![Gesture::Fever, Gesture::Medicine]);
}

#[test]
fn confidence_of_exactly_threshold_does_not_confirm() {
    let config = TranslatorConfig {
        window_size: 10,
        ..TranslatorConfig::default()
    };
    let mut session = session_with(config);

    let mut frames = vec![Vec::new(); 3];
    frames.extend(std::iter::repeat(sign(Gesture::Help)).take(8));

    // Frame 10 holds 7 HELP out of 10 entries: exactly 0.7, no emission.
    // Frame 11 evicts a neutral entry and reaches 0.8.
    let confirmed = run(&mut session, &frames);
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].0, 11);
    assert_eq!(confirmed[0].1.label, Gesture::Help);
}

#[test]
fn hand_leaving_view_does_not_reconfirm_same_sign() {
    let mut frames = Vec::new();
    frames.extend(std::iter::repeat(sign(Gesture::Pain)).take(12));
    frames.extend(std::iter::repeat(Vec::new()).take(12));
    frames.extend(std::iter::repeat(sign(Gesture::Pain)).take(12));

    let mut session = session_with(TranslatorConfig::default());
    let confirmed = run(&mut session, &frames);
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].1.label, Gesture::Pain);
}

#[test]
fn unrecognized_pose_keeps_window_neutral() {
    let other = vec![HandObservation::new(
        hand_pose(SyntheticPose::Unrecognized, Handedness::Left),
        Handedness::Left,
    )];
    let frames = vec![other; 15];

    let mut session = session_with(TranslatorConfig::default());
    assert!(run(&mut session, &frames).is_empty());
}

#[test]
fn per_hand_scope_confirms_both_hands_in_one_frame() {
    let config = TranslatorConfig {
        smoothing_scope: SmoothingScope::PerHand,
        ..TranslatorConfig::default()
    };
    let mut session = session_with(config);

    let both = vec![
        HandObservation::new(
            hand_pose(SyntheticPose::Sign(Gesture::Allergy), Handedness::Left),
            Handedness::Left,
        ),
        HandObservation::new(
            hand_pose(SyntheticPose::Sign(Gesture::Water), Handedness::Right),
            Handedness::Right,
        ),
    ];
    let confirmed = run(&mut session, &vec![both; 5]);

    assert_eq!(confirmed.len(), 2);
    assert!(confirmed.iter().all(|(frame, _)| *frame == 1));
    assert!(confirmed
        .iter()
        .any(|(_, p)| p.label == Gesture::Allergy && p.handedness == Some(Handedness::Left)));
    assert!(confirmed
        .iter()
        .any(|(_, p)| p.label == Gesture::Water && p.handedness == Some(Handedness::Right)));
}
