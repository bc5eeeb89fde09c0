// src/metrics.rs - Frame rate and processing time diagnostics
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

const METRICS_WINDOW: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    /// Rate implied by the timestamp gap between the two most recent frames.
    pub fps: f32,
    pub avg_processing_time: f32,
    pub frames_processed: u64,
    #[serde(skip)]
    frame_times: VecDeque<f32>,
    #[serde(skip)]
    last_frame_at: Option<DateTime<Local>>,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            fps: 0.0,
            avg_processing_time: 0.0,
            frames_processed: 0,
            frame_times: VecDeque::with_capacity(METRICS_WINDOW),
            last_frame_at: None,
        }
    }

    /// Records a frame stamped `frame_at` that took `elapsed` to process.
    /// Frames stamped at or before the previous one leave `fps` unchanged.
    pub fn record(&mut self, frame_at: DateTime<Local>, elapsed: Duration) {
        if let Some(previous) = self.last_frame_at {
            let gap = (frame_at - previous)
                .to_std()
                .map(|gap| gap.as_secs_f32())
                .unwrap_or(0.0);
            if gap > 0.0 {
                self.fps = 1.0 / gap;
            }
        }
        self.last_frame_at = Some(frame_at);

        self.frame_times.push_front(elapsed.as_secs_f32());
        if self.frame_times.len() > METRICS_WINDOW {
            self.frame_times.pop_back();
        }
        self.avg_processing_time =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.frames_processed += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
