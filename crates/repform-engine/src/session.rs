//! Session accumulator: rep durations, feedback log and duration histogram.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gate::is_awaiting_notice;

/// Round a duration to the nearest half second, ties to even
pub fn round_to_half_second(secs: f64) -> f64 {
    (secs * 2.0).round_ties_even() / 2.0
}

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBucket {
    /// Bucket duration, rounded to the nearest 0.5 s
    pub seconds: f64,
    pub count: u32,
}

/// Read-only snapshot of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_reps: u32,
    /// Accepted rep durations in seconds, in order
    pub rep_durations: Vec<f64>,
    /// Mean of `rep_durations`; 0 when no reps were accepted
    pub average_duration: f64,
    /// Feedback strings in the order they were issued
    pub feedback: Vec<String>,
    /// Rounded duration buckets, ascending
    pub duration_histogram: Vec<DurationBucket>,
}

/// Accumulates accepted reps and feedback for one session
#[derive(Debug, Clone, Default)]
pub struct SessionAccumulator {
    total_reps: u32,
    durations: Vec<f64>,
    feedback: Vec<String>,
    // Keyed by half-second units
    histogram: BTreeMap<u32, u32>,
}

impl SessionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_rep_accepted(&mut self, duration: f64) {
        self.total_reps += 1;
        self.durations.push(duration);

        let bucket = (round_to_half_second(duration.max(0.0)) * 2.0) as u32;
        *self.histogram.entry(bucket).or_insert(0) += 1;
    }

    /// Record feedback; awaiting-user notices and empty strings are skipped
    pub fn on_feedback(&mut self, text: &str) {
        if text.is_empty() || is_awaiting_notice(text) {
            return;
        }
        self.feedback.push(text.to_string());
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn summary(&self) -> SessionSummary {
        let average_duration = if self.durations.is_empty() {
            0.0
        } else {
            self.durations.iter().sum::<f64>() / self.durations.len() as f64
        };

        SessionSummary {
            total_reps: self.total_reps,
            rep_durations: self.durations.clone(),
            average_duration,
            feedback: self.feedback.clone(),
            duration_histogram: self
                .histogram
                .iter()
                .map(|(half_secs, count)| DurationBucket {
                    seconds: *half_secs as f64 / 2.0,
                    count: *count,
                })
                .collect(),
        }
    }
}
