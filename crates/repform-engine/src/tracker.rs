//! Generic repetition state machine.
//!
//! ```text
//! Idle ──neutral──▶ Armed ──deviation > arm──▶ InRep ──neutral──▶ Armed
//!                    ▲  │ (baseline refreshed                  │
//!                    └──┘  on neutral frames)    accept/reject ┘
//! ```
//!
//! The tracker knows nothing about specific exercises: every threshold,
//! joint and check comes from the [`RuleSet`] passed to [`RepTracker::update`].

use repform_core::{Side, Timestamp};
use serde::{Deserialize, Serialize};

use crate::faults::FaultSet;
use crate::measure::{FrameView, Measurement};
use crate::rules::{CheckStage, FormCheck, RuleSet};

/// Feedback for an accepted rep that leads with the same leg as the previous one
pub const ALTERNATE_SIDES: &str = "Try to alternate legs for balance!";

/// Lifecycle phase of the tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No baseline captured yet
    #[default]
    Idle,
    /// Baseline captured, waiting for motion
    Armed,
    /// Attempt in progress
    InRep,
}

/// Verdict on a finished attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted {
        /// Attempt duration in seconds
        duration: f64,
        /// Non-blocking advice, e.g. to alternate legs
        advisory: Option<&'static str>,
    },
    Rejected {
        duration: f64,
        /// Failed checks in rule-set order
        issues: Vec<&'static str>,
    },
}

impl Outcome {
    /// Feedback text for this outcome; empty for a clean accepted rep
    pub fn feedback(&self) -> String {
        match self {
            Outcome::Accepted { advisory, .. } => advisory.unwrap_or_default().to_string(),
            Outcome::Rejected { issues, .. } => issues.join(" "),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// Result of feeding one frame to the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: Phase,
    pub faults: FaultSet,
    pub outcome: Option<Outcome>,
}

/// State of the current attempt; replaced wholesale when an attempt ends
#[derive(Debug, Clone, Default)]
struct RepState {
    phase: Phase,
    baseline: Option<f64>,
    baseline_height: Option<f64>,
    extremum: Option<f64>,
    secondary_extremum: Option<f64>,
    deepest_height: Option<f64>,
    faults: FaultSet,
    started_at: Option<Timestamp>,
    side: Option<Side>,
}

impl RepState {
    /// Armed state with a fresh baseline
    fn armed(baseline: f64, baseline_height: Option<f64>) -> Self {
        Self {
            phase: Phase::Armed,
            baseline: Some(baseline),
            baseline_height,
            ..Self::default()
        }
    }

    fn height_drop(&self) -> Option<f64> {
        Some(self.deepest_height? - self.baseline_height?)
    }
}

/// Repetition tracker for one session
#[derive(Debug, Clone, Default)]
pub struct RepTracker {
    state: RepState,
    rep_count: u32,
    last_side: Option<Side>,
}

impl RepTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn baseline(&self) -> Option<f64> {
        self.state.baseline
    }

    /// Faults latched so far in the current attempt
    pub fn faults(&self) -> FaultSet {
        self.state.faults
    }

    fn is_neutral(rules: &RuleSet, m: &Measurement) -> bool {
        let neutral = rules.thresholds.neutral;
        rules.direction.is_neutral(m.primary, neutral)
            && m.secondary
                .map_or(true, |angle| rules.direction.is_neutral(angle, neutral))
    }

    /// Angle recorded as baseline: the mean of both limbs when two are measured
    fn reference_angle(m: &Measurement) -> f64 {
        match m.secondary {
            Some(secondary) => (m.primary + secondary) / 2.0,
            None => m.primary,
        }
    }

    fn deviation(rules: &RuleSet, baseline: f64, m: &Measurement) -> f64 {
        let primary = rules.direction.deviation(baseline, m.primary);
        match m.secondary {
            Some(angle) => primary.max(rules.direction.deviation(baseline, angle)),
            None => primary,
        }
    }

    /// Feed one gated frame
    pub fn update(
        &mut self,
        rules: &RuleSet,
        view: &FrameView<'_>,
        m: &Measurement,
        now: Timestamp,
    ) -> Step {
        let neutral = Self::is_neutral(rules, m);

        let outcome = match self.state.phase {
            Phase::Idle | Phase::Armed => {
                if neutral {
                    self.state = RepState::armed(Self::reference_angle(m), m.height);
                }

                if let Some(baseline) = self.state.baseline {
                    if Self::deviation(rules, baseline, m) > rules.thresholds.arm {
                        self.begin_attempt(m, now);
                        self.track_frame(rules, view, m);
                    }
                }
                None
            }
            Phase::InRep => {
                self.track_frame(rules, view, m);
                if neutral {
                    Some(self.finish_attempt(rules, view, m, now))
                } else {
                    None
                }
            }
        };

        Step {
            phase: self.state.phase,
            faults: self.state.faults,
            outcome,
        }
    }

    fn begin_attempt(&mut self, m: &Measurement, now: Timestamp) {
        self.state.phase = Phase::InRep;
        self.state.started_at = Some(now);
        self.state.extremum = Some(m.primary);
        self.state.secondary_extremum = m.secondary;
        self.state.deepest_height = m.height;
        self.state.faults = FaultSet::new();
        self.state.side = m.focus;

        tracing::debug!(
            baseline = ?self.state.baseline,
            angle = m.primary,
            "rep attempt started"
        );
    }

    /// Update extrema and latch per-frame faults
    fn track_frame(&mut self, rules: &RuleSet, view: &FrameView<'_>, m: &Measurement) {
        let direction = rules.direction;
        let state = &mut self.state;

        if state.extremum.map_or(true, |e| direction.is_further(m.primary, e)) {
            state.extremum = Some(m.primary);
        }
        if let Some(angle) = m.secondary {
            if state.secondary_extremum.map_or(true, |e| direction.is_further(angle, e)) {
                state.secondary_extremum = Some(angle);
            }
        }
        // Image y grows downward: the deepest point has the largest y
        if let Some(height) = m.height {
            if state.deepest_height.map_or(true, |d| height > d) {
                state.deepest_height = Some(height);
            }
        }

        for check in rules.checks.iter().filter(|c| c.kind.stage() == CheckStage::PerFrame) {
            if view.violates(&check.kind) {
                state.faults.insert(check.kind.fault());
            }
        }
    }

    fn finish_attempt(
        &mut self,
        rules: &RuleSet,
        view: &FrameView<'_>,
        m: &Measurement,
        now: Timestamp,
    ) -> Outcome {
        let state = &self.state;
        let thresholds = &rules.thresholds;
        let mut issues = Vec::new();

        if let Some(extremum) = state.extremum {
            if !rules.direction.reached(extremum, thresholds.target) {
                issues.push(rules.depth_message);
            }
        }
        if let (Some(target), Some(extremum), Some(message)) = (
            thresholds.secondary_target,
            state.secondary_extremum,
            rules.secondary_message,
        ) {
            if !rules.direction.reached(extremum, target) {
                issues.push(message);
            }
        }

        for check in &rules.checks {
            let failed = match (check.kind.stage(), check.kind) {
                (CheckStage::PerFrame, kind) => state.faults.contains(kind.fault()),
                (CheckStage::Completion, FormCheck::HipDrop { min_drop }) => {
                    state.height_drop().is_some_and(|drop| drop < min_drop)
                }
                (CheckStage::Completion, kind) => view.violates(&kind),
            };
            if failed {
                issues.push(check.message);
            }
        }

        let duration = state
            .started_at
            .map_or(0.0, |start| now.secs_since(start).max(0.0));
        let side = state.side;

        let outcome = if issues.is_empty() {
            self.rep_count += 1;
            let repeated_side = rules.alternate_sides
                && self.rep_count > 1
                && side.is_some()
                && self.last_side == side;
            tracing::info!(
                exercise = %rules.exercise,
                reps = self.rep_count,
                duration,
                "rep accepted"
            );
            Outcome::Accepted {
                duration,
                advisory: repeated_side.then_some(ALTERNATE_SIDES),
            }
        } else {
            tracing::info!(
                exercise = %rules.exercise,
                issues = issues.len(),
                duration,
                "rep rejected"
            );
            Outcome::Rejected { duration, issues }
        };

        self.last_side = side;
        self.state = RepState::armed(Self::reference_angle(m), m.height);
        outcome
    }
}
