//! Session context and the per-frame entry point.
//!
//! A [`Session`] owns everything scoped to one exercise session: the frozen
//! rule set, the landmark gate, the rep tracker and the accumulator. The
//! [`Engine`] holds at most one session and replaces it wholesale when a new
//! session starts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use repform_core::{Error, PoseSample, Result, SessionId, Timestamp};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::exercise::{Exercise, Level};
use crate::faults::FaultSet;
use crate::gate::{awaiting_notice, GateVerdict, LandmarkGate, READY};
use crate::measure::FrameView;
use crate::notify::{Cue, Notifier, NullNotifier};
use crate::rules::RuleSet;
use crate::session::{SessionAccumulator, SessionSummary};
use crate::tracker::{Outcome, Phase, RepTracker};

/// What the feedback string of a frame represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    #[default]
    None,
    AwaitingUser,
    Ready,
    /// Issues of a rejected attempt
    Rejected,
    /// Advice attached to an accepted rep
    Advisory,
}

/// Result of processing one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    /// Feedback issued on this frame; empty when there is nothing new to say
    pub feedback: String,
    pub kind: FeedbackKind,
    /// Accepted reps so far
    pub rep_count: u32,
    /// Duration of the rep accepted on this frame; 0 on every other frame,
    /// including the frame a rejected attempt ends
    pub rep_duration: f64,
    pub phase: Phase,
    /// Primary angle, when the frame was measured
    pub primary_angle: Option<f64>,
    /// Faults latched in the current attempt
    pub faults: FaultSet,
}

/// Final record of a session, handed to the persistence layer
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub id: SessionId,
    pub exercise: Exercise,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub summary: SessionSummary,
    pub level: Level,
}

impl SessionReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// State of one exercise session
pub struct Session {
    id: SessionId,
    rules: RuleSet,
    gate: LandmarkGate,
    tracker: RepTracker,
    accumulator: SessionAccumulator,
    started_at: Timestamp,
    last_feedback: String,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn new(exercise: Exercise, config: &EngineConfig, now: Timestamp) -> Self {
        let rules = RuleSet::with_overrides(exercise, config.thresholds.for_exercise(exercise));
        Self {
            id: SessionId::new(),
            rules,
            gate: LandmarkGate::new(&config.gate),
            tracker: RepTracker::new(),
            accumulator: SessionAccumulator::new(),
            started_at: now,
            last_feedback: String::new(),
            notifier: Arc::new(NullNotifier),
        }
    }

    /// Start a session from an exercise name or slug
    pub fn start(exercise_id: &str, config: &EngineConfig, now: Timestamp) -> Result<Self> {
        let exercise: Exercise = exercise_id.parse()?;
        Ok(Self::new(exercise, config, now))
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn exercise(&self) -> Exercise {
        self.rules.exercise
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rep_count(&self) -> u32 {
        self.tracker.rep_count()
    }

    /// Most recent non-empty feedback, for display collaborators
    pub fn last_feedback(&self) -> &str {
        &self.last_feedback
    }

    pub fn summary(&self) -> SessionSummary {
        self.accumulator.summary()
    }

    fn output(&self, feedback: String, kind: FeedbackKind) -> FrameOutput {
        FrameOutput {
            feedback,
            kind,
            rep_count: self.tracker.rep_count(),
            rep_duration: 0.0,
            phase: self.tracker.phase(),
            primary_angle: None,
            faults: self.tracker.faults(),
        }
    }

    /// Process one pose frame captured at `now`
    pub fn process(&mut self, sample: &PoseSample, now: Timestamp) -> FrameOutput {
        let sides = match self.gate.check(sample, &self.rules) {
            GateVerdict::Visible(sides) => sides,
            GateVerdict::Occluded => return self.on_occluded(now),
        };

        let ready = self.gate.on_visible();
        if ready {
            tracing::info!(session = %self.id, "user in view");
            self.notifier.notify(Cue::Ready);
        }

        let view = FrameView::new(sample, sides);
        let Some(measurement) = view.measure(&self.rules) else {
            return self.output(String::new(), FeedbackKind::None);
        };

        let step = self.tracker.update(&self.rules, &view, &measurement, now);

        let mut out = self.output(String::new(), FeedbackKind::None);
        out.primary_angle = Some(measurement.primary);

        match step.outcome {
            Some(Outcome::Accepted { duration, advisory }) => {
                self.accumulator.on_rep_accepted(duration);
                self.notifier.notify(Cue::RepCounted {
                    count: self.tracker.rep_count(),
                    duration,
                });
                out.rep_duration = duration;
                if let Some(text) = advisory {
                    out.feedback = text.to_string();
                    out.kind = FeedbackKind::Advisory;
                }
            }
            Some(outcome @ Outcome::Rejected { .. }) => {
                out.feedback = outcome.feedback();
                out.kind = FeedbackKind::Rejected;
            }
            None if ready => {
                out.feedback = READY.to_string();
                out.kind = FeedbackKind::Ready;
            }
            None => {}
        }

        if matches!(out.kind, FeedbackKind::Rejected | FeedbackKind::Advisory) {
            self.accumulator.on_feedback(&out.feedback);
            self.notifier.notify(Cue::Feedback {
                text: out.feedback.clone(),
            });
        }
        if !out.feedback.is_empty() {
            self.last_feedback = out.feedback.clone();
        }
        out
    }

    fn on_occluded(&mut self, now: Timestamp) -> FrameOutput {
        let was_awaiting = self.gate.is_awaiting();
        if !self.gate.on_occluded(now) {
            return self.output(String::new(), FeedbackKind::None);
        }

        let text = awaiting_notice(&self.rules);
        if was_awaiting {
            tracing::debug!(session = %self.id, "still waiting for user");
        } else {
            tracing::warn!(session = %self.id, exercise = %self.rules.exercise, "required joints out of view");
        }
        self.notifier.notify(Cue::AwaitingUser { text: text.clone() });
        self.last_feedback = text.clone();
        self.output(text, FeedbackKind::AwaitingUser)
    }

    /// Close the session and build its report
    pub fn end(self, now: Timestamp) -> SessionReport {
        let summary = self.accumulator.summary();
        let level = Level::for_session(self.rules.exercise, summary.total_reps);
        let elapsed_secs = now.secs_since(self.started_at).max(0.0);

        tracing::info!(
            session = %self.id,
            exercise = %self.rules.exercise,
            reps = summary.total_reps,
            elapsed_secs,
            ?level,
            "session ended"
        );

        SessionReport {
            id: self.id,
            exercise: self.rules.exercise,
            started_at: self.started_at.to_datetime(),
            ended_at: now.to_datetime(),
            elapsed_secs,
            summary,
            level,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("exercise", &self.rules.exercise)
            .field("phase", &self.tracker.phase())
            .field("rep_count", &self.tracker.rep_count())
            .finish()
    }
}

/// Engine holding at most one active session
pub struct Engine {
    config: EngineConfig,
    session: Option<Session>,
    notifier: Arc<dyn Notifier>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: None,
            notifier: Arc::new(NullNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a session, discarding any previous one. On an unknown exercise
    /// the previous session is left untouched.
    pub fn start_session(&mut self, exercise_id: &str) -> Result<SessionId> {
        self.start_session_at(exercise_id, Timestamp::now())
    }

    pub fn start_session_at(&mut self, exercise_id: &str, now: Timestamp) -> Result<SessionId> {
        let session = Session::start(exercise_id, &self.config, now)
            .inspect_err(|e| tracing::warn!(exercise_id, "rejected session start: {}", e))?
            .with_notifier(Arc::clone(&self.notifier));
        let id = session.id();
        let exercise = session.exercise();

        if let Some(previous) = self.session.replace(session) {
            tracing::debug!(session = %previous.id(), "discarding previous session");
        }

        tracing::info!(session = %id, %exercise, "session started");
        Ok(id)
    }

    /// Process a frame stamped with the current wall-clock time
    pub fn process_frame(&mut self, sample: &PoseSample) -> Result<FrameOutput> {
        self.process_frame_at(sample, Timestamp::now())
    }

    /// Process a frame with an explicit timestamp, for deterministic replay
    pub fn process_frame_at(&mut self, sample: &PoseSample, now: Timestamp) -> Result<FrameOutput> {
        let session = self.session.as_mut().ok_or(Error::NoActiveSession)?;
        Ok(session.process(sample, now))
    }

    pub fn end_session(&mut self) -> Result<SessionReport> {
        self.end_session_at(Timestamp::now())
    }

    pub fn end_session_at(&mut self, now: Timestamp) -> Result<SessionReport> {
        let session = self.session.take().ok_or(Error::NoActiveSession)?;
        Ok(session.end(now))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
