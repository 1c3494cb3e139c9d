//! Repetition detection and form validation for bodyweight and dumbbell
//! exercises.
//!
//! Each frame of pose landmarks flows through:
//! 1. the landmark gate (visibility, side selection, awaiting-user notices)
//! 2. feature extraction for the active rule set
//! 3. the generic rep tracker (arm, track extrema, latch faults, evaluate)
//! 4. the session accumulator and the notifier
//!
//! ```no_run
//! use repform_engine::{Engine, EngineConfig};
//! # fn frames() -> Vec<repform_core::PoseSample> { Vec::new() }
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.start_session("Squats")?;
//! for frame in frames() {
//!     let out = engine.process_frame(&frame)?;
//!     if !out.feedback.is_empty() {
//!         println!("{} ({} reps)", out.feedback, out.rep_count);
//!     }
//! }
//! let report = engine.end_session()?;
//! println!("{}", report.to_json()?);
//! # Ok::<(), repform_core::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod exercise;
pub mod faults;
pub mod gate;
pub mod measure;
pub mod notify;
pub mod rules;
pub mod session;
pub mod tracker;

#[cfg(test)]
mod testutil;

pub use config::{EngineConfig, ExerciseThresholds, GateConfig, ThresholdOverrides};
pub use engine::{Engine, FeedbackKind, FrameOutput, Session, SessionReport};
pub use exercise::{Exercise, Level};
pub use faults::{Fault, FaultSet};
pub use notify::{ChannelNotifier, Cue, Notifier, NullNotifier};
pub use rules::RuleSet;
pub use session::{round_to_half_second, SessionAccumulator, SessionSummary};
pub use tracker::{Outcome, Phase, RepTracker};
