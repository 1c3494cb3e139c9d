//! Landmark gate.
//!
//! Decides per frame whether the joints the active rule set needs are
//! visible, which side(s) to measure, and when to tell the user the engine
//! is waiting for them. Awaiting notices are debounced against wall-clock
//! time so downstream consumers (speech, overlays) are not flooded.

use repform_core::{PoseSample, Side, Timestamp};

use crate::config::GateConfig;
use crate::measure::Sides;
use crate::rules::{RuleSet, SidePolicy};

/// Base text of every awaiting-user notice
pub const AWAITING_USER: &str = "Waiting for user...";

/// Status notice issued once the user is back in view
pub const READY: &str = "Begin exercise.";

/// Whether a feedback string is an awaiting-user notice
pub fn is_awaiting_notice(text: &str) -> bool {
    text.starts_with("Waiting for user")
}

/// Outcome of gating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Visible(Sides),
    Occluded,
}

/// Visibility gate with a debounced awaiting-user notice
#[derive(Debug, Clone)]
pub struct LandmarkGate {
    min_visibility: f32,
    notice_cooldown_secs: f64,
    last_notice: Option<Timestamp>,
    awaiting: bool,
}

impl LandmarkGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            min_visibility: config.min_visibility,
            notice_cooldown_secs: config.notice_cooldown_secs,
            last_notice: None,
            awaiting: true,
        }
    }

    fn is_visible(&self, sample: &PoseSample, joint: repform_core::Joint) -> bool {
        sample.visibility(joint) > self.min_visibility
    }

    fn side_visible(&self, sample: &PoseSample, rules: &RuleSet, side: Side) -> bool {
        rules.joints_on(side).all(|joint| self.is_visible(sample, joint))
    }

    /// Resolve the measured sides for this frame, or report occlusion
    pub fn check(&self, sample: &PoseSample, rules: &RuleSet) -> GateVerdict {
        if !rules
            .required_midline
            .iter()
            .all(|joint| self.is_visible(sample, *joint))
        {
            return GateVerdict::Occluded;
        }

        let left = self.side_visible(sample, rules, Side::Left);
        let right = self.side_visible(sample, rules, Side::Right);

        let sides = match rules.side_policy {
            SidePolicy::PreferLeft => match (left, right) {
                (true, _) => Some(Sides::One(Side::Left)),
                (false, true) => Some(Sides::One(Side::Right)),
                (false, false) => None,
            },
            SidePolicy::Either => match (left, right) {
                (true, true) => Some(Sides::Both),
                (true, false) => Some(Sides::One(Side::Left)),
                (false, true) => Some(Sides::One(Side::Right)),
                (false, false) => None,
            },
            SidePolicy::Both => (left && right).then_some(Sides::Both),
            SidePolicy::FrontBack { marker } => (left && right)
                .then(|| {
                    let left_y = sample.get(marker.left)?.y;
                    let right_y = sample.get(marker.right)?.y;
                    let front = if left_y < right_y { Side::Left } else { Side::Right };
                    Some(Sides::FrontBack { front })
                })
                .flatten(),
        };

        sides.map_or(GateVerdict::Occluded, GateVerdict::Visible)
    }

    /// Record an occluded frame; returns true when a notice should be issued now.
    /// Only an issued notice arms the ready notice for the next visible frame.
    pub fn on_occluded(&mut self, now: Timestamp) -> bool {
        let due = self
            .last_notice
            .map_or(true, |last| now.secs_since(last) >= self.notice_cooldown_secs);
        if due {
            self.last_notice = Some(now);
            self.awaiting = true;
        }
        due
    }

    /// Record a visible frame; returns true on the first visible frame after
    /// the gate was waiting for the user
    pub fn on_visible(&mut self) -> bool {
        std::mem::replace(&mut self.awaiting, false)
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }
}

/// Awaiting-user notice text for a rule set
pub fn awaiting_notice(rules: &RuleSet) -> String {
    match rules.occlusion_hint {
        Some(hint) => format!("{} {}", AWAITING_USER, hint),
        None => AWAITING_USER.to_string(),
    }
}
