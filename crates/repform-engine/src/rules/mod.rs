//! Per-exercise rule sets.
//!
//! A [`RuleSet`] is plain data: which joints to read, how the primary angle
//! moves during a rep, the thresholds that gate the rep lifecycle, and the
//! ordered list of form checks. The rep tracker interprets it generically.

mod curl;
mod lunge;
mod press;
mod pushup;
mod squat;

use repform_core::{Joint, JointChain, JointPair};

use crate::config::ExerciseThresholds;
use crate::exercise::Exercise;
use crate::faults::Fault;

/// How the primary angle moves from the neutral position into a rep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Angle decreases into the rep (squat, curl, push-up, lunge)
    Flexion,
    /// Angle increases into the rep (shoulder press)
    Extension,
}

impl Direction {
    /// Whether `angle` is past the neutral threshold
    pub fn is_neutral(self, angle: f64, neutral: f64) -> bool {
        match self {
            Direction::Flexion => angle > neutral,
            Direction::Extension => angle <= neutral,
        }
    }

    /// How far `angle` has moved away from `baseline` into the rep
    pub fn deviation(self, baseline: f64, angle: f64) -> f64 {
        match self {
            Direction::Flexion => baseline - angle,
            Direction::Extension => angle - baseline,
        }
    }

    /// Whether `candidate` is further into the rep than `extremum`
    pub fn is_further(self, candidate: f64, extremum: f64) -> bool {
        match self {
            Direction::Flexion => candidate < extremum,
            Direction::Extension => candidate > extremum,
        }
    }

    /// Whether the attempt's extremum reached the target
    pub fn reached(self, extremum: f64, target: f64) -> bool {
        match self {
            Direction::Flexion => extremum <= target,
            Direction::Extension => extremum >= target,
        }
    }
}

/// Which body side(s) the rule set measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidePolicy {
    /// Left side when fully visible, otherwise the right side
    PreferLeft,
    /// Whichever side is fully visible; both sides averaged when both are
    Either,
    /// Both sides must be visible; angles are averaged
    Both,
    /// Both sides must be visible; the side whose `marker` is higher in the
    /// image is the front limb, the other the back limb
    FrontBack { marker: JointPair },
}

/// Angle thresholds in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Boundary of the neutral position between reps
    pub neutral: f64,
    /// Minimum deviation from baseline that starts an attempt
    pub arm: f64,
    /// Extremum the primary angle must reach
    pub target: f64,
    /// Extremum the secondary (back limb) angle must reach
    pub secondary_target: Option<f64>,
}

impl Thresholds {
    fn apply(&mut self, overrides: &ExerciseThresholds) {
        if let Some(neutral) = overrides.neutral {
            self.neutral = neutral;
        }
        if let Some(arm) = overrides.arm {
            self.arm = arm;
        }
        if let Some(target) = overrides.target {
            self.target = target;
        }
        if overrides.secondary_target.is_some() && self.secondary_target.is_some() {
            self.secondary_target = overrides.secondary_target;
        }
    }
}

/// A form constraint on the tracked body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormCheck {
    /// Shoulder-hip-knee angle must not drop below `min_deg`
    BackAngle { min_deg: f64 },
    /// Angle between upper arm and torso must stay within `max_deg`
    ElbowToTorso { max_deg: f64 },
    /// Shoulder-hip-ankle angle must stay at or above `min_deg`
    BodyLine { min_deg: f64 },
    /// Shoulder-to-hip segment must stay within `max_deg` of vertical
    TorsoLean { max_deg: f64 },
    /// Elbow depth must not come closer to the camera than the shoulder by `margin`
    ElbowsForward { margin: f64 },
    /// Knee must not pass the ankle horizontally by more than `margin`
    KneePastToes { margin: f64 },
    /// Foot index must not rise above the ankle by more than `margin` when the rep ends
    HeelRaised { margin: f64 },
    /// Tracked hip height must have dropped by at least `min_drop` during the rep
    HipDrop { min_drop: f64 },
}

/// When a check is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// Every in-rep frame; a failure latches until the attempt ends
    PerFrame,
    /// Once, on the frame the attempt ends
    Completion,
}

impl FormCheck {
    pub fn stage(&self) -> CheckStage {
        match self {
            FormCheck::HeelRaised { .. } | FormCheck::HipDrop { .. } => CheckStage::Completion,
            _ => CheckStage::PerFrame,
        }
    }

    pub fn fault(&self) -> Fault {
        match self {
            FormCheck::BackAngle { .. } => Fault::BackRounded,
            FormCheck::ElbowToTorso { .. } => Fault::ElbowDrift,
            FormCheck::BodyLine { .. } => Fault::BodyLineBroken,
            FormCheck::TorsoLean { .. } => Fault::TorsoLean,
            FormCheck::ElbowsForward { .. } => Fault::ElbowsForward,
            FormCheck::KneePastToes { .. } => Fault::KneePastToes,
            FormCheck::HeelRaised { .. } => Fault::HeelRaised,
            FormCheck::HipDrop { .. } => Fault::ShallowHipDrop,
        }
    }
}

/// A form check with the feedback issued when it fails
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Check {
    pub kind: FormCheck,
    pub message: &'static str,
}

impl Check {
    pub const fn new(kind: FormCheck, message: &'static str) -> Self {
        Self { kind, message }
    }
}

/// Immutable per-exercise configuration of the rep tracker
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub exercise: Exercise,
    /// Angle driving the rep lifecycle
    pub primary: JointChain,
    pub direction: Direction,
    pub side_policy: SidePolicy,
    /// Bilateral joints that must be visible on every measured side
    pub required: Vec<JointPair>,
    /// Midline joints that must be visible regardless of side
    pub required_midline: Vec<Joint>,
    pub thresholds: Thresholds,
    /// Issued when the primary extremum misses the target
    pub depth_message: &'static str,
    /// Issued when the secondary extremum misses its target
    pub secondary_message: Option<&'static str>,
    /// Form checks, in feedback order
    pub checks: Vec<Check>,
    /// Joint whose vertical position is tracked across the attempt
    pub tracked_height: Option<JointPair>,
    /// Advise when consecutive attempts lead with the same side
    pub alternate_sides: bool,
    /// Appended to the awaiting-user notice, e.g. "(full body required)"
    pub occlusion_hint: Option<&'static str>,
}

impl RuleSet {
    /// Built-in rule set for an exercise
    pub fn for_exercise(exercise: Exercise) -> Self {
        match exercise {
            Exercise::Squat => squat::rule_set(),
            Exercise::BicepCurl => curl::rule_set(),
            Exercise::PushUp => pushup::rule_set(),
            Exercise::ShoulderPress => press::rule_set(),
            Exercise::Lunge => lunge::rule_set(),
        }
    }

    /// Built-in rule set with configured threshold overrides applied
    pub fn with_overrides(exercise: Exercise, overrides: &ExerciseThresholds) -> Self {
        let mut rules = Self::for_exercise(exercise);
        rules.thresholds.apply(overrides);
        rules
    }

    /// Whether the rule set measures a second limb (lunge back leg)
    pub fn has_secondary(&self) -> bool {
        matches!(self.side_policy, SidePolicy::FrontBack { .. })
    }

    /// Every joint the gate must see on one side
    pub fn joints_on(&self, side: repform_core::Side) -> impl Iterator<Item = Joint> + '_ {
        self.required.iter().map(move |pair| pair.on(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flexion() {
        let d = Direction::Flexion;
        assert!(d.is_neutral(170.0, 160.0));
        assert!(!d.is_neutral(160.0, 160.0));
        assert_eq!(d.deviation(170.0, 150.0), 20.0);
        assert!(d.is_further(40.0, 50.0));
        assert!(d.reached(45.0, 45.0));
        assert!(!d.reached(60.0, 45.0));
    }

    #[test]
    fn test_direction_extension() {
        let d = Direction::Extension;
        assert!(d.is_neutral(90.0, 90.0));
        assert!(!d.is_neutral(95.0, 90.0));
        assert_eq!(d.deviation(80.0, 110.0), 30.0);
        assert!(d.is_further(170.0, 150.0));
        assert!(d.reached(160.0, 160.0));
    }

    #[test]
    fn test_every_exercise_has_rules() {
        for exercise in Exercise::ALL {
            let rules = RuleSet::for_exercise(exercise);
            assert_eq!(rules.exercise, exercise);
            assert!(!rules.required.is_empty());
            assert!(!rules.checks.is_empty());
            assert!(rules.checks.len() <= 4);
        }
    }

    #[test]
    fn test_overrides_replace_thresholds() {
        let overrides = ExerciseThresholds {
            target: Some(30.0),
            arm: Some(12.0),
            ..Default::default()
        };
        let rules = RuleSet::with_overrides(Exercise::BicepCurl, &overrides);
        assert_eq!(rules.thresholds.target, 30.0);
        assert_eq!(rules.thresholds.arm, 12.0);
        assert_eq!(rules.thresholds.neutral, 160.0);
    }

    #[test]
    fn test_secondary_override_ignored_without_secondary_limb() {
        let overrides = ExerciseThresholds {
            secondary_target: Some(110.0),
            ..Default::default()
        };
        let curl = RuleSet::with_overrides(Exercise::BicepCurl, &overrides);
        assert_eq!(curl.thresholds.secondary_target, None);

        let lunge = RuleSet::with_overrides(Exercise::Lunge, &overrides);
        assert_eq!(lunge.thresholds.secondary_target, Some(110.0));
    }
}
