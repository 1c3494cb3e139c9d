//! Per-frame feature extraction.
//!
//! Turns a gated [`PoseSample`] into the scalar features a rule set asks
//! for, and evaluates form checks against the same frame.

use repform_core::{
    mean_angle, vector_angle, vertical_deviation, JointChain, JointPair, Landmark, PoseSample, Side,
};
use serde::{Deserialize, Serialize};

use crate::rules::{FormCheck, RuleSet};

/// Body sides resolved by the landmark gate for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    /// Only this side is measured
    One(Side),
    /// Both sides are measured and averaged
    Both,
    /// Both sides are measured separately as front and back limb
    FrontBack { front: Side },
}

impl Sides {
    /// Side that single-sided checks look at; `None` means every measured side
    pub fn focus(&self) -> Option<Side> {
        match self {
            Sides::One(side) => Some(*side),
            Sides::FrontBack { front } => Some(*front),
            Sides::Both => None,
        }
    }

    fn measured(&self) -> &'static [Side] {
        match self {
            Sides::One(Side::Left) => &[Side::Left],
            Sides::One(Side::Right) => &[Side::Right],
            Sides::Both | Sides::FrontBack { .. } => &[Side::Left, Side::Right],
        }
    }
}

/// Features of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Primary angle (front limb for front/back measurement)
    pub primary: f64,
    /// Back limb angle, when the rule set measures front and back limbs
    pub secondary: Option<f64>,
    /// Vertical position of the tracked joint
    pub height: Option<f64>,
    /// Leading side for this frame, if any
    pub focus: Option<Side>,
}

/// Read-only view of a gated frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    sample: &'a PoseSample,
    sides: Sides,
}

impl<'a> FrameView<'a> {
    pub fn new(sample: &'a PoseSample, sides: Sides) -> Self {
        Self { sample, sides }
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    fn landmark(&self, pair: JointPair, side: Side) -> Option<&'a Landmark> {
        self.sample.get(pair.on(side))
    }

    /// Mean of `f` over every measured side
    fn mean_over<F>(&self, f: F) -> Option<f64>
    where
        F: Fn(Side) -> Option<f64>,
    {
        let values: Vec<f64> = self.sides.measured().iter().filter_map(|s| f(*s)).collect();
        match values.as_slice() {
            [] => None,
            [single] => Some(*single),
            [left, right] => Some(mean_angle(*left, *right)),
            _ => Some(values.iter().sum::<f64>() / values.len() as f64),
        }
    }

    /// Whether `f` holds on the focused side, or on any measured side
    fn any_over<F>(&self, f: F) -> bool
    where
        F: Fn(Side) -> Option<bool>,
    {
        match self.sides.focus() {
            Some(side) => f(side).unwrap_or(false),
            None => self.sides.measured().iter().any(|s| f(*s).unwrap_or(false)),
        }
    }

    fn chain_angle(&self, chain: &JointChain) -> Option<f64> {
        self.mean_over(|side| self.sample.chain_angle(chain, side))
    }

    /// Extract the rule set's features from this frame
    pub fn measure(&self, rules: &RuleSet) -> Option<Measurement> {
        let (primary, secondary) = match self.sides {
            Sides::FrontBack { front } => (
                self.sample.chain_angle(&rules.primary, front)?,
                Some(self.sample.chain_angle(&rules.primary, front.opposite())?),
            ),
            _ => (self.chain_angle(&rules.primary)?, None),
        };

        let height = rules
            .tracked_height
            .and_then(|pair| self.mean_over(|side| self.landmark(pair, side).map(|l| l.y)));

        Some(Measurement {
            primary,
            secondary,
            height,
            focus: self.sides.focus(),
        })
    }

    /// Whether a frame-level check fails on this frame.
    ///
    /// Checks that depend on the whole attempt (hip drop) are evaluated by
    /// the tracker and always pass here.
    pub fn violates(&self, check: &FormCheck) -> bool {
        match *check {
            FormCheck::BackAngle { min_deg } => self
                .chain_angle(&JointChain::TRUNK)
                .is_some_and(|angle| angle < min_deg),

            // Per arm: one drifting elbow fails even when the other is tucked
            FormCheck::ElbowToTorso { max_deg } => self.any_over(|side| {
                let shoulder = self.landmark(JointPair::SHOULDER, side)?;
                let elbow = self.landmark(JointPair::ELBOW, side)?;
                let hip = self.landmark(JointPair::HIP, side)?;
                Some(vector_angle(shoulder.vector_to(elbow), shoulder.vector_to(hip)) > max_deg)
            }),

            FormCheck::BodyLine { min_deg } => self
                .chain_angle(&JointChain::BODY_LINE)
                .is_some_and(|angle| angle < min_deg),

            FormCheck::TorsoLean { max_deg } => self
                .mean_over(|side| {
                    let shoulder = self.landmark(JointPair::SHOULDER, side)?;
                    let hip = self.landmark(JointPair::HIP, side)?;
                    Some(vertical_deviation(shoulder.point(), hip.point()))
                })
                .is_some_and(|angle| angle > max_deg),

            FormCheck::ElbowsForward { margin } => self.any_over(|side| {
                let shoulder = self.landmark(JointPair::SHOULDER, side)?;
                let elbow = self.landmark(JointPair::ELBOW, side)?;
                Some(elbow.z < shoulder.z - margin)
            }),

            FormCheck::KneePastToes { margin } => self.any_over(|side| {
                let knee = self.landmark(JointPair::KNEE, side)?;
                let ankle = self.landmark(JointPair::ANKLE, side)?;
                Some(knee.x > ankle.x + margin)
            }),

            FormCheck::HeelRaised { margin } => self.any_over(|side| {
                let ankle = self.landmark(JointPair::ANKLE, side)?;
                let foot = self.landmark(JointPair::FOOT_INDEX, side)?;
                Some(foot.y < ankle.y - margin)
            }),

            FormCheck::HipDrop { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Exercise;
    use repform_core::Joint;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y, 0.9)
    }

    fn standing_sample() -> PoseSample {
        PoseSample::new()
            .with(Joint::LeftShoulder, lm(0.50, 0.30))
            .with(Joint::LeftHip, lm(0.50, 0.55))
            .with(Joint::LeftKnee, lm(0.50, 0.75))
            .with(Joint::LeftAnkle, lm(0.50, 0.95))
            .with(Joint::LeftFootIndex, lm(0.55, 0.97))
            .with(Joint::RightShoulder, lm(0.60, 0.30))
            .with(Joint::RightHip, lm(0.60, 0.55))
            .with(Joint::RightKnee, lm(0.60, 0.75))
            .with(Joint::RightAnkle, lm(0.60, 0.95))
            .with(Joint::RightFootIndex, lm(0.65, 0.97))
    }

    #[test]
    fn test_single_side_measure() {
        let sample = standing_sample();
        let rules = crate::rules::RuleSet::for_exercise(Exercise::Squat);
        let view = FrameView::new(&sample, Sides::One(Side::Left));
        let m = view.measure(&rules).unwrap();
        assert!((m.primary - 180.0).abs() < 1e-6);
        assert_eq!(m.secondary, None);
        assert_eq!(m.height, Some(0.55));
        assert_eq!(m.focus, Some(Side::Left));
    }

    #[test]
    fn test_front_back_measure() {
        let sample = standing_sample()
            // Bend the right knee to 90°
            .with(Joint::RightKnee, lm(0.60, 0.75))
            .with(Joint::RightAnkle, lm(0.80, 0.75));
        let rules = crate::rules::RuleSet::for_exercise(Exercise::Lunge);
        let view = FrameView::new(&sample, Sides::FrontBack { front: Side::Right });
        let m = view.measure(&rules).unwrap();
        assert!((m.primary - 90.0).abs() < 1e-6);
        assert!((m.secondary.unwrap() - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_measure_missing_joint() {
        let sample = PoseSample::new().with(Joint::LeftHip, lm(0.5, 0.5));
        let rules = crate::rules::RuleSet::for_exercise(Exercise::Squat);
        let view = FrameView::new(&sample, Sides::One(Side::Left));
        assert!(view.measure(&rules).is_none());
    }

    #[test]
    fn test_torso_lean_averages_sides() {
        let sample = standing_sample()
            .with(Joint::LeftHip, lm(0.80, 0.60))
            .with(Joint::RightHip, lm(0.60, 0.55));
        let view = FrameView::new(&sample, Sides::Both);
        // Left leans 45°, right is upright: mean 22.5°
        assert!(view.violates(&FormCheck::TorsoLean { max_deg: 20.0 }));
        assert!(!view.violates(&FormCheck::TorsoLean { max_deg: 25.0 }));
    }

    #[test]
    fn test_elbows_forward_any_side() {
        let sample = standing_sample()
            .with(Joint::LeftElbow, lm(0.45, 0.40).with_depth(-0.2))
            .with(Joint::RightElbow, lm(0.65, 0.40));
        let view = FrameView::new(&sample, Sides::Both);
        assert!(view.violates(&FormCheck::ElbowsForward { margin: 0.05 }));
    }

    #[test]
    fn test_elbow_drift_on_one_arm() {
        let sample = crate::testutil::asymmetric_arm_pose(90.0, 25.0, 0.0);
        let view = FrameView::new(&sample, Sides::Both);
        assert!(view.violates(&FormCheck::ElbowToTorso { max_deg: 15.0 }));

        let tucked = crate::testutil::arm_pose(90.0, 0.0);
        let view = FrameView::new(&tucked, Sides::Both);
        assert!(!view.violates(&FormCheck::ElbowToTorso { max_deg: 15.0 }));
    }

    #[test]
    fn test_back_angle() {
        let upright = standing_sample();
        let view = FrameView::new(&upright, Sides::One(Side::Left));
        assert!(!view.violates(&FormCheck::BackAngle { min_deg: 35.0 }));

        // Chest folded down toward the thighs: about 27° at the hip
        let folded = standing_sample().with(Joint::LeftShoulder, lm(0.60, 0.75));
        let view = FrameView::new(&folded, Sides::One(Side::Left));
        assert!(view.violates(&FormCheck::BackAngle { min_deg: 35.0 }));
    }

    #[test]
    fn test_knee_past_toes_front_leg_only() {
        let check = FormCheck::KneePastToes { margin: 0.10 };
        let front_left = Sides::FrontBack { front: Side::Left };

        let front_over = standing_sample().with(Joint::LeftKnee, lm(0.62, 0.75));
        assert!(FrameView::new(&front_over, front_left).violates(&check));

        let back_over = standing_sample().with(Joint::RightKnee, lm(0.72, 0.75));
        assert!(!FrameView::new(&back_over, front_left).violates(&check));

        let within = standing_sample().with(Joint::LeftKnee, lm(0.58, 0.75));
        assert!(!FrameView::new(&within, front_left).violates(&check));
    }

    #[test]
    fn test_heel_raised() {
        let flat = standing_sample();
        let view = FrameView::new(&flat, Sides::One(Side::Left));
        assert!(!view.violates(&FormCheck::HeelRaised { margin: 0.02 }));

        let raised = standing_sample().with(Joint::LeftFootIndex, lm(0.55, 0.90));
        let view = FrameView::new(&raised, Sides::One(Side::Left));
        assert!(view.violates(&FormCheck::HeelRaised { margin: 0.02 }));
    }
}
