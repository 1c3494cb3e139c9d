use repform_core::{Joint, JointChain, JointPair};

use super::{Check, Direction, FormCheck, RuleSet, SidePolicy, Thresholds};
use crate::exercise::Exercise;

pub(super) fn rule_set() -> RuleSet {
    RuleSet {
        exercise: Exercise::PushUp,
        primary: JointChain::ARM,
        direction: Direction::Flexion,
        side_policy: SidePolicy::Both,
        required: vec![
            JointPair::SHOULDER,
            JointPair::ELBOW,
            JointPair::WRIST,
            JointPair::HIP,
            JointPair::ANKLE,
        ],
        required_midline: vec![Joint::Nose],
        thresholds: Thresholds {
            neutral: 160.0,
            arm: 15.0,
            target: 90.0,
            secondary_target: None,
        },
        depth_message: "Lower chest closer to ground!",
        secondary_message: None,
        checks: vec![Check::new(
            FormCheck::BodyLine { min_deg: 160.0 },
            "Keep body in straight line!",
        )],
        tracked_height: None,
        alternate_sides: false,
        occlusion_hint: Some("(full body required)"),
    }
}
