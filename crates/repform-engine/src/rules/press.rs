use repform_core::{JointChain, JointPair};

use super::{Check, Direction, FormCheck, RuleSet, SidePolicy, Thresholds};
use crate::exercise::Exercise;

pub(super) fn rule_set() -> RuleSet {
    RuleSet {
        exercise: Exercise::ShoulderPress,
        primary: JointChain::ARM,
        direction: Direction::Extension,
        side_policy: SidePolicy::Both,
        required: vec![
            JointPair::SHOULDER,
            JointPair::ELBOW,
            JointPair::WRIST,
            JointPair::HIP,
        ],
        required_midline: Vec::new(),
        // Neutral is the racked position: elbows at or below 90°
        thresholds: Thresholds {
            neutral: 90.0,
            arm: 15.0,
            target: 160.0,
            secondary_target: None,
        },
        depth_message: "Extend arms fully overhead!",
        secondary_message: None,
        checks: vec![
            Check::new(
                FormCheck::TorsoLean { max_deg: 15.0 },
                "Keep back straight, don't lean back!",
            ),
            Check::new(
                FormCheck::ElbowsForward { margin: 0.05 },
                "Keep elbows out to sides, not forward!",
            ),
        ],
        tracked_height: None,
        alternate_sides: false,
        occlusion_hint: Some("(arms and upper body must be visible)"),
    }
}
