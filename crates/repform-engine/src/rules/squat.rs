use repform_core::{JointChain, JointPair};

use super::{Check, Direction, FormCheck, RuleSet, SidePolicy, Thresholds};
use crate::exercise::Exercise;

pub(super) fn rule_set() -> RuleSet {
    RuleSet {
        exercise: Exercise::Squat,
        primary: JointChain::LEG,
        direction: Direction::Flexion,
        // Heel and hip-drop checks need one coherent side
        side_policy: SidePolicy::PreferLeft,
        required: vec![
            JointPair::SHOULDER,
            JointPair::HIP,
            JointPair::KNEE,
            JointPair::ANKLE,
            JointPair::FOOT_INDEX,
        ],
        required_midline: Vec::new(),
        thresholds: Thresholds {
            neutral: 160.0,
            arm: 10.0,
            target: 90.0,
            secondary_target: None,
        },
        depth_message: "Squat lower!",
        secondary_message: None,
        checks: vec![
            Check::new(FormCheck::BackAngle { min_deg: 35.0 }, "Keep your back straighter!"),
            Check::new(FormCheck::HeelRaised { margin: 0.02 }, "Keep your feet flat!"),
            Check::new(FormCheck::HipDrop { min_drop: 0.05 }, "Lower your hips more!"),
        ],
        tracked_height: Some(JointPair::HIP),
        alternate_sides: false,
        occlusion_hint: None,
    }
}
