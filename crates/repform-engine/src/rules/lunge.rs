use repform_core::{JointChain, JointPair};

use super::{Check, Direction, FormCheck, RuleSet, SidePolicy, Thresholds};
use crate::exercise::Exercise;

pub(super) fn rule_set() -> RuleSet {
    RuleSet {
        exercise: Exercise::Lunge,
        primary: JointChain::LEG,
        direction: Direction::Flexion,
        side_policy: SidePolicy::FrontBack {
            marker: JointPair::FOOT_INDEX,
        },
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
            arm: 20.0,
            target: 100.0,
            secondary_target: Some(120.0),
        },
        depth_message: "Bend your front knee deeper!",
        secondary_message: Some("Lower your back knee more!"),
        checks: vec![
            Check::new(
                FormCheck::KneePastToes { margin: 0.10 },
                "Keep front knee over ankle, not beyond toes!",
            ),
            Check::new(FormCheck::TorsoLean { max_deg: 20.0 }, "Keep your torso upright!"),
        ],
        tracked_height: None,
        alternate_sides: true,
        occlusion_hint: Some("(full body must be visible)"),
    }
}
