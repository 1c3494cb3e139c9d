use repform_core::{JointChain, JointPair};

use super::{Check, Direction, FormCheck, RuleSet, SidePolicy, Thresholds};
use crate::exercise::Exercise;

pub(super) fn rule_set() -> RuleSet {
    RuleSet {
        exercise: Exercise::BicepCurl,
        primary: JointChain::ARM,
        direction: Direction::Flexion,
        side_policy: SidePolicy::Either,
        required: vec![
            JointPair::SHOULDER,
            JointPair::ELBOW,
            JointPair::WRIST,
            JointPair::HIP,
        ],
        required_midline: Vec::new(),
        thresholds: Thresholds {
            neutral: 160.0,
            arm: 10.0,
            target: 45.0,
            secondary_target: None,
        },
        depth_message: "Curl further!",
        secondary_message: None,
        checks: vec![Check::new(
            FormCheck::ElbowToTorso { max_deg: 15.0 },
            "Keep your elbows close to your body!",
        )],
        tracked_height: None,
        alternate_sides: false,
        occlusion_hint: None,
    }
}
