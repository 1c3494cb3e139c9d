//! Synthetic pose builders for unit tests.

use repform_core::{Joint, JointPair, Landmark, PoseSample, Side, Timestamp};

const VIS: f32 = 0.9;
const SEGMENT: f64 = 0.2;

pub fn ts(secs: f64) -> Timestamp {
    Timestamp::from_secs_f64(secs)
}

fn rotate((x, y): (f64, f64), deg: f64) -> (f64, f64) {
    let (sin, cos) = deg.to_radians().sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

fn offset((x, y): (f64, f64), (dx, dy): (f64, f64), len: f64) -> (f64, f64) {
    (x + dx * len, y + dy * len)
}

fn put(sample: PoseSample, joint: Joint, (x, y): (f64, f64)) -> PoseSample {
    sample.with(joint, Landmark::new(x, y, VIS))
}

/// Mirror factor so right-side limbs rotate away from the body
fn sign(side: Side) -> f64 {
    match side {
        Side::Left => 1.0,
        Side::Right => -1.0,
    }
}

fn arm(sample: PoseSample, side: Side, shoulder: (f64, f64), elbow_deg: f64, torso_deg: f64) -> PoseSample {
    let upper = rotate((0.0, 1.0), sign(side) * torso_deg);
    let elbow = offset(shoulder, upper, SEGMENT);
    let forearm = rotate((-upper.0, -upper.1), sign(side) * elbow_deg);
    let wrist = offset(elbow, forearm, SEGMENT);

    let sample = put(sample, JointPair::SHOULDER.on(side), shoulder);
    let sample = put(sample, JointPair::ELBOW.on(side), elbow);
    put(sample, JointPair::WRIST.on(side), wrist)
}

/// Upright torso with both arms at the given elbow angle; `torso_deg` swings
/// the upper arms away from the torso
pub fn arm_pose(elbow_deg: f64, torso_deg: f64) -> PoseSample {
    asymmetric_arm_pose(elbow_deg, torso_deg, torso_deg)
}

/// Like [`arm_pose`] with a separate upper-arm swing per side
pub fn asymmetric_arm_pose(elbow_deg: f64, left_torso_deg: f64, right_torso_deg: f64) -> PoseSample {
    let mut sample = PoseSample::new();
    for (side, x, torso_deg) in [
        (Side::Left, 0.45, left_torso_deg),
        (Side::Right, 0.55, right_torso_deg),
    ] {
        sample = arm(sample, side, (x, 0.3), elbow_deg, torso_deg);
        sample = put(sample, JointPair::HIP.on(side), (x, 0.6));
    }
    sample
}

/// Horizontal plank facing left; `hip_sag` drops the hips below the body line
pub fn plank_pose(elbow_deg: f64, hip_sag: f64) -> PoseSample {
    let mut sample = put(PoseSample::new(), Joint::Nose, (0.2, 0.5));
    for side in [Side::Left, Side::Right] {
        sample = arm(sample, side, (0.3, 0.5), elbow_deg, 0.0);
        sample = put(sample, JointPair::HIP.on(side), (0.55, 0.5 + hip_sag));
        sample = put(sample, JointPair::ANKLE.on(side), (0.8, 0.5));
    }
    sample
}

/// Leg planted at `ankle` with the knee bent to `knee_deg`; the hip moves.
/// `shin_tilt` leans the shin forward (toward the toes) from vertical.
fn planted_leg(
    sample: PoseSample,
    side: Side,
    ankle: (f64, f64),
    knee_deg: f64,
    shin_tilt: f64,
) -> PoseSample {
    let shin = rotate((0.0, -1.0), shin_tilt);
    let knee = offset(ankle, shin, SEGMENT);
    let hip = offset(knee, rotate((-shin.0, -shin.1), knee_deg), SEGMENT);
    let shoulder = offset(hip, (0.0, -1.0), SEGMENT);
    let foot = (ankle.0 + 0.05, ankle.1 + 0.01);

    let sample = put(sample, JointPair::SHOULDER.on(side), shoulder);
    let sample = put(sample, JointPair::HIP.on(side), hip);
    let sample = put(sample, JointPair::KNEE.on(side), knee);
    let sample = put(sample, JointPair::ANKLE.on(side), ankle);
    put(sample, JointPair::FOOT_INDEX.on(side), foot)
}

/// Side-on squat with both knees at `knee_deg`; the hips drop as the knees bend
pub fn squat_pose(knee_deg: f64) -> PoseSample {
    let sample = planted_leg(PoseSample::new(), Side::Left, (0.5, 0.9), knee_deg, 0.0);
    planted_leg(sample, Side::Right, (0.55, 0.9), knee_deg, 0.0)
}

/// Squat where the knees bend by moving the feet while the hips stay put
pub fn fixed_hip_pose(knee_deg: f64) -> PoseSample {
    let mut sample = PoseSample::new();
    for (side, x) in [(Side::Left, 0.5), (Side::Right, 0.55)] {
        let hip = (x, 0.5);
        let knee = offset(hip, (0.0, 1.0), SEGMENT);
        let ankle = offset(knee, rotate((0.0, -1.0), knee_deg), SEGMENT);
        sample = put(sample, JointPair::SHOULDER.on(side), offset(hip, (0.0, -1.0), SEGMENT));
        sample = put(sample, JointPair::HIP.on(side), hip);
        sample = put(sample, JointPair::KNEE.on(side), knee);
        sample = put(sample, JointPair::ANKLE.on(side), ankle);
        sample = put(sample, JointPair::FOOT_INDEX.on(side), (ankle.0 + 0.05, ankle.1 + 0.01));
    }
    sample
}

/// Split stance: the front foot sits higher in the image than the back foot
pub fn lunge_pose(front: Side, front_deg: f64, back_deg: f64) -> PoseSample {
    tilted_lunge_pose(front, front_deg, back_deg, (0.0, 0.0))
}

/// Split stance with the (front, back) shins tilted toward the toes
pub fn tilted_lunge_pose(front: Side, front_deg: f64, back_deg: f64, tilt: (f64, f64)) -> PoseSample {
    let sample = planted_leg(PoseSample::new(), front, (0.5, 0.85), front_deg, tilt.0);
    planted_leg(sample, front.opposite(), (0.5, 0.92), back_deg, tilt.1)
}

/// Tilt every shoulder forward of its hip by `deg` from vertical
pub fn lean_torso(sample: PoseSample, deg: f64) -> PoseSample {
    let mut sample = sample;
    for side in [Side::Left, Side::Right] {
        let Some(hip) = sample.get(JointPair::HIP.on(side)).copied() else {
            continue;
        };
        let shoulder = offset((hip.x, hip.y), rotate((0.0, -1.0), deg), SEGMENT);
        sample = put(sample, JointPair::SHOULDER.on(side), shoulder);
    }
    sample
}
