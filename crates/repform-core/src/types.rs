//! Fundamental types for the repform system.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Session identifier for one exercise session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * 1_000_000_000.0) as i64)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Seconds elapsed since `earlier` (negative if `earlier` is in the future)
    pub fn secs_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / 1_000_000_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// Body side of a bilateral joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// 33-landmark body topology reported by the pose service (MediaPipe Pose order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Joint {
    pub const COUNT: usize = 33;

    const ALL: [Joint; Joint::COUNT] = [
        Joint::Nose,
        Joint::LeftEyeInner,
        Joint::LeftEye,
        Joint::LeftEyeOuter,
        Joint::RightEyeInner,
        Joint::RightEye,
        Joint::RightEyeOuter,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::MouthLeft,
        Joint::MouthRight,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftPinky,
        Joint::RightPinky,
        Joint::LeftIndex,
        Joint::RightIndex,
        Joint::LeftThumb,
        Joint::RightThumb,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Left/right pair of the same anatomical landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointPair {
    pub left: Joint,
    pub right: Joint,
}

impl JointPair {
    pub const SHOULDER: Self = Self::new(Joint::LeftShoulder, Joint::RightShoulder);
    pub const ELBOW: Self = Self::new(Joint::LeftElbow, Joint::RightElbow);
    pub const WRIST: Self = Self::new(Joint::LeftWrist, Joint::RightWrist);
    pub const HIP: Self = Self::new(Joint::LeftHip, Joint::RightHip);
    pub const KNEE: Self = Self::new(Joint::LeftKnee, Joint::RightKnee);
    pub const ANKLE: Self = Self::new(Joint::LeftAnkle, Joint::RightAnkle);
    pub const FOOT_INDEX: Self = Self::new(Joint::LeftFootIndex, Joint::RightFootIndex);

    pub const fn new(left: Joint, right: Joint) -> Self {
        Self { left, right }
    }

    pub fn on(&self, side: Side) -> Joint {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Three bilateral landmarks whose middle one is the measured vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointChain {
    pub proximal: JointPair,
    pub vertex: JointPair,
    pub distal: JointPair,
}

impl JointChain {
    /// Shoulder-elbow-wrist
    pub const ARM: Self = Self::new(JointPair::SHOULDER, JointPair::ELBOW, JointPair::WRIST);
    /// Hip-knee-ankle
    pub const LEG: Self = Self::new(JointPair::HIP, JointPair::KNEE, JointPair::ANKLE);
    /// Shoulder-hip-knee
    pub const TRUNK: Self = Self::new(JointPair::SHOULDER, JointPair::HIP, JointPair::KNEE);
    /// Shoulder-hip-ankle
    pub const BODY_LINE: Self = Self::new(JointPair::SHOULDER, JointPair::HIP, JointPair::ANKLE);

    pub const fn new(proximal: JointPair, vertex: JointPair, distal: JointPair) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }

    pub fn on(&self, side: Side) -> [Joint; 3] {
        [self.proximal.on(side), self.vertex.on(side), self.distal.on(side)]
    }
}

/// A single landmark in normalized image coordinates
///
/// `x` grows to the right and `y` grows downward, both in `[0, 1]`.
/// `z` is the pose service's relative depth (smaller is closer to the camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f64, y: f64, visibility: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    pub fn with_depth(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Vector from this landmark to `other`
    pub fn vector_to(&self, other: &Landmark) -> Vector2<f64> {
        other.point() - self.point()
    }
}

/// One frame of landmarks from the pose service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseSample {
    pub landmarks: HashMap<Joint, Landmark>,
}

impl PoseSample {
    /// Values per landmark in a flat buffer: x, y, z, visibility
    pub const FLAT_STRIDE: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sample from a flat `[x, y, z, visibility] * 33` buffer
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        let expected = Joint::COUNT * Self::FLAT_STRIDE;
        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "landmark buffer has {} values, expected {}",
                data.len(),
                expected
            )));
        }

        let landmarks = Joint::ALL
            .iter()
            .zip(data.chunks_exact(Self::FLAT_STRIDE))
            .map(|(joint, v)| {
                let landmark = Landmark::new(v[0] as f64, v[1] as f64, v[3]).with_depth(v[2] as f64);
                (*joint, landmark)
            })
            .collect();

        Ok(Self { landmarks })
    }

    pub fn insert(&mut self, joint: Joint, landmark: Landmark) {
        self.landmarks.insert(joint, landmark);
    }

    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.insert(joint, landmark);
        self
    }

    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }

    /// Visibility of a joint, `0.0` when the pose service did not report it
    pub fn visibility(&self, joint: Joint) -> f32 {
        self.get(joint).map(|l| l.visibility).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Joint angle at the chain's vertex on one side, if all three landmarks are present
    pub fn chain_angle(&self, chain: &JointChain, side: Side) -> Option<f64> {
        let [a, b, c] = chain.on(side);
        Some(crate::geometry::joint_angle(
            self.get(a)?.point(),
            self.get(b)?.point(),
            self.get(c)?.point(),
        ))
    }
}
