use crate::Error;
use glam::{DQuat, DVec3};
use motion_core::convert::{transform_from_canonical, transform_to_canonical};
use motion_core::{AxisAssignment, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The joints a grasp pose is made of
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointType {
    LeftWrist,
    LeftThumbTip,
    LeftIndexTip,
    LeftMiddleTip,
    LeftRingTip,
    LeftLittleTip,
    RightWrist,
    RightThumbTip,
    RightIndexTip,
    RightMiddleTip,
    RightRingTip,
    RightLittleTip,
}

impl JointType {
    pub const ALL: [JointType; 12] = [
        JointType::LeftWrist,
        JointType::LeftThumbTip,
        JointType::LeftIndexTip,
        JointType::LeftMiddleTip,
        JointType::LeftRingTip,
        JointType::LeftLittleTip,
        JointType::RightWrist,
        JointType::RightThumbTip,
        JointType::RightIndexTip,
        JointType::RightMiddleTip,
        JointType::RightRingTip,
        JointType::RightLittleTip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JointType::LeftWrist => "LeftWrist",
            JointType::LeftThumbTip => "LeftThumbTip",
            JointType::LeftIndexTip => "LeftIndexTip",
            JointType::LeftMiddleTip => "LeftMiddleTip",
            JointType::LeftRingTip => "LeftRingTip",
            JointType::LeftLittleTip => "LeftLittleTip",
            JointType::RightWrist => "RightWrist",
            JointType::RightThumbTip => "RightThumbTip",
            JointType::RightIndexTip => "RightIndexTip",
            JointType::RightMiddleTip => "RightMiddleTip",
            JointType::RightRingTip => "RightRingTip",
            JointType::RightLittleTip => "RightLittleTip",
        }
    }

    pub fn hand(self) -> Hand {
        match self {
            JointType::LeftWrist
            | JointType::LeftThumbTip
            | JointType::LeftIndexTip
            | JointType::LeftMiddleTip
            | JointType::LeftRingTip
            | JointType::LeftLittleTip => Hand::Left,
            _ => Hand::Right,
        }
    }

    pub fn is_wrist(self) -> bool {
        matches!(self, JointType::LeftWrist | JointType::RightWrist)
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointType::ALL
            .into_iter()
            .find(|joint_type| joint_type.name() == s)
            .ok_or_else(|| Error::UnknownJoint(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn wrist(self) -> JointType {
        match self {
            Hand::Left => JointType::LeftWrist,
            Hand::Right => JointType::RightWrist,
        }
    }

    /// Thumb, index, middle, ring, little
    pub fn fingertips(self) -> [JointType; 5] {
        match self {
            Hand::Left => [
                JointType::LeftThumbTip,
                JointType::LeftIndexTip,
                JointType::LeftMiddleTip,
                JointType::LeftRingTip,
                JointType::LeftLittleTip,
            ],
            Hand::Right => [
                JointType::RightThumbTip,
                JointType::RightIndexTip,
                JointType::RightMiddleTip,
                JointType::RightRingTip,
                JointType::RightLittleTip,
            ],
        }
    }

    /// Direction the fingers point in wrist space
    pub fn default_direction(self) -> DVec3 {
        match self {
            Hand::Left => DVec3::NEG_X,
            Hand::Right => DVec3::X,
        }
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "leftwrist" => Ok(Hand::Left),
            "right" | "rightwrist" => Ok(Hand::Right),
            _ => Err(Error::UnknownJoint(s.to_string())),
        }
    }
}

/// A joint in world space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub joint_type: JointType,
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Joint {
    pub fn new(joint_type: JointType, position: DVec3, rotation: DQuat) -> Self {
        Self {
            joint_type,
            position,
            rotation,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform::new(self.joint_type.name(), self.position, self.rotation)
    }

    pub fn to_canonical(&self, axes: &AxisAssignment) -> Self {
        let transform = transform_to_canonical(&self.to_transform(), axes);
        Self::new(self.joint_type, transform.position, transform.rotation)
    }

    pub fn to_convention(&self, axes: &AxisAssignment) -> Self {
        let transform = transform_from_canonical(&self.to_transform(), axes);
        Self::new(self.joint_type, transform.position, transform.rotation)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Posture {
    pub avatar_id: String,
    pub joints: Vec<Joint>,
}

impl Posture {
    pub fn joint(&self, joint_type: JointType) -> Option<&Joint> {
        self.joints
            .iter()
            .find(|joint| joint.joint_type == joint_type)
    }

    pub fn to_canonical(&self, axes: &AxisAssignment) -> Self {
        Self {
            avatar_id: self.avatar_id.clone(),
            joints: self.joints.iter().map(|joint| joint.to_canonical(axes)).collect(),
        }
    }
}

/// Wrist first, followed by the five fingertips
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    pub hand: Hand,
    pub joints: Vec<Joint>,
}

impl HandPose {
    pub fn wrist(&self) -> Option<&Joint> {
        self.joints.first()
    }

    pub fn to_convention(&self, axes: &AxisAssignment) -> Self {
        Self {
            hand: self.hand,
            joints: self
                .joints
                .iter()
                .map(|joint| joint.to_convention(axes))
                .collect(),
        }
    }
}
