use crate::{Error, JointType, Result};
use glam::{DQuat, DVec3};
use motion_core::log::{debug, warn};
use motion_core::Transform;
use std::collections::HashMap;
use std::path::Path;

const BUNDLED_DEFAULT_POSE: &str = include_str!("../data/default_pose.json");

/// Fingertip offsets relative to their wrist, in wrist space.
///
/// The json layout groups tips under their wrist:
/// `{"LeftWrist": {"LeftThumbTip": [x, y, z], ...}, "RightWrist": {...}}`
#[derive(Clone, Debug, Default)]
pub struct DefaultHandPose {
    offsets: HashMap<JointType, DVec3>,
}

impl DefaultHandPose {
    /// The offsets shipped with the crate, ten fingertips
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DEFAULT_POSE)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading default hand pose from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let sections: HashMap<String, HashMap<String, [f64; 3]>> = serde_json::from_str(json)?;

        let mut offsets = HashMap::new();
        for (wrist_name, tips) in sections {
            let wrist = wrist_name.parse::<JointType>()?;
            if !wrist.is_wrist() {
                return Err(Error::UnknownJoint(wrist_name));
            }

            for (tip_name, offset) in tips {
                let tip = tip_name.parse::<JointType>()?;
                if tip.is_wrist() || tip.hand() != wrist.hand() {
                    return Err(Error::UnknownJoint(tip_name));
                }
                offsets.insert(tip, DVec3::from_array(offset));
            }
        }

        let pose = Self { offsets };
        let missing = pose.missing_tips();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|joint_type| joint_type.name()).collect();
            warn!("Default hand pose has no offset for {}", names.join(", "));
        }

        debug!("Loaded {} default fingertip offsets", pose.len());
        Ok(pose)
    }

    pub fn offset(&self, joint_type: JointType) -> Result<DVec3> {
        self.offsets
            .get(&joint_type)
            .copied()
            .ok_or_else(|| Error::MissingOffset(joint_type.to_string()))
    }

    /// Fingertips without an offset, grasps for their hand fail with [`Error::MissingOffset`]
    pub fn missing_tips(&self) -> Vec<JointType> {
        JointType::ALL
            .into_iter()
            .filter(|joint_type| !joint_type.is_wrist() && !self.offsets.contains_key(joint_type))
            .collect()
    }

    /// World position of a fingertip for a wrist at `wrist_position` / `wrist_rotation`
    pub fn global_tip_position(
        &self,
        wrist_position: DVec3,
        wrist_rotation: DQuat,
        joint_type: JointType,
    ) -> Result<DVec3> {
        let wrist = Transform::new(
            joint_type.hand().wrist().name(),
            wrist_position,
            wrist_rotation,
        );
        Ok(wrist.transform_point(self.offset(joint_type)?))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointType, DVec3)> + '_ {
        self.offsets
            .iter()
            .map(|(joint_type, offset)| (*joint_type, *offset))
    }
}
