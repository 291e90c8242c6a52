use crate::{Error, JointType, Posture, Result};
use glam::{DQuat, DVec3};
use motion_core::Transform;
use std::collections::HashMap;

/// Access to an avatar skeleton, usually a remote skeleton service.
pub trait SkeletonAccess {
    /// Replaces the current posture of `posture.avatar_id`
    fn set_posture(&mut self, posture: &Posture) -> Result<()>;

    fn global_joint_position(&self, avatar_id: &str, joint_type: JointType) -> Result<DVec3>;

    fn global_joint_rotation(&self, avatar_id: &str, joint_type: JointType) -> Result<DQuat>;

    fn global_joint_transform(&self, avatar_id: &str, joint_type: JointType) -> Result<Transform> {
        Ok(Transform::new(
            joint_type.name(),
            self.global_joint_position(avatar_id, joint_type)?,
            self.global_joint_rotation(avatar_id, joint_type)?,
        ))
    }
}

/// Skeleton that answers queries straight from the last posture pushed per avatar
#[derive(Default)]
pub struct PostureSkeleton {
    postures: HashMap<String, Posture>,
}

impl PostureSkeleton {
    pub fn new() -> Self {
        Self::default()
    }

    fn joint(&self, avatar_id: &str, joint_type: JointType) -> Result<&crate::Joint> {
        let posture = self
            .postures
            .get(avatar_id)
            .ok_or_else(|| Error::UnknownAvatar(avatar_id.to_string()))?;
        posture
            .joint(joint_type)
            .ok_or_else(|| Error::JointNotFound(joint_type.to_string(), avatar_id.to_string()))
    }
}

impl SkeletonAccess for PostureSkeleton {
    fn set_posture(&mut self, posture: &Posture) -> Result<()> {
        self.postures
            .insert(posture.avatar_id.clone(), posture.clone());
        Ok(())
    }

    fn global_joint_position(&self, avatar_id: &str, joint_type: JointType) -> Result<DVec3> {
        Ok(self.joint(avatar_id, joint_type)?.position)
    }

    fn global_joint_rotation(&self, avatar_id: &str, joint_type: JointType) -> Result<DQuat> {
        Ok(self.joint(avatar_id, joint_type)?.rotation)
    }
}
