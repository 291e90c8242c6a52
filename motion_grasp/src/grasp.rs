use crate::{DefaultHandPose, Error, Hand, HandPose, Joint, Posture, Result, SkeletonAccess};
use glam::{DQuat, DVec3};
use motion_core::log::debug;
use motion_core::Transform;

/// Computes the hand pose needed to grasp an object: the wrist is turned so
/// the fingers point at the object and the fingertips are placed from the
/// default hand pose.
///
/// Holds no per request state, a single instance can be shared between threads.
pub struct GraspPoseService {
    default_pose: DefaultHandPose,
}

impl GraspPoseService {
    pub fn new(default_pose: DefaultHandPose) -> Self {
        Self { default_pose }
    }

    pub fn with_bundled_pose() -> Result<Self> {
        Ok(Self::new(DefaultHandPose::bundled()?))
    }

    pub fn default_pose(&self) -> &DefaultHandPose {
        &self.default_pose
    }

    /// Grasp pose for `hand`, taking the wrist from `posture`
    pub fn compute_grasp_pose(
        &self,
        posture: &Posture,
        hand: Hand,
        object: &Transform,
    ) -> Result<HandPose> {
        let wrist = posture.joint(hand.wrist()).ok_or_else(|| {
            Error::JointNotFound(hand.wrist().to_string(), posture.avatar_id.clone())
        })?;
        self.hand_pose(hand, wrist.position, wrist.rotation, object.position)
    }

    /// Grasp pose for `hand` as six transforms named after their joints,
    /// wrist first. The posture is pushed to `skeleton` and the wrist is read
    /// back from it.
    pub fn grasp_constraints<S: SkeletonAccess + ?Sized>(
        &self,
        skeleton: &mut S,
        posture: &Posture,
        hand: Hand,
        object: &Transform,
    ) -> Result<Vec<Transform>> {
        skeleton.set_posture(posture)?;
        let wrist_position = skeleton.global_joint_position(&posture.avatar_id, hand.wrist())?;
        let wrist_rotation = skeleton.global_joint_rotation(&posture.avatar_id, hand.wrist())?;

        let hand_pose = self.hand_pose(hand, wrist_position, wrist_rotation, object.position)?;
        Ok(hand_pose.joints.iter().map(Joint::to_transform).collect())
    }

    fn hand_pose(
        &self,
        hand: Hand,
        wrist_position: DVec3,
        wrist_rotation: DQuat,
        object_position: DVec3,
    ) -> Result<HandPose> {
        let wrist_rotation = motion_core::aim_rotation(
            wrist_rotation,
            hand.default_direction(),
            object_position - wrist_position,
        )?;
        debug!(
            "{:?} hand at {} aimed at {}: {}",
            hand, wrist_position, object_position, wrist_rotation
        );

        let mut joints = Vec::with_capacity(6);
        joints.push(Joint::new(hand.wrist(), wrist_position, wrist_rotation));
        for tip in hand.fingertips() {
            let position = self
                .default_pose
                .global_tip_position(wrist_position, wrist_rotation, tip)?;
            joints.push(Joint::new(tip, position, DQuat::IDENTITY));
        }

        Ok(HandPose { hand, joints })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JointType, PostureSkeleton};

    fn posture(hand: Hand, position: DVec3, rotation: DQuat) -> Posture {
        Posture {
            avatar_id: "1".to_string(),
            joints: vec![Joint::new(hand.wrist(), position, rotation)],
        }
    }

    #[test]
    fn fingers_point_at_object() {
        let service = GraspPoseService::with_bundled_pose().unwrap();
        let wrist_position = DVec3::new(0.75, 1.5, -0.07);
        let object = Transform::new("cup", DVec3::new(1.0, 1.0, 0.5), DQuat::IDENTITY);

        for hand in [Hand::Left, Hand::Right] {
            let pose = service
                .compute_grasp_pose(
                    &posture(hand, wrist_position, DQuat::IDENTITY),
                    hand,
                    &object,
                )
                .unwrap();

            assert_eq!(pose.joints.len(), 6);
            let wrist = pose.wrist().unwrap();
            assert_eq!(wrist.joint_type, hand.wrist());
            assert_eq!(wrist.position, wrist_position);

            let pointing = wrist.rotation * hand.default_direction();
            let expected = (object.position - wrist_position).normalize();
            assert!(pointing.abs_diff_eq(expected, 1e-9));

            for (joint, tip) in pose.joints[1..].iter().zip(hand.fingertips()) {
                assert_eq!(joint.joint_type, tip);
                let offset = service.default_pose().offset(tip).unwrap();
                assert!(joint
                    .position
                    .abs_diff_eq(wrist.rotation * offset + wrist_position, 1e-12));
                assert_eq!(joint.rotation, DQuat::IDENTITY);
            }
        }
    }

    #[test]
    fn missing_wrist() {
        let service = GraspPoseService::with_bundled_pose().unwrap();
        let result = service.compute_grasp_pose(
            &posture(Hand::Left, DVec3::ZERO, DQuat::IDENTITY),
            Hand::Right,
            &Transform::default(),
        );
        assert!(matches!(result, Err(Error::JointNotFound(joint, _)) if joint == "RightWrist"));
    }

    #[test]
    fn object_at_wrist_is_degenerate() {
        let service = GraspPoseService::with_bundled_pose().unwrap();
        let position = DVec3::new(0.2, 1.2, 0.1);
        let result = service.compute_grasp_pose(
            &posture(Hand::Right, position, DQuat::IDENTITY),
            Hand::Right,
            &Transform::new("object", position, DQuat::IDENTITY),
        );
        assert!(matches!(
            result,
            Err(Error::Core(motion_core::Error::DegenerateDirection(_)))
        ));
    }

    #[test]
    fn missing_tip_offset() {
        let default_pose = DefaultHandPose::from_json_str(
            r#"{"RightWrist": {"RightThumbTip": [0.1, 0.1, 0.0]}}"#,
        )
        .unwrap();
        let service = GraspPoseService::new(default_pose);
        let result = service.compute_grasp_pose(
            &posture(Hand::Right, DVec3::ZERO, DQuat::IDENTITY),
            Hand::Right,
            &Transform::new("object", DVec3::X, DQuat::IDENTITY),
        );
        assert!(matches!(result, Err(Error::MissingOffset(joint)) if joint == "RightIndexTip"));
    }

    #[test]
    fn constraints_match_hand_pose() {
        let service = GraspPoseService::with_bundled_pose().unwrap();
        let posture = posture(
            Hand::Left,
            DVec3::new(-0.75, 1.5, -0.07),
            DQuat::from_rotation_y(0.4),
        );
        let object = Transform::new("box", DVec3::new(-1.0, 1.2, 0.3), DQuat::IDENTITY);

        let mut skeleton = PostureSkeleton::new();
        let constraints = service
            .grasp_constraints(&mut skeleton, &posture, Hand::Left, &object)
            .unwrap();
        let pose = service
            .compute_grasp_pose(&posture, Hand::Left, &object)
            .unwrap();

        assert_eq!(constraints.len(), 6);
        assert_eq!(constraints[0].id, JointType::LeftWrist.name());
        for (constraint, joint) in constraints.iter().zip(&pose.joints) {
            assert_eq!(constraint, &joint.to_transform());
        }
    }

    #[test]
    fn shared_between_threads() {
        let service = GraspPoseService::with_bundled_pose().unwrap();
        let object = Transform::new("object", DVec3::new(0.0, 1.0, 1.0), DQuat::IDENTITY);

        let poses: Vec<HandPose> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let service = &service;
                    let object = &object;
                    scope.spawn(move || {
                        let wrist = DVec3::new(i as f64 * 0.1, 1.0, 0.0);
                        service
                            .compute_grasp_pose(
                                &posture(Hand::Right, wrist, DQuat::IDENTITY),
                                Hand::Right,
                                object,
                            )
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, pose) in poses.iter().enumerate() {
            let wrist = pose.wrist().unwrap();
            assert_eq!(wrist.position, DVec3::new(i as f64 * 0.1, 1.0, 0.0));
        }
    }
}
