use glam::{DQuat, DVec3};
use motion_core::Transform;
use motion_grasp::{GraspPoseService, Hand, HandPose, Joint, Posture, PostureSkeleton};

const TOLERANCE: f64 = 0.01;

const LEFT_WRIST: DVec3 = DVec3::new(-0.7531490325927734, 1.5269964933395386, -0.06743687391281128);

fn grasp(hand: Hand, position: DVec3, rotation: DQuat, aim: DQuat) -> HandPose {
    let service = GraspPoseService::with_bundled_pose().unwrap();
    let posture = Posture {
        avatar_id: "1".to_string(),
        joints: vec![Joint::new(hand.wrist(), position, rotation)],
    };
    let object = Transform::new(
        "Target",
        position + aim * hand.default_direction(),
        DQuat::IDENTITY,
    );

    let pose = service.compute_grasp_pose(&posture, hand, &object).unwrap();

    let wrist = pose.wrist().unwrap();
    assert!(wrist.position.abs_diff_eq(position, 1e-12));
    let pointing = wrist.rotation * hand.default_direction();
    assert!(pointing.abs_diff_eq((object.position - position).normalize(), 0.001));
    pose
}

fn assert_tip(pose: &HandPose, index: usize, expected: [f64; 3]) {
    let actual = pose.joints[index].position;
    let expected = DVec3::from_array(expected);
    assert!(
        actual.distance(expected) <= TOLERANCE,
        "{:?}: {} vs {}",
        pose.joints[index].joint_type,
        actual,
        expected
    );
}

#[test]
fn left_hand_already_aligned() {
    let rotation = DQuat::from_xyzw(
        0.011663678102195263,
        -0.07214047014713287,
        -0.9189794063568115,
        -0.38747456669807434,
    )
    .normalize();

    let pose = grasp(Hand::Left, LEFT_WRIST, rotation, rotation);
    assert_eq!(pose.wrist().unwrap().rotation, rotation);

    assert_tip(&pose, 1, [-0.7757415175437927, 1.3994311094284058, -0.02170582115650177]);
    assert_tip(&pose, 2, [-0.7892686724662781, 1.3968180418014526, -0.01914067007601261]);
    assert_tip(&pose, 3, [-0.7902005910873413, 1.3844854831695557, -0.045743849128484726]);
}

#[test]
fn left_hand_with_twist() {
    let rotation = DQuat::from_xyzw(
        0.011663678102195263,
        -0.07214047014713287,
        -0.9189794063568115,
        -0.38747456669807434,
    )
    .normalize();
    let aim = DQuat::from_xyzw(
        0.21029071509838104,
        -0.15429531037807465,
        -0.8946714997291565,
        -0.36267584562301636,
    )
    .normalize();

    let pose = grasp(Hand::Left, LEFT_WRIST, rotation, aim);
    assert_tip(&pose, 3, [-0.7941258549690247, 1.3942217826843262, -0.014102483168244362]);
    assert_tip(&pose, 4, [-0.782811164855957, 1.3946980237960815, -0.03699272498488426]);
    assert_tip(&pose, 5, [-0.7711732983589172, 1.403513789176941, -0.059470854699611664]);
}

#[test]
fn left_hand_full_rotation() {
    let rotation = DQuat::from_xyzw(-0.051147, -0.287468, -0.826503, -0.481289).normalize();
    let aim = DQuat::from_xyzw(-0.070946, -0.283232, -0.791161, -0.537411).normalize();

    let pose = grasp(Hand::Left, LEFT_WRIST, rotation, aim);
    assert_tip(&pose, 1, [-0.798723, 1.438287, 0.027053]);
    assert_tip(&pose, 2, [-0.810607, 1.442431, 0.033216]);
    assert_tip(&pose, 3, [-0.824583, 1.425051, 0.014155]);
    assert_tip(&pose, 4, [-0.826580, 1.423268, -0.011243]);
    assert_tip(&pose, 5, [-0.824011, 1.428439, -0.037417]);
}

#[test]
fn right_hand_full_rotation() {
    let position = DVec3::new(0.753149, 1.526996, -0.067437);
    let rotation = DQuat::from_xyzw(-0.054499, 0.172148, 0.855220, -0.485791).normalize();
    let aim = DQuat::from_xyzw(-0.063543, 0.169019, 0.828282, -0.530419).normalize();

    let pose = grasp(Hand::Right, position, rotation, aim);
    assert_tip(&pose, 1, [0.781985, 1.420199, 0.011878]);
    assert_tip(&pose, 2, [0.818831, 1.422909, 0.006287]);
    assert_tip(&pose, 3, [0.829268, 1.409252, -0.017488]);
    assert_tip(&pose, 4, [0.827827, 1.412431, -0.042787]);
    assert_tip(&pose, 5, [0.822123, 1.422696, -0.066881]);
}

#[test]
fn constraints_through_skeleton() {
    let service = GraspPoseService::with_bundled_pose().unwrap();
    let position = DVec3::new(0.753149, 1.526996, -0.067437);
    let rotation = DQuat::from_xyzw(-0.054499, 0.172148, 0.855220, -0.485791).normalize();
    let posture = Posture {
        avatar_id: "avatar".to_string(),
        joints: vec![Joint::new(Hand::Right.wrist(), position, rotation)],
    };
    let object = Transform::new("Target", DVec3::new(1.2, 1.0, 0.4), DQuat::IDENTITY);

    let mut skeleton = PostureSkeleton::new();
    let constraints = service
        .grasp_constraints(&mut skeleton, &posture, Hand::Right, &object)
        .unwrap();

    let ids: Vec<&str> = constraints.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "RightWrist",
            "RightThumbTip",
            "RightIndexTip",
            "RightMiddleTip",
            "RightRingTip",
            "RightLittleTip"
        ]
    );
    assert!(constraints[0].position.abs_diff_eq(position, 1e-12));
}
