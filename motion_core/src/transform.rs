use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

///A rigid transform tagged with an opaque identifier, the identifier is never interpreted
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub id: String,
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            id: String::new(),
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new(id: impl Into<String>, position: DVec3, rotation: DQuat) -> Self {
        Self {
            id: id.into(),
            position,
            rotation,
        }
    }

    /// Maps a point from this transform's local space into the parent space
    pub fn transform_point(&self, local_point: DVec3) -> DVec3 {
        self.rotation * local_point + self.position
    }

    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f64) -> bool {
        self.id == other.id
            && self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let transform = Transform::default();
        assert!(transform.id.is_empty());
        assert_eq!(
            transform.transform_point(DVec3::new(1.0, 2.0, 3.0)),
            DVec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn transform_point_rotates_then_translates() {
        let transform = Transform::new(
            "hand",
            DVec3::new(10.0, 0.0, 0.0),
            DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
        );
        let point = transform.transform_point(DVec3::X);
        assert!(point.abs_diff_eq(DVec3::new(10.0, 1.0, 0.0), 1e-12));
        let point = transform.transform_point(DVec3::Y);
        assert!(point.abs_diff_eq(DVec3::new(9.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn json_layout() {
        let transform = Transform::new("wrist", DVec3::new(1.0, 2.0, 3.0), DQuat::IDENTITY);
        let json = serde_json::to_string(&transform).unwrap();
        assert_eq!(
            json,
            r#"{"id":"wrist","position":[1.0,2.0,3.0],"rotation":[0.0,0.0,0.0,1.0]}"#
        );

        let parsed: Transform =
            serde_json::from_str(r#"{"position":[1,2,3],"rotation":[0,0,0,1]}"#).unwrap();
        assert_eq!(parsed.id, "");
        assert_eq!(parsed.position, DVec3::new(1.0, 2.0, 3.0));
    }
}
