use crate::{Error, Result};
use glam::{DQuat, DVec3};
use log::trace;

/// Hand directions closer than this (euclidean distance between the unit
/// vectors) to the target are treated as already aligned.
pub const ALIGNMENT_THRESHOLD: f64 = 0.01;

/// Below this the shortest arc scalar is treated as zero, the two directions
/// are opposite and the cross product carries no usable axis.
const OPPOSITE_EPSILON: f64 = 1e-12;

/// Rotates `current` so that the local `reference` direction points along the
/// world space `target` direction.
///
/// The applied correction is the shortest arc between the current world
/// direction of `reference` and `target`, so the twist of `current` around
/// the reference axis is preserved. If the two already coincide within
/// [`ALIGNMENT_THRESHOLD`] `current` is returned untouched.
pub fn aim_rotation(current: DQuat, reference: DVec3, target: DVec3) -> Result<DQuat> {
    let reference = checked_normalize(reference, "reference")?;
    let target = checked_normalize(target, "target")?;
    let hand_direction = checked_normalize(current * reference, "rotated reference")?;

    if hand_direction.distance(target) <= ALIGNMENT_THRESHOLD {
        trace!("Direction {} already aligned with {}", hand_direction, target);
        return Ok(current);
    }

    let delta = unit_arc(hand_direction, target);
    Ok((delta * current).normalize())
}

/// The minimal angle rotation taking `from` onto `to`, neither needs to be normalized
pub fn shortest_arc(from: DVec3, to: DVec3) -> Result<DQuat> {
    let from = checked_normalize(from, "source")?;
    let to = checked_normalize(to, "target")?;
    Ok(unit_arc(from, to))
}

fn unit_arc(from: DVec3, to: DVec3) -> DQuat {
    let axis = from.cross(to);
    let scalar = (from.length_squared() * to.length_squared()).sqrt() + from.dot(to);

    if scalar <= OPPOSITE_EPSILON {
        // Half turn, any axis perpendicular to `from` will do
        let axis = from.any_orthonormal_vector();
        return DQuat::from_xyzw(axis.x, axis.y, axis.z, 0.0);
    }

    DQuat::from_xyzw(axis.x, axis.y, axis.z, scalar).normalize()
}

fn checked_normalize(direction: DVec3, name: &'static str) -> Result<DVec3> {
    direction
        .try_normalize()
        .ok_or(Error::DegenerateDirection(name))
}
