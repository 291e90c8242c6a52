//! Conversion between caller coordinate conventions and the canonical one.
//!
//! Positions and the imaginary part of a quaternion are remapped per axis with
//! the sign of the assigned direction. The scalar part of a quaternion is
//! negated when the caller convention is mirrored: a mirrored basis change
//! reverses the sense of every rotation, and negating `w` is equivalent to
//! negating the remapped axis.

use crate::{AxisAssignment, Direction, Result, Transform};
use glam::{DQuat, DVec3};

pub fn vector_to_canonical(vector: DVec3, axes: &AxisAssignment) -> DVec3 {
    let mut canonical = DVec3::ZERO;
    for (component, direction) in axes.directions().into_iter().enumerate() {
        canonical[direction.axis()] = vector[component] * direction.sign();
    }
    canonical
}

pub fn vector_from_canonical(vector: DVec3, axes: &AxisAssignment) -> DVec3 {
    let [first, second, third] = axes.directions();
    let component = |direction: Direction| vector[direction.axis()] * direction.sign();
    DVec3::new(component(first), component(second), component(third))
}

pub fn quaternion_to_canonical(quaternion: DQuat, axes: &AxisAssignment) -> DQuat {
    let imaginary = vector_to_canonical(DVec3::new(quaternion.x, quaternion.y, quaternion.z), axes);
    DQuat::from_xyzw(imaginary.x, imaginary.y, imaginary.z, scalar(quaternion.w, axes))
}

pub fn quaternion_from_canonical(quaternion: DQuat, axes: &AxisAssignment) -> DQuat {
    let imaginary =
        vector_from_canonical(DVec3::new(quaternion.x, quaternion.y, quaternion.z), axes);
    DQuat::from_xyzw(imaginary.x, imaginary.y, imaginary.z, scalar(quaternion.w, axes))
}

pub fn transform_to_canonical(transform: &Transform, axes: &AxisAssignment) -> Transform {
    Transform {
        id: transform.id.clone(),
        position: vector_to_canonical(transform.position, axes),
        rotation: quaternion_to_canonical(transform.rotation, axes),
    }
}

pub fn transform_from_canonical(transform: &Transform, axes: &AxisAssignment) -> Transform {
    Transform {
        id: transform.id.clone(),
        position: vector_from_canonical(transform.position, axes),
        rotation: quaternion_from_canonical(transform.rotation, axes),
    }
}

fn scalar(w: f64, axes: &AxisAssignment) -> f64 {
    if axes.is_mirrored() {
        -w
    } else {
        w
    }
}

/// The mapping service surface: the six conversions with the caller
/// convention given as an unvalidated ordered list, as received from a request.
pub trait CoordinateMapper {
    fn vector_to_canonical(&self, vector: DVec3, axes: &[Direction]) -> Result<DVec3>;

    fn vector_from_canonical(&self, vector: DVec3, axes: &[Direction]) -> Result<DVec3>;

    fn quaternion_to_canonical(&self, quaternion: DQuat, axes: &[Direction]) -> Result<DQuat>;

    fn quaternion_from_canonical(&self, quaternion: DQuat, axes: &[Direction]) -> Result<DQuat>;

    fn transform_to_canonical(
        &self,
        transform: &Transform,
        axes: &[Direction],
    ) -> Result<Transform>;

    fn transform_from_canonical(
        &self,
        transform: &Transform,
        axes: &[Direction],
    ) -> Result<Transform>;
}

/// In process [`CoordinateMapper`] built on the free functions of this module.
///
/// Stateless, a single instance can serve any number of concurrent callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinateSystemMapper;

impl CoordinateMapper for CoordinateSystemMapper {
    fn vector_to_canonical(&self, vector: DVec3, axes: &[Direction]) -> Result<DVec3> {
        Ok(vector_to_canonical(vector, &AxisAssignment::try_from(axes)?))
    }

    fn vector_from_canonical(&self, vector: DVec3, axes: &[Direction]) -> Result<DVec3> {
        Ok(vector_from_canonical(vector, &AxisAssignment::try_from(axes)?))
    }

    fn quaternion_to_canonical(&self, quaternion: DQuat, axes: &[Direction]) -> Result<DQuat> {
        Ok(quaternion_to_canonical(
            quaternion,
            &AxisAssignment::try_from(axes)?,
        ))
    }

    fn quaternion_from_canonical(&self, quaternion: DQuat, axes: &[Direction]) -> Result<DQuat> {
        Ok(quaternion_from_canonical(
            quaternion,
            &AxisAssignment::try_from(axes)?,
        ))
    }

    fn transform_to_canonical(
        &self,
        transform: &Transform,
        axes: &[Direction],
    ) -> Result<Transform> {
        Ok(transform_to_canonical(
            transform,
            &AxisAssignment::try_from(axes)?,
        ))
    }

    fn transform_from_canonical(
        &self,
        transform: &Transform,
        axes: &[Direction],
    ) -> Result<Transform> {
        Ok(transform_from_canonical(
            transform,
            &AxisAssignment::try_from(axes)?,
        ))
    }
}
