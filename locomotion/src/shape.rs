//! Read-only geometric description of a character's collision shape.
//!
//! The locomotion core only needs three queries from the collider: `radius`, `height`
//! and the `center` offset from the body origin. [`ShapeDescriptor`] answers them for
//! every supported variant; today that is the capsule only. New variants are added to
//! the enum, not by wrapping the descriptor.

use rapier3d::prelude::{Collider, Shape};

use crate::{
    error::UnsupportedShapeError,
    math::{Point, Vec3},
};

/// A capsule given by its total height (tip to tip), cap radius and the local offset of
/// its middle point from the body origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleShape {
    radius: f32,
    height: f32,
    center: Vec3,
}

impl CapsuleShape {
    pub fn new(radius: f32, height: f32, center: Vec3) -> Self {
        Self {
            radius,
            height,
            center,
        }
    }

    /// Y-aligned capsule whose bottom tip sits on the body origin.
    pub fn standing(radius: f32, height: f32) -> Self {
        Self::new(radius, height, Vec3::new(0.0, height * 0.5, 0.0))
    }
}

/// Capability interface `{radius, height, center}` over the supported collider shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeDescriptor {
    Capsule(CapsuleShape),
}

impl ShapeDescriptor {
    /// Describes a rapier/parry shape placed at `local_offset` from the body origin.
    ///
    /// Only capsules are supported; any other shape type is rejected rather than
    /// approximated.
    pub fn from_shape(
        shape: &dyn Shape,
        local_offset: Vec3,
    ) -> Result<Self, UnsupportedShapeError> {
        let Some(capsule) = shape.as_capsule() else {
            return Err(UnsupportedShapeError {
                shape: format!("{:?}", shape.shape_type()),
            });
        };

        let a = capsule.segment.a;
        let b = capsule.segment.b;
        let mid = Point::from((a.coords + b.coords) * 0.5);

        Ok(Self::Capsule(CapsuleShape::new(
            capsule.radius,
            (b - a).norm() + 2.0 * capsule.radius,
            local_offset + mid.coords,
        )))
    }

    /// Describes an attached rapier collider, including its offset from the parent body.
    pub fn from_collider(collider: &Collider) -> Result<Self, UnsupportedShapeError> {
        let offset = collider
            .position_wrt_parent()
            .map(|iso| iso.translation.vector)
            .unwrap_or_else(Vec3::zeros);

        Self::from_shape(collider.shape(), offset)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        match self {
            Self::Capsule(capsule) => capsule.radius,
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        match self {
            Self::Capsule(capsule) => capsule.height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Capsule(capsule) => capsule.center,
        }
    }

    /// World-space origin of the ground probe rays for a body at `position`.
    ///
    /// This sits half a radius above the bottom tip, so a ray of `radius * 0.5` just
    /// reaches the tip.
    pub fn probe_origin(&self, position: &Vec3) -> Point {
        let drop = self.height() * 0.5 - self.radius() * 0.5;
        Point::from(position + self.center() - Vec3::y() * drop)
    }

    /// World-space middle of the shape for a body at `position`.
    pub fn chest(&self, position: &Vec3) -> Point {
        Point::from(position + self.center())
    }
}

impl From<CapsuleShape> for ShapeDescriptor {
    fn from(capsule: CapsuleShape) -> Self {
        Self::Capsule(capsule)
    }
}
