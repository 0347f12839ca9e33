//! Rigid-body commit seam.
//!
//! The integrator never integrates positions into a physics world itself; it reads the
//! current pose from a [`BodyMover`] and writes the next one back once per tick.

use rapier3d::prelude::RigidBody;

use crate::math::{Quat, Vec3};

pub trait BodyMover {
    fn translation(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn move_translation(&mut self, translation: Vec3);
    fn move_rotation(&mut self, rotation: Quat);
}

/// Plain pose for headless drivers and tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::identity(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::zeros())
    }
}

impl BodyMover for Pose {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn move_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    fn move_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

/// Kinematic bodies are driven through their next-step targets so rapier can derive a
/// velocity for contacts; any other body type is teleported.
impl BodyMover for RigidBody {
    fn translation(&self) -> Vec3 {
        if self.is_kinematic() {
            self.next_position().translation.vector
        } else {
            *RigidBody::translation(self)
        }
    }

    fn rotation(&self) -> Quat {
        if self.is_kinematic() {
            self.next_position().rotation
        } else {
            *RigidBody::rotation(self)
        }
    }

    fn move_translation(&mut self, translation: Vec3) {
        if self.is_kinematic() {
            self.set_next_kinematic_translation(translation);
        } else {
            self.set_translation(translation, true);
        }
    }

    fn move_rotation(&mut self, rotation: Quat) {
        if self.is_kinematic() {
            self.set_next_kinematic_rotation(rotation);
        } else {
            self.set_rotation(rotation, true);
        }
    }
}
