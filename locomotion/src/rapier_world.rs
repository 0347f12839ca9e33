//! Rapier-based query world for immutable/static world geometry.
//!
//! Builds an in-memory Rapier scene from a set of static collider definitions and answers
//! the [`SceneQuery`] casts used by the locomotion core.
//!
//! Design goals
//! - Reproducible: definitions are inserted in `id` order, so equal inputs give equal sets.
//! - Query-focused: only the broad-phase BVH is maintained; no dynamics are simulated.
//! - Immutable world: statics do not move after construction.
//! - Layered: every collider carries a [`LayerMask`] membership; sensors (triggers) are
//!   never reported by locomotion queries.

// Drivers build scenes and kinematic bodies with the exact rapier version used here.
pub use rapier3d;

use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;

use crate::{
    layers::LayerMask,
    math::{Point, Vec3},
    scene::{RayHit, SceneQuery, SweepHit},
};

/// Canonical definition of an immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - For planes the normal is derived from the pose as `rotation * +Y`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Unique key; colliders are inserted in ascending `id` order.
    pub id: u32,
    pub translation: Vec3,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
    /// Trigger volumes take part in the world but are invisible to locomotion queries.
    pub sensor: bool,
}

impl WorldStaticDef {
    /// Solid, axis-aligned static on `layers` at `translation`.
    pub fn new(id: u32, translation: Vec3, shape: ColliderShapeDef, layers: LayerMask) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            layers,
            sensor: false,
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }
}

/// Static collider geometry understood by [`StaticQueryWorld`].
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) through the pose, shifted along its normal.
    Plane {
        offset_along_normal: f32,
    },

    /// Box given by its half-extents, oriented by the pose.
    Cuboid { half_extents: Vec3 },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Capsule along local Y.
    CapsuleY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries against a static world.
pub struct StaticQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
}

impl StaticQueryWorld {
    /// Inserts every definition (in `id` order) and builds the broad-phase BVH once.
    ///
    /// Definitions are not validated; NaN poses produce a world that never reports hits.
    pub fn build(world_statics: impl IntoIterator<Item = WorldStaticDef>) -> Self {
        let mut defs: Vec<WorldStaticDef> = world_statics.into_iter().collect();
        defs.sort_by_key(|d| d.id);

        let bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut modified_colliders = Vec::with_capacity(defs.len());

        for def in &defs {
            let co_handle = colliders.insert(collider_from_def(def));
            modified_colliders.push(co_handle);
        }

        let mut broad_phase = BroadPhaseBvh::new();
        let mut events = Vec::new();
        broad_phase.update(
            &IntegrationParameters::default(),
            &colliders,
            &bodies,
            &modified_colliders,
            &[],
            &mut events,
        );

        log::debug!("Built static query world with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase: NarrowPhase::default(),
        }
    }

    /// Number of colliders in the world, sensors included.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Create a borrowed `QueryPipeline` that only sees solid colliders on `layers`.
    pub fn query_pipeline(&self, layers: LayerMask) -> QueryPipeline<'_> {
        let filter = QueryFilter::new()
            .exclude_sensors()
            .groups(layers.query_groups());

        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

impl SceneQuery for StaticQueryWorld {
    fn cast_ray(
        &self,
        origin: &Point,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        if layers.is_empty() || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(*origin, *dir);
        self.query_pipeline(layers)
            .cast_ray(&ray, max_distance, true)
            .map(|(_handle, toi)| RayHit {
                distance: toi,
                point: ray.point_at(toi),
            })
    }

    fn cast_sphere(
        &self,
        center: &Point,
        radius: f32,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SweepHit> {
        if layers.is_empty() || max_distance <= 0.0 || radius <= 0.0 {
            return None;
        }

        let ball = Ball::new(radius);
        let pose = Isometry::translation(center.x, center.y, center.z);
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

        self.query_pipeline(layers)
            .cast_shape(&pose, dir, &ball, options)
            .map(|(_handle, hit)| SweepHit {
                distance: hit.time_of_impact,
                // Already faces back toward the ball, out of the obstacle.
                normal: hit.normal1.into_inner(),
            })
    }
}

/// Build a parentless Rapier collider from a `WorldStaticDef`, posed in world space.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // The half-space normal is local +Y; the pose rotates it into place.
            // Shift the pose along the world normal so `offset` moves the plane itself.
            let n = def.rotation * Vec3::y();
            let pose = Isometry::from_parts(
                Translation3::from(def.translation + n * *offset_along_normal),
                def.rotation,
            );
            ColliderBuilder::halfspace(Vec3::y_axis()).position(pose)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                .position(pose_of(def))
        }

        ColliderShapeDef::Sphere { radius } => {
            ColliderBuilder::ball(*radius).position(pose_of(def))
        }

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).position(pose_of(def)),
    };

    builder
        .collision_groups(def.layers.membership_groups())
        .sensor(def.sensor)
        .build()
}

fn pose_of(def: &WorldStaticDef) -> Isometry<f32> {
    Isometry::from_parts(Translation3::from(def.translation), def.rotation)
}
