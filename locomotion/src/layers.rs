use rapier3d::prelude::{Group, InteractionGroups};
use serde::{Deserialize, Serialize};

/// Bitmask of collision layers, one bit per layer.
///
/// Used both as a collider's membership and as the filter of a scene query. A query
/// matches a collider when their masks share at least one bit.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const DEFAULT: LayerMask = LayerMask(1 << 0);
    pub const GROUND: LayerMask = LayerMask(1 << 1);
    pub const OBSTACLE: LayerMask = LayerMask(1 << 2);

    /// Mask containing only layer `index` (0..32).
    pub const fn layer(index: u8) -> Self {
        LayerMask(1u32 << (index as u32 % 32))
    }

    pub const fn union(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }

    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Rapier groups for a collider that belongs to these layers.
    ///
    /// The collider accepts queries from every layer; selection happens on the query side.
    pub fn membership_groups(self) -> InteractionGroups {
        InteractionGroups::all().with_memberships(Group::from_bits_truncate(self.0))
    }

    /// Rapier groups for a scene query that only sees colliders on these layers.
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::all().with_filter(Group::from_bits_truncate(self.0))
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        self.union(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_layers_are_distinct_bits() {
        assert!(!LayerMask::GROUND.intersects(LayerMask::OBSTACLE));
        assert!(!LayerMask::DEFAULT.intersects(LayerMask::GROUND));
        assert!(LayerMask::ALL.intersects(LayerMask::OBSTACLE));
    }

    #[test]
    fn union_matches_either_layer() {
        let both = LayerMask::GROUND | LayerMask::OBSTACLE;
        assert!(both.intersects(LayerMask::GROUND));
        assert!(both.intersects(LayerMask::OBSTACLE));
        assert!(!both.intersects(LayerMask::DEFAULT));
    }

    #[test]
    fn layer_index_wraps_into_mask_width() {
        assert_eq!(LayerMask::layer(1), LayerMask::GROUND);
        assert_eq!(LayerMask::layer(33), LayerMask::GROUND);
        assert!(LayerMask::NONE.is_empty());
    }
}
