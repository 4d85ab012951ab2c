//! Position-correction resolver for avatar/tile overlaps.
//!
//! This is not swept collision. Each frame the avatar is tested against every
//! tile in insertion order, and an overlapping avatar is nudged out with two
//! bounded probe passes:
//!
//! 1. Lift: step upward up to `lift_steps` times. Clearing here is a landing.
//! 2. Side search: try `x + m` then `x - m` for `m = step, 2*step, ...` up to
//!    `max_side_nudge`. Whether or not this clears, the contact is a side hit:
//!    the lift is undone with `drop_offset` and vx is reversed by
//!    `side_bounce`.
//!
//! The side search finds *a* clearing offset, not necessarily the shortest
//! one. If nothing clears within the cap the avatar keeps its original x and
//! the next frame tries again.

use serde::{Deserialize, Serialize};

use crate::avatar::AvatarState;
use crate::config::ResolverConfig;
use crate::geometry::{Aabb, overlaps};
use crate::level::Tile;

/// How an overlap with one tile was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactKind {
    /// The lift pass cleared the overlap after raising the avatar by `lift`.
    Landed { lift: f32 },
    /// The side search cleared the overlap by moving the avatar `shift`
    /// horizontally (positive is right).
    SideBounce { shift: f32 },
    /// Neither pass cleared the overlap within its cap.
    Stuck,
}

/// One resolved overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Index of the tile in the level's tile list.
    pub tile_index: usize,
    pub kind: ContactKind,
}

/// Resolve overlaps against every tile, in order. Returns one contact per
/// tile that was overlapping when visited.
pub fn resolve_collisions(
    avatar: &mut AvatarState,
    tiles: &[Tile],
    config: &ResolverConfig,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (tile_index, tile) in tiles.iter().enumerate() {
        if let Some(kind) = resolve_tile(avatar, tile, config) {
            tracing::trace!(tile_index, ?kind, x = avatar.x, y = avatar.y, "Tile contact");
            contacts.push(Contact { tile_index, kind });
        }
    }
    contacts
}

/// Resolve a single tile. Returns `None` and leaves the avatar untouched when
/// the two do not overlap.
pub fn resolve_tile(
    avatar: &mut AvatarState,
    tile: &Tile,
    config: &ResolverConfig,
) -> Option<ContactKind> {
    let tile_box = tile.bounds();
    if !overlaps(&avatar.bounds(), &tile_box) {
        return None;
    }

    let start_y = avatar.y;
    for _ in 0..config.lift_steps {
        avatar.y -= config.unstick_step;
        if !overlaps(&avatar.bounds(), &tile_box) {
            avatar.vy = 0.0;
            avatar.airborne = false;
            return Some(ContactKind::Landed {
                lift: start_y - avatar.y,
            });
        }
    }

    let kind = side_search(avatar, &tile_box, config);
    avatar.y += config.drop_offset;
    avatar.vx *= config.side_bounce;
    Some(kind)
}

/// Escalating bidirectional search for a clear x.
fn side_search(
    avatar: &mut AvatarState,
    tile_box: &Aabb,
    config: &ResolverConfig,
) -> ContactKind {
    let origin_x = avatar.x;
    // Count probes as integers: repeatedly adding a small step to a large
    // f32 can stop changing it.
    let probes = (config.max_side_nudge / config.unstick_step).floor() as u32;
    for i in 1..=probes {
        let magnitude = i as f32 * config.unstick_step;
        for shift in [magnitude, -magnitude] {
            avatar.x = origin_x + shift;
            if !overlaps(&avatar.bounds(), tile_box) {
                return ContactKind::SideBounce { shift };
            }
        }
    }
    avatar.x = origin_x;
    ContactKind::Stuck
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_at(x: f32, y: f32) -> Tile {
        Tile { x, y, size: 75.0 }
    }

    #[test]
    fn clear_position_is_untouched() {
        let config = ResolverConfig::default();
        let tiles = [tile_at(225.0, 450.0), tile_at(375.0, 450.0)];
        let mut avatar = AvatarState::new(50.0, 50.0, 40.0, 40.0);
        avatar.vx = 3.0;
        avatar.vy = 2.0;
        avatar.airborne = true;
        let before = avatar.clone();

        let contacts = resolve_collisions(&mut avatar, &tiles, &config);

        assert!(contacts.is_empty());
        assert_eq!(avatar, before);
    }

    #[test]
    fn falling_avatar_lands_on_tile_top() {
        let config = ResolverConfig::default();
        let tile = tile_at(225.0, 450.0);
        // Bottom edge 3 units into the tile.
        let mut avatar = AvatarState::new(240.0, 413.0, 40.0, 40.0);
        avatar.vy = 6.0;
        avatar.airborne = true;

        let kind = resolve_tile(&mut avatar, &tile, &config);

        assert_eq!(kind, Some(ContactKind::Landed { lift: 3.0 }));
        assert_eq!(avatar.bottom(), tile.y);
        assert_eq!(avatar.vy, 0.0);
        assert!(!avatar.airborne);
        assert_eq!(avatar.x, 240.0);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let config = ResolverConfig::default();
        let tiles = [tile_at(225.0, 450.0)];
        let mut avatar = AvatarState::new(240.0, 420.0, 40.0, 40.0);

        let first = resolve_collisions(&mut avatar, &tiles, &config);
        assert_eq!(first.len(), 1);
        let settled = avatar.clone();

        let second = resolve_collisions(&mut avatar, &tiles, &config);
        assert!(second.is_empty());
        assert_eq!(avatar, settled);
    }

    #[test]
    fn deepest_liftable_overlap_still_lands() {
        let config = ResolverConfig::default();
        let tile = tile_at(225.0, 450.0);
        // Exactly lift_steps units of penetration.
        let mut avatar = AvatarState::new(240.0, 426.0, 40.0, 40.0);

        let kind = resolve_tile(&mut avatar, &tile, &config);

        assert_eq!(kind, Some(ContactKind::Landed { lift: 16.0 }));
        assert_eq!(avatar.bottom(), tile.y);
    }

    #[test]
    fn side_hit_bounces_back() {
        let config = ResolverConfig::default();
        let tile = tile_at(225.0, 450.0);
        // Right edge 5 units into the tile's left face, far below its top.
        let mut avatar = AvatarState::new(190.0, 470.0, 40.0, 40.0);
        avatar.vx = 4.0;
        let start_y = avatar.y;

        let kind = resolve_tile(&mut avatar, &tile, &config);

        assert_eq!(kind, Some(ContactKind::SideBounce { shift: -5.0 }));
        assert_eq!(avatar.x, 185.0);
        assert_eq!(avatar.right(), tile.x);
        assert_eq!(avatar.vx, -2.0);
        let lifted_y = start_y - config.lift_steps as f32 * config.unstick_step;
        assert_eq!(avatar.y, lifted_y + config.drop_offset);
    }

    #[test]
    fn side_search_tries_right_first() {
        let config = ResolverConfig::default();
        let tile = tile_at(225.0, 450.0);
        // Left edge 2 units into the tile's right face.
        let mut avatar = AvatarState::new(298.0, 470.0, 40.0, 40.0);
        avatar.vx = -3.0;

        let kind = resolve_tile(&mut avatar, &tile, &config);

        assert_eq!(kind, Some(ContactKind::SideBounce { shift: 2.0 }));
        assert_eq!(avatar.x, tile.x + tile.size);
        assert_eq!(avatar.vx, 1.5);
    }

    #[test]
    fn encased_avatar_terminates_as_stuck() {
        let config = ResolverConfig::default();
        let tile = Tile {
            x: 0.0,
            y: 0.0,
            size: 1000.0,
        };
        let mut avatar = AvatarState::new(480.0, 480.0, 40.0, 40.0);
        avatar.vx = 2.0;

        let kind = resolve_tile(&mut avatar, &tile, &config);

        assert_eq!(kind, Some(ContactKind::Stuck));
        assert_eq!(avatar.x, 480.0);
        assert_eq!(avatar.y, 480.0 - 16.0 + 16.0);
        assert_eq!(avatar.vx, -1.0);
    }

    #[test]
    fn side_cap_is_configurable() {
        let tile = tile_at(225.0, 450.0);
        let start = AvatarState::new(190.0, 470.0, 40.0, 40.0);

        let tight = ResolverConfig {
            max_side_nudge: 4.0,
            ..ResolverConfig::default()
        };
        let mut avatar = start.clone();
        assert_eq!(
            resolve_tile(&mut avatar, &tile, &tight),
            Some(ContactKind::Stuck)
        );
        assert_eq!(avatar.x, start.x);

        let enough = ResolverConfig {
            max_side_nudge: 5.0,
            ..ResolverConfig::default()
        };
        let mut avatar = start.clone();
        assert_eq!(
            resolve_tile(&mut avatar, &tile, &enough),
            Some(ContactKind::SideBounce { shift: -5.0 })
        );
    }

    #[test]
    fn contacts_reported_in_tile_order() {
        let config = ResolverConfig::default();
        // Two stacked tiles; avatar sinks into the top of the upper one.
        let tiles = [tile_at(375.0, 450.0), tile_at(375.0, 375.0)];
        let mut avatar = AvatarState::new(390.0, 340.0, 40.0, 40.0);

        let contacts = resolve_collisions(&mut avatar, &tiles, &config);

        assert_eq!(
            contacts,
            vec![Contact {
                tile_index: 1,
                kind: ContactKind::Landed { lift: 5.0 },
            }]
        );
        assert_eq!(avatar.bottom(), 375.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolver_always_returns_finite_position(
                x in -100.0f32..400.0,
                y in 300.0f32..600.0,
                vx in -20.0f32..20.0,
                size in 10.0f32..200.0,
            ) {
                let config = ResolverConfig::default();
                let tiles = [
                    Tile { x: 100.0, y: 400.0, size },
                    Tile { x: 150.0, y: 420.0, size },
                ];
                let mut avatar = AvatarState::new(x, y, 40.0, 40.0);
                avatar.vx = vx;

                let contacts = resolve_collisions(&mut avatar, &tiles, &config);

                prop_assert!(contacts.len() <= tiles.len());
                prop_assert!(avatar.is_finite());
            }

            #[test]
            fn landed_contacts_leave_tile_clear(
                x in 190.0f32..290.0,
                depth in 1u32..=16,
            ) {
                let config = ResolverConfig::default();
                let tile = tile_at(225.0, 450.0);
                let mut avatar = AvatarState::new(x, 410.0 + depth as f32, 40.0, 40.0);

                let kind = resolve_tile(&mut avatar, &tile, &config);

                prop_assert_eq!(kind, Some(ContactKind::Landed { lift: depth as f32 }));
                prop_assert!(!overlaps(&avatar.bounds(), &tile.bounds()));
            }
        }
    }
}
