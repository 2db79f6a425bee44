//! Platform placement.
//!
//! Targets are spread evenly across the section and jittered, then each
//! candidate is checked against everything already placed. Candidates
//! that collide or fall behind the spawn area are dropped and counted.

use crate::consts::{DEFAULT_PLATFORM_HEIGHT, MIN_PLATFORM_X};
use crate::geom::Point;
use crate::level::{Difficulty, Platform, PlatformKind, PlatformType, Section, SectionType};
use crate::rng::LevelRng;
use crate::rules::{MovingPlatformRules, RuleSet};

use super::IdAllocator;

/// One platform target per 200 units at density 1.0.
const TARGET_INTERVAL: f64 = 200.0;

/// Place platforms for one section into `existing`, returning the number
/// of rejected candidates.
pub(super) fn place_platforms(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    section: &Section,
    difficulty: Difficulty,
    existing: &mut Vec<Platform>,
) -> usize {
    let len = section.length();
    let count = (len / TARGET_INTERVAL * section.profile.platform_density).floor() as usize;
    let mods = rules.platforms.difficulty.mods(difficulty);
    let ground = rules.constants.ground_height;
    let mut rejected = 0;

    for i in 0..count {
        let target_x = section.start + (i as f64 + 1.0) * (len / (count as f64 + 1.0));
        let x = target_x + rng.jitter(100.0);
        if x < MIN_PLATFORM_X {
            rejected += 1;
            continue;
        }

        // Platform sections mix in moving and crumbling platforms.
        let platform_type = if section.kind == SectionType::Platform && rng.chance(0.3) {
            if rng.chance(0.5) {
                PlatformType::Moving
            } else {
                PlatformType::Crumbling
            }
        } else {
            PlatformType::Static
        };

        // Wave pattern for height with some randomness on top.
        let y = ground - 100.0 - (x / 300.0).sin() * 80.0 - rng.jitter(60.0);

        let width = rules.platforms.types.width(platform_type).sample(rng) * mods.width_multiplier;
        if !position_clear(x, y, width, existing) {
            rejected += 1;
            continue;
        }

        let types = &rules.platforms.types;
        let (height, kind) = match platform_type {
            PlatformType::Static => (types.fixed.height, PlatformKind::Static),
            PlatformType::Moving => (
                DEFAULT_PLATFORM_HEIGHT,
                PlatformKind::Moving {
                    path: movement_path(rng, x, y, &types.moving),
                    speed: rng.uniform(types.moving.min_speed, types.moving.max_speed)
                        * mods.speed_multiplier,
                    direction: 1,
                },
            ),
            PlatformType::Crumbling => (
                DEFAULT_PLATFORM_HEIGHT,
                PlatformKind::Crumbling {
                    stability: types.crumbling.stability,
                    respawn_time: types.crumbling.respawn_time,
                    is_stable: true,
                },
            ),
        };

        existing.push(Platform {
            id: ids.next_id(),
            x,
            y,
            width,
            height,
            kind,
        });
    }

    rejected
}

/// A candidate is rejected when it would overlap a placed platform or
/// stack directly above one.
pub(super) fn position_clear(x: f64, y: f64, width: f64, existing: &[Platform]) -> bool {
    for platform in existing {
        let horizontal = (x - platform.x).abs();
        let vertical = (y - platform.y).abs();
        if horizontal < (width + platform.width) / 2.0 + 50.0 && vertical < 40.0 {
            return false;
        }
        if horizontal < 80.0 && vertical < 60.0 {
            return false;
        }
    }
    true
}

/// Back-and-forth path for a moving platform, horizontal or vertical
/// with equal chance, centered on the spawn position.
fn movement_path(rng: &mut LevelRng, x: f64, y: f64, rules: &MovingPlatformRules) -> [Point; 2] {
    let length = rng.uniform(rules.min_path, rules.max_path);
    if rng.chance(0.5) {
        [
            Point::new(x - length / 2.0, y),
            Point::new(x + length / 2.0, y),
        ]
    } else {
        [
            Point::new(x, y - length / 2.0),
            Point::new(x, y + length / 2.0),
        ]
    }
}
