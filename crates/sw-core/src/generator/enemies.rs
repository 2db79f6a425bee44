//! Enemy placement.
//!
//! Enemies scatter through a section, sometimes in tight groups. Every
//! candidate position is checked against the spawn protection zone,
//! already-placed enemies, and checkpoint safe zones; failures are
//! dropped and counted rather than retried.

use crate::consts::{ENEMY_STAND_OFFSET, PLAYER_SPAWN_X};
use crate::geom::distance;
use crate::level::{Checkpoint, Enemy, EnemyKind, EnemyState, EnemyType, Platform, Section,
    platform_below};
use crate::rng::LevelRng;
use crate::rules::RuleSet;

use super::IdAllocator;

/// One enemy target per 150 units at density 1.0.
const TARGET_INTERVAL: f64 = 150.0;

/// Chance that a target becomes a group instead of a single enemy.
const GROUP_CHANCE: f64 = 0.4;
const GROUP_SIZE: usize = 3;

/// Hardcoded starting shield strength for shielded enemies.
const SHIELD_HEALTH: u32 = 2;

/// Hover oscillation for flying enemies.
const HOVER_AMPLITUDE: f64 = 50.0;
const HOVER_FREQUENCY: f64 = 0.002;

/// Place enemies for one section into `enemies`, returning the number of
/// rejected candidates.
#[allow(clippy::too_many_arguments)]
pub(super) fn place_enemies(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    section: &Section,
    level: u32,
    platforms: &[Platform],
    checkpoints: &[Checkpoint],
    enemies: &mut Vec<Enemy>,
) -> usize {
    let len = section.length();
    let count = (len / TARGET_INTERVAL * section.profile.enemy_density).floor() as usize;
    let available = rules.progression.unlocked_enemy_types(level);
    let multiplier = rules.progression.for_level(level).multiplier;
    let group_spacing = rules.enemies.placement.grouping.group_spacing;
    let mut rejected = 0;

    let mut i = 0;
    while i < count {
        if rng.chance(GROUP_CHANCE) && i + 2 < count {
            let group_size = GROUP_SIZE.min(count - i);
            let anchor = section.start + rng.uniform(0.0, len);
            for j in 0..group_size {
                let x = anchor + j as f64 * group_spacing;
                if !try_spawn(
                    rules, rng, ids, &available, multiplier, x, platforms, checkpoints, enemies,
                ) {
                    rejected += 1;
                }
            }
            i += group_size;
        } else {
            let x = section.start + rng.uniform(0.0, len);
            if !try_spawn(
                rules, rng, ids, &available, multiplier, x, platforms, checkpoints, enemies,
            ) {
                rejected += 1;
            }
            i += 1;
        }
    }

    rejected
}

#[allow(clippy::too_many_arguments)]
fn try_spawn(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    available: &[EnemyType],
    multiplier: f64,
    x: f64,
    platforms: &[Platform],
    checkpoints: &[Checkpoint],
    enemies: &mut Vec<Enemy>,
) -> bool {
    let Some(&enemy_type) = rng.pick(available) else {
        return false;
    };
    let ground = rules.constants.ground_height;

    // Flying enemies hover; everyone else stands on the nearest surface
    // under them, falling back to the ground.
    let y = match enemy_type {
        EnemyType::Flying => ground - rules.enemies.types.flying.hover_height,
        _ => {
            let stand = ground - ENEMY_STAND_OFFSET;
            match platform_below(platforms, x, stand) {
                Some(platform) => platform.y - ENEMY_STAND_OFFSET,
                None => stand,
            }
        }
    };

    if !position_allowed(rules, x, y, enemies, checkpoints) {
        return false;
    }

    let base = rules.enemies.types.base_stats(enemy_type);
    let scaling = &rules.progression.scaling;
    let kind = match enemy_type {
        EnemyType::Basic => EnemyKind::Basic,
        EnemyType::Flying => EnemyKind::Flying {
            base_y: y,
            amplitude: HOVER_AMPLITUDE,
            frequency: HOVER_FREQUENCY,
            patrol_radius: rules.enemies.types.flying.patrol_radius,
        },
        EnemyType::Shielded => EnemyKind::Shielded {
            shield_health: SHIELD_HEALTH,
        },
        EnemyType::Projectile => EnemyKind::Projectile {
            fire_rate: rules.enemies.types.projectile.fire_rate,
        },
    };

    let health = (base.health as f64 * multiplier).ceil() as u32;
    enemies.push(Enemy {
        id: ids.next_id(),
        x,
        y,
        health,
        max_health: health,
        speed: base.speed * scaling.enemy_speed,
        damage: (base.damage as f64 * scaling.enemy_damage).ceil() as u32,
        points: base.points,
        detection_range: base.detection_range,
        state: EnemyState::Patrol,
        direction: if rng.chance(0.5) { 1 } else { -1 },
        kind,
    });
    true
}

/// Whether an enemy may stand at `(x, y)`: outside the spawn protection
/// zone, clear of other enemies, and clear of checkpoint safe zones.
pub fn position_allowed(
    rules: &RuleSet,
    x: f64,
    y: f64,
    enemies: &[Enemy],
    checkpoints: &[Checkpoint],
) -> bool {
    let placement = &rules.enemies.placement;

    if (x - PLAYER_SPAWN_X).abs() < placement.spawn_protection_radius {
        return false;
    }
    if enemies
        .iter()
        .any(|e| distance(x, y, e.x, e.y) < placement.min_spacing)
    {
        return false;
    }
    if checkpoints
        .iter()
        .any(|c| distance(x, y, c.x, c.y) < placement.safe_zone_radius)
    {
        return false;
    }
    true
}
