//! Ring placement.
//!
//! Rings come in line, arc, and circle patterns anchored above a platform
//! when there is one at the anchor x, otherwise at jumpable height above
//! the ground. Individual rings that land near a hazard, on top of
//! another ring, or inside a platform are filtered out; the rest of the
//! pattern survives.

use std::f64::consts::PI;

use crate::consts::{MIN_RING_SPACING, RING_RADIUS};
use crate::geom::{Point, distance};
use crate::level::{Enemy, Platform, Ring, RingKind, Section, platform_at};
use crate::rng::LevelRng;
use crate::rules::RuleSet;

use super::IdAllocator;

/// One ring pattern per 300 units at density 1.0.
const PATTERN_INTERVAL: f64 = 300.0;

/// Arcs taller than this would leave the playable band.
const ARC_HEIGHT_CAP: f64 = 120.0;

/// Circles wider than this are not reachable in one jump.
const CIRCLE_RADIUS_CAP: f64 = 80.0;

#[derive(Clone, Copy)]
enum PatternShape {
    Line,
    Arc,
    Circle,
}

const SHAPES: [PatternShape; 3] = [PatternShape::Line, PatternShape::Arc, PatternShape::Circle];

/// Place ring patterns for one section into `rings`, returning the number
/// of filtered-out rings.
pub(super) fn place_rings(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    section: &Section,
    platforms: &[Platform],
    enemies: &[Enemy],
    rings: &mut Vec<Ring>,
) -> usize {
    let len = section.length();
    let pattern_count = (len / PATTERN_INTERVAL * section.profile.ring_density).floor() as usize;
    let ground = rules.constants.ground_height;
    let mut rejected = 0;

    for _ in 0..pattern_count {
        let shape = *rng.pick(&SHAPES).unwrap_or(&PatternShape::Line);
        let x = section.start + rng.uniform(0.0, (len - 200.0).max(0.0));

        // Anchor above a platform when one covers this x, otherwise at
        // jumpable height above the ground.
        let y = match platform_at(platforms, x) {
            Some(platform) => platform.y - platform.height - rng.uniform(30.0, 110.0),
            None => ground - rng.uniform(50.0, 150.0),
        };
        let y = y.max(80.0).min(ground - 50.0);

        for point in pattern_points(shape, x, y, rules, rng, ground) {
            if ring_position_valid(rules, point, enemies, rings, platforms) {
                rings.push(Ring {
                    id: ids.next_id(),
                    x: point.x,
                    y: point.y,
                    collected: false,
                    kind: RingKind::Normal,
                });
            } else {
                rejected += 1;
            }
        }
    }

    if section.profile.special_rings {
        place_special_rings(rules, rng, ids, section, rings);
    }

    rejected
}

fn pattern_points(
    shape: PatternShape,
    x: f64,
    y: f64,
    rules: &RuleSet,
    rng: &mut LevelRng,
    ground: f64,
) -> Vec<Point> {
    let patterns = &rules.rings.patterns;
    match shape {
        PatternShape::Line => {
            let count = rng.count(patterns.line.min_count, patterns.line.max_count);
            let spacing = rng.uniform(patterns.line.min_spacing, patterns.line.max_spacing);
            (0..count)
                .map(|i| Point::new(x + i as f64 * spacing, y))
                .collect()
        }
        PatternShape::Arc => {
            let count = rng.count(patterns.arc.min_count, patterns.arc.max_count);
            let radius = rng
                .uniform(patterns.arc.min_radius, patterns.arc.max_radius)
                .min(ARC_HEIGHT_CAP);
            (0..count)
                .map(|i| {
                    let angle = PI / count as f64 * i as f64;
                    Point::new(x + angle.cos() * radius, y - angle.sin() * radius)
                })
                .collect()
        }
        PatternShape::Circle => {
            let count = patterns.circle.ring_count;
            let radius = rng
                .uniform(patterns.circle.min_radius, patterns.circle.max_radius)
                .min(CIRCLE_RADIUS_CAP);
            (0..count)
                .filter_map(|i| {
                    let angle = 2.0 * PI / count as f64 * i as f64;
                    let point =
                        Point::new(x + angle.cos() * radius, y + angle.sin() * radius);
                    // The lower half of a circle can dip into the ground.
                    (point.y < ground - 20.0).then_some(point)
                })
                .collect()
        }
    }
}

fn ring_position_valid(
    rules: &RuleSet,
    point: Point,
    enemies: &[Enemy],
    rings: &[Ring],
    platforms: &[Platform],
) -> bool {
    let hazard_distance = rules.rings.placement.min_distance_from_hazard;
    if enemies
        .iter()
        .any(|e| distance(point.x, point.y, e.x, e.y) < hazard_distance)
    {
        return false;
    }
    if rings
        .iter()
        .any(|r| distance(point.x, point.y, r.x, r.y) < MIN_RING_SPACING)
    {
        return false;
    }
    if platforms
        .iter()
        .any(|p| p.contains_with_margin(point.x, point.y, RING_RADIUS))
    {
        return false;
    }
    true
}

/// Bonus sections roll for one super ring and one magnet ring.
fn place_special_rings(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    section: &Section,
    rings: &mut Vec<Ring>,
) {
    let special = &rules.rings.special;
    let ground = rules.constants.ground_height;
    let len = section.length();

    if rng.chance(special.super_ring.spawn_chance) {
        rings.push(Ring {
            id: ids.next_id(),
            x: section.start + rng.uniform(0.0, len),
            y: ground - rng.uniform(50.0, 200.0),
            collected: false,
            kind: RingKind::Super {
                value: special.super_ring.value,
                glow_radius: special.super_ring.glow_radius,
            },
        });
    }
    if rng.chance(special.magnet_ring.spawn_chance) {
        rings.push(Ring {
            id: ids.next_id(),
            x: section.start + rng.uniform(0.0, len),
            y: ground - rng.uniform(50.0, 200.0),
            collected: false,
            kind: RingKind::Magnet {
                value: special.magnet_ring.value,
                magnet_radius: special.magnet_ring.magnet_radius,
            },
        });
    }
}
