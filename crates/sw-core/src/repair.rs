//! Automatic repair of validation errors.
//!
//! Each fix handles one issue kind and mutates the level in place. The
//! orchestrator re-validates after every pass, so a fix only has to make
//! forward progress, not prove the level clean. Warnings are never
//! repaired, only errors.

use tracing::debug;

use crate::consts::DEFAULT_PLATFORM_HEIGHT;
use crate::generator::IdAllocator;
use crate::geom::distance;
use crate::level::{LevelData, Platform, PlatformKind, Ring};
use crate::rules::RuleSet;
use crate::validate::{Issue, IssueKind, ValidationReport};

/// Width of a platform inserted to bridge a flagged gap.
const BRIDGE_PLATFORM_WIDTH: f64 = 150.0;

/// Width of a platform inserted under an unsafe jump pad landing.
const LANDING_PLATFORM_WIDTH: f64 = 200.0;

/// How far below the landing point the rescue platform sits.
const LANDING_PLATFORM_DROP: f64 = 50.0;

/// Apply one fix per repairable error, returning how many fixes ran.
pub fn apply_fixes(
    level: &mut LevelData,
    report: &ValidationReport,
    rules: &RuleSet,
    ids: &mut IdAllocator,
) -> usize {
    let mut applied = 0;
    let mut rings_fixed = false;
    let mut bridged: Vec<(u64, u64)> = Vec::new();

    for issue in &report.errors {
        let fixed = match issue.kind {
            IssueKind::RingSpacing => {
                // The spacing fix is global; run it once per pass no
                // matter how many pairs were flagged.
                if rings_fixed {
                    false
                } else {
                    rings_fixed = true;
                    spread_rings(&mut level.rings, rules)
                }
            }
            IssueKind::PlatformGap => bridge_gap(level, issue, ids, &mut bridged),
            IssueKind::JumpPadLanding => catch_landing(level, issue, ids),
            IssueKind::EnemyDensity => thin_enemies(level, issue, rules),
            _ => false,
        };
        if fixed {
            debug!(kind = %issue.kind, "applied fix");
            applied += 1;
        }
    }

    applied
}

/// Push apart every ring pair closer than the minimum line spacing: the
/// second ring of each pair moves outward along the line between them.
fn spread_rings(rings: &mut [Ring], rules: &RuleSet) -> bool {
    let min_spacing = rules.rings.patterns.line.min_spacing;
    let mut moved = false;

    for i in 0..rings.len() {
        for j in (i + 1)..rings.len() {
            let d = distance(rings[i].x, rings[i].y, rings[j].x, rings[j].y);
            if d < min_spacing {
                let angle = (rings[j].y - rings[i].y).atan2(rings[j].x - rings[i].x);
                rings[j].x = rings[i].x + angle.cos() * min_spacing;
                rings[j].y = rings[i].y + angle.sin() * min_spacing;
                moved = true;
            }
        }
    }

    moved
}

/// Drop a static platform into a gap flagged as too wide. A mutually
/// nearest pair reports the same gap from both sides; only one bridge
/// goes in per midpoint.
fn bridge_gap(
    level: &mut LevelData,
    issue: &Issue,
    ids: &mut IdAllocator,
    bridged: &mut Vec<(u64, u64)>,
) -> bool {
    let x = issue.x.unwrap_or(0.0);
    let y = issue.y.unwrap_or(300.0);
    let key = (x.to_bits(), y.to_bits());
    if bridged.contains(&key) {
        return false;
    }
    bridged.push(key);
    level.platforms.push(Platform {
        id: ids.next_id(),
        x,
        y,
        width: BRIDGE_PLATFORM_WIDTH,
        height: DEFAULT_PLATFORM_HEIGHT,
        kind: PlatformKind::Static,
    });
    true
}

/// Put a platform under the landing point of the flagged jump pad.
fn catch_landing(level: &mut LevelData, issue: &Issue, ids: &mut IdAllocator) -> bool {
    let Some(pad_id) = issue.entity else {
        return false;
    };
    let Some(pad) = level.jump_pads.iter().find(|p| p.id == pad_id) else {
        return false;
    };
    let landing = pad.landing_point();
    level.platforms.push(Platform {
        id: ids.next_id(),
        x: landing.x,
        y: landing.y + LANDING_PLATFORM_DROP,
        width: LANDING_PLATFORM_WIDTH,
        height: DEFAULT_PLATFORM_HEIGHT,
        kind: PlatformKind::Static,
    });
    true
}

/// Remove enemies from an overcrowded stretch until it is back under the
/// cap.
fn thin_enemies(level: &mut LevelData, issue: &Issue, rules: &RuleSet) -> bool {
    use crate::consts::ENEMY_BUCKET_WIDTH;

    let Some(bucket) = issue.section else {
        return false;
    };
    let start = bucket as f64 * ENEMY_BUCKET_WIDTH;
    let end = start + ENEMY_BUCKET_WIDTH;
    let max = rules.enemies.placement.max_per_section;

    let in_bucket = level
        .enemies
        .iter()
        .filter(|e| e.x >= start && e.x < end)
        .count();
    if in_bucket <= max {
        return false;
    }

    let mut to_remove = in_bucket - max;
    level.enemies.retain(|e| {
        if to_remove > 0 && e.x >= start && e.x < end {
            to_remove -= 1;
            false
        } else {
            true
        }
    });
    true
}
