//! Cross-component checks: issues that only show up when two kinds of
//! entity are considered together.

use super::{Findings, Issue, IssueKind, Severity};
use crate::consts::{JUMP_HEIGHT, LANDING_MARGIN, LANDING_WINDOW};
use crate::geom::{Point, distance};
use crate::level::{LevelData, Platform};
use crate::rules::RuleSet;

/// Rings sitting too close to an enemy.
pub(super) fn check_ring_hazards(rules: &RuleSet, level: &LevelData, findings: &mut Findings) {
    let min_distance = rules.rings.placement.min_distance_from_hazard;
    for ring in &level.rings {
        let hazard = level
            .enemies
            .iter()
            .find(|e| distance(ring.x, ring.y, e.x, e.y) < min_distance);
        if let Some(enemy) = hazard {
            findings.warning(
                Issue::new(
                    IssueKind::RingHazard,
                    Severity::Medium,
                    format!(
                        "ring within {:.0} of a {} enemy",
                        min_distance,
                        enemy.kind.enemy_type()
                    ),
                )
                .at(ring.x, ring.y)
                .for_entity(ring.id),
            );
        }
    }
}

/// Whether a landing point counts as safe: on a platform (with some
/// horizontal slack) or on the ground.
pub(super) fn landing_is_safe(point: Point, platforms: &[Platform], ground: f64) -> bool {
    if point.y > ground - LANDING_WINDOW {
        return true;
    }
    platforms.iter().any(|p| {
        (point.x - p.x).abs() < p.width / 2.0 + LANDING_MARGIN
            && (point.y - p.y).abs() < LANDING_WINDOW
    })
}

/// Every jump pad arc must come down somewhere survivable.
pub(super) fn check_jump_pad_landings(rules: &RuleSet, level: &LevelData, findings: &mut Findings) {
    let ground = rules.constants.ground_height;
    for pad in &level.jump_pads {
        let lp = pad.landing_point();
        if !landing_is_safe(lp, &level.platforms, ground) {
            findings.error(
                Issue::new(
                    IssueKind::JumpPadLanding,
                    Severity::Critical,
                    format!("{} jump pad arc has no safe landing", pad.kind),
                )
                .at(lp.x, lp.y)
                .for_entity(pad.id),
            );
        }
    }
}

/// Every platform must be reachable: low enough to jump onto from the
/// ground, within jumping range of another platform, or served by a
/// jump pad landing on it.
pub(super) fn check_platform_access(rules: &RuleSet, level: &LevelData, findings: &mut Findings) {
    let ground = rules.constants.ground_height;
    let max_gap = rules.platforms.placement.max_gap;

    for platform in &level.platforms {
        if ground - platform.y <= JUMP_HEIGHT {
            continue;
        }
        let from_neighbor = level.platforms.iter().any(|other| {
            other.id != platform.id
                && platform.gap_to(other) < max_gap
                && (platform.y - other.y).abs() < JUMP_HEIGHT
        });
        if from_neighbor {
            continue;
        }
        let from_pad = level.jump_pads.iter().any(|pad| {
            let lp = pad.landing_point();
            (lp.x - platform.x).abs() < platform.width
        });
        if from_pad {
            continue;
        }
        findings.warning(
            Issue::new(
                IssueKind::PlatformAccess,
                Severity::High,
                format!(
                    "platform at height {:.0} has no route onto it",
                    ground - platform.y
                ),
            )
            .at(platform.x, platform.y)
            .for_entity(platform.id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{
        Difficulty, Enemy, EnemyKind, EnemyState, JumpPad, JumpPadType, PlatformKind, Ring,
        RingKind,
    };

    fn level_with(platforms: Vec<Platform>, jump_pads: Vec<JumpPad>) -> LevelData {
        LevelData {
            number: 1,
            length: 3000.0,
            difficulty: Difficulty::Easy,
            sections: vec![],
            checkpoints: vec![],
            platforms,
            enemies: vec![],
            rings: vec![],
            jump_pads,
        }
    }

    fn fixed(id: u32, x: f64, y: f64, width: f64) -> Platform {
        Platform {
            id,
            x,
            y,
            width,
            height: 20.0,
            kind: PlatformKind::Static,
        }
    }

    fn pad(id: u32, x: f64, y: f64, force_x: f64, force_y: f64) -> JumpPad {
        JumpPad {
            id,
            kind: JumpPadType::Diagonal,
            x,
            y,
            width: 80.0,
            height: 30.0,
            force: force_y,
            force_x,
            force_y,
            cooldown: 100,
            active: true,
        }
    }

    #[test]
    fn test_ground_landing_is_safe() {
        // A pad on the ground launching straight up lands back on itself.
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let level = level_with(vec![], vec![pad(1, 500.0, 300.0, 0.0, 20.0)]);
        check_jump_pad_landings(&rules, &level, &mut findings);
        assert!(findings.errors.is_empty());
    }

    #[test]
    fn test_landing_in_a_pit_is_critical() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // Pad high up on a platform; the arc comes down at the pad's height
        // with nothing underneath.
        let platform = fixed(1, 500.0, 100.0, 100.0);
        let level = level_with(vec![platform], vec![pad(1, 500.0, 90.0, 15.0, 20.0)]);
        check_jump_pad_landings(&rules, &level, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].kind, IssueKind::JumpPadLanding);
        assert_eq!(findings.errors[0].severity, Severity::Critical);
        assert_eq!(findings.errors[0].entity, Some(1));
    }

    #[test]
    fn test_landing_on_platform_is_safe() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let launch = fixed(1, 500.0, 100.0, 100.0);
        // t = 2 * 20 / 0.5 = 80, so the arc travels 15 * 80 = 1200 right.
        let target = fixed(2, 1700.0, 120.0, 200.0);
        let level = level_with(vec![launch, target], vec![pad(1, 500.0, 90.0, 15.0, 20.0)]);
        check_jump_pad_landings(&rules, &level, &mut findings);
        assert!(findings.errors.is_empty());
    }

    #[test]
    fn test_unreachable_platform_flagged() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 320 above ground, beyond jump height, no neighbors or pads.
        let level = level_with(vec![fixed(1, 500.0, 0.0, 100.0)], vec![]);
        check_platform_access(&rules, &level, &mut findings);
        assert_eq!(findings.warnings.len(), 1);
        assert_eq!(findings.warnings[0].kind, IssueKind::PlatformAccess);
    }

    #[test]
    fn test_low_platform_is_reachable() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let level = level_with(vec![fixed(1, 500.0, 200.0, 100.0)], vec![]);
        check_platform_access(&rules, &level, &mut findings);
        assert!(findings.warnings.is_empty());
    }

    #[test]
    fn test_ring_near_enemy_warns() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let mut level = level_with(vec![], vec![]);
        level.rings.push(Ring {
            id: 1,
            x: 500.0,
            y: 200.0,
            collected: false,
            kind: RingKind::Normal,
        });
        level.enemies.push(Enemy {
            id: 1,
            x: 550.0,
            y: 230.0,
            health: 1,
            max_health: 1,
            speed: 100.0,
            damage: 1,
            points: 100,
            detection_range: 200.0,
            state: EnemyState::Patrol,
            direction: 1,
            kind: EnemyKind::Basic,
        });
        check_ring_hazards(&rules, &level, &mut findings);
        assert_eq!(findings.warnings.len(), 1);
        assert_eq!(findings.warnings[0].kind, IssueKind::RingHazard);
    }
}
