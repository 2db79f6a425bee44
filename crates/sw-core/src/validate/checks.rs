//! Per-category validation checks.

use super::{Findings, Issue, IssueKind, Severity};
use crate::geom::distance;
use crate::level::{Checkpoint, Enemy, JumpPad, JumpPadType, Platform, PlatformKind, Ring, Section};
use crate::rules::RuleSet;

/// Ring spacing within clusters, cluster size, and ring heights.
pub(super) fn check_rings(rules: &RuleSet, rings: &[Ring], findings: &mut Findings) {
    let line = &rules.rings.patterns.line;
    let placement = &rules.rings.placement;
    let ground = rules.constants.ground_height;

    // Group rings into clusters: every ring within 1.5x the maximum line
    // spacing of a seed ring belongs to the seed's cluster.
    let cluster_radius = line.max_spacing * 1.5;
    let mut used = vec![false; rings.len()];
    for i in 0..rings.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let seed = &rings[i];
        let mut cluster = vec![seed];
        for j in (i + 1)..rings.len() {
            if !used[j] && distance(seed.x, seed.y, rings[j].x, rings[j].y) <= cluster_radius {
                used[j] = true;
                cluster.push(&rings[j]);
            }
        }

        cluster.sort_by(|a, b| a.x.total_cmp(&b.x));
        for pair in cluster.windows(2) {
            let d = distance(pair[0].x, pair[0].y, pair[1].x, pair[1].y);
            if d < line.min_spacing {
                findings.error(
                    Issue::new(
                        IssueKind::RingSpacing,
                        Severity::Medium,
                        format!(
                            "rings {:.0} apart, minimum spacing is {:.0}",
                            d, line.min_spacing
                        ),
                    )
                    .at((pair[0].x + pair[1].x) / 2.0, (pair[0].y + pair[1].y) / 2.0)
                    .for_entity(pair[1].id),
                );
            }
        }

        if cluster.len() > line.max_count as usize {
            findings.warning(
                Issue::new(
                    IssueKind::RingPattern,
                    Severity::Low,
                    format!(
                        "ring cluster of {} exceeds maximum pattern size {}",
                        cluster.len(),
                        line.max_count
                    ),
                )
                .at(seed.x, seed.y),
            );
        }
    }

    for ring in rings {
        let height = ground - ring.y;
        if height < placement.min_height {
            findings.error(
                Issue::new(
                    IssueKind::RingHeight,
                    Severity::High,
                    format!(
                        "ring at height {:.0}, minimum is {:.0}",
                        height, placement.min_height
                    ),
                )
                .at(ring.x, ring.y)
                .for_entity(ring.id),
            );
        } else if height > placement.max_height {
            findings.warning(
                Issue::new(
                    IssueKind::RingHeight,
                    Severity::Medium,
                    format!(
                        "ring at height {:.0}, maximum is {:.0}",
                        height, placement.max_height
                    ),
                )
                .at(ring.x, ring.y)
                .for_entity(ring.id),
            );
        }
    }
}

/// Vertical pad forces, pairwise spacing, and consecutive pad chains.
pub(super) fn check_jump_pads(rules: &RuleSet, pads: &[JumpPad], findings: &mut Findings) {
    let vertical = rules.jump_pads.types.vertical.force();
    let placement = &rules.jump_pads.placement;

    for pad in pads {
        if pad.kind == JumpPadType::Vertical && !vertical.contains(pad.force) {
            findings.error(
                Issue::new(
                    IssueKind::JumpPadForce,
                    Severity::High,
                    format!(
                        "vertical pad force {:.1} outside [{:.0}, {:.0}]",
                        pad.force, vertical.min, vertical.max
                    ),
                )
                .at(pad.x, pad.y)
                .for_entity(pad.id),
            );
        }
    }

    for (i, a) in pads.iter().enumerate() {
        for b in &pads[i + 1..] {
            let d = distance(a.x, a.y, b.x, b.y);
            if d < placement.min_spacing {
                findings.error(
                    Issue::new(
                        IssueKind::JumpPadSpacing,
                        Severity::Medium,
                        format!(
                            "jump pads {:.0} apart, minimum spacing is {:.0}",
                            d, placement.min_spacing
                        ),
                    )
                    .at((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
                    .for_entity(b.id),
                );
            }
        }
    }

    // Chains of pads closer than 1.5x the sequence spacing count as one
    // consecutive run.
    let mut sorted: Vec<&JumpPad> = pads.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
    let chain_radius = placement.sequence_spacing * 1.5;
    let mut run_start = 0;
    for i in 1..=sorted.len() {
        let chained = i < sorted.len()
            && distance(sorted[i - 1].x, sorted[i - 1].y, sorted[i].x, sorted[i].y)
                <= chain_radius;
        if !chained {
            let run = i - run_start;
            if run > placement.max_consecutive as usize {
                let head = sorted[run_start];
                findings.warning(
                    Issue::new(
                        IssueKind::JumpPadSequence,
                        Severity::Medium,
                        format!(
                            "{} consecutive jump pads, maximum is {}",
                            run, placement.max_consecutive
                        ),
                    )
                    .at(head.x, head.y),
                );
            }
            run_start = i;
        }
    }
}

/// Platform dimensions, moving-platform parameters, and reachable gaps.
pub(super) fn check_platforms(rules: &RuleSet, platforms: &[Platform], findings: &mut Findings) {
    let types = &rules.platforms.types;
    let max_gap = rules.platforms.placement.max_gap;

    for platform in platforms {
        let min_width = types.width(platform.kind.platform_type()).min;
        if platform.width < min_width {
            findings.error(
                Issue::new(
                    IssueKind::PlatformWidth,
                    Severity::High,
                    format!(
                        "{} platform width {:.0} below minimum {:.0}",
                        platform.kind.platform_type(),
                        platform.width,
                        min_width
                    ),
                )
                .at(platform.x, platform.y)
                .for_entity(platform.id),
            );
        }

        if let PlatformKind::Moving { path, speed, .. } = &platform.kind {
            let path_length = path[0].distance_to(&path[1]);
            if path_length < types.moving.min_path {
                findings.error(
                    Issue::new(
                        IssueKind::PlatformPath,
                        Severity::Medium,
                        format!(
                            "moving platform path {:.0} below minimum {:.0}",
                            path_length, types.moving.min_path
                        ),
                    )
                    .at(platform.x, platform.y)
                    .for_entity(platform.id),
                );
            }
            if *speed > types.moving.max_speed {
                findings.error(
                    Issue::new(
                        IssueKind::PlatformSpeed,
                        Severity::High,
                        format!(
                            "moving platform speed {:.0} above maximum {:.0}",
                            speed, types.moving.max_speed
                        ),
                    )
                    .at(platform.x, platform.y)
                    .for_entity(platform.id),
                );
            }
        }
    }

    // Each platform must have a neighbor within jumping distance.
    if platforms.len() >= 2 {
        for platform in platforms {
            let nearest = platforms
                .iter()
                .filter(|p| p.id != platform.id)
                .min_by(|a, b| {
                    distance(platform.x, platform.y, a.x, a.y)
                        .total_cmp(&distance(platform.x, platform.y, b.x, b.y))
                });
            if let Some(nearest) = nearest {
                let gap = platform.gap_to(nearest);
                if gap > max_gap {
                    findings.error(
                        Issue::new(
                            IssueKind::PlatformGap,
                            Severity::High,
                            format!("gap of {:.0} exceeds maximum {:.0}", gap, max_gap),
                        )
                        .at(
                            (platform.x + nearest.x) / 2.0,
                            (platform.y + nearest.y) / 2.0,
                        )
                        .for_entity(platform.id),
                    );
                }
            }
        }
    }
}

/// Enemy density per bucket, spacing within buckets, and stat sanity.
pub(super) fn check_enemies(rules: &RuleSet, enemies: &[Enemy], findings: &mut Findings) {
    use std::collections::BTreeMap;

    use crate::consts::ENEMY_BUCKET_WIDTH;

    let placement = &rules.enemies.placement;

    let mut buckets: BTreeMap<usize, Vec<&Enemy>> = BTreeMap::new();
    for enemy in enemies {
        let bucket = (enemy.x / ENEMY_BUCKET_WIDTH).floor().max(0.0) as usize;
        buckets.entry(bucket).or_default().push(enemy);
    }

    for (bucket, members) in &buckets {
        if members.len() > placement.max_per_section {
            findings.error(
                Issue::new(
                    IssueKind::EnemyDensity,
                    Severity::High,
                    format!(
                        "{} enemies in one stretch, maximum is {}",
                        members.len(),
                        placement.max_per_section
                    ),
                )
                .in_section(*bucket),
            );
        }

        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let d = distance(a.x, a.y, b.x, b.y);
                if d < placement.min_spacing {
                    findings.warning(
                        Issue::new(
                            IssueKind::EnemySpacing,
                            Severity::Medium,
                            format!(
                                "enemies {:.0} apart, minimum spacing is {:.0}",
                                d, placement.min_spacing
                            ),
                        )
                        .at((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
                        .for_entity(b.id),
                    );
                }
            }
        }
    }

    for enemy in enemies {
        if enemy.health < 1 {
            findings.error(
                Issue::new(
                    IssueKind::EnemyHealth,
                    Severity::High,
                    format!("{} enemy has no health", enemy.kind.enemy_type()),
                )
                .at(enemy.x, enemy.y)
                .for_entity(enemy.id),
            );
        }
    }
}

/// Distance between consecutive checkpoints.
pub(super) fn check_checkpoints(
    rules: &RuleSet,
    checkpoints: &[Checkpoint],
    findings: &mut Findings,
) {
    let spacing = rules.checkpoints.spacing;
    let mut sorted: Vec<&Checkpoint> = checkpoints.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    for pair in sorted.windows(2) {
        let gap = pair[1].x - pair[0].x;
        if gap < spacing * 0.5 {
            findings.error(
                Issue::new(
                    IssueKind::CheckpointSpacing,
                    Severity::Medium,
                    format!(
                        "checkpoints {:.0} apart, closer than half the target spacing {:.0}",
                        gap, spacing
                    ),
                )
                .at(pair[1].x, pair[1].y)
                .for_entity(pair[1].id),
            );
        } else if gap > spacing * 2.0 {
            findings.warning(
                Issue::new(
                    IssueKind::CheckpointSpacing,
                    Severity::Medium,
                    format!(
                        "checkpoints {:.0} apart, more than twice the target spacing {:.0}",
                        gap, spacing
                    ),
                )
                .at(pair[1].x, pair[1].y)
                .for_entity(pair[1].id),
            );
        }
    }
}

/// Sections must not overlap and must respect the transition buffer.
pub(super) fn check_sections(rules: &RuleSet, sections: &[Section], findings: &mut Findings) {
    let buffer = rules.sections.transitions.buffer;
    for (i, pair) in sections.windows(2).enumerate() {
        if pair[1].start < pair[0].end + buffer {
            findings.error(
                Issue::new(
                    IssueKind::SectionOverlap,
                    Severity::High,
                    format!(
                        "{} section at {:.0} starts inside the transition buffer of the previous section",
                        pair[1].kind, pair[1].start
                    ),
                )
                .in_section(i + 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{EnemyKind, EnemyState, PlatformKind, RingKind};
    use crate::validate::LevelValidator;

    fn fixed_platform(id: u32, x: f64, y: f64, width: f64) -> Platform {
        Platform {
            id,
            x,
            y,
            width,
            height: 20.0,
            kind: PlatformKind::Static,
        }
    }

    fn ring(id: u32, x: f64, y: f64) -> Ring {
        Ring {
            id,
            x,
            y,
            collected: false,
            kind: RingKind::Normal,
        }
    }

    fn basic_enemy(id: u32, x: f64, y: f64) -> Enemy {
        Enemy {
            id,
            x,
            y,
            health: 1,
            max_health: 1,
            speed: 100.0,
            damage: 1,
            points: 100,
            detection_range: 200.0,
            state: EnemyState::Patrol,
            direction: 1,
            kind: EnemyKind::Basic,
        }
    }

    fn vertical_pad(id: u32, x: f64, force: f64) -> JumpPad {
        JumpPad {
            id,
            kind: JumpPadType::Vertical,
            x,
            y: 300.0,
            width: 60.0,
            height: 20.0,
            force,
            force_x: 0.0,
            force_y: force,
            cooldown: 100,
            active: true,
        }
    }

    fn empty_level() -> crate::level::LevelData {
        crate::level::LevelData {
            number: 1,
            length: 3000.0,
            difficulty: crate::level::Difficulty::Easy,
            sections: vec![],
            checkpoints: vec![],
            platforms: vec![],
            enemies: vec![],
            rings: vec![],
            jump_pads: vec![],
        }
    }

    #[test]
    fn test_close_rings_flagged() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 30 apart, below the 50 minimum.
        let rings = vec![ring(1, 500.0, 200.0), ring(2, 530.0, 200.0)];
        check_rings(&rules, &rings, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].kind, IssueKind::RingSpacing);
        assert_eq!(findings.errors[0].severity, Severity::Medium);
    }

    #[test]
    fn test_low_ring_flagged_high() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 20 above ground, below the 50 minimum.
        let rings = vec![ring(1, 500.0, 300.0)];
        check_rings(&rules, &rings, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].kind, IssueKind::RingHeight);
        assert_eq!(findings.errors[0].severity, Severity::High);
    }

    #[test]
    fn test_high_ring_is_only_a_warning() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 220 above ground, over the 200 maximum.
        let rings = vec![ring(1, 500.0, 100.0)];
        check_rings(&rules, &rings, &mut findings);
        assert!(findings.errors.is_empty());
        assert_eq!(findings.warnings.len(), 1);
        assert_eq!(findings.warnings[0].kind, IssueKind::RingHeight);
    }

    #[test]
    fn test_pad_force_out_of_range() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let pads = vec![vertical_pad(1, 500.0, 50.0)];
        check_jump_pads(&rules, &pads, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].kind, IssueKind::JumpPadForce);
        assert_eq!(findings.errors[0].entity, Some(1));
    }

    #[test]
    fn test_pad_spacing_and_sequence() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // Four pads 150 apart: every pair under 200 is a spacing error and
        // the chain of four exceeds the maximum of three.
        let pads = vec![
            vertical_pad(1, 400.0, 20.0),
            vertical_pad(2, 550.0, 20.0),
            vertical_pad(3, 700.0, 20.0),
            vertical_pad(4, 850.0, 20.0),
        ];
        check_jump_pads(&rules, &pads, &mut findings);
        assert!(
            findings
                .errors
                .iter()
                .any(|i| i.kind == IssueKind::JumpPadSpacing)
        );
        assert!(
            findings
                .warnings
                .iter()
                .any(|i| i.kind == IssueKind::JumpPadSequence)
        );
    }

    #[test]
    fn test_platform_gap_measures_both_axes() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // Horizontally overlapping but 260 apart vertically: the jump
        // still has to cover 260, over the 250 maximum.
        let platforms = vec![
            fixed_platform(1, 500.0, 280.0, 120.0),
            fixed_platform(2, 520.0, 20.0, 120.0),
        ];
        check_platforms(&rules, &platforms, &mut findings);
        let gaps = findings
            .errors
            .iter()
            .filter(|i| i.kind == IssueKind::PlatformGap)
            .count();
        assert_eq!(gaps, 2);
    }

    #[test]
    fn test_jumpable_platform_gap_passes() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 80 horizontal, 40 vertical: well under the 250 maximum.
        let platforms = vec![
            fixed_platform(1, 500.0, 240.0, 120.0),
            fixed_platform(2, 700.0, 200.0, 120.0),
        ];
        check_platforms(&rules, &platforms, &mut findings);
        assert!(
            !findings
                .errors
                .iter()
                .any(|i| i.kind == IssueKind::PlatformGap)
        );
    }

    #[test]
    fn test_enemy_density_cap() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        // 13 enemies in the 1000-2000 bucket, spaced to avoid spacing noise.
        let enemies: Vec<Enemy> = (0..13)
            .map(|i| basic_enemy(i, 1000.0 + i as f64 * 75.0, 290.0))
            .collect();
        check_enemies(&rules, &enemies, &mut findings);
        let density: Vec<_> = findings
            .errors
            .iter()
            .filter(|i| i.kind == IssueKind::EnemyDensity)
            .collect();
        assert_eq!(density.len(), 1);
        assert_eq!(density[0].section, Some(1));
    }

    #[test]
    fn test_zero_health_enemy() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let mut enemy = basic_enemy(1, 1000.0, 290.0);
        enemy.health = 0;
        check_enemies(&rules, &[enemy], &mut findings);
        assert!(
            findings
                .errors
                .iter()
                .any(|i| i.kind == IssueKind::EnemyHealth)
        );
    }

    #[test]
    fn test_checkpoint_spacing_bounds() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let checkpoints = vec![
            Checkpoint::new(1, 1500.0, 240.0),
            Checkpoint::new(2, 1900.0, 240.0), // 400 apart, under 750
            Checkpoint::new(3, 5500.0, 240.0), // 3600 apart, over 3000
        ];
        check_checkpoints(&rules, &checkpoints, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.warnings.len(), 1);
        assert!(
            findings
                .errors
                .iter()
                .chain(findings.warnings.iter())
                .all(|i| i.kind == IssueKind::CheckpointSpacing)
        );
    }

    #[test]
    fn test_section_overlap() {
        let rules = RuleSet::default();
        let mut findings = Findings::default();
        let profile = rules.sections.types.speed.clone();
        let sections = vec![
            Section {
                kind: crate::level::SectionType::Speed,
                start: 200.0,
                end: 800.0,
                profile: profile.clone(),
            },
            Section {
                kind: crate::level::SectionType::Combat,
                start: 820.0, // inside the 50 unit buffer
                end: 1200.0,
                profile,
            },
        ];
        check_sections(&rules, &sections, &mut findings);
        assert_eq!(findings.errors.len(), 1);
        assert_eq!(findings.errors[0].kind, IssueKind::SectionOverlap);
    }

    #[test]
    fn test_validator_empty_level_passes() {
        let rules = RuleSet::default();
        let level = empty_level();
        let report = LevelValidator::new(&rules).validate(&level);
        assert!(report.is_valid);
        assert!(report.summary.can_proceed);
    }
}
