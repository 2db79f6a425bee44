//! Built-in rule values, used when no rules file is supplied.

use std::collections::BTreeMap;

use super::*;
use crate::level::EnemyType;

pub(super) fn pad_cooldown() -> u32 {
    100
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rings: RingRules::default(),
            jump_pads: JumpPadRules::default(),
            platforms: PlatformRules::default(),
            enemies: EnemyRules::default(),
            sections: SectionRules::default(),
            progression: ProgressionRules::default(),
            checkpoints: CheckpointRules::default(),
            constants: WorldConstants::default(),
        }
    }
}

impl Default for RingRules {
    fn default() -> Self {
        Self {
            patterns: RingPatternRules {
                line: LinePatternRules {
                    min_spacing: 50.0,
                    max_spacing: 80.0,
                    min_count: 3,
                    max_count: 6,
                },
                arc: ArcPatternRules {
                    min_radius: 60.0,
                    max_radius: 120.0,
                    min_count: 3,
                    max_count: 8,
                },
                circle: CirclePatternRules {
                    min_radius: 50.0,
                    max_radius: 80.0,
                    ring_count: 6,
                },
            },
            placement: RingPlacementRules {
                min_height: 50.0,
                max_height: 200.0,
                min_distance_from_hazard: 100.0,
                reward_value: 1,
                protection_duration: 1000,
            },
            special: SpecialRingRules {
                super_ring: SuperRingRules {
                    value: 10,
                    spawn_chance: 0.05,
                    glow_radius: 30.0,
                },
                magnet_ring: MagnetRingRules {
                    value: 5,
                    magnet_radius: 150.0,
                    spawn_chance: 0.03,
                },
            },
        }
    }
}

impl Default for JumpPadRules {
    fn default() -> Self {
        Self {
            types: JumpPadTypeRules {
                vertical: VerticalPadRules {
                    min_force: 15.0,
                    max_force: 30.0,
                    width: 60.0,
                    height: 20.0,
                    cooldown: 100,
                },
                diagonal: DiagonalPadRules {
                    min_force_x: 10.0,
                    max_force_x: 20.0,
                    min_force_y: 10.0,
                    max_force_y: 25.0,
                    angle: 45.0,
                    width: 80.0,
                    height: 30.0,
                    cooldown: 100,
                },
                horizontal: HorizontalPadRules {
                    min_force: 15.0,
                    max_force: 35.0,
                    width: 100.0,
                    height: 20.0,
                    cooldown: 100,
                },
            },
            placement: JumpPadPlacementRules {
                min_spacing: 200.0,
                max_consecutive: 3,
                sequence_spacing: 150.0,
                height_variation: 100.0,
                near_platform_offset: 10.0,
            },
        }
    }
}

impl Default for PlatformRules {
    fn default() -> Self {
        Self {
            types: PlatformTypeRules {
                fixed: StaticPlatformRules {
                    min_width: 100.0,
                    max_width: 400.0,
                    height: 20.0,
                    friction: 0.8,
                },
                moving: MovingPlatformRules {
                    min_width: 120.0,
                    max_width: 200.0,
                    min_speed: 50.0,
                    max_speed: 150.0,
                    min_path: 100.0,
                    max_path: 500.0,
                    pause_duration: 1000,
                },
                crumbling: CrumblingPlatformRules {
                    min_width: 80.0,
                    max_width: 150.0,
                    stability: 1000,
                    respawn_time: 5000,
                    warning_time: 300,
                    particle_count: 20,
                },
                rotating: RotatingPlatformRules {
                    min_radius: 100.0,
                    max_radius: 200.0,
                    min_speed: 0.5,
                    max_speed: 2.0,
                    platform_count: 4,
                },
            },
            placement: PlatformPlacementRules {
                min_gap: 80.0,
                max_gap: 250.0,
                min_height: 50.0,
                max_height: 400.0,
                vertical_spacing: 80.0,
                safety_margin: 30.0,
            },
            difficulty: PlatformDifficultyRules {
                easy: DifficultyMods {
                    gap_multiplier: 0.8,
                    width_multiplier: 1.2,
                    speed_multiplier: 0.7,
                },
                medium: DifficultyMods {
                    gap_multiplier: 1.0,
                    width_multiplier: 1.0,
                    speed_multiplier: 1.0,
                },
                hard: DifficultyMods {
                    gap_multiplier: 1.3,
                    width_multiplier: 0.8,
                    speed_multiplier: 1.4,
                },
            },
        }
    }
}

impl Default for EnemyRules {
    fn default() -> Self {
        Self {
            types: EnemyTypeRules {
                basic: BasicEnemyRules {
                    health: 1,
                    speed: 100.0,
                    damage: 1,
                    points: 100,
                    detection_range: 200.0,
                    attack_range: 50.0,
                    respawn_time: 0,
                },
                flying: FlyingEnemyRules {
                    health: 1,
                    speed: 120.0,
                    damage: 1,
                    points: 150,
                    detection_range: 250.0,
                    hover_height: 150.0,
                    dive_speed: 300.0,
                    patrol_radius: 200.0,
                },
                shielded: ShieldedEnemyRules {
                    health: 3,
                    speed: 80.0,
                    damage: 2,
                    points: 300,
                    detection_range: 150.0,
                    shield_regen_time: 3000,
                    vulnerable_time: 2000,
                },
                projectile: ProjectileEnemyRules {
                    health: 2,
                    speed: 50.0,
                    damage: 1,
                    points: 200,
                    detection_range: 300.0,
                    fire_rate: 2000,
                    projectile_speed: 200.0,
                    projectile_damage: 1,
                },
            },
            placement: EnemyPlacementRules {
                min_spacing: 150.0,
                max_per_section: 12,
                difficulty_scaling: 1.2,
                safe_zone_radius: 300.0,
                spawn_protection_radius: 800.0,
                grouping: GroupingRules {
                    max_group_size: 5,
                    group_spacing: 80.0,
                    group_types: vec![GroupComposition::Same, GroupComposition::Mixed],
                },
            },
            behavior: EnemyBehaviorRules {
                patrol: PatrolRules {
                    path_length: 200.0,
                    pause_duration: 500,
                    turn_speed: 2.0,
                },
                chase: ChaseRules {
                    max_distance: 400.0,
                    acceleration: 500.0,
                    give_up_time: 3000,
                },
                attack: AttackRules {
                    telegraph_time: 500,
                    cooldown: 1500,
                    knockback: 200.0,
                },
            },
            drops: EnemyDropRules {
                ring: RingDropRules {
                    chance: 0.3,
                    min_amount: 1,
                    max_amount: 5,
                },
                powerup: PowerupDropRules {
                    chance: 0.1,
                    types: vec![
                        PowerupKind::Speed,
                        PowerupKind::Shield,
                        PowerupKind::Invincibility,
                    ],
                },
            },
        }
    }
}

impl Default for SectionRules {
    fn default() -> Self {
        Self {
            types: SectionTypeRules {
                speed: SectionProfile {
                    length: 600.0,
                    ring_density: 0.5,
                    enemy_density: 0.6,
                    platform_density: 0.4,
                    jump_pad_density: None,
                    cover_elements: false,
                    special_rings: false,
                },
                platform: SectionProfile {
                    length: 500.0,
                    ring_density: 0.6,
                    enemy_density: 0.8,
                    platform_density: 0.8,
                    jump_pad_density: Some(0.8),
                    cover_elements: false,
                    special_rings: false,
                },
                combat: SectionProfile {
                    length: 400.0,
                    ring_density: 0.3,
                    enemy_density: 1.5,
                    platform_density: 0.5,
                    jump_pad_density: None,
                    cover_elements: true,
                    special_rings: false,
                },
                bonus: SectionProfile {
                    length: 300.0,
                    ring_density: 0.8,
                    enemy_density: 0.2,
                    platform_density: 0.6,
                    jump_pad_density: None,
                    cover_elements: false,
                    special_rings: true,
                },
            },
            transitions: TransitionRules {
                buffer: 50.0,
                warning_distance: 100.0,
                smoothing: true,
            },
        }
    }
}

impl Default for ProgressionRules {
    fn default() -> Self {
        let multipliers = [1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 2.3, 2.6, 3.0, 3.5];
        let mut levels = BTreeMap::new();
        for (i, &multiplier) in multipliers.iter().enumerate() {
            let level = i as u32 + 1;
            let new_enemy_types = match level {
                1 => vec![EnemyType::Basic],
                2 => vec![EnemyType::Flying],
                4 => vec![EnemyType::Projectile],
                5 => vec![EnemyType::Shielded],
                _ => vec![],
            };
            levels.insert(
                level,
                LevelProgression {
                    multiplier,
                    new_enemy_types,
                },
            );
        }
        Self {
            levels,
            scaling: ScalingRules {
                enemy_health: 1.2,
                enemy_speed: 1.1,
                enemy_damage: 1.15,
                platform_gaps: 1.1,
                ring_value: 1.0,
            },
        }
    }
}

impl Default for CheckpointRules {
    fn default() -> Self {
        Self {
            spacing: 1500.0,
            activation_radius: 100.0,
            respawn_offset: 50.0,
            heal_amount: 0,
            invincibility_time: 2000,
        }
    }
}

impl Default for WorldConstants {
    fn default() -> Self {
        Self {
            ground_height: 320.0,
            min_platform_height: 50.0,
            max_platform_height: 250.0,
        }
    }
}
