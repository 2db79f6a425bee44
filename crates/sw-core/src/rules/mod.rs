//! Level design rules and configuration.
//!
//! The rule set is pure data: every placer and the validator read it, none
//! mutate it. It is loaded once (or defaulted) and passed by reference into
//! every component, so tests can run against minimal fixture configs.
//!
//! The JSON representation uses camelCase keys so existing rules files keep
//! working unchanged.

mod defaults;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::EnemyType;
use crate::rng::LevelRng;

/// Version stamp recorded in generation metadata.
pub const RULES_VERSION: &str = "1.0.0";

/// Errors raised while loading a rules file.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("could not read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse rules file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An inclusive numeric range with `min`/`max` leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample from the range.
    pub fn sample(&self, rng: &mut LevelRng) -> f64 {
        rng.uniform(self.min, self.max)
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Whether the value lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Root of the rule tree, partitioned by subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub rings: RingRules,
    pub jump_pads: JumpPadRules,
    pub platforms: PlatformRules,
    pub enemies: EnemyRules,
    pub sections: SectionRules,
    pub progression: ProgressionRules,
    pub checkpoints: CheckpointRules,
    pub constants: WorldConstants,
}

impl RuleSet {
    /// Parse a rule set from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a rule set from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

// ---------------------------------------------------------------------------
// Rings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingRules {
    pub patterns: RingPatternRules,
    pub placement: RingPlacementRules,
    pub special: SpecialRingRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingPatternRules {
    pub line: LinePatternRules,
    pub arc: ArcPatternRules,
    pub circle: CirclePatternRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePatternRules {
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub min_count: u32,
    pub max_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcPatternRules {
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_count: u32,
    pub max_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CirclePatternRules {
    pub min_radius: f64,
    pub max_radius: f64,
    pub ring_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingPlacementRules {
    pub min_height: f64,
    pub max_height: f64,
    pub min_distance_from_hazard: f64,
    pub reward_value: u32,
    pub protection_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRingRules {
    pub super_ring: SuperRingRules,
    pub magnet_ring: MagnetRingRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperRingRules {
    pub value: u32,
    pub spawn_chance: f64,
    pub glow_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnetRingRules {
    pub value: u32,
    pub magnet_radius: f64,
    pub spawn_chance: f64,
}

// ---------------------------------------------------------------------------
// Jump pads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpPadRules {
    pub types: JumpPadTypeRules,
    pub placement: JumpPadPlacementRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpPadTypeRules {
    pub vertical: VerticalPadRules,
    pub diagonal: DiagonalPadRules,
    pub horizontal: HorizontalPadRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalPadRules {
    pub min_force: f64,
    pub max_force: f64,
    pub width: f64,
    pub height: f64,
    pub cooldown: u32,
}

impl VerticalPadRules {
    pub fn force(&self) -> Span {
        Span::new(self.min_force, self.max_force)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagonalPadRules {
    pub min_force_x: f64,
    pub max_force_x: f64,
    pub min_force_y: f64,
    pub max_force_y: f64,
    pub angle: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "defaults::pad_cooldown")]
    pub cooldown: u32,
}

impl DiagonalPadRules {
    pub fn force_x(&self) -> Span {
        Span::new(self.min_force_x, self.max_force_x)
    }

    pub fn force_y(&self) -> Span {
        Span::new(self.min_force_y, self.max_force_y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPadRules {
    pub min_force: f64,
    pub max_force: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "defaults::pad_cooldown")]
    pub cooldown: u32,
}

impl HorizontalPadRules {
    pub fn force(&self) -> Span {
        Span::new(self.min_force, self.max_force)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpPadPlacementRules {
    pub min_spacing: f64,
    pub max_consecutive: u32,
    pub sequence_spacing: f64,
    pub height_variation: f64,
    pub near_platform_offset: f64,
}

// ---------------------------------------------------------------------------
// Platforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRules {
    pub types: PlatformTypeRules,
    pub placement: PlatformPlacementRules,
    pub difficulty: PlatformDifficultyRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTypeRules {
    #[serde(rename = "static")]
    pub fixed: StaticPlatformRules,
    pub moving: MovingPlatformRules,
    pub crumbling: CrumblingPlatformRules,
    pub rotating: RotatingPlatformRules,
}

impl PlatformTypeRules {
    /// Width range for a platform kind.
    pub fn width(&self, kind: crate::level::PlatformType) -> Span {
        use crate::level::PlatformType;
        match kind {
            PlatformType::Static => Span::new(self.fixed.min_width, self.fixed.max_width),
            PlatformType::Moving => Span::new(self.moving.min_width, self.moving.max_width),
            PlatformType::Crumbling => {
                Span::new(self.crumbling.min_width, self.crumbling.max_width)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPlatformRules {
    pub min_width: f64,
    pub max_width: f64,
    pub height: f64,
    pub friction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingPlatformRules {
    pub min_width: f64,
    pub max_width: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_path: f64,
    pub max_path: f64,
    pub pause_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrumblingPlatformRules {
    pub min_width: f64,
    pub max_width: f64,
    pub stability: u32,
    pub respawn_time: u32,
    pub warning_time: u32,
    pub particle_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatingPlatformRules {
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub platform_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPlacementRules {
    pub min_gap: f64,
    pub max_gap: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub vertical_spacing: f64,
    pub safety_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDifficultyRules {
    pub easy: DifficultyMods,
    pub medium: DifficultyMods,
    pub hard: DifficultyMods,
}

impl PlatformDifficultyRules {
    pub fn mods(&self, difficulty: crate::level::Difficulty) -> &DifficultyMods {
        use crate::level::Difficulty;
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyMods {
    pub gap_multiplier: f64,
    pub width_multiplier: f64,
    pub speed_multiplier: f64,
}

// ---------------------------------------------------------------------------
// Enemies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyRules {
    pub types: EnemyTypeRules,
    pub placement: EnemyPlacementRules,
    pub behavior: EnemyBehaviorRules,
    pub drops: EnemyDropRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTypeRules {
    pub basic: BasicEnemyRules,
    pub flying: FlyingEnemyRules,
    pub shielded: ShieldedEnemyRules,
    pub projectile: ProjectileEnemyRules,
}

/// Stats shared by every enemy type, extracted for the placer.
#[derive(Debug, Clone, Copy)]
pub struct EnemyBaseStats {
    pub health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
}

impl EnemyTypeRules {
    pub fn base_stats(&self, kind: EnemyType) -> EnemyBaseStats {
        match kind {
            EnemyType::Basic => EnemyBaseStats {
                health: self.basic.health,
                speed: self.basic.speed,
                damage: self.basic.damage,
                points: self.basic.points,
                detection_range: self.basic.detection_range,
            },
            EnemyType::Flying => EnemyBaseStats {
                health: self.flying.health,
                speed: self.flying.speed,
                damage: self.flying.damage,
                points: self.flying.points,
                detection_range: self.flying.detection_range,
            },
            EnemyType::Shielded => EnemyBaseStats {
                health: self.shielded.health,
                speed: self.shielded.speed,
                damage: self.shielded.damage,
                points: self.shielded.points,
                detection_range: self.shielded.detection_range,
            },
            EnemyType::Projectile => EnemyBaseStats {
                health: self.projectile.health,
                speed: self.projectile.speed,
                damage: self.projectile.damage,
                points: self.projectile.points,
                detection_range: self.projectile.detection_range,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicEnemyRules {
    pub health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
    pub attack_range: f64,
    pub respawn_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyingEnemyRules {
    pub health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
    pub hover_height: f64,
    pub dive_speed: f64,
    pub patrol_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldedEnemyRules {
    pub health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
    pub shield_regen_time: u32,
    pub vulnerable_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileEnemyRules {
    pub health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
    pub fire_rate: u32,
    pub projectile_speed: f64,
    pub projectile_damage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyPlacementRules {
    pub min_spacing: f64,
    pub max_per_section: usize,
    pub difficulty_scaling: f64,
    pub safe_zone_radius: f64,
    pub spawn_protection_radius: f64,
    pub grouping: GroupingRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRules {
    pub max_group_size: u32,
    pub group_spacing: f64,
    pub group_types: Vec<GroupComposition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupComposition {
    Same,
    Mixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyBehaviorRules {
    pub patrol: PatrolRules,
    pub chase: ChaseRules,
    pub attack: AttackRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatrolRules {
    pub path_length: f64,
    pub pause_duration: u32,
    pub turn_speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseRules {
    pub max_distance: f64,
    pub acceleration: f64,
    pub give_up_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRules {
    pub telegraph_time: u32,
    pub cooldown: u32,
    pub knockback: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyDropRules {
    pub ring: RingDropRules,
    pub powerup: PowerupDropRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingDropRules {
    pub chance: f64,
    pub min_amount: u32,
    pub max_amount: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerupDropRules {
    pub chance: f64,
    pub types: Vec<PowerupKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    Speed,
    Shield,
    Invincibility,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRules {
    pub types: SectionTypeRules,
    pub transitions: TransitionRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTypeRules {
    #[serde(rename = "speedSection")]
    pub speed: SectionProfile,
    #[serde(rename = "platformSection")]
    pub platform: SectionProfile,
    #[serde(rename = "combatSection")]
    pub combat: SectionProfile,
    #[serde(rename = "bonusSection")]
    pub bonus: SectionProfile,
}

impl SectionTypeRules {
    pub fn profile(&self, kind: crate::level::SectionType) -> &SectionProfile {
        use crate::level::SectionType;
        match kind {
            SectionType::Speed => &self.speed,
            SectionType::Platform => &self.platform,
            SectionType::Combat => &self.combat,
            SectionType::Bonus => &self.bonus,
        }
    }
}

/// Per-section-type density profile. Sections carry a copy of the profile
/// they were planned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProfile {
    pub length: f64,
    pub ring_density: f64,
    pub enemy_density: f64,
    pub platform_density: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_pad_density: Option<f64>,
    #[serde(default)]
    pub cover_elements: bool,
    #[serde(default)]
    pub special_rings: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRules {
    pub buffer: f64,
    pub warning_distance: f64,
    pub smoothing: bool,
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRules {
    pub levels: BTreeMap<u32, LevelProgression>,
    pub scaling: ScalingRules,
}

impl ProgressionRules {
    /// Progression entry for a level, clamping past the last configured one.
    pub fn for_level(&self, level: u32) -> &LevelProgression {
        self.levels
            .get(&level)
            .or_else(|| self.levels.last_key_value().map(|(_, v)| v))
            .expect("progression table must not be empty")
    }

    /// Enemy types unlocked at a level: the cumulative union of every
    /// `newEnemyTypes` list up to and including it. Falls back to basic
    /// when nothing is unlocked.
    pub fn unlocked_enemy_types(&self, level: u32) -> Vec<EnemyType> {
        let mut unlocked = Vec::new();
        for (_, entry) in self.levels.range(..=level) {
            for &kind in &entry.new_enemy_types {
                if !unlocked.contains(&kind) {
                    unlocked.push(kind);
                }
            }
        }
        if unlocked.is_empty() {
            unlocked.push(EnemyType::Basic);
        }
        unlocked
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgression {
    pub multiplier: f64,
    pub new_enemy_types: Vec<EnemyType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingRules {
    pub enemy_health: f64,
    pub enemy_speed: f64,
    pub enemy_damage: f64,
    pub platform_gaps: f64,
    pub ring_value: f64,
}

// ---------------------------------------------------------------------------
// Checkpoints and world constants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointRules {
    pub spacing: f64,
    pub activation_radius: f64,
    pub respawn_offset: f64,
    pub heal_amount: u32,
    pub invincibility_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConstants {
    pub ground_height: f64,
    pub min_platform_height: f64,
    pub max_platform_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers_cover_every_type() {
        use strum::IntoEnumIterator;

        use crate::level::{EnemyType, PlatformType, SectionType};

        let rules = RuleSet::default();
        for kind in SectionType::iter() {
            assert!(rules.sections.types.profile(kind).length > 0.0);
        }
        for kind in PlatformType::iter() {
            let width = rules.platforms.types.width(kind);
            assert!(width.min <= width.max);
        }
        for kind in EnemyType::iter() {
            assert!(rules.enemies.types.base_stats(kind).health >= 1);
        }
    }

    #[test]
    fn test_default_roundtrip() {
        let rules = RuleSet::default();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed = RuleSet::from_json(&json).unwrap();
        assert_eq!(
            parsed.enemies.placement.min_spacing,
            rules.enemies.placement.min_spacing
        );
        assert_eq!(parsed.sections.types.speed.length, 600.0);
    }

    #[test]
    fn test_progression_clamps_to_last_level() {
        let rules = RuleSet::default();
        assert_eq!(rules.progression.for_level(10).multiplier, 3.5);
        assert_eq!(rules.progression.for_level(99).multiplier, 3.5);
    }

    #[test]
    fn test_unlocked_enemy_types_accumulate() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.progression.unlocked_enemy_types(1),
            vec![EnemyType::Basic]
        );
        assert_eq!(
            rules.progression.unlocked_enemy_types(2),
            vec![EnemyType::Basic, EnemyType::Flying]
        );
        // Level 3 adds nothing new.
        assert_eq!(
            rules.progression.unlocked_enemy_types(3),
            vec![EnemyType::Basic, EnemyType::Flying]
        );
        assert_eq!(rules.progression.unlocked_enemy_types(5).len(), 4);
    }

    #[test]
    fn test_span_clamp_and_contains() {
        let span = Span::new(15.0, 30.0);
        assert_eq!(span.clamp(40.0), 30.0);
        assert_eq!(span.clamp(3.0), 15.0);
        assert!(span.contains(15.0));
        assert!(span.contains(30.0));
        assert!(!span.contains(30.1));
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_string(&RuleSet::default()).unwrap();
        assert!(json.contains("\"jumpPads\""));
        assert!(json.contains("\"speedSection\""));
        assert!(json.contains("\"spawnProtectionRadius\""));
        assert!(json.contains("\"static\""));
    }
}
