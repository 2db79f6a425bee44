//! Level generation pipeline.
//!
//! [`LevelGenerator`] runs the stages in order: plan sections, place
//! checkpoints, platforms, enemies, rings, and jump pads, then validate
//! and repair. Each stage only sees what earlier stages produced, so the
//! dependency order is fixed: enemies need checkpoints (safe zones) and
//! platforms (standing surfaces), rings need enemies (hazard distance),
//! jump pads need platforms (gap bridging).

mod checkpoints;
mod enemies;
mod jumppads;
mod platforms;
mod rings;
mod sections;

pub use enemies::position_allowed;
pub use jumppads::{PlatformGap, analyze_gaps, required_force};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{
    CHECKPOINT_HEIGHT, DEFAULT_LEVEL_LENGTH, GOAL_OFFSET, MAX_REPAIR_PASSES,
};
use crate::level::{Checkpoint, Difficulty, LevelData};
use crate::repair;
use crate::rng::LevelRng;
use crate::rules::{RULES_VERSION, RuleSet};
use crate::validate::LevelValidator;

/// Errors raised by level generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Critical validation errors survived every repair pass.
    #[error("{residual} critical validation errors remain after {passes} repair passes")]
    Unrepairable { residual: usize, passes: u32 },
}

/// Caller-tunable knobs for a single generation run.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    pub length: f64,
    /// Fixed seed for reproducible output; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LEVEL_LENGTH,
            seed: None,
        }
    }
}

/// Counters collected while generating, for tests and tuning.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub rejected_platforms: usize,
    pub rejected_enemies: usize,
    pub rejected_rings: usize,
    pub rejected_jump_pads: usize,
    pub repair_passes: u32,
    pub repairs_applied: usize,
}

/// Provenance of a generated level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub rules_version: String,
    pub stats: GenerationStats,
}

/// A level together with its final validation report and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLevel {
    pub level: LevelData,
    pub validation: crate::validate::ValidationReport,
    pub metadata: GenerationMetadata,
}

/// Hands out stable, unique entity ids within one generation run.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Builds complete levels from a rule set.
pub struct LevelGenerator {
    rules: RuleSet,
}

impl LevelGenerator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Generate one level. Fails only when critical validation errors
    /// survive the repair loop.
    pub fn generate(
        &self,
        level: u32,
        options: GeneratorOptions,
    ) -> Result<GeneratedLevel, GenerateError> {
        let mut rng = match options.seed {
            Some(seed) => LevelRng::new(seed),
            None => LevelRng::from_entropy(),
        };
        let seed = rng.seed();
        let length = options.length;
        let difficulty = Difficulty::for_level(level);
        let mut ids = IdAllocator::default();
        let mut stats = GenerationStats::default();

        info!(level, seed, length, %difficulty, "generating level");

        let sections = sections::plan_sections(&self.rules, &mut rng, length);
        debug!(count = sections.len(), "planned sections");

        let mut checkpoints = checkpoints::plan_checkpoints(&self.rules, &mut ids, length);
        checkpoints.push(Checkpoint::goal(
            ids.next_id(),
            length - GOAL_OFFSET,
            self.rules.constants.ground_height - CHECKPOINT_HEIGHT,
        ));

        let mut platforms = Vec::new();
        for section in &sections {
            stats.rejected_platforms += platforms::place_platforms(
                &self.rules,
                &mut rng,
                &mut ids,
                section,
                difficulty,
                &mut platforms,
            );
        }
        debug!(
            count = platforms.len(),
            rejected = stats.rejected_platforms,
            "placed platforms"
        );

        let mut enemies = Vec::new();
        for section in &sections {
            stats.rejected_enemies += enemies::place_enemies(
                &self.rules,
                &mut rng,
                &mut ids,
                section,
                level,
                &platforms,
                &checkpoints,
                &mut enemies,
            );
        }
        debug!(
            count = enemies.len(),
            rejected = stats.rejected_enemies,
            "placed enemies"
        );

        let mut level_rings = Vec::new();
        for section in &sections {
            stats.rejected_rings += rings::place_rings(
                &self.rules,
                &mut rng,
                &mut ids,
                section,
                &platforms,
                &enemies,
                &mut level_rings,
            );
        }
        debug!(
            count = level_rings.len(),
            rejected = stats.rejected_rings,
            "placed rings"
        );

        let (jump_pads, rejected_pads) =
            jumppads::place_jump_pads(&self.rules, &mut rng, &mut ids, &sections, &platforms);
        stats.rejected_jump_pads = rejected_pads;
        debug!(
            count = jump_pads.len(),
            rejected = rejected_pads,
            "placed jump pads"
        );

        let mut data = LevelData {
            number: level,
            length,
            difficulty,
            sections,
            checkpoints,
            platforms,
            enemies,
            rings: level_rings,
            jump_pads,
        };

        let validator = LevelValidator::new(&self.rules);
        let mut report = validator.validate(&data);

        // Repair and re-validate until the level is clean, nothing more can
        // be fixed, or the pass budget runs out.
        while !report.errors.is_empty() && stats.repair_passes < MAX_REPAIR_PASSES {
            let applied = repair::apply_fixes(&mut data, &report, &self.rules, &mut ids);
            stats.repair_passes += 1;
            stats.repairs_applied += applied;
            debug!(pass = stats.repair_passes, applied, "repair pass");
            if applied == 0 {
                break;
            }
            report = validator.validate(&data);
        }

        if report.summary.critical_errors > 0 {
            warn!(
                residual = report.summary.critical_errors,
                "level is unplayable after repair"
            );
            return Err(GenerateError::Unrepairable {
                residual: report.summary.critical_errors,
                passes: stats.repair_passes,
            });
        }

        info!(
            errors = report.summary.total_errors,
            warnings = report.summary.total_warnings,
            repair_passes = stats.repair_passes,
            "level ready"
        );

        Ok(GeneratedLevel {
            level: data,
            validation: report,
            metadata: GenerationMetadata {
                generated_at: Utc::now(),
                seed,
                rules_version: RULES_VERSION.to_string(),
                stats,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_is_sequential() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.next_id(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let generator = LevelGenerator::new(RuleSet::default());
        let options = GeneratorOptions {
            length: 3000.0,
            seed: Some(1234),
        };
        let a = generator.generate(1, options).unwrap();
        let b = generator.generate(1, options).unwrap();
        assert_eq!(
            serde_json::to_string(&a.level).unwrap(),
            serde_json::to_string(&b.level).unwrap()
        );
    }

    #[test]
    fn test_generated_level_shape() {
        let generator = LevelGenerator::new(RuleSet::default());
        let options = GeneratorOptions {
            length: 3000.0,
            seed: Some(7),
        };
        let generated = generator.generate(1, options).unwrap();
        let level = &generated.level;

        assert_eq!(level.number, 1);
        assert_eq!(level.difficulty, Difficulty::Easy);
        assert!(!level.sections.is_empty());
        assert!(level.goal().is_some());
        assert_eq!(level.goal().unwrap().x, 3000.0 - GOAL_OFFSET);
        assert!(generated.validation.summary.can_proceed);
        assert_eq!(generated.metadata.seed, 7);
        assert_eq!(generated.metadata.rules_version, RULES_VERSION);
    }
}
