//! sw-core: level generation pipeline for the sidewinder platformer.
//!
//! This crate contains the whole pipeline with no I/O dependencies: rule
//! configuration, section planning, entity placement, validation, and
//! repair. It is pure and deterministic given a seed, so levels can be
//! regenerated bit-for-bit.

pub mod consts;
pub mod generator;
pub mod geom;
pub mod level;
pub mod repair;
pub mod rng;
pub mod rules;
pub mod validate;

pub use generator::{
    GenerateError, GeneratedLevel, GenerationMetadata, GenerationStats, GeneratorOptions,
    LevelGenerator,
};
pub use level::{Difficulty, LevelData};
pub use rules::{RuleSet, RulesError};
pub use validate::{LevelValidator, ValidationReport};
