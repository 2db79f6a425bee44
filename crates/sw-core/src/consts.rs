//! World constants shared by the generation pipeline.
//!
//! These are fixed properties of the game world, not designer tunables;
//! everything a designer is expected to adjust lives in [`crate::rules`].

/// Player spawn x position. Enemy spawn protection is measured from here.
pub const PLAYER_SPAWN_X: f64 = 100.0;

/// Level length used when the caller does not request one.
pub const DEFAULT_LEVEL_LENGTH: f64 = 10_000.0;

/// First section starts after the spawn area.
pub const SECTION_START_X: f64 = 200.0;

/// Last stretch of the level reserved for the goal. No sections,
/// checkpoints, or section-driven placements intrude into it.
pub const END_BUFFER: f64 = 400.0;

/// The goal flag stands this far before the level end.
pub const GOAL_OFFSET: f64 = 50.0;

/// Checkpoint and goal posts stand this far above the ground line.
pub const CHECKPOINT_HEIGHT: f64 = 80.0;

/// Gravity used by the simplified projectile simulation for jump pads.
pub const GRAVITY: f64 = 0.5;

/// Collision radius of a ring, used for platform intersection tests.
pub const RING_RADIUS: f64 = 10.0;

/// Hard minimum distance between any two rings.
pub const MIN_RING_SPACING: f64 = 20.0;

/// Width of the buckets used for the enemy density cap.
pub const ENEMY_BUCKET_WIDTH: f64 = 1000.0;

/// Horizontal slack allowed when deciding whether a jump pad landing
/// point counts as being on a platform.
pub const LANDING_MARGIN: f64 = 50.0;

/// Vertical window for landing and platform-snap checks.
pub const LANDING_WINDOW: f64 = 100.0;

/// Maximum height the player can reach with an unassisted jump.
pub const JUMP_HEIGHT: f64 = 300.0;

/// Platforms are never placed behind this x (spawn area stays clear).
pub const MIN_PLATFORM_X: f64 = 150.0;

/// Fallback platform thickness for kinds whose rules carry no height.
pub const DEFAULT_PLATFORM_HEIGHT: f64 = 20.0;

/// Enemies stand with their center this far above the surface they rest on.
pub const ENEMY_STAND_OFFSET: f64 = 30.0;

/// Horizontal overhang tolerated when snapping an entity onto a platform.
pub const PLATFORM_OVERHANG_MARGIN: f64 = 30.0;

/// How far below an initial y guess the platform search will look.
pub const PLATFORM_SNAP_WINDOW: f64 = 300.0;

/// Height difference between consecutive platforms that marks a vertical
/// climb needing a jump pad.
pub const VERTICAL_SECTION_THRESHOLD: f64 = 100.0;

/// Upper bound on repair/re-validate passes in the orchestrator.
pub const MAX_REPAIR_PASSES: u32 = 3;
