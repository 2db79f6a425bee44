//! Level data model: the output of generation and the input to validation.

mod checkpoint;
mod enemy;
mod jumppad;
mod platform;
mod ring;
mod section;

pub use checkpoint::Checkpoint;
pub use enemy::{Enemy, EnemyKind, EnemyState, EnemyType};
pub use jumppad::{JumpPad, JumpPadType};
pub use platform::{Platform, PlatformKind, PlatformType, platform_at, platform_below};
pub use ring::{Ring, RingKind};
pub use section::{Section, SectionType};

use serde::{Deserialize, Serialize};
use strum::Display;

/// Overall difficulty band derived from the level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Band for a level number: 1-3 easy, 4-6 medium, 7+ hard.
    pub fn for_level(level: u32) -> Self {
        if level <= 3 {
            Difficulty::Easy
        } else if level <= 6 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

/// A complete generated level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub number: u32,
    pub length: f64,
    pub difficulty: Difficulty,
    pub sections: Vec<Section>,
    pub checkpoints: Vec<Checkpoint>,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub rings: Vec<Ring>,
    pub jump_pads: Vec<JumpPad>,
}

impl LevelData {
    /// Total ring reward value in the level.
    pub fn total_ring_value(&self) -> u32 {
        self.rings.iter().map(|r| r.value()).sum()
    }

    /// The goal checkpoint, when present.
    pub fn goal(&self) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.is_goal)
    }
}
