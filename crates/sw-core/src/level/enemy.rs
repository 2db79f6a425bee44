use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Enemy archetype, used for rule lookups and progression unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnemyType {
    Basic,
    Flying,
    Shielded,
    Projectile,
}

/// Runtime AI state an enemy spawns in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EnemyState {
    #[default]
    Patrol,
    Chase,
    Attack,
}

/// Kind-specific enemy state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnemyKind {
    Basic,
    Flying {
        /// Center of the hover oscillation.
        base_y: f64,
        /// Vertical oscillation extent and rate, in world units and
        /// radians per millisecond.
        amplitude: f64,
        frequency: f64,
        patrol_radius: f64,
    },
    Shielded {
        shield_health: u32,
    },
    Projectile {
        fire_rate: u32,
    },
}

impl EnemyKind {
    pub fn enemy_type(&self) -> EnemyType {
        match self {
            EnemyKind::Basic => EnemyType::Basic,
            EnemyKind::Flying { .. } => EnemyType::Flying,
            EnemyKind::Shielded { .. } => EnemyType::Shielded,
            EnemyKind::Projectile { .. } => EnemyType::Projectile,
        }
    }
}

/// A placed enemy with its scaled combat stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub health: u32,
    pub max_health: u32,
    pub speed: f64,
    pub damage: u32,
    pub points: u32,
    pub detection_range: f64,
    pub state: EnemyState,
    /// Initial facing, +1 right or -1 left.
    pub direction: i8,
    #[serde(flatten)]
    pub kind: EnemyKind,
}
