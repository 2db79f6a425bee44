use serde::{Deserialize, Serialize};

/// Kind-specific ring state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RingKind {
    Normal,
    Super { value: u32, glow_radius: f64 },
    Magnet { value: u32, magnet_radius: f64 },
}

/// A collectible ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Touched by gameplay, never by generation.
    pub collected: bool,
    #[serde(flatten)]
    pub kind: RingKind,
}

impl Ring {
    /// Reward value collected by the player. Normal rings are worth 1.
    pub fn value(&self) -> u32 {
        match self.kind {
            RingKind::Normal => 1,
            RingKind::Super { value, .. } => value,
            RingKind::Magnet { value, .. } => value,
        }
    }
}
