use serde::{Deserialize, Serialize};

/// A respawn marker. The goal at the end of the level is a checkpoint
/// with `is_goal` set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub is_goal: bool,
    /// Touched by gameplay, never by generation.
    pub activated: bool,
}

impl Checkpoint {
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            is_goal: false,
            activated: false,
        }
    }

    pub fn goal(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            is_goal: true,
            activated: false,
        }
    }
}
