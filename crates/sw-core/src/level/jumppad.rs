use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::GRAVITY;
use crate::geom::Point;

/// Launch direction of a jump pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JumpPadType {
    Vertical,
    Horizontal,
    Diagonal,
}

/// A placed jump pad. `force` is the dominant launch impulse used by the
/// force validation; `force_x`/`force_y` are the full launch vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpPad {
    pub id: u32,
    pub kind: JumpPadType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub force: f64,
    pub force_x: f64,
    pub force_y: f64,
    pub cooldown: u32,
    pub active: bool,
}

impl JumpPad {
    /// Where a ballistic arc launched from this pad returns to the pad's
    /// height. Flight time is symmetric: `t = 2 * force_y / gravity`.
    pub fn landing_point(&self) -> Point {
        let t = 2.0 * self.force_y / GRAVITY;
        Point::new(self.x + self.force_x * t, self.y)
    }
}
