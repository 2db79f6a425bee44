use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{PLATFORM_OVERHANG_MARGIN, PLATFORM_SNAP_WINDOW};
use crate::geom::Point;

/// Platform kind without its payload, for rule lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlatformType {
    Static,
    Moving,
    Crumbling,
}

/// Kind-specific platform state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlatformKind {
    Static,
    Moving {
        /// Endpoints of the back-and-forth path.
        path: [Point; 2],
        speed: f64,
        /// +1 toward `path[1]`, -1 toward `path[0]`.
        direction: i8,
    },
    Crumbling {
        stability: u32,
        respawn_time: u32,
        is_stable: bool,
    },
}

impl PlatformKind {
    pub fn platform_type(&self) -> PlatformType {
        match self {
            PlatformKind::Static => PlatformType::Static,
            PlatformKind::Moving { .. } => PlatformType::Moving,
            PlatformKind::Crumbling { .. } => PlatformType::Crumbling,
        }
    }
}

/// A solid surface. `x` is the horizontal center, `y` the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub kind: PlatformKind,
}

impl Platform {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shortest edge-to-edge horizontal gap to another platform, zero when
    /// they overlap horizontally.
    pub fn edge_gap(&self, other: &Platform) -> f64 {
        if other.left() > self.right() {
            other.left() - self.right()
        } else if self.left() > other.right() {
            self.left() - other.right()
        } else {
            0.0
        }
    }

    /// Euclidean gap to another platform: horizontal edge separation and
    /// vertical offset combined. This is the distance a jump has to cover,
    /// so it is what the gap checks measure.
    pub fn gap_to(&self, other: &Platform) -> f64 {
        self.edge_gap(other).hypot(other.y - self.y)
    }

    /// Whether a point sits inside the platform's box expanded by `margin`
    /// on every side.
    pub fn contains_with_margin(&self, x: f64, y: f64, margin: f64) -> bool {
        x >= self.left() - margin
            && x <= self.right() + margin
            && y >= self.top() - margin
            && y <= self.bottom() + margin
    }
}

/// Highest platform directly under `(x, y)` within the snap window,
/// tolerating a small horizontal overhang.
pub fn platform_below(platforms: &[Platform], x: f64, y: f64) -> Option<&Platform> {
    platforms
        .iter()
        .filter(|p| {
            x >= p.left() - PLATFORM_OVERHANG_MARGIN
                && x <= p.right() + PLATFORM_OVERHANG_MARGIN
                && p.y >= y
                && p.y <= y + PLATFORM_SNAP_WINDOW
        })
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

/// Platform whose horizontal extent covers `x`, preferring the highest.
pub fn platform_at(platforms: &[Platform], x: f64) -> Option<&Platform> {
    platforms
        .iter()
        .filter(|p| x >= p.left() && x <= p.right())
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(id: u32, x: f64, y: f64, width: f64) -> Platform {
        Platform {
            id,
            x,
            y,
            width,
            height: 20.0,
            kind: PlatformKind::Static,
        }
    }

    #[test]
    fn test_edges() {
        let p = fixed(1, 100.0, 200.0, 80.0);
        assert_eq!(p.left(), 60.0);
        assert_eq!(p.right(), 140.0);
        assert_eq!(p.top(), 200.0);
        assert_eq!(p.bottom(), 220.0);
    }

    #[test]
    fn test_edge_gap() {
        let a = fixed(1, 100.0, 200.0, 100.0);
        let b = fixed(2, 300.0, 180.0, 100.0);
        assert_eq!(a.edge_gap(&b), 100.0);
        assert_eq!(b.edge_gap(&a), 100.0);

        let overlapping = fixed(3, 150.0, 220.0, 100.0);
        assert_eq!(a.edge_gap(&overlapping), 0.0);
    }

    #[test]
    fn test_gap_to_combines_both_axes() {
        let a = fixed(1, 100.0, 200.0, 100.0);
        let b = fixed(2, 280.0, 160.0, 100.0);
        // 80 horizontal edge gap, 40 vertical.
        assert_eq!(a.gap_to(&b), 80.0f64.hypot(40.0));

        // Horizontally overlapping platforms still have a vertical gap.
        let above = fixed(3, 120.0, 0.0, 100.0);
        assert_eq!(a.gap_to(&above), 200.0);
    }

    #[test]
    fn test_platform_below_picks_highest() {
        let platforms = vec![
            fixed(1, 100.0, 250.0, 100.0),
            fixed(2, 100.0, 150.0, 100.0),
            fixed(3, 500.0, 100.0, 100.0),
        ];
        let hit = platform_below(&platforms, 100.0, 50.0).unwrap();
        assert_eq!(hit.id, 2);
        assert!(platform_below(&platforms, 900.0, 50.0).is_none());
    }

    #[test]
    fn test_platform_below_respects_window() {
        let platforms = vec![fixed(1, 100.0, 500.0, 100.0)];
        assert!(platform_below(&platforms, 100.0, 50.0).is_none());
        assert!(platform_below(&platforms, 100.0, 250.0).is_some());
    }
}
