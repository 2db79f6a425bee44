//! Jump pad placement.
//!
//! Three passes: density-driven pads per section, bridging pads for
//! platform gaps too wide to jump, and boost pads for steep vertical
//! climbs. All passes share the same minimum-spacing rule.

use crate::consts::VERTICAL_SECTION_THRESHOLD;
use crate::geom::distance;
use crate::level::{JumpPad, JumpPadType, Platform, Section, SectionType, platform_below};
use crate::rng::LevelRng;
use crate::rules::{RuleSet, Span};

use super::IdAllocator;

/// One density-driven pad per 800 units at density 1.0.
const PAD_INTERVAL: f64 = 800.0;

/// Sections without an explicit jump pad density get this one.
const DEFAULT_PAD_DENSITY: f64 = 0.3;

/// Gaps beyond this fraction of the maximum jumpable gap get a pad.
const BRIDGE_THRESHOLD: f64 = 0.8;

/// Vertical boost pads launch at this fraction of the maximum force.
const BOOST_FACTOR: f64 = 0.8;

/// A gap between two horizontally adjacent platforms.
#[derive(Debug, Clone, Copy)]
pub struct PlatformGap<'a> {
    pub from: &'a Platform,
    pub to: &'a Platform,
    pub horizontal: f64,
    pub vertical: f64,
    pub distance: f64,
}

/// Edge-to-edge gaps between consecutive platforms ordered by x.
pub fn analyze_gaps(platforms: &[Platform]) -> Vec<PlatformGap<'_>> {
    let mut sorted: Vec<&Platform> = platforms.iter().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    sorted
        .windows(2)
        .map(|pair| {
            let horizontal = pair[1].left() - pair[0].right();
            let vertical = (pair[1].y - pair[0].y).abs();
            PlatformGap {
                from: pair[0],
                to: pair[1],
                horizontal,
                vertical,
                distance: horizontal.hypot(vertical),
            }
        })
        .collect()
}

/// Launch force needed to clear `span_length`, clamped into the pad's
/// allowed force range.
pub fn required_force(span_length: f64, allowed: Span) -> f64 {
    allowed.clamp((span_length * 0.5).sqrt() * 2.0)
}

/// Place all jump pads for the level, returning them with the number of
/// rejected candidates.
pub(super) fn place_jump_pads(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    sections: &[Section],
    platforms: &[Platform],
) -> (Vec<JumpPad>, usize) {
    let mut pads = Vec::new();
    let mut rejected = 0;

    for section in sections {
        rejected += place_section_pads(rules, rng, ids, section, platforms, &mut pads);
    }
    rejected += place_bridge_pads(rules, ids, platforms, &mut pads);
    rejected += place_boost_pads(rules, ids, platforms, &mut pads);

    (pads, rejected)
}

fn place_section_pads(
    rules: &RuleSet,
    rng: &mut LevelRng,
    ids: &mut IdAllocator,
    section: &Section,
    platforms: &[Platform],
    pads: &mut Vec<JumpPad>,
) -> usize {
    let density = section.profile.jump_pad_density.unwrap_or(DEFAULT_PAD_DENSITY);
    let count = (section.length() / PAD_INTERVAL * density).floor() as usize;
    let types = &rules.jump_pads.types;
    let ground = rules.constants.ground_height;
    let mut rejected = 0;

    for _ in 0..count {
        let x = section.start + rng.uniform(0.0, section.length());

        let kind = match section.kind {
            SectionType::Speed => {
                if rng.chance(0.7) {
                    JumpPadType::Horizontal
                } else {
                    JumpPadType::Diagonal
                }
            }
            SectionType::Platform => {
                if rng.chance(0.6) {
                    JumpPadType::Vertical
                } else {
                    JumpPadType::Diagonal
                }
            }
            _ => JumpPadType::Vertical,
        };

        let (width, height, cooldown) = pad_dimensions(rules, kind);
        let y = match platform_below(platforms, x, ground) {
            Some(platform) => platform.y - height,
            None => ground - height,
        };

        let (force, force_x, force_y) = match kind {
            JumpPadType::Vertical => {
                let force = types.vertical.force().sample(rng);
                (force, 0.0, force)
            }
            JumpPadType::Horizontal => {
                let force = types.horizontal.force().sample(rng);
                // Small upward boost so the arc clears the pad.
                (force, force * rng.sign(), 5.0)
            }
            JumpPadType::Diagonal => {
                let force_x = types.diagonal.force_x().sample(rng) * rng.sign();
                let force_y = types.diagonal.force_y().sample(rng);
                (force_y, force_x, force_y)
            }
        };

        let pad = JumpPad {
            id: ids.next_id(),
            kind,
            x,
            y,
            width,
            height,
            force,
            force_x,
            force_y,
            cooldown,
            active: true,
        };

        if spacing_ok(&pad, pads, rules) {
            pads.push(pad);
        } else {
            rejected += 1;
        }
    }

    rejected
}

/// Bridge every platform gap too wide to jump across.
fn place_bridge_pads(
    rules: &RuleSet,
    ids: &mut IdAllocator,
    platforms: &[Platform],
    pads: &mut Vec<JumpPad>,
) -> usize {
    let types = &rules.jump_pads.types;
    let ground = rules.constants.ground_height;
    let threshold = rules.platforms.placement.max_gap * BRIDGE_THRESHOLD;
    let mut rejected = 0;

    for gap in analyze_gaps(platforms) {
        if gap.distance <= threshold {
            continue;
        }

        // Pick the launch direction from the gap's dominant axis.
        let (kind, force_x, force_y) = if gap.vertical > gap.horizontal * 2.0 {
            (
                JumpPadType::Vertical,
                0.0,
                required_force(gap.vertical, types.vertical.force()),
            )
        } else if gap.horizontal > gap.vertical * 2.0 {
            (
                JumpPadType::Horizontal,
                required_force(gap.horizontal, types.horizontal.force()),
                5.0,
            )
        } else {
            (
                JumpPadType::Diagonal,
                required_force(gap.horizontal, types.diagonal.force_x()),
                required_force(gap.vertical, types.diagonal.force_y()),
            )
        };

        let (width, height, cooldown) = pad_dimensions(rules, kind);
        let mut pad = JumpPad {
            id: ids.next_id(),
            kind,
            x: gap.from.right() - 40.0,
            y: gap.from.y - height,
            width,
            height,
            force: force_y,
            force_x,
            force_y,
            cooldown,
            active: true,
        };

        if spacing_ok(&pad, pads, rules) {
            // A pad hanging in the air drops to the ground.
            if platform_below(platforms, pad.x, pad.y + 20.0).is_none() {
                pad.y = ground - pad.height;
            }
            pads.push(pad);
        } else {
            rejected += 1;
        }
    }

    rejected
}

/// Put a strong vertical pad at the foot of every steep climb.
fn place_boost_pads(
    rules: &RuleSet,
    ids: &mut IdAllocator,
    platforms: &[Platform],
    pads: &mut Vec<JumpPad>,
) -> usize {
    let vertical = &rules.jump_pads.types.vertical;
    let mut rejected = 0;

    for gap in analyze_gaps(platforms) {
        if gap.vertical <= VERTICAL_SECTION_THRESHOLD {
            continue;
        }
        let lower = if gap.from.y > gap.to.y { gap.from } else { gap.to };
        let force = vertical.max_force * BOOST_FACTOR;
        let pad = JumpPad {
            id: ids.next_id(),
            kind: JumpPadType::Vertical,
            x: lower.x,
            y: lower.y - vertical.height,
            width: vertical.width,
            height: vertical.height,
            force,
            force_x: 0.0,
            force_y: force,
            cooldown: vertical.cooldown,
            active: true,
        };
        if spacing_ok(&pad, pads, rules) {
            pads.push(pad);
        } else {
            rejected += 1;
        }
    }

    rejected
}

fn pad_dimensions(rules: &RuleSet, kind: JumpPadType) -> (f64, f64, u32) {
    let types = &rules.jump_pads.types;
    match kind {
        JumpPadType::Vertical => (
            types.vertical.width,
            types.vertical.height,
            types.vertical.cooldown,
        ),
        JumpPadType::Horizontal => (
            types.horizontal.width,
            types.horizontal.height,
            types.horizontal.cooldown,
        ),
        JumpPadType::Diagonal => (
            types.diagonal.width,
            types.diagonal.height,
            types.diagonal.cooldown,
        ),
    }
}

fn spacing_ok(pad: &JumpPad, pads: &[JumpPad], rules: &RuleSet) -> bool {
    let min_spacing = rules.jump_pads.placement.min_spacing;
    pads.iter()
        .all(|other| distance(pad.x, pad.y, other.x, other.y) >= min_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::PlatformKind;

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
    fn test_analyze_gaps_sorts_by_x() {
        let platforms = vec![
            fixed(1, 800.0, 200.0, 100.0),
            fixed(2, 300.0, 220.0, 100.0),
        ];
        let gaps = analyze_gaps(&platforms);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].from.id, 2);
        assert_eq!(gaps[0].to.id, 1);
        assert_eq!(gaps[0].horizontal, 400.0);
        assert_eq!(gaps[0].vertical, 20.0);
    }

    #[test]
    fn test_required_force_clamps() {
        let span = Span::new(15.0, 35.0);
        // sqrt(400 * 0.5) * 2 ~= 28.3, inside the range.
        let force = required_force(400.0, span);
        assert!((force - 28.284271247461902).abs() < 1e-9);
        // Tiny gap clamps up to the minimum.
        assert_eq!(required_force(10.0, span), 15.0);
        // Huge gap clamps down to the maximum.
        assert_eq!(required_force(10_000.0, span), 35.0);
    }

    #[test]
    fn test_every_pad_type_has_dimensions() {
        use strum::IntoEnumIterator;

        let rules = RuleSet::default();
        for kind in JumpPadType::iter() {
            let (width, height, cooldown) = pad_dimensions(&rules, kind);
            assert!(width > 0.0);
            assert!(height > 0.0);
            assert!(cooldown > 0);
        }
    }

    #[test]
    fn test_wide_gap_gets_a_bridge_pad() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        // Edge gap of 225 = 0.9 * maxGap, over the 200 bridge threshold.
        let platforms = vec![
            fixed(1, 500.0, 200.0, 100.0),
            fixed(2, 875.0, 210.0, 100.0),
        ];
        let mut pads = Vec::new();
        let rejected = place_bridge_pads(&rules, &mut ids, &platforms, &mut pads);
        assert_eq!(rejected, 0);
        assert_eq!(pads.len(), 1);
        let pad = &pads[0];
        assert_eq!(pad.kind, JumpPadType::Horizontal);
        assert!(pad.force_x >= rules.jump_pads.types.horizontal.min_force);
        assert!(pad.force_x <= rules.jump_pads.types.horizontal.max_force);
        // Launches from the right edge of the first platform.
        assert_eq!(pad.x, 510.0);
    }

    #[test]
    fn test_narrow_gap_needs_no_pad() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        let platforms = vec![
            fixed(1, 500.0, 200.0, 100.0),
            fixed(2, 700.0, 200.0, 100.0),
        ];
        let mut pads = Vec::new();
        place_bridge_pads(&rules, &mut ids, &platforms, &mut pads);
        assert!(pads.is_empty());
    }

    #[test]
    fn test_steep_climb_gets_a_boost_pad() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        let platforms = vec![
            fixed(1, 500.0, 280.0, 100.0),
            fixed(2, 650.0, 120.0, 100.0),
        ];
        let mut pads = Vec::new();
        place_boost_pads(&rules, &mut ids, &platforms, &mut pads);
        assert_eq!(pads.len(), 1);
        let pad = &pads[0];
        assert_eq!(pad.kind, JumpPadType::Vertical);
        // On the lower platform.
        assert_eq!(pad.x, 500.0);
        assert_eq!(pad.y, 280.0 - rules.jump_pads.types.vertical.height);
        assert_eq!(pad.force, rules.jump_pads.types.vertical.max_force * 0.8);
    }

    #[test]
    fn test_section_pads_respect_spacing() {
        let rules = RuleSet::default();
        let mut rng = LevelRng::new(31);
        let mut ids = IdAllocator::default();
        let section = Section {
            kind: SectionType::Platform,
            start: 200.0,
            end: 5000.0,
            profile: rules.sections.types.platform.clone(),
        };
        let mut pads = Vec::new();
        place_section_pads(&rules, &mut rng, &mut ids, &section, &[], &mut pads);
        for (i, a) in pads.iter().enumerate() {
            for b in &pads[i + 1..] {
                assert!(distance(a.x, a.y, b.x, b.y) >= rules.jump_pads.placement.min_spacing);
            }
        }
    }
}
