//! Section planning: carve the level length into typed stretches.

use crate::consts::{END_BUFFER, SECTION_START_X};
use crate::level::{Section, SectionType};
use crate::rng::LevelRng;
use crate::rules::RuleSet;

/// Lay out sections left to right, leaving the spawn area and the end
/// buffer untouched. The first section is always a speed section and the
/// second a platform section so every level opens the same way; after
/// that the flow follows weighted transitions.
pub(super) fn plan_sections(rules: &RuleSet, rng: &mut LevelRng, length: f64) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut cursor = SECTION_START_X;
    let limit = length - END_BUFFER;
    let buffer = rules.sections.transitions.buffer;

    while cursor < limit {
        let kind = match sections.as_slice() {
            [] => SectionType::Speed,
            [_] => SectionType::Platform,
            [.., prev] => next_section_kind(prev.kind, rng),
        };
        let profile = rules.sections.types.profile(kind).clone();
        let end = (cursor + profile.length).min(limit);
        sections.push(Section {
            kind,
            start: cursor,
            end,
            profile,
        });
        cursor = end + buffer;
    }

    sections
}

/// Weighted transition to the next section type. Bonus sections always
/// hand back to a speed section so the pace resets.
pub(super) fn next_section_kind(prev: SectionType, rng: &mut LevelRng) -> SectionType {
    match prev {
        SectionType::Speed => {
            if rng.chance(0.5) {
                SectionType::Platform
            } else {
                SectionType::Combat
            }
        }
        SectionType::Platform => {
            if rng.chance(0.3) {
                SectionType::Bonus
            } else {
                SectionType::Combat
            }
        }
        SectionType::Combat => {
            if rng.chance(0.4) {
                SectionType::Speed
            } else {
                SectionType::Platform
            }
        }
        SectionType::Bonus => SectionType::Speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_cover_playable_area_in_order() {
        let rules = RuleSet::default();
        let mut rng = LevelRng::new(99);
        let sections = plan_sections(&rules, &mut rng, 10_000.0);

        assert!(!sections.is_empty());
        assert_eq!(sections[0].kind, SectionType::Speed);
        assert_eq!(sections[1].kind, SectionType::Platform);
        assert_eq!(sections[0].start, SECTION_START_X);

        for pair in sections.windows(2) {
            assert!(pair[1].start >= pair[0].end + rules.sections.transitions.buffer);
        }
        assert!(sections.last().unwrap().end <= 10_000.0 - END_BUFFER);
    }

    #[test]
    fn test_sections_carry_their_profile() {
        let rules = RuleSet::default();
        let mut rng = LevelRng::new(5);
        let sections = plan_sections(&rules, &mut rng, 5000.0);
        for section in &sections {
            assert_eq!(section.profile, *rules.sections.types.profile(section.kind));
        }
    }

    #[test]
    fn test_bonus_always_returns_to_speed() {
        let mut rng = LevelRng::new(1);
        for _ in 0..20 {
            assert_eq!(
                next_section_kind(SectionType::Bonus, &mut rng),
                SectionType::Speed
            );
        }
    }

    #[test]
    fn test_short_level_still_gets_sections() {
        let rules = RuleSet::default();
        let mut rng = LevelRng::new(3);
        let sections = plan_sections(&rules, &mut rng, 1200.0);
        assert!(!sections.is_empty());
        assert!(sections.last().unwrap().end <= 800.0);
    }
}
