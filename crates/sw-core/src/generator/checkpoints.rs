//! Checkpoint placement at regular intervals along the level.

use crate::consts::{CHECKPOINT_HEIGHT, END_BUFFER};
use crate::level::Checkpoint;
use crate::rules::RuleSet;

use super::IdAllocator;

/// Place a checkpoint every `spacing` units, starting one spacing in and
/// stopping short of the end buffer (the goal stands there instead).
pub(super) fn plan_checkpoints(
    rules: &RuleSet,
    ids: &mut IdAllocator,
    length: f64,
) -> Vec<Checkpoint> {
    let spacing = rules.checkpoints.spacing;
    let y = rules.constants.ground_height - CHECKPOINT_HEIGHT;
    let mut checkpoints = Vec::new();
    let mut x = spacing;
    while x < length - END_BUFFER {
        checkpoints.push(Checkpoint::new(ids.next_id(), x, y));
        x += spacing;
    }
    checkpoints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoints_at_regular_spacing() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        let checkpoints = plan_checkpoints(&rules, &mut ids, 10_000.0);

        // 1500, 3000, ..., 9000.
        assert_eq!(checkpoints.len(), 6);
        assert_eq!(checkpoints[0].x, 1500.0);
        assert_eq!(checkpoints[5].x, 9000.0);
        assert!(checkpoints.iter().all(|c| !c.is_goal));
        assert!(checkpoints.iter().all(|c| c.y == 240.0));
    }

    #[test]
    fn test_no_checkpoint_in_end_buffer() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        let checkpoints = plan_checkpoints(&rules, &mut ids, 3000.0);
        assert_eq!(checkpoints.len(), 1);
        assert_eq!(checkpoints[0].x, 1500.0);
    }

    #[test]
    fn test_short_level_has_no_checkpoints() {
        let rules = RuleSet::default();
        let mut ids = IdAllocator::default();
        assert!(plan_checkpoints(&rules, &mut ids, 1500.0).is_empty());
    }
}
