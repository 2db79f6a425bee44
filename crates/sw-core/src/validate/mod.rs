//! Level validation.
//!
//! The validator is read-only: it walks a [`LevelData`] against a
//! [`RuleSet`] and produces a [`ValidationReport`]. Repair is a separate
//! concern ([`crate::repair`]) driven by the report.

mod checks;
mod interactions;
mod report;

pub use report::{Issue, IssueKind, Severity, ValidationReport, ValidationSummary};

use crate::level::LevelData;
use crate::rules::RuleSet;

/// Accumulates issues during a validation pass, split into blocking
/// errors and advisory warnings.
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Findings {
    fn error(&mut self, issue: Issue) {
        self.errors.push(issue);
    }

    fn warning(&mut self, issue: Issue) {
        self.warnings.push(issue);
    }
}

/// Checks a generated level against its rule set.
pub struct LevelValidator<'a> {
    rules: &'a RuleSet,
}

impl<'a> LevelValidator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Run every per-category check and every cross-component check.
    pub fn validate(&self, level: &LevelData) -> ValidationReport {
        let mut findings = Findings::default();

        checks::check_rings(self.rules, &level.rings, &mut findings);
        checks::check_jump_pads(self.rules, &level.jump_pads, &mut findings);
        checks::check_platforms(self.rules, &level.platforms, &mut findings);
        checks::check_enemies(self.rules, &level.enemies, &mut findings);
        checks::check_checkpoints(self.rules, &level.checkpoints, &mut findings);
        checks::check_sections(self.rules, &level.sections, &mut findings);

        interactions::check_ring_hazards(self.rules, level, &mut findings);
        interactions::check_jump_pad_landings(self.rules, level, &mut findings);
        interactions::check_platform_access(self.rules, level, &mut findings);

        ValidationReport::from_issues(findings.errors, findings.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorOptions, LevelGenerator};

    #[test]
    fn test_revalidating_an_unchanged_level_is_identical() {
        let rules = RuleSet::default();
        let generated = LevelGenerator::new(rules.clone())
            .generate(
                2,
                GeneratorOptions {
                    length: 4000.0,
                    seed: Some(3),
                },
            )
            .expect("generation should succeed");

        let validator = LevelValidator::new(&rules);
        let first = validator.validate(&generated.level);
        let second = validator.validate(&generated.level);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
