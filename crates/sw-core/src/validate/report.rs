//! Issue and report types produced by validation.

use serde::{Deserialize, Serialize};
use strum::Display;

/// How bad an issue is. Critical issues make a level unplayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Category of a validation issue. The serialized names are stable and
/// appear in reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum IssueKind {
    #[strum(serialize = "RING_SPACING")]
    #[serde(rename = "RING_SPACING")]
    RingSpacing,
    #[strum(serialize = "RING_PATTERN")]
    #[serde(rename = "RING_PATTERN")]
    RingPattern,
    #[strum(serialize = "RING_HEIGHT")]
    #[serde(rename = "RING_HEIGHT")]
    RingHeight,
    #[strum(serialize = "RING_HAZARD")]
    #[serde(rename = "RING_HAZARD")]
    RingHazard,
    #[strum(serialize = "JUMPPAD_FORCE")]
    #[serde(rename = "JUMPPAD_FORCE")]
    JumpPadForce,
    #[strum(serialize = "JUMPPAD_SPACING")]
    #[serde(rename = "JUMPPAD_SPACING")]
    JumpPadSpacing,
    #[strum(serialize = "JUMPPAD_SEQUENCE")]
    #[serde(rename = "JUMPPAD_SEQUENCE")]
    JumpPadSequence,
    #[strum(serialize = "JUMPPAD_LANDING")]
    #[serde(rename = "JUMPPAD_LANDING")]
    JumpPadLanding,
    #[strum(serialize = "PLATFORM_WIDTH")]
    #[serde(rename = "PLATFORM_WIDTH")]
    PlatformWidth,
    #[strum(serialize = "PLATFORM_PATH")]
    #[serde(rename = "PLATFORM_PATH")]
    PlatformPath,
    #[strum(serialize = "PLATFORM_SPEED")]
    #[serde(rename = "PLATFORM_SPEED")]
    PlatformSpeed,
    #[strum(serialize = "PLATFORM_GAP")]
    #[serde(rename = "PLATFORM_GAP")]
    PlatformGap,
    #[strum(serialize = "PLATFORM_ACCESS")]
    #[serde(rename = "PLATFORM_ACCESS")]
    PlatformAccess,
    #[strum(serialize = "ENEMY_DENSITY")]
    #[serde(rename = "ENEMY_DENSITY")]
    EnemyDensity,
    #[strum(serialize = "ENEMY_SPACING")]
    #[serde(rename = "ENEMY_SPACING")]
    EnemySpacing,
    #[strum(serialize = "ENEMY_HEALTH")]
    #[serde(rename = "ENEMY_HEALTH")]
    EnemyHealth,
    #[strum(serialize = "CHECKPOINT_SPACING")]
    #[serde(rename = "CHECKPOINT_SPACING")]
    CheckpointSpacing,
    #[strum(serialize = "SECTION_OVERLAP")]
    #[serde(rename = "SECTION_OVERLAP")]
    SectionOverlap,
}

/// A single problem found in a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Bucket or section index the issue was found in, when relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<usize>,
    /// Id of the entity at fault, when a single entity is at fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<u32>,
}

impl Issue {
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            x: None,
            y: None,
            section: None,
            entity: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn in_section(mut self, section: usize) -> Self {
        self.section = Some(section);
        self
    }

    pub fn for_entity(mut self, id: u32) -> Self {
        self.entity = Some(id);
        self
    }
}

/// Aggregate counts and the overall verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub critical_errors: usize,
    pub high_errors: usize,
    pub medium_errors: usize,
    pub can_proceed: bool,
    pub recommendation: String,
}

/// Full validation output: blocking errors, advisory warnings, and the
/// summary derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Build the final report from collected issues, computing the summary.
    pub fn from_issues(errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        let critical_errors = errors
            .iter()
            .filter(|e| e.severity == Severity::Critical)
            .count();
        let high_errors = errors
            .iter()
            .filter(|e| e.severity == Severity::High)
            .count();
        let medium_errors = errors
            .iter()
            .filter(|e| e.severity == Severity::Medium)
            .count();
        let can_proceed = critical_errors == 0;
        let recommendation =
            recommendation(critical_errors, high_errors, errors.len(), warnings.len());
        let summary = ValidationSummary {
            total_errors: errors.len(),
            total_warnings: warnings.len(),
            critical_errors,
            high_errors,
            medium_errors,
            can_proceed,
            recommendation,
        };
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            summary,
        }
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Number of issues (errors and warnings) of a given kind.
    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues().filter(|i| i.kind == kind).count()
    }
}

fn recommendation(critical: usize, high: usize, errors: usize, warnings: usize) -> String {
    if critical > 0 {
        "Fix critical errors before proceeding - level may be unplayable".into()
    } else if high > 5 {
        "Many high-severity issues found - level needs significant adjustments".into()
    } else if high > 0 {
        "Some important issues to address for better gameplay".into()
    } else if errors > 0 {
        "Minor issues found - consider fixing for optimal experience".into()
    } else if warnings > 0 {
        "Level is valid with some warnings - review for improvements".into()
    } else {
        "Level passes all validation checks!".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::from_issues(vec![], vec![]);
        assert!(report.is_valid);
        assert!(report.summary.can_proceed);
        assert_eq!(
            report.summary.recommendation,
            "Level passes all validation checks!"
        );
    }

    #[test]
    fn test_critical_blocks_proceeding() {
        let issue = Issue::new(IssueKind::JumpPadLanding, Severity::Critical, "no landing");
        let report = ValidationReport::from_issues(vec![issue], vec![]);
        assert!(!report.is_valid);
        assert!(!report.summary.can_proceed);
        assert_eq!(report.summary.critical_errors, 1);
        assert!(report.summary.recommendation.contains("critical"));
    }

    #[test]
    fn test_warnings_do_not_block() {
        let issue = Issue::new(IssueKind::RingHeight, Severity::Medium, "too high");
        let report = ValidationReport::from_issues(vec![], vec![issue]);
        assert!(report.is_valid);
        assert!(report.summary.can_proceed);
        assert_eq!(report.summary.total_warnings, 1);
    }

    #[test]
    fn test_kind_names_are_stable() {
        assert_eq!(IssueKind::JumpPadLanding.to_string(), "JUMPPAD_LANDING");
        assert_eq!(IssueKind::RingSpacing.to_string(), "RING_SPACING");
        let json = serde_json::to_string(&IssueKind::EnemyDensity).unwrap();
        assert_eq!(json, "\"ENEMY_DENSITY\"");
    }
}
