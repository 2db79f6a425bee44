use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rules::SectionProfile;

/// Gameplay flavor of a stretch of level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionType {
    Speed,
    Platform,
    Combat,
    Bonus,
}

/// A planned stretch of level `[start, end)` with the density profile it
/// was planned under. Placers read the profile rather than going back to
/// the rules so that a section, once planned, is self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub kind: SectionType,
    pub start: f64,
    pub end: f64,
    pub profile: SectionProfile,
}

impl Section {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x < self.end
    }
}
