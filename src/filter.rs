//! Filter criteria and their evaluation over card records.

use crate::data::CardRecord;

use std::collections::BTreeSet;
use std::sync::Arc;

/// Default lower HP bound.
pub const HP_MIN: i64 = 0;
/// Default upper HP bound.
pub const HP_MAX: i64 = 1000;

/// The active constraints, all of which must hold for a record to match.
///
/// Empty sets and an empty name accept everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub attributes: BTreeSet<String>,
    pub expansions: BTreeSet<String>,
    pub hp_min: i64,
    pub hp_max: i64,
    pub name: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            attributes: BTreeSet::new(),
            expansions: BTreeSet::new(),
            hp_min: HP_MIN,
            hp_max: HP_MAX,
            name: String::new(),
        }
    }
}

impl Criteria {
    /// Whether `record` satisfies every active constraint.
    pub fn matches(&self, record: &CardRecord) -> bool {
        if !self.attributes.is_empty() && !is_member(&self.attributes, &record.attribute) {
            return false;
        }
        if !self.expansions.is_empty() && !is_member(&self.expansions, &record.expansion) {
            return false;
        }
        let hp = record.hp();
        if hp < self.hp_min || hp > self.hp_max {
            return false;
        }
        if !self.name.is_empty()
            && !record
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase())
        {
            return false;
        }
        true
    }

    /// Keeps the matching records in their original order.
    pub fn filter(&self, records: &[Arc<CardRecord>]) -> Vec<Arc<CardRecord>> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn is_member(set: &BTreeSet<String>, value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| set.contains(v))
}

/// State of the filter controls as the user left them.
///
/// Bounds are kept as raw text; they only become numbers when criteria are built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub attributes: BTreeSet<String>,
    pub expansions: BTreeSet<String>,
    pub hp_min: String,
    pub hp_max: String,
    pub name: String,
}

impl FilterInputs {
    /// Reads the controls into criteria. Unreadable bounds fall back to the defaults.
    pub fn build(&self) -> Criteria {
        Criteria {
            attributes: self.attributes.clone(),
            expansions: self.expansions.clone(),
            hp_min: parse_bound(&self.hp_min, HP_MIN),
            hp_max: parse_bound(&self.hp_max, HP_MAX),
            name: self.name.clone(),
        }
    }

    /// Clears every control and returns the matching accept-all criteria.
    pub fn reset(&mut self) -> Criteria {
        *self = Self::default();
        Criteria::default()
    }
}

fn parse_bound(text: &str, default: i64) -> i64 {
    let text = text.trim();
    if text.is_empty() {
        return default;
    }
    text.parse::<i64>().unwrap_or(default)
}
