use serde::{Deserialize, Serialize};

use crate::common::text::{contains_any, contains_folded};
use crate::constants::{
    DEFAULT_MIN_BEDS, DEFAULT_MIN_DOCTORS, EXCLUDED_CARE_TYPE_TERMS, EXCLUDED_CATEGORY_TERMS,
    EXCLUDED_NAME_TERMS, EXCLUDED_SPECIALTY_TERMS, REQUIRED_MEDICINE_SYSTEM,
};
use crate::domain::HospitalRecord;

/// Quality Gate decision for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityDecision {
    /// Record is a qualifying hospital
    Accept,
    /// Record failed the named check
    Reject { check: &'static str },
}

impl QualityDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, QualityDecision::Accept)
    }
}

/// Thresholds for the bed and doctor checks. Both are strict "greater than".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QualityGateConfig {
    pub min_beds: i64,
    pub min_doctors: i64,
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            min_beds: DEFAULT_MIN_BEDS,
            min_doctors: DEFAULT_MIN_DOCTORS,
        }
    }
}

/// A single named inclusion rule. `passes` returns true when the record is
/// still eligible after this rule.
pub struct QualityCheck {
    pub name: &'static str,
    pub description: &'static str,
    passes: fn(&HospitalRecord, &QualityGateConfig) -> bool,
}

impl QualityCheck {
    pub fn passes(&self, record: &HospitalRecord, config: &QualityGateConfig) -> bool {
        (self.passes)(record, config)
    }
}

pub const CHECK_NAME_PRESENT: &str = "name_present";
pub const CHECK_ALLOPATHIC: &str = "allopathic_medicine";
pub const CHECK_CATEGORY: &str = "category_not_excluded";
pub const CHECK_NAME_TERMS: &str = "name_not_excluded";
pub const CHECK_SPECIALTIES: &str = "specialties_not_pediatric";
pub const CHECK_CARE_TYPE: &str = "care_type_not_nursing";
pub const CHECK_BEDS: &str = "beds_above_minimum";
pub const CHECK_DOCTORS: &str = "doctors_above_minimum";

/// Every rule a record must pass, in evaluation order.
pub static QUALITY_CHECKS: &[QualityCheck] = &[
    QualityCheck {
        name: CHECK_NAME_PRESENT,
        description: "hospital name is present",
        passes: |r, _| !r.name.is_empty(),
    },
    QualityCheck {
        name: CHECK_ALLOPATHIC,
        description: "system of medicine includes allopathy",
        passes: |r, _| contains_folded(&r.medicine, REQUIRED_MEDICINE_SYSTEM),
    },
    QualityCheck {
        name: CHECK_CATEGORY,
        description: "category is not a dispensary or nursing home",
        passes: |r, _| !contains_any(&r.category, EXCLUDED_CATEGORY_TERMS),
    },
    QualityCheck {
        name: CHECK_NAME_TERMS,
        description: "name does not mark a clinic, children's or small-format facility",
        passes: |r, _| !contains_any(&r.name, EXCLUDED_NAME_TERMS),
    },
    QualityCheck {
        name: CHECK_SPECIALTIES,
        description: "specialties are not pediatric",
        passes: |r, _| !contains_any(&r.specialties, EXCLUDED_SPECIALTY_TERMS),
    },
    QualityCheck {
        name: CHECK_CARE_TYPE,
        description: "care type is not nursing",
        passes: |r, _| !contains_any(&r.care_type, EXCLUDED_CARE_TYPE_TERMS),
    },
    QualityCheck {
        name: CHECK_BEDS,
        description: "total beds is a number above the minimum",
        passes: |r, c| parse_count(&r.total_beds).is_some_and(|n| n > c.min_beds),
    },
    QualityCheck {
        name: CHECK_DOCTORS,
        description: "doctor count is a number above the minimum",
        passes: |r, c| parse_count(&r.doctors).is_some_and(|n| n > c.min_doctors),
    },
];

/// Parses a leading integer the way the source data is usually written
/// ("50", "50 beds", "12.0"). Returns `None` when no digits lead the value.
pub fn parse_count(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Trait for deciding whether a record belongs in the served directory
pub trait QualityGate {
    fn assess(&self, record: &HospitalRecord) -> QualityDecision;
}

/// Quality Gate applying [`QUALITY_CHECKS`] in order; the first failure wins.
#[derive(Debug, Clone, Default)]
pub struct DefaultQualityGate {
    pub config: QualityGateConfig,
}

impl DefaultQualityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: QualityGateConfig) -> Self {
        Self { config }
    }

    pub fn checks(&self) -> &'static [QualityCheck] {
        QUALITY_CHECKS
    }
}

impl QualityGate for DefaultQualityGate {
    fn assess(&self, record: &HospitalRecord) -> QualityDecision {
        QUALITY_CHECKS
            .iter()
            .find(|check| !check.passes(record, &self.config))
            .map_or(QualityDecision::Accept, |check| QualityDecision::Reject {
                check: check.name,
            })
    }
}
