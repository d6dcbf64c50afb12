use std::collections::HashMap;

use crate::constants::{columns, ABSENT_PLACEHOLDER};
use crate::domain::HospitalRecord;

/// A raw source row: column name to cell value. `None` stands for a null cell.
pub type RawRow = HashMap<String, Option<String>>;

/// A row whose values are trimmed, with empty cells and the `"0"` placeholder
/// collapsed to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    values: HashMap<String, String>,
}

impl NormalizedRow {
    /// Value for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalizes a single cell value.
pub fn normalize_value(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None => String::new(),
        Some(v) if v == ABSENT_PLACEHOLDER => String::new(),
        Some(v) => v.to_string(),
    }
}

/// Trait for turning raw source rows into canonical hospital records
pub trait Normalizer {
    fn normalize(&self, row: &RawRow) -> NormalizedRow;

    fn to_record(&self, row: &NormalizedRow) -> HospitalRecord;
}

/// Maps the national hospital directory columns onto [`HospitalRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, row: &RawRow) -> NormalizedRow {
        let values = row
            .iter()
            .map(|(column, value)| (column.clone(), normalize_value(value.as_deref())))
            .collect();
        NormalizedRow { values }
    }

    fn to_record(&self, row: &NormalizedRow) -> HospitalRecord {
        let field = |column: &str| row.get(column).to_string();

        HospitalRecord {
            id: field(columns::ID),
            name: field(columns::NAME),
            coordinates: field(columns::COORDINATES),
            location: field(columns::LOCATION),
            category: field(columns::CATEGORY),
            care_type: field(columns::CARE_TYPE),
            medicine: field(columns::MEDICINE),
            address: field(columns::ADDRESS),
            state: field(columns::STATE),
            district: field(columns::DISTRICT),
            subdistrict: field(columns::SUBDISTRICT),
            pincode: field(columns::PINCODE),
            telephone: field(columns::TELEPHONE),
            mobile: field(columns::MOBILE),
            emergency: field(columns::EMERGENCY),
            ambulance: field(columns::AMBULANCE),
            bloodbank: field(columns::BLOODBANK),
            email: field(columns::EMAIL),
            website: field(columns::WEBSITE),
            specialties: field(columns::SPECIALTIES),
            facilities: field(columns::FACILITIES),
            total_beds: field(columns::TOTAL_BEDS),
            private_wards: field(columns::PRIVATE_WARDS),
            doctors: field(columns::DOCTORS),
        }
    }
}
