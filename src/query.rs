//! Read-only queries over a published [`Directory`].
//!
//! Filters keep directory order, and `by_district` with a locality hint is a
//! stable partition. `search` is the only operation that sorts: exact name
//! first, then locality, then locale-aware name order.

use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::common::text::{contains_folded, eq_folded, fold, locale_cmp};
use crate::domain::HospitalRecord;
use crate::error::DirectoryError;
use crate::pipeline::storage::Directory;

/// Outcome of a query: `InvalidArgument` or `NotFound` on failure.
pub type QueryResult<T> = Result<T, DirectoryError>;

/// Parameters for [`Directory::search`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "q")]
    pub query: String,
    pub district: Option<String>,
    pub locality: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }
}

fn required<'a>(parameter: &str, value: &'a str) -> QueryResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DirectoryError::invalid_argument(parameter));
    }
    Ok(value)
}

/// An optional filter that is blank counts as not supplied.
fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Directory {
    /// Every qualifying hospital in directory order.
    pub fn list_all(&self) -> Vec<HospitalRecord> {
        self.records.to_vec()
    }

    pub fn by_state(&self, state: &str) -> QueryResult<Vec<HospitalRecord>> {
        let state = required("state", state)?;
        Ok(self.collect(|r| eq_folded(&r.state, state)))
    }

    /// Hospitals in `district`. With a locality hint, those whose subdistrict
    /// contains it come first; each group keeps directory order.
    pub fn by_district(
        &self,
        district: &str,
        locality: Option<&str>,
    ) -> QueryResult<Vec<HospitalRecord>> {
        let district = required("district", district)?;
        let matches = self.collect(|r| eq_folded(&r.district, district));

        let Some(locality) = optional(locality) else {
            return Ok(matches);
        };
        let locality = fold(locality);
        let (mut near, rest): (Vec<_>, Vec<_>) = matches
            .into_iter()
            .partition(|r| contains_folded(&r.subdistrict, &locality));
        near.extend(rest);
        Ok(near)
    }

    pub fn by_locality(&self, locality: &str) -> QueryResult<Vec<HospitalRecord>> {
        let locality = fold(required("locality", locality)?);
        Ok(self.collect(|r| contains_folded(&r.subdistrict, &locality)))
    }

    /// Exact, case-sensitive id lookup. The first match in directory order wins.
    pub fn by_id(&self, id: &str) -> QueryResult<HospitalRecord> {
        let id = required("id", id)?;
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound { id: id.to_string() })
    }

    pub fn search(&self, query: &SearchQuery) -> QueryResult<Vec<HospitalRecord>> {
        let needle = fold(required("query", &query.query)?);
        let district = optional(query.district.as_deref());
        let locality = optional(query.locality.as_deref()).map(fold);

        let mut hits = self.collect(|r| {
            contains_folded(&r.name, &needle)
                && district.map_or(true, |d| eq_folded(&r.district, d))
                && locality
                    .as_deref()
                    .map_or(true, |l| contains_folded(&r.subdistrict, l))
        });

        hits.sort_by(|a, b| rank(a, b, &needle, locality.as_deref()));
        Ok(hits)
    }

    pub fn districts(&self) -> Vec<String> {
        self.districts.iter().cloned().collect()
    }

    pub fn states(&self) -> Vec<String> {
        self.states.iter().cloned().collect()
    }

    /// Distinct, sorted districts among hospitals in `state`.
    pub fn districts_for_state(&self, state: &str) -> QueryResult<Vec<String>> {
        let state = required("state", state)?;
        let districts: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| eq_folded(&r.state, state))
            .map(|r| r.district.trim())
            .filter(|d| !d.is_empty())
            .collect();
        Ok(districts.into_iter().map(str::to_string).collect())
    }

    fn collect(&self, predicate: impl Fn(&HospitalRecord) -> bool) -> Vec<HospitalRecord> {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

/// Exact name match first, then locality match, then locale-aware name order.
fn rank(
    a: &HospitalRecord,
    b: &HospitalRecord,
    needle: &str,
    locality: Option<&str>,
) -> Ordering {
    let exact = |r: &HospitalRecord| fold(&r.name) == needle;
    let near = |r: &HospitalRecord| locality.is_some_and(|l| contains_folded(&r.subdistrict, l));

    exact(b)
        .cmp(&exact(a))
        .then_with(|| near(b).cmp(&near(a)))
        .then_with(|| locale_cmp(&a.name, &b.name))
}
