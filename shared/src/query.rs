//! In-memory filtering and sorting over fetched record collections
//!
//! Filter predicates are independent and conjunctive; sorting is a single
//! `(field, direction)` pair with a comparator that handles date, numeric
//! and text fields uniformly. Equal keys keep their input order (stable
//! sort), so repeated re-sorts never shuffle ties.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed field value extracted from a record for comparison
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Date(NaiveDateTime),
    Number(Decimal),
    Text(String),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Date(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    fn compare(&self, other: &FieldValue) -> std::cmp::Ordering {
        match (self, other) {
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Record types that expose their filterable/sortable fields
pub trait Queryable {
    /// The record's primary calendar date
    fn primary_date(&self) -> NaiveDateTime;

    /// Sector the record belongs to, when it has one
    fn sector_ref(&self) -> Option<Uuid> {
        None
    }

    /// Investment the record belongs to, when it has one
    fn investment_ref(&self) -> Option<Uuid> {
        None
    }

    /// The record's primary monetary or quantity amount
    fn primary_amount(&self) -> Decimal;

    /// Fixed set of text fields searched by the free-text predicate
    fn search_text(&self) -> Vec<String> {
        Vec::new()
    }

    /// Typed value for a named sort field; `None` when the record does not
    /// carry the field
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Conjunctive filter over a record collection. Every predicate left at its
/// default matches everything, so an empty filter is the identity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    pub date_from: Option<NaiveDate>,
    /// Inclusive; treated as end-of-day against timestamps
    pub date_to: Option<NaiveDate>,
    pub sector_id: Option<Uuid>,
    pub investment_id: Option<Uuid>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
    /// Case-insensitive substring over the record's fixed text fields
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn matches<T: Queryable>(&self, record: &T) -> bool {
        let date = record.primary_date();
        if let Some(from) = self.date_from {
            if date < from.and_hms_opt(0, 0, 0).unwrap_or_default() {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if date > to.and_hms_opt(23, 59, 59).unwrap_or_default() {
                return false;
            }
        }
        if let Some(sector_id) = self.sector_id {
            if record.sector_ref() != Some(sector_id) {
                return false;
            }
        }
        if let Some(investment_id) = self.investment_id {
            if record.investment_ref() != Some(investment_id) {
                return false;
            }
        }
        let amount = record.primary_amount();
        if amount < self.amount_min.unwrap_or(Decimal::ZERO) {
            return false;
        }
        if let Some(max) = self.amount_max {
            if amount > max {
                return false;
            }
        }
        if let Some(ref needle) = self.search {
            let needle = needle.to_lowercase();
            if !needle.is_empty()
                && !record
                    .search_text()
                    .iter()
                    .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

/// Keep only the records matching every predicate, in their input order
pub fn apply_filter<T: Queryable>(records: Vec<T>, filter: &RecordFilter) -> Vec<T> {
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A single-field sort. Selecting the same field again flips the direction.
#[derive(Debug, Clone, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    /// Click behavior: same field toggles direction, a new field starts
    /// ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = field.to_string();
            self.direction = SortDirection::Asc;
        }
    }
}

/// Stable sort by the spec's field and direction. Records missing the field
/// sort after those that carry it, in both directions.
pub fn sort_records<T: Queryable>(records: &mut [T], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ordering = match (a.field(&spec.field), b.field(&spec.field)) {
            (Some(va), Some(vb)) => {
                let ord = va.compare(&vb);
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        ordering
    });
}
