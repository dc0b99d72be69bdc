//! # Query Engine
//!
//! [`derive_view`] turns the store's collection plus a [`ViewCriteria`] into the
//! sequence that gets displayed: filter by status, filter by search term, then
//! a stable sort. It never mutates its input.
//!
//! Sorting rules:
//! - `company` and `role` compare case-insensitively.
//! - `date` and `interviewDate` compare by timestamp.
//! - A record without an interview date sorts after every record with one,
//!   whichever the direction.
//! - Fully equal keys keep their original relative order.

use crate::error::{JobtrackError, Result};
use crate::model::{ApplicationRecord, Status};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = JobtrackError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Company,
    Role,
    Date,
    InterviewDate,
}

impl FromStr for SortKey {
    type Err = JobtrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "company" => Ok(SortKey::Company),
            "role" => Ok(SortKey::Role),
            "date" => Ok(SortKey::Date),
            "interviewdate" | "interview" => Ok(SortKey::InterviewDate),
            _ => Err(JobtrackError::validation(format!(
                "Unknown sort key '{}' (expected company, role, date or interview-date)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest applications first.
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort requested on `key`: the active key flips direction, any other key
    /// starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.reversed())
        } else {
            Self::new(key, SortDirection::Ascending)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    pub status_filter: StatusFilter,
    pub search_term: String,
    pub sort: SortConfig,
}

impl ViewCriteria {
    pub fn with_status(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }
}

pub fn derive_view(records: &[ApplicationRecord], criteria: &ViewCriteria) -> Vec<ApplicationRecord> {
    let term = criteria.search_term.to_lowercase();

    let mut view: Vec<ApplicationRecord> = records
        .iter()
        .filter(|r| criteria.status_filter.matches(r.status))
        .filter(|r| term.is_empty() || matches_term(r, &term))
        .cloned()
        .collect();

    // slice::sort_by is stable
    view.sort_by(|a, b| compare(a, b, criteria.sort));
    view
}

/// Per-status counts over the whole collection, for summary lines.
pub fn count_by_status(records: &[ApplicationRecord]) -> HashMap<Status, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

fn matches_term(record: &ApplicationRecord, term_lower: &str) -> bool {
    record.company.to_lowercase().contains(term_lower)
        || record.role.to_lowercase().contains(term_lower)
}

fn compare(a: &ApplicationRecord, b: &ApplicationRecord, sort: SortConfig) -> Ordering {
    match sort.key {
        SortKey::Company => sort
            .direction
            .apply(a.company.to_lowercase().cmp(&b.company.to_lowercase())),
        SortKey::Role => sort
            .direction
            .apply(a.role.to_lowercase().cmp(&b.role.to_lowercase())),
        SortKey::Date => sort.direction.apply(a.date.cmp(&b.date)),
        // Missing dates go last regardless of direction.
        SortKey::InterviewDate => match (a.interview_date, b.interview_date) {
            (Some(x), Some(y)) => sort.direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_timestamp, ApplicationDraft};
    use uuid::Uuid;

    fn record(company: &str, role: &str, status: Status, date: &str) -> ApplicationRecord {
        ApplicationDraft::new(company, role)
            .with_status(status)
            .into_record(Uuid::new_v4(), parse_timestamp(date).unwrap())
            .unwrap()
    }

    fn interviewing(company: &str, at: Option<&str>) -> ApplicationRecord {
        let mut r = record(company, "Engineer", Status::Interviewing, "2024-01-01");
        r.interview_date = at.and_then(parse_timestamp);
        r
    }

    fn companies(view: &[ApplicationRecord]) -> Vec<&str> {
        view.iter().map(|r| r.company.as_str()).collect()
    }

    fn by(key: SortKey, direction: SortDirection) -> ViewCriteria {
        ViewCriteria::default().with_sort(SortConfig::new(key, direction))
    }

    #[test]
    fn test_status_filter_selects_matching_records() {
        let acme = record("Acme", "Dev", Status::Applied, "2024-01-01");
        let globex = interviewing("Globex", Some("2024-01-10T10:00"));
        let records = vec![acme, globex.clone()];

        let criteria = ViewCriteria::default().with_status(StatusFilter::Only(Status::Interviewing));
        let view = derive_view(&records, &criteria);
        assert_eq!(view, vec![globex]);
    }

    #[test]
    fn test_all_with_empty_search_keeps_every_record() {
        let records = vec![
            record("B", "x", Status::Offer, "2024-01-02"),
            record("A", "y", Status::Rejected, "2024-01-01"),
            record("C", "z", Status::Applied, "2024-01-03"),
        ];
        let view = derive_view(&records, &ViewCriteria::default());
        assert_eq!(view.len(), records.len());
        assert_eq!(companies(&view), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_company_and_role() {
        let records = vec![
            record("Acme Corp", "Backend", Status::Applied, "2024-01-01"),
            record("Initech", "ACME tooling", Status::Applied, "2024-01-02"),
            record("Globex", "Frontend", Status::Applied, "2024-01-03"),
        ];

        let view = derive_view(&records, &by(SortKey::Company, SortDirection::Ascending).with_search("acme"));
        assert_eq!(companies(&view), vec!["Acme Corp", "Initech"]);

        let view = derive_view(&records, &ViewCriteria::default().with_search("FRONT"));
        assert_eq!(companies(&view), vec!["Globex"]);
    }

    #[test]
    fn test_filters_combine() {
        let records = vec![
            record("Acme", "Dev", Status::Applied, "2024-01-01"),
            record("Acme", "Ops", Status::Rejected, "2024-01-02"),
        ];
        let criteria = ViewCriteria::default()
            .with_status(StatusFilter::Only(Status::Rejected))
            .with_search("acme");
        let view = derive_view(&records, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].role, "Ops");
    }

    #[test]
    fn test_string_keys_compare_case_insensitively() {
        let records = vec![
            record("beta", "x", Status::Applied, "2024-01-01"),
            record("Alpha", "x", Status::Applied, "2024-01-01"),
            record("Gamma", "x", Status::Applied, "2024-01-01"),
        ];
        let view = derive_view(&records, &by(SortKey::Company, SortDirection::Ascending));
        assert_eq!(companies(&view), vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_missing_interview_dates_sort_last_both_directions() {
        let records = vec![
            interviewing("NoDate1", None),
            interviewing("Late", Some("2024-03-01T10:00")),
            interviewing("NoDate2", None),
            interviewing("Early", Some("2024-01-01T10:00")),
        ];

        let asc = derive_view(&records, &by(SortKey::InterviewDate, SortDirection::Ascending));
        assert_eq!(companies(&asc), vec!["Early", "Late", "NoDate1", "NoDate2"]);

        let desc = derive_view(&records, &by(SortKey::InterviewDate, SortDirection::Descending));
        assert_eq!(companies(&desc), vec!["Late", "Early", "NoDate1", "NoDate2"]);
    }

    #[test]
    fn test_equal_keys_keep_original_order() {
        let records = vec![
            record("Same", "first", Status::Applied, "2024-01-01"),
            record("same", "second", Status::Applied, "2024-01-01"),
            record("SAME", "third", Status::Applied, "2024-01-01"),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let view = derive_view(&records, &by(SortKey::Company, direction));
            let roles: Vec<_> = view.iter().map(|r| r.role.as_str()).collect();
            assert_eq!(roles, vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_derive_view_is_idempotent_and_pure() {
        let records = vec![
            record("B", "x", Status::Applied, "2024-01-02"),
            record("A", "y", Status::Applied, "2024-01-01"),
        ];
        let snapshot = records.clone();
        let criteria = by(SortKey::Role, SortDirection::Descending);

        let once = derive_view(&records, &criteria);
        let twice = derive_view(&once, &criteria);
        assert_eq!(once, twice);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_toggling_direction_reverses_distinct_keys() {
        let records = vec![
            record("Beta", "x", Status::Applied, "2024-01-02"),
            record("Alpha", "y", Status::Applied, "2024-01-03"),
            record("Gamma", "z", Status::Applied, "2024-01-01"),
        ];
        let sort = SortConfig::new(SortKey::Company, SortDirection::Ascending);
        let asc = derive_view(&records, &ViewCriteria::default().with_sort(sort));
        let desc = derive_view(
            &records,
            &ViewCriteria::default().with_sort(sort.toggled(SortKey::Company)),
        );

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_toggle_on_new_key_resets_to_ascending() {
        let sort = SortConfig::default();
        assert_eq!(sort.key, SortKey::Date);
        assert_eq!(sort.direction, SortDirection::Descending);

        let toggled = sort.toggled(SortKey::Date);
        assert_eq!(toggled.direction, SortDirection::Ascending);

        let other = toggled.toggled(SortKey::Company);
        assert_eq!(other, SortConfig::new(SortKey::Company, SortDirection::Ascending));

        let desc_other = SortConfig::new(SortKey::Role, SortDirection::Descending);
        assert_eq!(desc_other.toggled(SortKey::Company).direction, SortDirection::Ascending);
    }

    #[test]
    fn test_parse_criteria_parts() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "offer".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(Status::Offer)
        );
        assert_eq!("interview-date".parse::<SortKey>().unwrap(), SortKey::InterviewDate);
        assert_eq!("interviewDate".parse::<SortKey>().unwrap(), SortKey::InterviewDate);
        assert!("salary".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_count_by_status() {
        let records = vec![
            record("A", "x", Status::Applied, "2024-01-01"),
            record("B", "x", Status::Applied, "2024-01-01"),
            record("C", "x", Status::Offer, "2024-01-01"),
        ];
        let counts = count_by_status(&records);
        assert_eq!(counts.get(&Status::Applied), Some(&2));
        assert_eq!(counts.get(&Status::Offer), Some(&1));
        assert_eq!(counts.get(&Status::Rejected), None);
    }
}
