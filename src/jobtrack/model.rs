use crate::error::{JobtrackError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Applied,
        Status::Interviewing,
        Status::Offer,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interviewing => "Interviewing",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = JobtrackError;

    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                JobtrackError::validation(format!(
                    "Unknown status '{}' (expected Applied, Interviewing, Offer or Rejected)",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = JobtrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(JobtrackError::validation(format!(
                "Unknown theme '{}' (expected light or dark)",
                other
            ))),
        }
    }
}

/// A tracked job application.
///
/// `interview_date` is only ever set while `status` is `Interviewing`; see
/// [`ApplicationRecord::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub notes: Option<String>,
    #[serde(default, with = "iso_opt")]
    pub interview_date: Option<DateTime<Utc>>,
    #[serde(with = "iso")]
    pub date: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Clears `interview_date` unless the status is `Interviewing`, and drops
    /// blank free-text fields. Runs on every write.
    pub fn normalize(&mut self) {
        if self.status != Status::Interviewing {
            self.interview_date = None;
        }
        self.description = clean_text(self.description.take());
        self.notes = clean_text(self.notes.take());
    }
}

/// Pre-validation input for a new application. Everything is optional here;
/// [`ApplicationDraft::into_record`] is the only way to obtain a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub company: Option<String>,
    pub role: Option<String>,
    pub status: Status,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub interview_date: Option<DateTime<Utc>>,
}

impl ApplicationDraft {
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: Some(company.into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_interview_date(mut self, date: DateTime<Utc>) -> Self {
        self.interview_date = Some(date);
        self
    }

    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Result<ApplicationRecord> {
        let company = required(self.company)?;
        let role = required(self.role)?;

        let mut record = ApplicationRecord {
            id,
            company,
            role,
            status: self.status,
            description: self.description,
            notes: self.notes,
            interview_date: self.interview_date,
            date: now,
        };
        record.normalize();
        Ok(record)
    }
}

pub(crate) const REQUIRED_FIELDS_MESSAGE: &str = "Company and Role are required.";

fn required(value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(JobtrackError::validation(REQUIRED_FIELDS_MESSAGE)),
    }
}

fn clean_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses the timestamp shapes we accept from users and from stored data:
/// RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC), or a bare date.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(clean_text(value))
}

mod iso {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

mod iso_opt {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => s.serialize_str(&format_timestamp(ts)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_timestamp(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("interviewing".parse::<Status>().unwrap(), Status::Interviewing);
        assert_eq!(" OFFER ".parse::<Status>().unwrap(), Status::Offer);
        assert!("ghosted".parse::<Status>().is_err());
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!("Dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
        assert_eq!(ts("2024-01-10T10:00"), expected);
        assert_eq!(ts("2024-01-10T10:00:00"), expected);
        assert_eq!(ts("2024-01-10T10:00:00.000Z"), expected);
        assert_eq!(ts("2024-01-10T12:00:00+02:00"), expected);
        assert_eq!(
            ts("2024-01-10"),
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("  ").is_none());
    }

    #[test]
    fn test_draft_requires_company_and_role() {
        let now = Utc::now();
        let missing_role = ApplicationDraft {
            company: Some("Acme".into()),
            ..Default::default()
        };
        assert!(matches!(
            missing_role.into_record(Uuid::new_v4(), now),
            Err(JobtrackError::Validation(_))
        ));

        let blank_company = ApplicationDraft::new("   ", "Engineer");
        assert!(blank_company.into_record(Uuid::new_v4(), now).is_err());
    }

    #[test]
    fn test_draft_into_record_normalizes() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let record = ApplicationDraft::new(" Acme ", "Engineer")
            .with_status(Status::Applied)
            .with_interview_date(ts("2024-01-10T10:00"))
            .with_notes("   ")
            .into_record(id, now)
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.date, now);
        assert_eq!(record.company, "Acme");
        assert_eq!(record.interview_date, None);
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_normalize_keeps_date_while_interviewing() {
        let mut record = ApplicationDraft::new("Globex", "SRE")
            .with_status(Status::Interviewing)
            .with_interview_date(ts("2024-01-10T10:00"))
            .into_record(Uuid::new_v4(), Utc::now())
            .unwrap();
        assert!(record.interview_date.is_some());

        record.status = Status::Rejected;
        record.normalize();
        assert_eq!(record.interview_date, None);
    }

    #[test]
    fn test_record_serializes_with_persisted_field_names() {
        let record = ApplicationDraft::new("Globex", "SRE")
            .with_status(Status::Interviewing)
            .with_interview_date(ts("2024-01-10T10:00"))
            .into_record(Uuid::nil(), ts("2024-01-01T09:30:00Z"))
            .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "company",
            "role",
            "status",
            "description",
            "notes",
            "interviewDate",
            "date",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj["status"], "Interviewing");
        assert_eq!(obj["interviewDate"], "2024-01-10T10:00:00.000Z");
        assert_eq!(obj["date"], "2024-01-01T09:30:00.000Z");
    }

    #[test]
    fn test_record_reads_loose_stored_shape() {
        // Blank strings and naive datetimes are what older data contains.
        let json = r#"{
            "id": "0b6c1a7e-3d4f-4a8e-9c11-2f1f2f7d9a10",
            "company": "Acme",
            "role": "Dev",
            "status": "Applied",
            "description": "",
            "notes": "",
            "interviewDate": null,
            "date": "2024-02-01T08:00:00.000Z"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, None);
        assert_eq!(record.notes, None);
        assert_eq!(record.interview_date, None);

        let without_optional = r#"{
            "id": "0b6c1a7e-3d4f-4a8e-9c11-2f1f2f7d9a10",
            "company": "Acme",
            "role": "Dev",
            "date": "2024-02-01T08:00"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(without_optional).unwrap();
        assert_eq!(record.status, Status::Applied);
    }

    #[test]
    fn test_record_rejects_garbage_timestamp() {
        let json = r#"{
            "id": "0b6c1a7e-3d4f-4a8e-9c11-2f1f2f7d9a10",
            "company": "Acme",
            "role": "Dev",
            "date": "yesterday-ish"
        }"#;
        assert!(serde_json::from_str::<ApplicationRecord>(json).is_err());
    }
}
