use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use super::domain::{MediaCategory, Submission, SubmissionId};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionImportError {
    #[error("could not read submission log: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse submission row: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown media category '{0}'")]
    UnknownCategory(String),
    #[error("unparseable timestamp '{0}'")]
    BadTimestamp(String),
}

/// Row shape of an exported submission log.
#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Student Email")]
    student_email: String,
    #[serde(rename = "Type of Media")]
    media_type: String,
    #[serde(rename = "Title of Media")]
    media_title: String,
    #[serde(rename = "Bonus Points (Yes/No)")]
    bonus: String,
    #[serde(rename = "Reflection")]
    reflection: String,
    #[serde(rename = "Points")]
    points: u32,
    #[serde(rename = "Teacher Verified?")]
    verified: String,
}

/// Reads a previously exported submission log back into memory, e.g. to seed
/// an in-memory store at startup or to replay a leaderboard offline.
pub struct SubmissionLog;

impl SubmissionLog {
    pub fn from_path(path: &Path) -> Result<Vec<Submission>, SubmissionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Ids are assigned sequentially from 1 in file order, matching the row
    /// numbering of the original sheet export.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Submission>, SubmissionImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut submissions = Vec::new();
        for (index, record) in csv_reader.deserialize::<LogRecord>().enumerate() {
            let record = record?;
            let category = MediaCategory::from_label(&record.media_type)
                .ok_or_else(|| SubmissionImportError::UnknownCategory(record.media_type.clone()))?;

            submissions.push(Submission {
                id: SubmissionId(index as u64 + 1),
                submitted_at: parse_timestamp(&record.timestamp)?,
                student_email: record.student_email,
                category,
                media_title: record.media_title,
                bonus_claimed: record.bonus.eq_ignore_ascii_case("yes"),
                reflection: record.reflection,
                points: record.points,
                verified: parse_verified(&record.verified),
            });
        }

        Ok(submissions)
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SubmissionImportError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // Sheet exports write local-looking timestamps without an offset.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| SubmissionImportError::BadTimestamp(raw.to_string()))
}

fn parse_verified(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true") || raw == "1"
}
