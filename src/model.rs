use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Column names of the header row, in on-disk order.
pub const HEADER: [&str; 4] = ["ID", "Description", "Created", "Completed"];

/// Textual form of `created_at` in the task file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

impl Task {
    /// A fresh, incomplete task stamped with the current time (whole seconds).
    pub fn new(id: u64, description: &str) -> Self {
        let now = Utc::now();
        let created_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Self {
            id,
            description: description.to_string(),
            created_at,
            completed: false,
        }
    }

    /// Returns display icon: x=completed, .=open
    pub fn icon(&self) -> &'static str {
        if self.completed {
            "x"
        } else {
            "."
        }
    }

    pub fn created_str(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn to_record(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.description.clone(),
            self.created_str(),
            self.completed.to_string(),
        ]
    }

    /// Decode one data row. `line` is only used for error reporting.
    pub fn from_record(record: &StringRecord, line: u64) -> Result<Self> {
        if record.len() != HEADER.len() {
            return Err(StoreError::malformed(
                line,
                format!("expected {} fields, found {}", HEADER.len(), record.len()),
            ));
        }

        let id: u64 = record[0]
            .trim()
            .parse()
            .map_err(|_| StoreError::malformed(line, format!("invalid id '{}'", &record[0])))?;
        if id == 0 {
            return Err(StoreError::malformed(line, "id must be positive"));
        }

        let created_at = NaiveDateTime::parse_from_str(record[2].trim(), TIMESTAMP_FORMAT)
            .map_err(|_| {
                StoreError::malformed(line, format!("invalid timestamp '{}'", &record[2]))
            })?
            .and_utc();

        let completed = match record[3].trim() {
            "true" => true,
            "false" => false,
            other => {
                return Err(StoreError::malformed(
                    line,
                    format!("invalid completed flag '{other}': must be true or false"),
                ))
            }
        };

        Ok(Self {
            id,
            description: record[1].to_string(),
            created_at,
            completed,
        })
    }
}

/// Check a header row against `HEADER`, ignoring whitespace around names.
pub fn check_header(record: &StringRecord) -> Result<()> {
    let matches = record.len() == HEADER.len()
        && record
            .iter()
            .zip(HEADER)
            .all(|(field, expected)| field.trim() == expected);
    if !matches {
        let found: Vec<&str> = record.iter().collect();
        return Err(StoreError::malformed(
            1,
            format!("bad header {:?}, expected {:?}", found, HEADER),
        ));
    }
    Ok(())
}
