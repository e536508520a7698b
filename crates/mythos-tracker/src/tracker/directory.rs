use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::StudentProfile;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryImportError {
    #[error("could not read directory file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse directory row: {0}")]
    Csv(#[from] csv::Error),
}

/// Row shape of the teacher-maintained directory export.
#[derive(Debug, Deserialize)]
struct DirectoryRecord {
    #[serde(rename = "Student Name")]
    name: String,
    #[serde(rename = "Student Email")]
    email: String,
    #[serde(rename = "Class Period")]
    class_period: String,
}

/// Lookup table from student email to profile. Students missing from the
/// directory still appear on the roster; they just lack a name and class
/// group until the teacher adds them.
#[derive(Debug, Clone, Default)]
pub struct StudentDirectory {
    profiles: BTreeMap<String, StudentProfile>,
}

impl StudentDirectory {
    pub fn new(profiles: impl IntoIterator<Item = StudentProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.email.clone(), profile))
                .collect(),
        }
    }

    pub fn lookup(&self, email: &str) -> Option<&StudentProfile> {
        self.profiles.get(email.trim())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn from_path(path: &Path) -> Result<Self, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses a directory CSV. Blank name or class cells become `None`
    /// rather than empty strings, and rows without an email are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut profiles = Vec::new();
        for record in csv_reader.deserialize::<DirectoryRecord>() {
            let record = record?;
            if record.email.is_empty() {
                continue;
            }
            profiles.push(StudentProfile {
                name: non_empty(record.name),
                email: record.email,
                class_group: non_empty(record.class_period),
            });
        }

        Ok(Self::new(profiles))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
