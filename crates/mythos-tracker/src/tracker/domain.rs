use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a submission when the store appends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categories of media a student may log. Each carries its own point rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    WrittenStory,
    MovieTvPlay,
    VideoGame,
    PodcastAudio,
    GraphicNovel,
    Other,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 6] = [
        MediaCategory::WrittenStory,
        MediaCategory::MovieTvPlay,
        MediaCategory::VideoGame,
        MediaCategory::PodcastAudio,
        MediaCategory::GraphicNovel,
        MediaCategory::Other,
    ];

    /// The human-facing label used on the submission form and in the
    /// exported submission log.
    pub const fn label(self) -> &'static str {
        match self {
            MediaCategory::WrittenStory => "Written Story (book, online, etc)",
            MediaCategory::MovieTvPlay => "Movie/TV Show/Play/Musical",
            MediaCategory::VideoGame => "Video Game",
            MediaCategory::PodcastAudio => "Podcast/Audio",
            MediaCategory::GraphicNovel => "Graphic Novel/Comic Book",
            MediaCategory::Other => "Other",
        }
    }

    /// Reverse of [`label`](Self::label), tolerant of surrounding whitespace.
    pub fn from_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == trimmed)
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the submission log.
///
/// Rows are immutable after creation except for `points` and `verified`,
/// which flip exactly once on the pending -> verified transition. `points`
/// always holds the *effective* value: 0 while a row is pending under
/// teacher verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub student_email: String,
    pub category: MediaCategory,
    pub media_title: String,
    pub bonus_claimed: bool,
    pub reflection: String,
    pub points: u32,
    pub verified: bool,
}

/// Append payload; the store assigns the id and the row starts unverified.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub submitted_at: DateTime<Utc>,
    pub student_email: String,
    pub category: MediaCategory,
    pub media_title: String,
    pub bonus_claimed: bool,
    pub reflection: String,
    pub points: u32,
}

/// Inbound student submission as received from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub student_email: String,
    pub category: MediaCategory,
    pub media_title: String,
    #[serde(default)]
    pub bonus_claimed: bool,
    #[serde(default)]
    pub reflection: String,
}

/// Teacher-maintained directory row: who a student is and which class group
/// they belong to. Both fields are optional in practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: Option<String>,
    pub email: String,
    pub class_group: Option<String>,
}

/// Derived per-student totals. Recomputed from the submission log on every
/// read; never stored authoritatively.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub email: String,
    pub name: Option<String>,
    pub class_group: Option<String>,
    pub total_points: u32,
    pub tier: super::tiers::TierDefinition,
}

/// One leaderboard row after filtering, sorting, and rank assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_group: Option<String>,
    pub points: u32,
    pub title: String,
}
