use serde::{Deserialize, Serialize};

use super::domain::{NewSubmission, Submission, SubmissionId};

/// Storage abstraction over the durable submission log so the service can be
/// exercised in isolation. Three operations: read-all, append, and the single
/// permitted update (points + verified, set together).
pub trait SubmissionStore: Send + Sync {
    fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError>;
    fn mark_verified(&self, id: SubmissionId, points: u32) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<Submission>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission not found")]
    NotFound,
    #[error("submission log unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the outbound notification hook (e.g., a mail adapter).
/// The core hands over fully resolved content; the adapter never consults
/// the tier table or settings itself.
pub trait Notifier: Send + Sync {
    fn send(&self, update: PointsUpdate) -> Result<(), NotifyError>;
}

/// Payload for one student notification after points change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsUpdate {
    pub recipient: String,
    pub total_points: u32,
    pub old_title: String,
    pub new_title: String,
    pub message: String,
    pub badge_url: String,
    pub leveled_up: bool,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
