//! Submission intake, scoring, verification, and leaderboard derivation for
//! the reading-incentive program.
//!
//! The tabular submission log and the outbound notifier are collaborators
//! behind the traits in [`store`]; everything else here is deterministic
//! in-memory computation over data read once per operation.

pub mod directory;
pub mod domain;
pub mod images;
pub mod import;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryImportError, StudentDirectory};
pub use domain::{
    MediaCategory, NewSubmission, RankedEntry, RosterEntry, StudentProfile, Submission,
    SubmissionId, SubmissionRequest,
};
pub use import::{SubmissionImportError, SubmissionLog};
pub use roster::{aggregate_roster, build_leaderboard};
pub use router::tracker_router;
pub use scoring::{PointRule, ScoringConfig, ScoringError};
pub use service::{
    BatchVerifyOutcome, SubmissionReceipt, TrackerConfig, TrackerError, TrackerService,
    VerificationReceipt,
};
pub use store::{Notifier, NotifyError, PointsUpdate, StoreError, SubmissionStore};
pub use tiers::{TierDefinition, TierError, TierLadder};
