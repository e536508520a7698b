use std::sync::Arc;

use chrono::Utc;

use super::directory::StudentDirectory;
use super::domain::{
    NewSubmission, RankedEntry, RosterEntry, Submission, SubmissionId, SubmissionRequest,
};
use super::images::{normalize_image_url, validate_image_url, POINTS_PLACEHOLDER};
use super::roster::{aggregate_roster, build_leaderboard, class_groups};
use super::scoring::{ScoringConfig, ScoringError};
use super::store::{Notifier, NotifyError, PointsUpdate, StoreError, SubmissionStore};
use super::tiers::{TierError, TierLadder};

/// Program-level settings the service evaluates against: the point rule
/// table, the tier ladder, and whether awards wait for teacher sign-off.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub scoring: ScoringConfig,
    pub tiers: TierLadder,
    pub verification_enabled: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            tiers: TierLadder::standard(),
            verification_enabled: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("submission {0} is already verified")]
    AlreadyVerified(SubmissionId),
    #[error("submission {0} does not exist")]
    InvalidSubmissionReference(SubmissionId),
    #[error(transparent)]
    Tier(#[from] TierError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Outcome returned to the submitting student.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionReceipt {
    pub submission_id: SubmissionId,
    pub points_awarded: u32,
    pub pending: bool,
    pub message: String,
}

/// Outcome of verifying one pending submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VerificationReceipt {
    pub submission_id: SubmissionId,
    pub points: u32,
    pub new_total: u32,
    pub message: String,
}

/// Per-id result of a batch verification pass.
#[derive(Debug)]
pub struct BatchVerifyOutcome {
    pub submission_id: SubmissionId,
    pub result: Result<VerificationReceipt, TrackerError>,
}

/// Orchestrates the submission lifecycle over a [`SubmissionStore`] and a
/// [`Notifier`]. Holds no per-student state of its own: totals, ordinals,
/// and tiers are all recomputed from the log on each call.
pub struct TrackerService<S, N>
where
    S: SubmissionStore,
    N: Notifier,
{
    config: TrackerConfig,
    store: Arc<S>,
    notifier: Arc<N>,
    directory: StudentDirectory,
}

impl<S, N> TrackerService<S, N>
where
    S: SubmissionStore,
    N: Notifier,
{
    pub fn new(
        config: TrackerConfig,
        store: Arc<S>,
        notifier: Arc<N>,
        directory: StudentDirectory,
    ) -> Self {
        Self {
            config,
            store,
            notifier,
            directory,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Records a new submission and, when verification is disabled, awards
    /// points and notifies the student immediately.
    ///
    /// The ordinal for the rule lookup counts rows already in the log for the
    /// same (student, category) pair, pending or not. With verification
    /// enabled the row is stored with zero points and waits for a teacher.
    /// A notification failure in immediate mode is reported to the caller,
    /// but the row has already been committed by then.
    pub fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt, TrackerError> {
        let email = request.student_email.trim().to_string();
        let existing = self.store.all()?;

        let prior_count = existing
            .iter()
            .filter(|row| row.student_email == email && row.category == request.category)
            .count();
        let old_total: u32 = existing
            .iter()
            .filter(|row| row.student_email == email)
            .map(|row| row.points)
            .sum();

        let points = self
            .config
            .scoring
            .score(request.category, prior_count, request.bonus_claimed)?;
        let awarded = if self.config.verification_enabled {
            0
        } else {
            points
        };

        let submission = self.store.append(NewSubmission {
            submitted_at: Utc::now(),
            student_email: email.clone(),
            category: request.category,
            media_title: request.media_title,
            bonus_claimed: request.bonus_claimed,
            reflection: request.reflection,
            points: awarded,
        })?;

        tracing::info!(
            submission_id = %submission.id,
            student = %email,
            category = %request.category,
            points = awarded,
            pending = self.config.verification_enabled,
            "submission recorded"
        );

        if self.config.verification_enabled {
            return Ok(SubmissionReceipt {
                submission_id: submission.id,
                points_awarded: 0,
                pending: true,
                message: "Submission received! Your submission is pending teacher verification."
                    .to_string(),
            });
        }

        self.send_update(&email, old_total, old_total + points)?;

        Ok(SubmissionReceipt {
            submission_id: submission.id,
            points_awarded: points,
            pending: false,
            message:
                "Submission received! An email has been sent to you with an update on your points."
                    .to_string(),
        })
    }

    /// Awards points to one pending submission.
    ///
    /// The score is recomputed at verification time against the log as it
    /// stands, excluding the row being verified from its own ordinal count.
    /// The notification is best-effort here: a send failure is logged and
    /// the verification still succeeds, since the points are already down.
    pub fn verify(&self, id: SubmissionId) -> Result<VerificationReceipt, TrackerError> {
        let existing = self.store.all()?;
        let submission = existing
            .iter()
            .find(|row| row.id == id)
            .ok_or(TrackerError::InvalidSubmissionReference(id))?;
        if submission.verified {
            return Err(TrackerError::AlreadyVerified(id));
        }

        let pair_count = existing
            .iter()
            .filter(|row| {
                row.student_email == submission.student_email
                    && row.category == submission.category
            })
            .count();
        let prior_count = pair_count.saturating_sub(1);

        let points = self.config.scoring.score(
            submission.category,
            prior_count,
            submission.bonus_claimed,
        )?;
        // Exclude this row's own stored value: with verification disabled it
        // already carries its award, and counting it again would inflate the
        // reported total.
        let old_total: u32 = existing
            .iter()
            .filter(|row| row.student_email == submission.student_email && row.id != id)
            .map(|row| row.points)
            .sum();
        let new_total = old_total + points;

        self.store.mark_verified(id, points)?;

        tracing::info!(
            submission_id = %id,
            student = %submission.student_email,
            points,
            new_total,
            "submission verified"
        );

        if let Err(error) = self.send_update(&submission.student_email, old_total, new_total) {
            tracing::warn!(
                submission_id = %id,
                student = %submission.student_email,
                %error,
                "points were recorded but the notification failed"
            );
        }

        Ok(VerificationReceipt {
            submission_id: id,
            points,
            new_total,
            message: "Submission verified successfully and student has been notified.".to_string(),
        })
    }

    /// Verifies a batch of submissions one by one. A failure on one id never
    /// aborts the rest; each outcome carries its own result.
    pub fn verify_batch(&self, ids: &[SubmissionId]) -> Vec<BatchVerifyOutcome> {
        ids.iter()
            .map(|&id| BatchVerifyOutcome {
                submission_id: id,
                result: self.verify(id),
            })
            .collect()
    }

    /// Submissions still awaiting teacher sign-off, oldest first.
    pub fn pending(&self) -> Result<Vec<Submission>, TrackerError> {
        let mut rows = self.store.all()?;
        rows.retain(|row| !row.verified);
        Ok(rows)
    }

    /// Per-student totals and tiers, derived fresh from the log.
    pub fn roster(&self) -> Result<Vec<RosterEntry>, TrackerError> {
        let rows = self.store.all()?;
        Ok(aggregate_roster(&rows, &self.directory, &self.config.tiers)?)
    }

    /// Ranked leaderboard, optionally restricted to one class group.
    pub fn leaderboard(&self, class_filter: Option<&str>) -> Result<Vec<RankedEntry>, TrackerError> {
        Ok(build_leaderboard(self.roster()?, class_filter))
    }

    /// Sorted unique class groups seen across the roster.
    pub fn class_groups(&self) -> Result<Vec<String>, TrackerError> {
        Ok(class_groups(&self.roster()?))
    }

    fn send_update(&self, email: &str, old_total: u32, new_total: u32) -> Result<(), NotifyError> {
        let old_tier = match self.config.tiers.resolve(old_total) {
            Ok(tier) => tier,
            Err(error) => {
                tracing::warn!(%error, "tier resolution failed; skipping notification");
                return Ok(());
            }
        };
        let new_tier = match self.config.tiers.resolve(new_total) {
            Ok(tier) => tier,
            Err(error) => {
                tracing::warn!(%error, "tier resolution failed; skipping notification");
                return Ok(());
            }
        };

        let leveled_up = old_tier.title != new_tier.title;
        let message = if leveled_up {
            new_tier.message.clone()
        } else {
            format!(
                "You've earned new points! Your total is now {new_total}. \
                 Keep going to reach the next title: {}.",
                new_tier.title
            )
        };

        let badge_url = {
            let normalized = normalize_image_url(&new_tier.badge_url);
            if validate_image_url(&normalized) {
                normalized
            } else {
                POINTS_PLACEHOLDER.to_string()
            }
        };

        self.notifier.send(PointsUpdate {
            recipient: email.to_string(),
            total_points: new_total,
            old_title: old_tier.title.clone(),
            new_title: new_tier.title.clone(),
            message,
            badge_url,
            leveled_up,
        })
    }
}
