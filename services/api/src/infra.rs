use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use mythos_tracker::config::ProgramConfig;
use mythos_tracker::tracker::{
    NewSubmission, Notifier, NotifyError, PointsUpdate, StoreError, StudentDirectory, Submission,
    SubmissionId, SubmissionStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Submission log backed by process memory. Ids are assigned from the row
/// position, matching the numbering an imported log export would carry.
#[derive(Default)]
pub(crate) struct InMemorySubmissionStore {
    rows: Mutex<Vec<Submission>>,
}

impl InMemorySubmissionStore {
    pub(crate) fn seeded(rows: Vec<Submission>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let next_id = rows.iter().map(|row| row.id.0).max().unwrap_or(0) + 1;
        let row = Submission {
            id: SubmissionId(next_id),
            submitted_at: submission.submitted_at,
            student_email: submission.student_email,
            category: submission.category,
            media_title: submission.media_title,
            bonus_claimed: submission.bonus_claimed,
            reflection: submission.reflection,
            points: submission.points,
            verified: false,
        };
        rows.push(row.clone());
        Ok(row)
    }

    fn mark_verified(&self, id: SubmissionId, points: u32) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound)?;
        row.points = points;
        row.verified = true;
        Ok(())
    }

    fn all(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.rows.lock().expect("store mutex poisoned").clone())
    }
}

/// Notifier that logs each delivery instead of sending mail. Stands in for a
/// real mail adapter behind the same trait.
#[derive(Default)]
pub(crate) struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send(&self, update: PointsUpdate) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = %update.recipient,
            total_points = update.total_points,
            new_title = %update.new_title,
            leveled_up = update.leveled_up,
            "points notification dispatched"
        );
        Ok(())
    }
}

/// Notifier that records deliveries for inspection, used by the CLI demo.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<PointsUpdate>>,
}

impl RecordingNotifier {
    pub(crate) fn events(&self) -> Vec<PointsUpdate> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, update: PointsUpdate) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(update);
        Ok(())
    }
}

pub(crate) fn load_directory(
    program: &ProgramConfig,
) -> Result<StudentDirectory, mythos_tracker::error::AppError> {
    match &program.roster_path {
        Some(path) => {
            let directory = StudentDirectory::from_path(path)?;
            tracing::info!(students = directory.len(), path = %path.display(), "roster loaded");
            Ok(directory)
        }
        None => Ok(StudentDirectory::default()),
    }
}
