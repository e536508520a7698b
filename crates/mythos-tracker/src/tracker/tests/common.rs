use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::tracker::directory::StudentDirectory;
use crate::tracker::domain::{
    MediaCategory, NewSubmission, StudentProfile, Submission, SubmissionId, SubmissionRequest,
};
use crate::tracker::service::{TrackerConfig, TrackerService};
use crate::tracker::store::{
    Notifier, NotifyError, PointsUpdate, StoreError, SubmissionStore,
};

#[derive(Default)]
pub(super) struct MemoryStore {
    rows: Mutex<Vec<Submission>>,
}

impl SubmissionStore for MemoryStore {
    fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut rows = self.rows.lock().expect("store lock");
        let row = Submission {
            id: SubmissionId(rows.len() as u64 + 1),
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
        let mut rows = self.rows.lock().expect("store lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound)?;
        row.points = points;
        row.verified = true;
        Ok(())
    }

    fn all(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.rows.lock().expect("store lock").clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<PointsUpdate>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<PointsUpdate> {
        self.sent.lock().expect("notifier lock").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, update: PointsUpdate) -> Result<(), NotifyError> {
        self.sent.lock().expect("notifier lock").push(update);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, _update: PointsUpdate) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("mailbox offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl SubmissionStore for UnavailableStore {
    fn append(&self, _submission: NewSubmission) -> Result<Submission, StoreError> {
        Err(StoreError::Unavailable("log offline".to_string()))
    }

    fn mark_verified(&self, _id: SubmissionId, _points: u32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("log offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Submission>, StoreError> {
        Err(StoreError::Unavailable("log offline".to_string()))
    }
}

pub(super) fn directory() -> StudentDirectory {
    StudentDirectory::new([
        StudentProfile {
            name: Some("Asha Bell".to_string()),
            email: "asha@school.org".to_string(),
            class_group: Some("Period 2".to_string()),
        },
        StudentProfile {
            name: Some("Milo Frey".to_string()),
            email: "milo@school.org".to_string(),
            class_group: Some("Period 4".to_string()),
        },
        StudentProfile {
            name: None,
            email: "nia@school.org".to_string(),
            class_group: Some("Period 2".to_string()),
        },
    ])
}

pub(super) fn build_service(
    verification_enabled: bool,
) -> (
    Arc<TrackerService<MemoryStore, MemoryNotifier>>,
    Arc<MemoryStore>,
    Arc<MemoryNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let config = TrackerConfig {
        verification_enabled,
        ..TrackerConfig::default()
    };
    let service = Arc::new(TrackerService::new(
        config,
        Arc::clone(&store),
        Arc::clone(&notifier),
        directory(),
    ));
    (service, store, notifier)
}

pub(super) fn request(
    email: &str,
    category: MediaCategory,
    title: &str,
    bonus: bool,
) -> SubmissionRequest {
    SubmissionRequest {
        student_email: email.to_string(),
        category,
        media_title: title.to_string(),
        bonus_claimed: bonus,
        reflection: "It connects to the myth of Persephone.".to_string(),
    }
}

pub(super) fn stored_row(
    id: u64,
    email: &str,
    category: MediaCategory,
    points: u32,
    verified: bool,
) -> Submission {
    Submission {
        id: SubmissionId(id),
        submitted_at: Utc::now(),
        student_email: email.to_string(),
        category,
        media_title: "Sample".to_string(),
        bonus_claimed: false,
        reflection: String::new(),
        points,
        verified,
    }
}
