//! Integration scenarios for the submission, verification, and leaderboard
//! workflow, driven through the public service facade and HTTP router.

mod common {
    use std::sync::{Arc, Mutex};

    use mythos_tracker::tracker::{
        MediaCategory, NewSubmission, Notifier, NotifyError, PointsUpdate, StoreError,
        StudentDirectory, StudentProfile, Submission, SubmissionId, SubmissionRequest,
        SubmissionStore, TrackerConfig, TrackerService,
    };

    #[derive(Default)]
    pub(super) struct MemoryStore {
        rows: Mutex<Vec<Submission>>,
    }

    impl SubmissionStore for MemoryStore {
        fn append(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
            let mut rows = self.rows.lock().expect("lock");
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
            let mut rows = self.rows.lock().expect("lock");
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(StoreError::NotFound)?;
            row.points = points;
            row.verified = true;
            Ok(())
        }

        fn all(&self) -> Result<Vec<Submission>, StoreError> {
            Ok(self.rows.lock().expect("lock").clone())
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryNotifier {
        sent: Mutex<Vec<PointsUpdate>>,
    }

    impl MemoryNotifier {
        pub(super) fn sent(&self) -> Vec<PointsUpdate> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl Notifier for MemoryNotifier {
        fn send(&self, update: PointsUpdate) -> Result<(), NotifyError> {
            self.sent.lock().expect("lock").push(update);
            Ok(())
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
            reflection: "Reminds me of the Odyssey.".to_string(),
        }
    }
}

mod intake {
    use super::common::*;
    use mythos_tracker::tracker::MediaCategory;

    #[test]
    fn a_semester_of_submissions_builds_the_expected_totals() {
        let (service, _, notifier) = build_service(false);

        // Written stories step 20/10/5; the second carries the myth bonus.
        for (title, bonus) in [("Circe", false), ("Mythos", true), ("Ariadne", false)] {
            service
                .submit(request(
                    "asha@school.org",
                    MediaCategory::WrittenStory,
                    title,
                    bonus,
                ))
                .expect("submission succeeds");
        }

        let roster = service.roster().expect("roster");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].total_points, 40);
        assert_eq!(roster[0].tier.title, "Gorgon");
        assert_eq!(notifier.sent().len(), 3);
    }

    #[test]
    fn crossing_a_threshold_sends_the_tier_message() {
        let (service, _, notifier) = build_service(false);

        service
            .submit(request(
                "asha@school.org",
                MediaCategory::WrittenStory,
                "Circe",
                false,
            ))
            .expect("submission succeeds");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].leveled_up);
        assert_eq!(sent[0].old_title, "Gnome");
        assert_eq!(sent[0].new_title, "Gremlin");
        assert!(sent[0].message.contains("Gremlin"));
    }
}

mod verification {
    use super::common::*;
    use mythos_tracker::tracker::{MediaCategory, SubmissionStore, TrackerError};

    #[test]
    fn pending_rows_earn_nothing_until_a_teacher_signs_off() {
        let (service, store, notifier) = build_service(true);

        let receipt = service
            .submit(request(
                "milo@school.org",
                MediaCategory::VideoGame,
                "Hades",
                false,
            ))
            .expect("submission succeeds");
        assert!(receipt.pending);
        assert!(notifier.sent().is_empty());

        let verified = service.verify(receipt.submission_id).expect("verify");
        assert_eq!(verified.points, 10);
        assert_eq!(verified.new_total, 10);

        let rows = store.all().expect("rows");
        assert!(rows[0].verified);
        assert_eq!(notifier.sent().len(), 1);

        match service.verify(receipt.submission_id) {
            Err(TrackerError::AlreadyVerified(id)) => assert_eq!(id, receipt.submission_id),
            other => panic!("expected already-verified error, got {other:?}"),
        }
    }

    #[test]
    fn batch_verification_continues_past_bad_ids() {
        let (service, _, _) = build_service(true);

        let first = service
            .submit(request(
                "asha@school.org",
                MediaCategory::PodcastAudio,
                "Mythos Pod",
                false,
            ))
            .expect("submission succeeds");

        let outcomes = service.verify_batch(&[
            mythos_tracker::tracker::SubmissionId(77),
            first.submission_id,
        ]);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert!(service.pending().expect("pending").is_empty());
    }
}

mod http {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use mythos_tracker::tracker::tracker_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn submission_flows_from_route_to_leaderboard() {
        let (service, _, _) = build_service(false);
        let router = tracker_router(service);

        let payload = json!({
            "student_email": "asha@school.org",
            "category": "written_story",
            "media_title": "Circe",
        });
        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/submissions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).expect("encode")))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let board = router
            .oneshot(
                Request::get("/api/v1/leaderboard")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(board.status(), StatusCode::OK);

        let body = body_json(board).await;
        let rows = body.as_array().expect("array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("Asha Bell"));
        assert_eq!(rows[0]["points"], json!(20));
        assert_eq!(rows[0]["title"], json!("Gremlin"));
        assert_eq!(rows[0]["rank"], json!(1));
    }
}

mod leaderboard {
    use super::common::*;
    use mythos_tracker::tracker::MediaCategory;

    #[test]
    fn class_filter_narrows_the_board() {
        let (service, _, _) = build_service(false);
        service
            .submit(request(
                "asha@school.org",
                MediaCategory::WrittenStory,
                "Circe",
                false,
            ))
            .expect("submission succeeds");
        service
            .submit(request(
                "milo@school.org",
                MediaCategory::VideoGame,
                "Hades",
                false,
            ))
            .expect("submission succeeds");

        let all = service.leaderboard(Some("All Classes")).expect("board");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].email, "asha@school.org");

        let period_four = service.leaderboard(Some("Period 4")).expect("board");
        assert_eq!(period_four.len(), 1);
        assert_eq!(period_four[0].name, "Milo Frey");
        assert_eq!(period_four[0].rank, 1);

        assert_eq!(
            service.class_groups().expect("groups"),
            vec!["Period 2".to_string(), "Period 4".to_string()]
        );
    }
}
