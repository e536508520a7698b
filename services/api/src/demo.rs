use crate::infra::{InMemorySubmissionStore, RecordingNotifier};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use mythos_tracker::error::AppError;
use mythos_tracker::tracker::{
    aggregate_roster, build_leaderboard, MediaCategory, RankedEntry, StudentDirectory,
    StudentProfile, SubmissionLog, SubmissionRequest, TierLadder, TrackerConfig, TrackerService,
};

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// Exported submission log (CSV)
    #[arg(long)]
    pub(crate) submissions: PathBuf,
    /// Optional student roster (CSV) for names and class groups
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Restrict the board to one class group
    #[arg(long)]
    pub(crate) class: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional student roster (CSV) to use instead of the built-in sample
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let LeaderboardArgs {
        submissions,
        roster,
        class,
    } = args;

    let rows = SubmissionLog::from_path(&submissions)?;
    let directory = match roster {
        Some(path) => StudentDirectory::from_path(&path)?,
        None => StudentDirectory::default(),
    };

    let entries = aggregate_roster(&rows, &directory, &TierLadder::standard())
        .map_err(mythos_tracker::tracker::TrackerError::from)?;
    let pending = rows.iter().filter(|row| !row.verified).count();
    let board = build_leaderboard(entries, class.as_deref());

    println!(
        "Leaderboard ({} submissions, {} pending verification)",
        rows.len(),
        pending
    );
    if let Some(class) = class {
        println!("Class filter: {class}");
    }
    render_board(&board);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = match args.roster {
        Some(path) => StudentDirectory::from_path(&path)?,
        None => sample_directory(),
    };

    println!("Reading tracker demo");

    println!("\n== Immediate-award mode ==");
    let (service, notifier) = build_demo_service(false, directory.clone());
    for (email, category, title, bonus) in sample_submissions() {
        let receipt = service.submit(SubmissionRequest {
            student_email: email.to_string(),
            category,
            media_title: title.to_string(),
            bonus_claimed: bonus,
            reflection: String::new(),
        })?;
        println!(
            "- {email}: \"{title}\" -> {} points ({})",
            receipt.points_awarded,
            category.label()
        );
    }

    println!("\nNotifications dispatched:");
    for update in notifier.events() {
        let marker = if update.leveled_up { " [level up!]" } else { "" };
        println!(
            "- {} now at {} points, title {}{}",
            update.recipient, update.total_points, update.new_title, marker
        );
    }

    println!("\nLeaderboard:");
    render_board(&service.leaderboard(None)?);

    println!("\n== Teacher-verification mode ==");
    let (service, _) = build_demo_service(true, directory);
    let mut ids = Vec::new();
    for (email, category, title, bonus) in sample_submissions().into_iter().take(3) {
        let receipt = service.submit(SubmissionRequest {
            student_email: email.to_string(),
            category,
            media_title: title.to_string(),
            bonus_claimed: bonus,
            reflection: String::new(),
        })?;
        println!("- {email}: \"{title}\" -> {}", receipt.message);
        ids.push(receipt.submission_id);
    }

    println!("\nPending queue: {} submissions", service.pending()?.len());

    println!("\nVerifying the queue:");
    for outcome in service.verify_batch(&ids) {
        match outcome.result {
            Ok(receipt) => println!(
                "- {} verified: {} points (total {})",
                outcome.submission_id, receipt.points, receipt.new_total
            ),
            Err(err) => println!("- {} failed: {err}", outcome.submission_id),
        }
    }

    println!("\nLeaderboard after verification:");
    render_board(&service.leaderboard(None)?);

    Ok(())
}

fn build_demo_service(
    verification_enabled: bool,
    directory: StudentDirectory,
) -> (
    Arc<TrackerService<InMemorySubmissionStore, RecordingNotifier>>,
    Arc<RecordingNotifier>,
) {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = TrackerConfig {
        verification_enabled,
        ..TrackerConfig::default()
    };
    let service = Arc::new(TrackerService::new(
        config,
        Arc::new(InMemorySubmissionStore::default()),
        Arc::clone(&notifier),
        directory,
    ));
    (service, notifier)
}

fn sample_directory() -> StudentDirectory {
    StudentDirectory::new([
        StudentProfile {
            name: Some("Asha Bell".to_string()),
            email: "asha@school.example".to_string(),
            class_group: Some("Period 2".to_string()),
        },
        StudentProfile {
            name: Some("Milo Frey".to_string()),
            email: "milo@school.example".to_string(),
            class_group: Some("Period 4".to_string()),
        },
        StudentProfile {
            name: Some("Nia Park".to_string()),
            email: "nia@school.example".to_string(),
            class_group: Some("Period 2".to_string()),
        },
    ])
}

fn sample_submissions() -> Vec<(&'static str, MediaCategory, &'static str, bool)> {
    vec![
        ("asha@school.example", MediaCategory::WrittenStory, "Circe", false),
        ("asha@school.example", MediaCategory::WrittenStory, "Mythos", true),
        ("milo@school.example", MediaCategory::VideoGame, "Hades", true),
        ("nia@school.example", MediaCategory::GraphicNovel, "Lore Olympus", false),
        ("milo@school.example", MediaCategory::PodcastAudio, "Myths and Legends", false),
    ]
}

fn render_board(board: &[RankedEntry]) {
    if board.is_empty() {
        println!("  (no students yet)");
        return;
    }
    for entry in board {
        let class = entry.class_group.as_deref().unwrap_or("-");
        println!(
            "  {:>2}. {} ({}) - {} points, {}",
            entry.rank, entry.name, class, entry.points, entry.title
        );
    }
}
