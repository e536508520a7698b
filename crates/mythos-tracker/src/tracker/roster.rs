use std::collections::BTreeMap;

use super::directory::StudentDirectory;
use super::domain::{RankedEntry, RosterEntry, Submission};
use super::tiers::{TierError, TierLadder};

/// Sentinel filter value meaning "no class filter".
pub const ALL_CLASSES: &str = "All Classes";

/// Derives one roster entry per student seen in the submission log.
///
/// Totals sum the *stored* point values, so pending rows contribute their
/// zero and nothing is double-counted. Pure: running this twice over the
/// same log yields identical entries. Grouping is by email ascending, which
/// also fixes the stable base order the leaderboard sort preserves on ties.
pub fn aggregate_roster(
    submissions: &[Submission],
    directory: &StudentDirectory,
    tiers: &TierLadder,
) -> Result<Vec<RosterEntry>, TierError> {
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
    for submission in submissions {
        *totals.entry(submission.student_email.as_str()).or_insert(0) += submission.points;
    }

    let mut entries = Vec::with_capacity(totals.len());
    for (email, total_points) in totals {
        let profile = directory.lookup(email);
        let tier = tiers.resolve(total_points)?.clone();
        entries.push(RosterEntry {
            email: email.to_string(),
            name: profile.and_then(|p| p.name.clone()),
            class_group: profile.and_then(|p| p.class_group.clone()),
            total_points,
            tier,
        });
    }

    Ok(entries)
}

/// Filters, sorts, and ranks roster entries for display.
///
/// An absent, empty, or "All Classes" filter keeps everything; otherwise the
/// trimmed class group must match the trimmed filter exactly. The sort is
/// stable and descending by points; ties keep the aggregator's email order
/// (documented behavior, not a contract).
pub fn build_leaderboard(entries: Vec<RosterEntry>, class_filter: Option<&str>) -> Vec<RankedEntry> {
    let filter = class_filter
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != ALL_CLASSES);

    let mut retained: Vec<RosterEntry> = match filter {
        Some(wanted) => entries
            .into_iter()
            .filter(|entry| {
                entry
                    .class_group
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|group| group == wanted)
            })
            .collect(),
        None => entries,
    };

    retained.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    retained
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let rank = index + 1;
            RankedEntry {
                rank,
                name: display_name(&entry, rank),
                email: entry.email,
                class_group: entry.class_group,
                points: entry.total_points,
                title: entry.tier.title,
            }
        })
        .collect()
}

fn display_name(entry: &RosterEntry, rank: usize) -> String {
    if let Some(name) = entry.name.as_deref() {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let local_part = entry.email.split('@').next().unwrap_or_default();
    if !local_part.is_empty() {
        return local_part.to_string();
    }

    format!("Student {rank}")
}

/// Sorted unique class groups across the derived roster, skipping students
/// the directory has no group for.
pub fn class_groups(entries: &[RosterEntry]) -> Vec<String> {
    let mut groups: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.class_group.as_deref())
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect();
    groups.sort();
    groups.dedup();
    groups
}
