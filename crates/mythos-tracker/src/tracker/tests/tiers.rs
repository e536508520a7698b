use crate::tracker::tiers::{TierDefinition, TierError, TierLadder};

fn tier(threshold: u32, title: &str) -> TierDefinition {
    TierDefinition {
        threshold,
        title: title.to_string(),
        message: format!("You are now a {title}."),
        badge_url: String::new(),
    }
}

#[test]
fn resolution_picks_highest_reached_threshold() {
    let ladder = TierLadder::standard();

    assert_eq!(ladder.resolve(0).unwrap().title, "Gnome");
    assert_eq!(ladder.resolve(19).unwrap().title, "Gnome");
    assert_eq!(ladder.resolve(20).unwrap().title, "Gremlin");
    assert_eq!(ladder.resolve(42).unwrap().title, "The Answer to the Ultimate Question");
    assert_eq!(ladder.resolve(99).unwrap().title, "Zeus");
    assert_eq!(ladder.resolve(100).unwrap().title, "Chaos");
    assert_eq!(ladder.resolve(5000).unwrap().title, "Chaos");
}

#[test]
fn resolution_is_monotonic_over_the_standard_ladder() {
    let ladder = TierLadder::standard();
    let mut last_threshold = 0;
    for total in 0..=120 {
        let resolved = ladder.resolve(total).unwrap();
        assert!(resolved.threshold >= last_threshold);
        assert!(resolved.threshold <= total);
        last_threshold = resolved.threshold;
    }
}

#[test]
fn construction_sorts_unordered_input() {
    let ladder =
        TierLadder::new(vec![tier(50, "Sphinx"), tier(0, "Gnome"), tier(20, "Gremlin")]).unwrap();
    let thresholds: Vec<u32> = ladder.tiers().iter().map(|t| t.threshold).collect();
    assert_eq!(thresholds, vec![0, 20, 50]);
}

#[test]
fn construction_rejects_bad_ladders() {
    assert!(matches!(
        TierLadder::new(vec![]),
        Err(TierError::NoTiersConfigured)
    ));
    assert!(matches!(
        TierLadder::new(vec![tier(0, "Gnome"), tier(20, "A"), tier(20, "B")]),
        Err(TierError::DuplicateThreshold(20))
    ));
    assert!(matches!(
        TierLadder::new(vec![tier(10, "Gnome")]),
        Err(TierError::MissingDefaultTier)
    ));
}

#[test]
fn standard_ladder_spans_gnome_to_chaos() {
    let ladder = TierLadder::standard();
    let tiers = ladder.tiers();
    assert_eq!(tiers.len(), 24);
    assert_eq!(tiers.first().unwrap().title, "Gnome");
    assert_eq!(tiers.last().unwrap().title, "Chaos");
    assert_eq!(tiers.last().unwrap().threshold, 100);
}
