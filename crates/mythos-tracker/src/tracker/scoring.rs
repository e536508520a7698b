use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::MediaCategory;

/// Point values awarded for the first, second, and third-or-later submission
/// of a category by the same student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRule {
    pub first: u32,
    pub second: u32,
    pub third_plus: u32,
}

impl PointRule {
    pub const fn points_for(&self, prior_count: usize) -> u32 {
        match prior_count {
            0 => self.first,
            1 => self.second,
            _ => self.third_plus,
        }
    }
}

/// Error raised when a submission names a category the rule table does not
/// cover. A caller input bug, not a runtime fault.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("no point rule configured for category '{0}'")]
    UnknownCategory(MediaCategory),
}

/// The program's scoring table plus the flat connects-to-a-myth bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    rules: BTreeMap<MediaCategory, PointRule>,
    pub bonus_points: u32,
}

impl ScoringConfig {
    pub fn new(rules: BTreeMap<MediaCategory, PointRule>, bonus_points: u32) -> Self {
        Self {
            rules,
            bonus_points,
        }
    }

    pub fn rule(&self, category: MediaCategory) -> Option<&PointRule> {
        self.rules.get(&category)
    }

    /// Score one submission. Pure: the caller supplies the count of
    /// already-recorded submissions for the same (student, category) pair,
    /// and the bonus is a flat add regardless of ordinal or category.
    pub fn score(
        &self,
        category: MediaCategory,
        prior_count: usize,
        bonus_claimed: bool,
    ) -> Result<u32, ScoringError> {
        let rule = self
            .rules
            .get(&category)
            .ok_or(ScoringError::UnknownCategory(category))?;

        let mut points = rule.points_for(prior_count);
        if bonus_claimed {
            points += self.bonus_points;
        }
        Ok(points)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            MediaCategory::WrittenStory,
            PointRule {
                first: 20,
                second: 10,
                third_plus: 5,
            },
        );
        rules.insert(
            MediaCategory::MovieTvPlay,
            PointRule {
                first: 10,
                second: 5,
                third_plus: 1,
            },
        );
        rules.insert(
            MediaCategory::VideoGame,
            PointRule {
                first: 10,
                second: 5,
                third_plus: 1,
            },
        );
        rules.insert(
            MediaCategory::PodcastAudio,
            PointRule {
                first: 10,
                second: 5,
                third_plus: 1,
            },
        );
        rules.insert(
            MediaCategory::GraphicNovel,
            PointRule {
                first: 10,
                second: 5,
                third_plus: 1,
            },
        );
        rules.insert(
            MediaCategory::Other,
            PointRule {
                first: 5,
                second: 1,
                third_plus: 0,
            },
        );

        Self {
            rules,
            bonus_points: 5,
        }
    }
}
