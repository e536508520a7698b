use serde::{Deserialize, Serialize};

/// One achievement tier: unlocked at `threshold` points, carrying the title,
/// congratulations message, and badge image shown to the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDefinition {
    pub threshold: u32,
    pub title: String,
    pub message: String,
    pub badge_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TierError {
    #[error("no tiers configured")]
    NoTiersConfigured,
    #[error("duplicate tier threshold {0}")]
    DuplicateThreshold(u32),
    #[error("tier ladder has no zero-point default tier")]
    MissingDefaultTier,
}

/// Ordered tier table. Construction sorts by threshold and enforces the
/// invariants that make resolution total: thresholds strictly increasing and
/// a zero-point default tier present.
#[derive(Debug, Clone, PartialEq)]
pub struct TierLadder {
    tiers: Vec<TierDefinition>,
}

impl TierLadder {
    pub fn new(mut tiers: Vec<TierDefinition>) -> Result<Self, TierError> {
        if tiers.is_empty() {
            return Err(TierError::NoTiersConfigured);
        }

        tiers.sort_by_key(|tier| tier.threshold);
        for pair in tiers.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(TierError::DuplicateThreshold(pair[0].threshold));
            }
        }
        if tiers[0].threshold != 0 {
            return Err(TierError::MissingDefaultTier);
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// The tier with the largest threshold not exceeding `total_points`.
    /// Total for every non-negative total thanks to the zero-point entry.
    pub fn resolve(&self, total_points: u32) -> Result<&TierDefinition, TierError> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.threshold <= total_points)
            .ok_or(TierError::NoTiersConfigured)
    }

    /// The program's stock mythic ladder, Gnome through Chaos.
    pub fn standard() -> Self {
        let tiers = STANDARD_TIERS
            .iter()
            .map(|(threshold, title, message)| TierDefinition {
                threshold: *threshold,
                title: (*title).to_string(),
                message: (*message).to_string(),
                badge_url: String::new(),
            })
            .collect();

        Self::new(tiers).expect("standard ladder thresholds are valid")
    }
}

const STANDARD_TIERS: &[(u32, &str, &str)] = &[
    (0, "Gnome", "Congratulations! Your journey has begun! As a Gnome, you are a small, earth-dwelling spirit, and your adventure is just starting to take root."),
    (20, "Gremlin", "Congratulations! You've earned the title of Gremlin. Your mischievous nature and ability to cause minor disruptions are making an impact."),
    (30, "Kobold", "Congratulations! You have achieved the title of Kobold. Like this small, house-dwelling spirit, you are showing your presence and building your influence."),
    (35, "Dryad", "Congratulations! For reaching 35 points, you are now a Dryad. Your connection to your environment and ability to grow stronger are becoming apparent."),
    (38, "Satyr", "Congratulations! You've earned the title of Satyr. Your playful, half-goat nature is now recognized, a sign of your spirited approach to the game."),
    (40, "Gorgon", "Congratulations! You've reached 40 points and are now a Gorgon. While a monstrous being, you are showing your power and ability to freeze your opponents in their tracks."),
    (42, "The Answer to the Ultimate Question", "You have achieved the ultimate answer of 42 points and earned the title of The Answer to the Ultimate Question. Be sure to never occupy the same universe as the Ultimate Question."),
    (45, "Griffin", "Congratulations! For reaching 45 points, you are now a Griffin. Your powerful physical presence and dominance are becoming undeniable."),
    (48, "Minotaur", "Congratulations! You have achieved the title of Minotaur. Like this strong, formidable beast, you're a force to be reckoned with in the labyrinth of challenges."),
    (50, "The Sphinx", "Congratulations! You've earned the ultimate title of The Sphinx. Your intelligence and ability to outsmart your opponents are now your greatest weapons."),
    (52, "Hydra", "Congratulations! You've reached 52 points and are now a Hydra. Your ability to regenerate and bounce back from challenges is unmatched."),
    (55, "Fenrir", "Congratulations! You have achieved the title of Fenrir. A powerful, giant wolf, you are feared by your opponents and are poised to challenge even the strongest."),
    (58, "Valkyrie", "Congratulations! For reaching 58 points, you are now a Valkyrie. Your prowess in battle is a sight to behold, guiding the fallen and proving your dominance."),
    (60, "The Chimera", "Congratulations! You have earned the title of The Chimera. Your diverse skills and abilities are blending together into something truly monstrous and unique."),
    (62, "The Kraken", "Congratulations! You've reached 62 points and are now known as The Kraken. Your influence is growing, and your power can be felt across the entire game."),
    (65, "Dragon", "Congratulations! With 65 points, you have reached a new level of power and earned the legendary title of Dragon. You are an awe-inspiring force of nature, a creature of myth and legend, whose might is known throughout the land."),
    (68, "The Djinn", "Congratulations! You have earned the title of The Djinn. Your control over magic and your reality-bending skills are truly powerful."),
    (70, "Anubis", "Congratulations! With 70 points, you are now known as Anubis. Your mastery of the darkest parts of the game and your ability to guide others through the unknown is unmatched."),
    (75, "Hel", "Congratulations! You have earned the title of Hel. Like the ruler of the underworld, you hold absolute power over those who have been defeated."),
    (80, "Odin", "Congratulations! For reaching 80 points, you are now Odin. Your wisdom, command, and ability to see all make you a true leader and a god among men."),
    (85, "Shiva", "Congratulations! You have achieved the title of Shiva the Destroyer. You are a supreme force of destruction and transformation, changing the game with your every move."),
    (90, "Amaterasu", "Congratulations! For reaching 90 points, you have achieved the divine title of Amaterasu. Like the supreme sun goddess, your influence is a source of ultimate life and power, illuminating all who cross your path"),
    (95, "Zeus", "Congratulations! You've earned the ultimate title of Zeus, King of Olympus. You command the sky, and your power over all aspects of the game is undeniable."),
    (100, "Chaos", "Congratulations! You've reached the pinnacle with 100 points and earned the ultimate title of Chaos. You are the primordial force, the beginning and the end of all things. Your dominance is complete."),
];
