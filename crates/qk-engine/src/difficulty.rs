//! Battle difficulty tags.

use serde::{Deserialize, Serialize};

/// The difficulty of an encounter or the tier of a question.
///
/// `Random` only exists for encounters: it fights a medium enemy with a
/// mixed pool of easy, medium and hard questions. Question records never
/// carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Slimes.
    Easy,
    /// Goblins.
    Medium,
    /// Orcs.
    Hard,
    /// Dragons.
    Boss,
    /// A mystery mix of the lower tiers.
    Random,
}

impl Difficulty {
    /// Parse a difficulty from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Some(Self::Easy),
            "medium" | "2" => Some(Self::Medium),
            "hard" | "3" => Some(Self::Hard),
            "boss" | "4" => Some(Self::Boss),
            "random" | "mix" | "5" => Some(Self::Random),
            _ => None,
        }
    }

    /// All difficulties in menu order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Easy,
            Self::Medium,
            Self::Hard,
            Self::Boss,
            Self::Random,
        ]
    }

    /// The tiers a question record may carry.
    pub fn question_tiers() -> &'static [Self] {
        &[Self::Easy, Self::Medium, Self::Hard, Self::Boss]
    }

    /// Whether a defeat at this difficulty rolls back score and xp and
    /// costs gold.
    pub fn penalizes_defeat(self) -> bool {
        !matches!(self, Self::Easy)
    }

    /// Lowercase tag as stored in question and save files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Boss => "boss",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
            Self::Boss => write!(f, "Boss"),
            Self::Random => write!(f, "Random"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::EngineError::InvalidDifficulty(s.to_string()))
    }
}
