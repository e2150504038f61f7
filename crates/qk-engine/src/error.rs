//! Error types for the battle engine.

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A battle was requested for a player with no hit points left.
    #[error("{0} has no HP left and must heal before battling")]
    PlayerDown(String),

    /// A battle was requested against an enemy that is already defeated.
    #[error("{0} is already defeated")]
    EnemyDown(String),

    /// No valid question is available for the requested encounter.
    #[error("no questions available for {0} battles")]
    NoQuestions(String),

    /// A question record is malformed.
    #[error("invalid question '{prompt}': {reason}")]
    InvalidQuestion {
        /// The prompt of the offending question.
        prompt: String,
        /// Why the question was rejected.
        reason: String,
    },

    /// An action was sent to a battle that already ended.
    #[error("battle is already over")]
    BattleOver,

    /// An item key is not in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The player does not own the requested item.
    #[error("you don't have any {0}")]
    ItemUnavailable(String),

    /// The item cannot be used right now.
    #[error("{0}")]
    ItemNotUsable(String),

    /// The player cannot afford a purchase.
    #[error("not enough gold: {price} needed, {gold} available")]
    InsufficientGold {
        /// Price of the item.
        price: u64,
        /// Gold the player holds.
        gold: u64,
    },

    /// A difficulty tag could not be parsed.
    #[error("invalid difficulty: {0}")]
    InvalidDifficulty(String),

    /// A level-up upgrade choice could not be parsed.
    #[error("invalid upgrade choice: {0}")]
    InvalidUpgrade(String),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
