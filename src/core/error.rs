//! Engine error type.
//!
//! Only malformed input is an error. Everything that can go wrong while a
//! night resolves (stale orders, dead targets, emptied pools) is corrected
//! in place and logged instead.

/// Errors raised while validating engine input or building a game.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid player '{alias}': {reason}")]
    InvalidPlayer { alias: String, reason: String },

    #[error("player number {0} is assigned more than once")]
    DuplicateNumber(u8),

    #[error("player number {0} is outside 1..=15")]
    NumberOutOfRange(u8),

    #[error("player '{alias}' has no role")]
    MissingRole { alias: String },

    #[error("player '{alias}' has no number")]
    MissingNumber { alias: String },

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("invalid settings for role {role}: {source}")]
    InvalidRoleSettings {
        role: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("a game needs between 1 and 15 players, got {count}")]
    PlayerCount { count: usize },

    #[error("role draft exhausted for tags {tags:?}")]
    DraftExhausted { tags: Vec<String> },

    #[error("a prior game state is required")]
    MissingState,

    #[error("no actor with number {0}")]
    ActorNotFound(u8),

    #[error("actor {0} is already dead")]
    ActorDead(u8),
}

impl EngineError {
    pub(crate) fn invalid_player(alias: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPlayer {
            alias: alias.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the shape of the input rather than by
    /// a request against the current board.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::ActorNotFound(_) | Self::ActorDead(_) | Self::DraftExhausted { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
