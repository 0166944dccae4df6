use std::fmt;
use thiserror::Error;

/// The kind of entity a lookup failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Player,
    Match,
    Pair,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Team => write!(f, "Team"),
            EntityKind::Player => write!(f, "Player"),
            EntityKind::Match => write!(f, "Match"),
            EntityKind::Pair => write!(f, "Pair"),
            EntityKind::User => write!(f, "User"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u32 },

    #[error("Player {player_id} does not belong to either team in match {match_id}")]
    NotEligible { match_id: u32, player_id: u32 },

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Invalid pair number: {0} (expected 1-9)")]
    InvalidPairNumber(u8),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid points convention: {0}")]
    InvalidConvention(String),

    #[error("Invalid score notation: {0}")]
    Notation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl LeagueError {
    pub fn not_found(kind: EntityKind, id: u32) -> Self {
        LeagueError::NotFound { kind, id }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
