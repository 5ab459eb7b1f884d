//! Timeline ordering game.
//!
//! Everything between a loaded topic and a score: flattening the bucket
//! partition into a reading order, indexing which bucket every event belongs
//! to, dealing shuffled orders, scoring a submitted order by partial-order
//! accuracy and sampling claims for tooltips. Game state lives in an explicit
//! [`GameSession`] owned by the caller.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Topic   ┌──────────────────────────────────────────┐
//! │ topic-events │ ────────▶ │ timeline ─ ground_truth ─ shuffle ─ scorer │
//! └──────────────┘           └──────────────────────────────────────────┘
//!        ▲                                   │
//!   collection / indexer                 GameSession
//! ```
//!
//! # Modules
//!
//! - [`timeline`]: Lazy bucket-ordered flattening of a topic
//! - [`ground_truth`]: Event to bucket index
//! - [`shuffle`]: Uniform shuffles of bucketed events
//! - [`scorer`]: PO-Accuracy scoring
//! - [`claims`]: Tooltip claim sampling
//! - [`session`]: One play-through of the ordering game
//! - [`collection`]: Concurrent loading of every catalogued topic
//! - [`indexer`]: Catalog generation from a data directory
//! - [`config`]: TOML configuration

pub mod claims;
pub mod collection;
pub mod config;
pub mod ground_truth;
pub mod indexer;
pub mod scorer;
pub mod session;
pub mod shuffle;
pub mod timeline;

// Re-export game types
pub use ground_truth::GroundTruth;
pub use scorer::{score_detailed, score_order, PoScore, ScoreReport};
pub use session::{GameSession, SessionError, SessionSummary};
pub use shuffle::{bucketed_events, shuffle, shuffle_in_place};
pub use timeline::{flatten, Timeline, TimelineEntry};

pub use claims::{sample_claims, sample_topic_claims, DEFAULT_CLAIM_CAP};

// Re-export loading types
pub use collection::{load_topic, LoadFailure, LoadedTopic, TopicCollection};
pub use indexer::{scan_catalog, write_catalog, IndexError};

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, DataConfig, GameConfig, LoadingConfig, ShowcaseConfig,
    TomlSerializeError,
};

use topic_events::LoadError;

/// Errors that can occur anywhere in the showcase.
#[derive(Debug)]
pub enum ShowcaseError {
    /// Error loading configuration
    Config(ConfigError),
    /// Error loading a catalog or topic
    Load(LoadError),
    /// Error building or writing a catalog
    Index(IndexError),
    /// Invalid game session operation
    Session(SessionError),
    /// No loaded topic has this id
    UnknownTopic(String),
}

impl std::fmt::Display for ShowcaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShowcaseError::Config(e) => write!(f, "Config error: {}", e),
            ShowcaseError::Load(e) => write!(f, "Load error: {}", e),
            ShowcaseError::Index(e) => write!(f, "Index error: {}", e),
            ShowcaseError::Session(e) => write!(f, "Session error: {}", e),
            ShowcaseError::UnknownTopic(id) => write!(f, "Unknown topic: {}", id),
        }
    }
}

impl std::error::Error for ShowcaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowcaseError::Config(e) => Some(e),
            ShowcaseError::Load(e) => Some(e),
            ShowcaseError::Index(e) => Some(e),
            ShowcaseError::Session(e) => Some(e),
            ShowcaseError::UnknownTopic(_) => None,
        }
    }
}

impl From<ConfigError> for ShowcaseError {
    fn from(e: ConfigError) -> Self {
        ShowcaseError::Config(e)
    }
}

impl From<LoadError> for ShowcaseError {
    fn from(e: LoadError) -> Self {
        ShowcaseError::Load(e)
    }
}

impl From<IndexError> for ShowcaseError {
    fn from(e: IndexError) -> Self {
        ShowcaseError::Index(e)
    }
}

impl From<SessionError> for ShowcaseError {
    fn from(e: SessionError) -> Self {
        ShowcaseError::Session(e)
    }
}
