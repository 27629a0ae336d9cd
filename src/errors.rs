use thiserror::Error;

/// Hard errors for reference-data lookups.
///
/// These are the only errors the engine treats as exceptional: a species,
/// ability, or item id that the repository has never seen. Ordinary gameplay
/// failures (bad switch target, wrong battle kind for an action, and so on)
/// are reported through [`crate::battle::TurnReport`] with `success: false`
/// and never surface as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The specified species was not found in the repository
    #[error("species not found: {0}")]
    SpeciesNotFound(String),
    /// The specified ability was not found in the repository
    #[error("ability not found: {0}")]
    AbilityNotFound(String),
    /// The specified item was not found in the repository
    #[error("item not found: {0}")]
    ItemNotFound(String),
}

/// Errors raised while loading definition files from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read definition file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse definition file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;
