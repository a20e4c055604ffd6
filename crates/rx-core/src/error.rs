/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building the game's data model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A difficulty profile violates `0 <= tolerance < max_duration`.
    #[error(
        "invalid difficulty profile \"{id}\": tolerance {tolerance_ms}ms must be below max duration {max_duration_ms}ms"
    )]
    InvalidProfile {
        /// The id of the rejected profile.
        id: String,
        /// The requested maximum duration.
        max_duration_ms: u32,
        /// The requested deviation tolerance.
        tolerance_ms: u32,
    },

    /// No built-in difficulty has the requested id.
    #[error("unknown difficulty: \"{0}\" (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}
