use rx_core::ReactionStatus;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the reaction service and the game manager.
///
/// All of these are programming errors in the caller: the engine never
/// retries or swallows them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A scoring call was made before `with_reaction` bound a reaction.
    #[error("no reaction bound to the reaction service")]
    UndefinedReaction,

    /// A dispatch was invoked outside its legal state.
    #[error("cannot {operation}: reaction is {}", describe_state(.status, .complete))]
    InvalidTransition {
        /// The rejected dispatch.
        operation: &'static str,
        /// The reaction's status at the time.
        status: ReactionStatus,
        /// Whether the reaction was already complete.
        complete: bool,
    },

    /// No game has been set on the manager.
    #[error("no current game")]
    NoCurrentGame,

    /// No reaction has been set on the manager.
    #[error("no current reaction")]
    NoCurrentReaction,

    /// An observer reported a failure of its own.
    #[error("observer error: {0}")]
    Observer(String),
}

fn describe_state(status: &ReactionStatus, complete: &bool) -> String {
    if *complete {
        format!("{status} and complete")
    } else {
        status.to_string()
    }
}
