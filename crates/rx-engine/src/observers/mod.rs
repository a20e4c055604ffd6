//! Built-in observers front ends compose to run a game.

/// Chains rounds together.
pub mod auto_advance;
/// Tracing output for every event.
pub mod logger;
/// Bounded event history.
pub mod recorder;
/// Schedules reaction ends.
pub mod timer;

pub use auto_advance::AutoAdvance;
pub use logger::EventLogger;
pub use recorder::EventRecorder;
pub use timer::ReactionTimer;
