//! Reaction game engine for Reaxion.
//!
//! The [`GameManager`] owns the current game and reaction and advances the
//! round state machine through its `dispatch_*` operations. Each dispatch
//! broadcasts a [`GameEvent`] to the registered [`Observer`]s, which may
//! call back into the manager; timing, auto-advance and logging are all
//! observers rather than manager responsibilities.

/// Engine configuration.
pub mod config;
/// Error types for the engine crate.
pub mod error;
/// Broadcast events and the event log.
pub mod event;
/// The round state machine.
pub mod manager;
/// The observer trait and registry.
pub mod observer;
/// Built-in observers.
pub mod observers;
/// Duration drawing and guess classification.
pub mod policy;
/// Reaction creation and guess scoring.
pub mod service;
/// Game statistics and ranking.
pub mod stats;

/// Re-export of [`config::GameConfig`].
pub use config::GameConfig;
/// Re-exports of [`error::EngineError`] and [`error::EngineResult`].
pub use error::{EngineError, EngineResult};
/// Re-exports of [`event::EventLog`], [`event::GameEvent`], and [`event::GameEventKind`].
pub use event::{EventLog, GameEvent, GameEventKind};
/// Re-export of [`manager::GameManager`].
pub use manager::GameManager;
/// Re-exports of [`observer::Observer`] and [`observer::ObserverRegistry`].
pub use observer::{Observer, ObserverRegistry};
/// Re-exports of the built-in observers.
pub use observers::{AutoAdvance, EventLogger, EventRecorder, ReactionTimer};
/// Re-export of [`service::ReactionService`].
pub use service::ReactionService;
/// Re-export of [`stats::GameStats`].
pub use stats::GameStats;
