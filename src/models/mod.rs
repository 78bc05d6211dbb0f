//! Data models for the qladmin settings core.
//!
//! - [`ConfigurationDocument`]: the on-disk configuration, core options plus one section per module
//! - [`ModuleRuntimeState`]: live module flags and tunables owned by the host application
//! - [`BanInfo`], [`EarlyQuitter`], [`AutoVote`], [`User`]: entries shown in the four live lists
//!
//! # Architecture Note
//!
//! The configuration structs derive `Serialize`/`Deserialize` and default every
//! field, so a document read from disk is always complete. The runtime state is
//! shared through [`StateManager`](crate::state::StateManager), never directly.

pub mod config;
pub mod entries;
pub mod runtime;

pub use config::{
    AccountDateOptions, AccuracyOptions, AutoVoterOptions, ConfigurationDocument, CoreOptions,
    EarlyQuitOptions, EloLimitOptions, GameType, IrcOptions, MotdOptions, PickupOptions,
    ServerListOptions, TimeScale, UNSET_NAME,
};
pub use entries::{
    AutoVote, BanInfo, BanType, EarlyQuitter, IntendedVoteResult, ListEntry, ListKind, User,
    UserLevel,
};
pub use runtime::{ModuleKind, ModuleRuntimeState, SettingsGroup};
