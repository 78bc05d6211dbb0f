//! Collaborator seams consumed by the settings core.
//!
//! The settings core does not own the live game connection, the IRC client or
//! the list persistence. It talks to them through narrow traits so the host
//! can plug in real implementations and tests can plug in mocks.
//!
//! # Components
//!
//! - [`MonitoringSession`]: whether the host is watching a live server, plus the
//!   immediate commands (kick-ban, unban, deop) used while it is
//! - [`ModuleEffects`]: asynchronous entry/exit actions of the modules (batch
//!   removal of ineligible players, IRC connect, MOTD timer, pickup reset)
//! - [`EntryStore`], [`BanStore`], [`QuitStore`]: backing stores of the four
//!   live lists, with [`InMemoryStore`] as the bundled implementation
//!
//! [`OfflineSession`] and [`LoggingEffects`] are the stand-ins the binary uses
//! when no game server connection is configured.

pub mod effects;
pub mod session;
pub mod stores;

pub use effects::{LoggingEffects, ModuleEffects};
pub use session::{ExternalActionError, MonitoringSession, OfflineSession};
pub use stores::{BanStore, EntryStore, InMemoryStore, QuitStore};

#[cfg(test)]
pub use effects::MockModuleEffects;
#[cfg(test)]
pub use session::MockMonitoringSession;
