use crate::models::config::{
    AccountDateOptions, AccuracyOptions, AutoVoterOptions, ConfigurationDocument,
    EarlyQuitOptions, EloLimitOptions, IrcOptions, MotdOptions, PickupOptions, ServerListOptions,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An independently toggleable optional behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleKind {
    AccountDate,
    Accuracy,
    AutoVoter,
    EarlyQuit,
    EloLimit,
    Irc,
    Motd,
    Pickup,
    ServerList,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 9] = [
        ModuleKind::AccountDate,
        ModuleKind::Accuracy,
        ModuleKind::AutoVoter,
        ModuleKind::EarlyQuit,
        ModuleKind::EloLimit,
        ModuleKind::Irc,
        ModuleKind::Motd,
        ModuleKind::Pickup,
        ModuleKind::ServerList,
    ];

    /// Short name used in the status line and in logs.
    pub fn short_name(self) -> &'static str {
        match self {
            ModuleKind::AccountDate => "accountdate",
            ModuleKind::Accuracy => "accuracy",
            ModuleKind::AutoVoter => "autovoter",
            ModuleKind::EarlyQuit => "earlyquit",
            ModuleKind::EloLimit => "elo",
            ModuleKind::Irc => "irc",
            ModuleKind::Motd => "motd",
            ModuleKind::Pickup => "pickup",
            ModuleKind::ServerList => "serverlist",
        }
    }

    /// Whether the module has an active flag only, with nothing to start or stop.
    pub fn is_flag_only(self) -> bool {
        matches!(
            self,
            ModuleKind::Accuracy
                | ModuleKind::AutoVoter
                | ModuleKind::EarlyQuit
                | ModuleKind::ServerList
        )
    }

    /// The `is_active` flag of this module's section in `doc`.
    pub fn is_active_in(self, doc: &ConfigurationDocument) -> bool {
        match self {
            ModuleKind::AccountDate => doc.account_date.is_active,
            ModuleKind::Accuracy => doc.accuracy.is_active,
            ModuleKind::AutoVoter => doc.auto_voter.is_active,
            ModuleKind::EarlyQuit => doc.early_quit.is_active,
            ModuleKind::EloLimit => doc.elo_limit.is_active,
            ModuleKind::Irc => doc.irc.is_active,
            ModuleKind::Motd => doc.motd.is_active,
            ModuleKind::Pickup => doc.pickup.is_active,
            ModuleKind::ServerList => doc.server_list.is_active,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// One tab of the settings window: the core options or a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingsGroup {
    Core,
    Module(ModuleKind),
}

impl SettingsGroup {
    pub fn all() -> impl Iterator<Item = SettingsGroup> {
        std::iter::once(SettingsGroup::Core)
            .chain(ModuleKind::ALL.into_iter().map(SettingsGroup::Module))
    }

    pub fn module(self) -> Option<ModuleKind> {
        match self {
            SettingsGroup::Core => None,
            SettingsGroup::Module(kind) => Some(kind),
        }
    }
}

impl fmt::Display for SettingsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsGroup::Core => f.write_str("core"),
            SettingsGroup::Module(kind) => write!(f, "{}", kind),
        }
    }
}

/// Live state of every module, owned by the host application.
///
/// Each section holds the tunables the running module reads, including its
/// `is_active` flag. The settings controller writes these on every successful
/// save; the host may also change them on its own (in-game commands, IRC), in
/// which case they can briefly differ from the configuration document until
/// the next refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleRuntimeState {
    pub account_date: AccountDateOptions,
    pub accuracy: AccuracyOptions,
    pub auto_voter: AutoVoterOptions,
    pub early_quit: EarlyQuitOptions,
    pub elo_limit: EloLimitOptions,
    pub irc: IrcOptions,
    pub motd: MotdOptions,
    pub pickup: PickupOptions,
    pub server_list: ServerListOptions,
}

impl ModuleRuntimeState {
    /// Build the live state a host starts with from a loaded document.
    pub fn from_document(doc: &ConfigurationDocument) -> Self {
        Self {
            account_date: doc.account_date.clone(),
            accuracy: doc.accuracy.clone(),
            auto_voter: doc.auto_voter.clone(),
            early_quit: doc.early_quit.clone(),
            elo_limit: doc.elo_limit.clone(),
            irc: doc.irc.clone(),
            motd: doc.motd.clone(),
            pickup: doc.pickup.clone(),
            server_list: doc.server_list.clone(),
        }
    }

    pub fn is_active(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::AccountDate => self.account_date.is_active,
            ModuleKind::Accuracy => self.accuracy.is_active,
            ModuleKind::AutoVoter => self.auto_voter.is_active,
            ModuleKind::EarlyQuit => self.early_quit.is_active,
            ModuleKind::EloLimit => self.elo_limit.is_active,
            ModuleKind::Irc => self.irc.is_active,
            ModuleKind::Motd => self.motd.is_active,
            ModuleKind::Pickup => self.pickup.is_active,
            ModuleKind::ServerList => self.server_list.is_active,
        }
    }

    pub fn set_active(&mut self, kind: ModuleKind, active: bool) {
        let flag = match kind {
            ModuleKind::AccountDate => &mut self.account_date.is_active,
            ModuleKind::Accuracy => &mut self.accuracy.is_active,
            ModuleKind::AutoVoter => &mut self.auto_voter.is_active,
            ModuleKind::EarlyQuit => &mut self.early_quit.is_active,
            ModuleKind::EloLimit => &mut self.elo_limit.is_active,
            ModuleKind::Irc => &mut self.irc.is_active,
            ModuleKind::Motd => &mut self.motd.is_active,
            ModuleKind::Pickup => &mut self.pickup.is_active,
            ModuleKind::ServerList => &mut self.server_list.is_active,
        };
        *flag = active;
    }

    /// Whether `kind`'s section is identical in both states.
    pub fn same_section(&self, other: &Self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::AccountDate => self.account_date == other.account_date,
            ModuleKind::Accuracy => self.accuracy == other.accuracy,
            ModuleKind::AutoVoter => self.auto_voter == other.auto_voter,
            ModuleKind::EarlyQuit => self.early_quit == other.early_quit,
            ModuleKind::EloLimit => self.elo_limit == other.elo_limit,
            ModuleKind::Irc => self.irc == other.irc,
            ModuleKind::Motd => self.motd == other.motd,
            ModuleKind::Pickup => self.pickup == other.pickup,
            ModuleKind::ServerList => self.server_list == other.server_list,
        }
    }

    /// Modules whose flag is currently on, in tab order.
    pub fn active_modules(&self) -> Vec<ModuleKind> {
        ModuleKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .collect()
    }
}
