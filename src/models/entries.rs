use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four live lists shown by the settings window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Bans,
    Quitters,
    Votes,
    Users,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Bans => "ban list",
            ListKind::Quitters => "early quitter list",
            ListKind::Votes => "auto vote list",
            ListKind::Users => "user list",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry that can be shown in one of the live lists.
///
/// `key()` is unique within its list (compared case-insensitively by the
/// stores) and is what the admin types to add or remove an entry.
pub trait ListEntry: Clone + Send + Sync + 'static {
    const KIND: ListKind;

    fn key(&self) -> &str;

    /// Text shown in the list control.
    fn display(&self) -> String {
        self.key().to_string()
    }
}

/// Why a player was banned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BanType {
    AddedByAdmin,
    AddedByEarlyQuit,
    AddedByPickupSubs,
    AddedByPickupNoShows,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanInfo {
    pub player_name: String,
    pub banned_by: String,
    pub ban_added: DateTime<Utc>,
    pub ban_expiration: DateTime<Utc>,
    pub ban_type: BanType,
}

impl BanInfo {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.ban_expiration <= now
    }
}

impl ListEntry for BanInfo {
    const KIND: ListKind = ListKind::Bans;

    fn key(&self) -> &str {
        &self.player_name
    }

    fn display(&self) -> String {
        format!(
            "{} (expires {})",
            self.player_name,
            self.ban_expiration.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyQuitter {
    pub player_name: String,
    pub quit_count: u32,
}

impl ListEntry for EarlyQuitter {
    const KIND: ListKind = ListKind::Quitters;

    fn key(&self) -> &str {
        &self.player_name
    }

    fn display(&self) -> String {
        let noun = if self.quit_count == 1 { "quit" } else { "quits" };
        format!("{} ({} {})", self.player_name, self.quit_count, noun)
    }
}

/// Outcome the auto-voter casts when a matching vote is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntendedVoteResult {
    Yes,
    No,
}

impl fmt::Display for IntendedVoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntendedVoteResult::Yes => f.write_str("YES"),
            IntendedVoteResult::No => f.write_str("NO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoVote {
    pub vote_text: String,
    pub intended_result: IntendedVoteResult,
    pub added_by: String,
}

impl ListEntry for AutoVote {
    const KIND: ListKind = ListKind::Votes;

    fn key(&self) -> &str {
        &self.vote_text
    }

    fn display(&self) -> String {
        format!("{}: {}", self.intended_result, self.vote_text)
    }
}

/// Access level of a registered user, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserLevel {
    None,
    User,
    SuperUser,
    Admin,
    Owner,
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserLevel::None => "NONE",
            UserLevel::User => "USER",
            UserLevel::SuperUser => "SUPERUSER",
            UserLevel::Admin => "ADMIN",
            UserLevel::Owner => "OWNER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub access_level: UserLevel,
    pub added_by: String,
    pub date_added: DateTime<Utc>,
}

impl ListEntry for User {
    const KIND: ListKind = ListKind::Users;

    fn key(&self) -> &str {
        &self.name
    }

    fn display(&self) -> String {
        format!("{} ({})", self.name, self.access_level)
    }
}
