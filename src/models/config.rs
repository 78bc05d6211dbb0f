use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used by a freshly generated configuration for the owner and account.
///
/// Monitoring refuses to start while either name still carries this value.
pub const UNSET_NAME: &str = "unset";

/// The complete on-disk configuration.
///
/// Exactly one [`CoreOptions`] plus one section per optional module. Every
/// section is `#[serde(default)]` so a partial file still deserializes into a
/// complete document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationDocument {
    pub core: CoreOptions,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreOptions {
    pub owner_name: String,
    pub account_name: String,
    pub check_for_updates_on_start: bool,
    pub hide_all_ql_console_text: bool,
    pub log_ql_to_disk: bool,
    pub log_events_to_disk: bool,
    pub debug_mode: bool,
    /// Seconds a non-admin must wait between bot commands.
    pub required_time_between_commands: f64,
    /// Hours before a cached Elo lookup is refreshed.
    pub elo_cache_expiration: u32,
}

impl Default for CoreOptions {
    fn default() -> Self {
        Self {
            owner_name: UNSET_NAME.to_string(),
            account_name: UNSET_NAME.to_string(),
            check_for_updates_on_start: true,
            hide_all_ql_console_text: false,
            log_ql_to_disk: false,
            log_events_to_disk: false,
            debug_mode: false,
            required_time_between_commands: 6.5,
            elo_cache_expiration: 300,
        }
    }
}

impl CoreOptions {
    /// Whether the owner and account names have been set away from the defaults.
    pub fn has_identity(&self) -> bool {
        !self.owner_name.eq_ignore_ascii_case(UNSET_NAME)
            && !self.account_name.eq_ignore_ascii_case(UNSET_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDateOptions {
    pub is_active: bool,
    pub minimum_days_required: u32,
}

impl Default for AccountDateOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            minimum_days_required: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyOptions {
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoVoterOptions {
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarlyQuitOptions {
    pub is_active: bool,
    pub max_quits_allowed: u32,
    pub ban_time: f64,
    pub ban_time_scale: TimeScale,
}

impl Default for EarlyQuitOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            max_quits_allowed: 2,
            ban_time: 1.0,
            ban_time_scale: TimeScale::Days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EloLimitOptions {
    pub is_active: bool,
    pub game_type: GameType,
    /// Zero means no lower limit.
    pub minimum_required_elo: u32,
    /// `None` means players are only limited from below.
    pub maximum_required_elo: Option<u32>,
}

impl Default for EloLimitOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            game_type: GameType::Ca,
            minimum_required_elo: 0,
            maximum_required_elo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrcOptions {
    pub is_active: bool,
    pub admin_nick: String,
    pub bot_nick: String,
    pub bot_user_name: String,
    pub server_address: String,
    pub server_port: u16,
    pub server_password: String,
    pub channel: String,
    pub channel_key: String,
    pub auto_connect_on_start: bool,
    pub nick_service_username: String,
    pub nick_service_password: String,
    pub auto_auth_with_nick_service: bool,
}

impl Default for IrcOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            admin_nick: String::new(),
            bot_nick: "qladminbot".to_string(),
            bot_user_name: "qladmin".to_string(),
            server_address: "irc.quakenet.org".to_string(),
            server_port: 6667,
            server_password: String::new(),
            channel: "#qladmin".to_string(),
            channel_key: String::new(),
            auto_connect_on_start: false,
            nick_service_username: String::new(),
            nick_service_password: String::new(),
            auto_auth_with_nick_service: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotdOptions {
    pub is_active: bool,
    pub repeat_interval_minutes: u32,
    pub message: String,
}

impl Default for MotdOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            repeat_interval_minutes: 5,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupOptions {
    pub is_active: bool,
    pub team_size: u32,
    pub max_subs_per_player: u32,
    pub max_no_shows_per_player: u32,
    pub excessive_subs_ban_time: f64,
    pub excessive_subs_ban_time_scale: TimeScale,
    pub excessive_no_shows_ban_time: f64,
    pub excessive_no_shows_ban_time_scale: TimeScale,
}

impl Default for PickupOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            team_size: 4,
            max_subs_per_player: 2,
            max_no_shows_per_player: 2,
            excessive_subs_ban_time: 1.0,
            excessive_subs_ban_time_scale: TimeScale::Hours,
            excessive_no_shows_ban_time: 1.0,
            excessive_no_shows_ban_time_scale: TimeScale::Hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerListOptions {
    pub is_active: bool,
    pub max_servers_to_display: u32,
    /// Seconds between server browser queries.
    pub time_between_queries: f64,
}

impl Default for ServerListOptions {
    fn default() -> Self {
        Self {
            is_active: false,
            max_servers_to_display: 5,
            time_between_queries: 45.0,
        }
    }
}

/// Unit attached to the ban durations the admin enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeScale {
    pub const ALL: [TimeScale; 7] = [
        TimeScale::Seconds,
        TimeScale::Minutes,
        TimeScale::Hours,
        TimeScale::Days,
        TimeScale::Weeks,
        TimeScale::Months,
        TimeScale::Years,
    ];

    fn seconds_per_unit(self) -> f64 {
        match self {
            TimeScale::Seconds => 1.0,
            TimeScale::Minutes => 60.0,
            TimeScale::Hours => 3_600.0,
            TimeScale::Days => 86_400.0,
            TimeScale::Weeks => 604_800.0,
            // Calendar-free approximations
            TimeScale::Months => 2_592_000.0,
            TimeScale::Years => 31_536_000.0,
        }
    }

    /// Convert an amount expressed in this scale into a duration.
    pub fn to_duration(self, amount: f64) -> Duration {
        Duration::milliseconds((amount * self.seconds_per_unit() * 1000.0).round() as i64)
    }

    /// Parse the text shown in the scale drop-down.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.as_str().eq_ignore_ascii_case(text.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeScale::Seconds => "seconds",
            TimeScale::Minutes => "minutes",
            TimeScale::Hours => "hours",
            TimeScale::Days => "days",
            TimeScale::Weeks => "weeks",
            TimeScale::Months => "months",
            TimeScale::Years => "years",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game type whose Elo rating the limiter checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Ca,
    Ctf,
    Duel,
    Ffa,
    Tdm,
}

impl GameType {
    pub const ALL: [GameType; 5] = [
        GameType::Ca,
        GameType::Ctf,
        GameType::Duel,
        GameType::Ffa,
        GameType::Tdm,
    ];

    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|game_type| game_type.as_str().eq_ignore_ascii_case(text.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Ca => "ca",
            GameType::Ctf => "ctf",
            GameType::Duel => "duel",
            GameType::Ffa => "ffa",
            GameType::Tdm => "tdm",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_defaults() {
        let core = CoreOptions::default();
        assert_eq!(core.owner_name, "unset");
        assert_eq!(core.account_name, "unset");
        assert!(core.check_for_updates_on_start);
        assert!(!core.has_identity());
    }

    #[test]
    fn test_has_identity_requires_both_names() {
        let mut core = CoreOptions::default();
        core.owner_name = "anarki".to_string();
        assert!(!core.has_identity());

        core.account_name = "qladmin_bot".to_string();
        assert!(core.has_identity());
    }

    #[test]
    fn test_module_sections_default_inactive() {
        let doc = ConfigurationDocument::default();
        assert!(!doc.account_date.is_active);
        assert!(!doc.irc.is_active);
        assert!(!doc.pickup.is_active);
        assert_eq!(doc.early_quit.max_quits_allowed, 2);
        assert_eq!(doc.irc.server_port, 6667);
        assert_eq!(doc.elo_limit.maximum_required_elo, None);
    }

    #[test]
    fn test_partial_yaml_yields_complete_document() {
        let yaml = "core:\n  owner_name: klesk\nirc:\n  is_active: true\n";
        let doc: ConfigurationDocument = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(doc.core.owner_name, "klesk");
        assert_eq!(doc.core.account_name, "unset");
        assert!(doc.irc.is_active);
        assert_eq!(doc.irc.channel, "#qladmin");
        assert_eq!(doc.motd.repeat_interval_minutes, 5);
    }

    #[test]
    fn test_time_scale_conversion() {
        assert_eq!(TimeScale::Minutes.to_duration(1.5), Duration::seconds(90));
        assert_eq!(TimeScale::Days.to_duration(2.0), Duration::days(2));
        assert_eq!(TimeScale::Weeks.to_duration(1.0), Duration::weeks(1));
    }

    #[test]
    fn test_enum_text_parsing() {
        assert_eq!(TimeScale::parse(" Hours "), Some(TimeScale::Hours));
        assert_eq!(TimeScale::parse("fortnights"), None);
        assert_eq!(GameType::parse("CTF"), Some(GameType::Ctf));
        assert_eq!(GameType::parse(""), None);
    }
}
