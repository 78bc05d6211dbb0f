//! Typed widget snapshots, one per settings group.
//!
//! A form holds exactly what the controls of one tab show: text boxes as
//! `String`, checkboxes as `bool`, drop-downs as their enum. [`SettingsForm`]
//! maps a form to and from its configuration section. Populating is plain
//! formatting; parsing runs every validator of the group, then the group's
//! cross-field rules, and reports all failures together.

use crate::models::{
    AccountDateOptions, AccuracyOptions, AutoVoterOptions, ConfigurationDocument, CoreOptions,
    EarlyQuitOptions, EloLimitOptions, GameType, IrcOptions, ModuleKind, ModuleRuntimeState,
    MotdOptions, PickupOptions, ServerListOptions, SettingsGroup, TimeScale,
};
use crate::ui::view::ViewState;
use crate::validation::{
    FieldCollector, ValidationErrors, ValidationResult, account_date, core_options, early_quit,
    elo_limit, irc, motd, pickup, server_list,
};
use std::fmt::Debug;

/// Mapping between one tab's controls and its configuration section.
pub trait SettingsForm: Clone + Debug + PartialEq {
    type Options: Clone + Debug + Default + PartialEq;

    const GROUP: SettingsGroup;

    /// Show `options` in the controls.
    fn from_options(options: &Self::Options) -> Self;

    /// Validate every field and cross rule, producing the section to commit.
    fn parse(&self) -> Result<Self::Options, ValidationErrors>;

    /// Check one field on focus loss. Unknown fields are valid.
    fn validate_field(&self, field: &str) -> ValidationResult;

    fn section(doc: &ConfigurationDocument) -> &Self::Options;

    fn section_mut(doc: &mut ConfigurationDocument) -> &mut Self::Options;

    fn form(view: &ViewState) -> &Self;

    fn form_mut(view: &mut ViewState) -> &mut Self;

    /// The `is_active` value the form would commit, `None` for the core tab.
    fn desired_active(options: &Self::Options) -> Option<bool>;

    /// Copy the tunables of `options` into the live state.
    ///
    /// The live `is_active` flag is left alone; flipping it is the activation
    /// controller's job.
    fn push_runtime(_options: &Self::Options, _state: &mut ModuleRuntimeState) {}
}

fn format_optional(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

macro_rules! module_section {
    ($field:ident) => {
        fn section(doc: &ConfigurationDocument) -> &Self::Options {
            &doc.$field
        }

        fn section_mut(doc: &mut ConfigurationDocument) -> &mut Self::Options {
            &mut doc.$field
        }

        fn form(view: &ViewState) -> &Self {
            &view.$field
        }

        fn form_mut(view: &mut ViewState) -> &mut Self {
            &mut view.$field
        }

        fn desired_active(options: &Self::Options) -> Option<bool> {
            Some(options.is_active)
        }

        fn push_runtime(options: &Self::Options, state: &mut ModuleRuntimeState) {
            let is_active = state.$field.is_active;
            state.$field = options.clone();
            state.$field.is_active = is_active;
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreForm {
    pub owner_name: String,
    pub account_name: String,
    pub check_for_updates_on_start: bool,
    pub hide_all_ql_console_text: bool,
    pub log_ql_to_disk: bool,
    pub log_events_to_disk: bool,
    pub debug_mode: bool,
    pub required_time_between_commands: String,
    pub elo_cache_expiration: String,
}

impl SettingsForm for CoreForm {
    type Options = CoreOptions;

    const GROUP: SettingsGroup = SettingsGroup::Core;

    fn from_options(options: &CoreOptions) -> Self {
        Self {
            owner_name: options.owner_name.clone(),
            account_name: options.account_name.clone(),
            check_for_updates_on_start: options.check_for_updates_on_start,
            hide_all_ql_console_text: options.hide_all_ql_console_text,
            log_ql_to_disk: options.log_ql_to_disk,
            log_events_to_disk: options.log_events_to_disk,
            debug_mode: options.debug_mode,
            required_time_between_commands: options.required_time_between_commands.to_string(),
            elo_cache_expiration: options.elo_cache_expiration.to_string(),
        }
    }

    fn parse(&self) -> Result<CoreOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let owner_name = fields.check(
            core_options::OWNER_NAME,
            &self.owner_name,
            core_options::owner_name,
        );
        let account_name = fields.check(
            core_options::ACCOUNT_NAME,
            &self.account_name,
            core_options::account_name,
        );
        let required_time_between_commands = fields.check(
            core_options::REQUIRED_TIME_BETWEEN_COMMANDS,
            &self.required_time_between_commands,
            core_options::required_time_between_commands,
        );
        let elo_cache_expiration = fields.check(
            core_options::ELO_CACHE_EXPIRATION,
            &self.elo_cache_expiration,
            core_options::elo_cache_expiration,
        );

        fields.finish()?;

        Ok(CoreOptions {
            owner_name: owner_name.unwrap_or_default(),
            account_name: account_name.unwrap_or_default(),
            check_for_updates_on_start: self.check_for_updates_on_start,
            hide_all_ql_console_text: self.hide_all_ql_console_text,
            log_ql_to_disk: self.log_ql_to_disk,
            log_events_to_disk: self.log_events_to_disk,
            debug_mode: self.debug_mode,
            required_time_between_commands: required_time_between_commands.unwrap_or_default(),
            elo_cache_expiration: elo_cache_expiration.unwrap_or_default(),
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        let raw = match field {
            core_options::OWNER_NAME => &self.owner_name,
            core_options::ACCOUNT_NAME => &self.account_name,
            core_options::REQUIRED_TIME_BETWEEN_COMMANDS => &self.required_time_between_commands,
            core_options::ELO_CACHE_EXPIRATION => &self.elo_cache_expiration,
            _ => return ValidationResult::Valid,
        };
        core_options::validate(field, raw)
    }

    fn section(doc: &ConfigurationDocument) -> &CoreOptions {
        &doc.core
    }

    fn section_mut(doc: &mut ConfigurationDocument) -> &mut CoreOptions {
        &mut doc.core
    }

    fn form(view: &ViewState) -> &Self {
        &view.core
    }

    fn form_mut(view: &mut ViewState) -> &mut Self {
        &mut view.core
    }

    fn desired_active(_options: &CoreOptions) -> Option<bool> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountDateForm {
    pub is_active: bool,
    pub minimum_days_required: String,
}

impl SettingsForm for AccountDateForm {
    type Options = AccountDateOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::AccountDate);

    fn from_options(options: &AccountDateOptions) -> Self {
        Self {
            is_active: options.is_active,
            minimum_days_required: options.minimum_days_required.to_string(),
        }
    }

    fn parse(&self) -> Result<AccountDateOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let minimum_days_required = fields.check(
            account_date::MINIMUM_DAYS_REQUIRED,
            &self.minimum_days_required,
            account_date::minimum_days_required,
        );
        fields.finish()?;

        Ok(AccountDateOptions {
            is_active: self.is_active,
            minimum_days_required: minimum_days_required.unwrap_or_default(),
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        match field {
            account_date::MINIMUM_DAYS_REQUIRED => {
                account_date::validate(field, &self.minimum_days_required)
            }
            _ => ValidationResult::Valid,
        }
    }

    module_section!(account_date);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccuracyForm {
    pub is_active: bool,
}

impl SettingsForm for AccuracyForm {
    type Options = AccuracyOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::Accuracy);

    fn from_options(options: &AccuracyOptions) -> Self {
        Self {
            is_active: options.is_active,
        }
    }

    fn parse(&self) -> Result<AccuracyOptions, ValidationErrors> {
        Ok(AccuracyOptions {
            is_active: self.is_active,
        })
    }

    fn validate_field(&self, _field: &str) -> ValidationResult {
        ValidationResult::Valid
    }

    module_section!(accuracy);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoVoterForm {
    pub is_active: bool,
}

impl SettingsForm for AutoVoterForm {
    type Options = AutoVoterOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::AutoVoter);

    fn from_options(options: &AutoVoterOptions) -> Self {
        Self {
            is_active: options.is_active,
        }
    }

    fn parse(&self) -> Result<AutoVoterOptions, ValidationErrors> {
        Ok(AutoVoterOptions {
            is_active: self.is_active,
        })
    }

    fn validate_field(&self, _field: &str) -> ValidationResult {
        ValidationResult::Valid
    }

    module_section!(auto_voter);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EarlyQuitForm {
    pub is_active: bool,
    pub max_quits_allowed: String,
    pub ban_time: String,
    pub ban_time_scale: TimeScale,
}

impl Default for EarlyQuitForm {
    fn default() -> Self {
        Self::from_options(&EarlyQuitOptions::default())
    }
}

impl SettingsForm for EarlyQuitForm {
    type Options = EarlyQuitOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::EarlyQuit);

    fn from_options(options: &EarlyQuitOptions) -> Self {
        Self {
            is_active: options.is_active,
            max_quits_allowed: options.max_quits_allowed.to_string(),
            ban_time: options.ban_time.to_string(),
            ban_time_scale: options.ban_time_scale,
        }
    }

    fn parse(&self) -> Result<EarlyQuitOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let max_quits_allowed = fields.check(
            early_quit::MAX_QUITS_ALLOWED,
            &self.max_quits_allowed,
            early_quit::max_quits_allowed,
        );
        let ban_time = fields.check(early_quit::BAN_TIME, &self.ban_time, early_quit::ban_time);
        fields.finish()?;

        Ok(EarlyQuitOptions {
            is_active: self.is_active,
            max_quits_allowed: max_quits_allowed.unwrap_or_default(),
            ban_time: ban_time.unwrap_or_default(),
            ban_time_scale: self.ban_time_scale,
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        match field {
            early_quit::MAX_QUITS_ALLOWED => early_quit::validate(field, &self.max_quits_allowed),
            early_quit::BAN_TIME => early_quit::validate(field, &self.ban_time),
            _ => ValidationResult::Valid,
        }
    }

    module_section!(early_quit);
}

#[derive(Debug, Clone, PartialEq)]
pub struct EloLimitForm {
    pub is_active: bool,
    pub game_type: GameType,
    pub minimum_required_elo: String,
    /// Blank for no upper limit.
    pub maximum_required_elo: String,
}

impl Default for EloLimitForm {
    fn default() -> Self {
        Self::from_options(&EloLimitOptions::default())
    }
}

impl SettingsForm for EloLimitForm {
    type Options = EloLimitOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::EloLimit);

    fn from_options(options: &EloLimitOptions) -> Self {
        Self {
            is_active: options.is_active,
            game_type: options.game_type,
            minimum_required_elo: options.minimum_required_elo.to_string(),
            maximum_required_elo: format_optional(options.maximum_required_elo),
        }
    }

    fn parse(&self) -> Result<EloLimitOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let minimum = fields.check(
            elo_limit::MINIMUM_REQUIRED_ELO,
            &self.minimum_required_elo,
            elo_limit::minimum_required_elo,
        );
        let maximum = fields.check(
            elo_limit::MAXIMUM_REQUIRED_ELO,
            &self.maximum_required_elo,
            elo_limit::maximum_required_elo,
        );

        if let (Some(minimum), Some(maximum)) = (minimum, maximum) {
            if let Err(message) = elo_limit::check_bounds(minimum, maximum) {
                fields.reject(elo_limit::MAXIMUM_REQUIRED_ELO, message);
            }
        }
        fields.finish()?;

        Ok(EloLimitOptions {
            is_active: self.is_active,
            game_type: self.game_type,
            minimum_required_elo: minimum.unwrap_or_default(),
            maximum_required_elo: maximum.flatten(),
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        match field {
            elo_limit::MINIMUM_REQUIRED_ELO => {
                elo_limit::validate(field, &self.minimum_required_elo)
            }
            elo_limit::MAXIMUM_REQUIRED_ELO => {
                elo_limit::validate(field, &self.maximum_required_elo)
            }
            _ => ValidationResult::Valid,
        }
    }

    module_section!(elo_limit);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrcForm {
    pub is_active: bool,
    pub admin_nick: String,
    pub bot_nick: String,
    pub bot_user_name: String,
    pub server_address: String,
    pub server_port: String,
    pub server_password: String,
    pub channel: String,
    pub channel_key: String,
    pub auto_connect_on_start: bool,
    pub nick_service_username: String,
    pub nick_service_password: String,
    pub auto_auth_with_nick_service: bool,
}

impl SettingsForm for IrcForm {
    type Options = IrcOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::Irc);

    fn from_options(options: &IrcOptions) -> Self {
        Self {
            is_active: options.is_active,
            admin_nick: options.admin_nick.clone(),
            bot_nick: options.bot_nick.clone(),
            bot_user_name: options.bot_user_name.clone(),
            server_address: options.server_address.clone(),
            server_port: options.server_port.to_string(),
            server_password: options.server_password.clone(),
            channel: options.channel.clone(),
            channel_key: options.channel_key.clone(),
            auto_connect_on_start: options.auto_connect_on_start,
            nick_service_username: options.nick_service_username.clone(),
            nick_service_password: options.nick_service_password.clone(),
            auto_auth_with_nick_service: options.auto_auth_with_nick_service,
        }
    }

    fn parse(&self) -> Result<IrcOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let admin_nick = fields.check(irc::ADMIN_NICK, &self.admin_nick, irc::admin_nick);
        let bot_nick = fields.check(irc::BOT_NICK, &self.bot_nick, irc::bot_nick);
        let bot_user_name =
            fields.check(irc::BOT_USER_NAME, &self.bot_user_name, irc::bot_user_name);
        let server_address =
            fields.check(irc::SERVER_ADDRESS, &self.server_address, irc::server_address);
        let server_port = fields.check(irc::SERVER_PORT, &self.server_port, irc::server_port);
        let channel = fields.check(irc::CHANNEL, &self.channel, irc::channel);
        let channel_key = fields.check(irc::CHANNEL_KEY, &self.channel_key, irc::channel_key);

        if let Some(nick) = &admin_nick {
            if let Err(message) = irc::check_admin_nick_required(self.is_active, nick) {
                fields.reject(irc::ADMIN_NICK, message);
            }
        }
        for (field, message) in irc::check_nick_service(
            self.auto_auth_with_nick_service,
            &self.nick_service_username,
            &self.nick_service_password,
        ) {
            fields.reject(field, message);
        }
        fields.finish()?;

        Ok(IrcOptions {
            is_active: self.is_active,
            admin_nick: admin_nick.unwrap_or_default(),
            bot_nick: bot_nick.unwrap_or_default(),
            bot_user_name: bot_user_name.unwrap_or_default(),
            server_address: server_address.unwrap_or_default(),
            server_port: server_port.unwrap_or_default(),
            server_password: self.server_password.clone(),
            channel: channel.unwrap_or_default(),
            channel_key: channel_key.unwrap_or_default(),
            auto_connect_on_start: self.auto_connect_on_start,
            nick_service_username: self.nick_service_username.trim().to_string(),
            nick_service_password: self.nick_service_password.clone(),
            auto_auth_with_nick_service: self.auto_auth_with_nick_service,
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        let raw = match field {
            irc::ADMIN_NICK => &self.admin_nick,
            irc::BOT_NICK => &self.bot_nick,
            irc::BOT_USER_NAME => &self.bot_user_name,
            irc::SERVER_ADDRESS => &self.server_address,
            irc::SERVER_PORT => &self.server_port,
            irc::CHANNEL => &self.channel,
            irc::CHANNEL_KEY => &self.channel_key,
            _ => return ValidationResult::Valid,
        };
        irc::validate(field, raw)
    }

    module_section!(irc);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotdForm {
    pub is_active: bool,
    pub repeat_interval_minutes: String,
    pub message: String,
}

impl SettingsForm for MotdForm {
    type Options = MotdOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::Motd);

    fn from_options(options: &MotdOptions) -> Self {
        Self {
            is_active: options.is_active,
            repeat_interval_minutes: options.repeat_interval_minutes.to_string(),
            message: options.message.clone(),
        }
    }

    fn parse(&self) -> Result<MotdOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let repeat_interval_minutes = fields.check(
            motd::REPEAT_INTERVAL_MINUTES,
            &self.repeat_interval_minutes,
            motd::repeat_interval_minutes,
        );
        let message = fields.check(motd::MESSAGE, &self.message, motd::message);

        if let Some(message) = &message {
            if let Err(reason) = motd::check_message_required(self.is_active, message) {
                fields.reject(motd::MESSAGE, reason);
            }
        }
        fields.finish()?;

        Ok(MotdOptions {
            is_active: self.is_active,
            repeat_interval_minutes: repeat_interval_minutes.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        match field {
            motd::REPEAT_INTERVAL_MINUTES => motd::validate(field, &self.repeat_interval_minutes),
            motd::MESSAGE => motd::validate(field, &self.message),
            _ => ValidationResult::Valid,
        }
    }

    module_section!(motd);
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickupForm {
    pub is_active: bool,
    pub team_size: String,
    pub max_subs_per_player: String,
    pub max_no_shows_per_player: String,
    pub excessive_subs_ban_time: String,
    pub excessive_subs_ban_time_scale: TimeScale,
    pub excessive_no_shows_ban_time: String,
    pub excessive_no_shows_ban_time_scale: TimeScale,
}

impl Default for PickupForm {
    fn default() -> Self {
        Self::from_options(&PickupOptions::default())
    }
}

impl SettingsForm for PickupForm {
    type Options = PickupOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::Pickup);

    fn from_options(options: &PickupOptions) -> Self {
        Self {
            is_active: options.is_active,
            team_size: options.team_size.to_string(),
            max_subs_per_player: options.max_subs_per_player.to_string(),
            max_no_shows_per_player: options.max_no_shows_per_player.to_string(),
            excessive_subs_ban_time: options.excessive_subs_ban_time.to_string(),
            excessive_subs_ban_time_scale: options.excessive_subs_ban_time_scale,
            excessive_no_shows_ban_time: options.excessive_no_shows_ban_time.to_string(),
            excessive_no_shows_ban_time_scale: options.excessive_no_shows_ban_time_scale,
        }
    }

    fn parse(&self) -> Result<PickupOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let team_size = fields.check(pickup::TEAM_SIZE, &self.team_size, pickup::team_size);
        let max_subs_per_player = fields.check(
            pickup::MAX_SUBS_PER_PLAYER,
            &self.max_subs_per_player,
            pickup::max_subs_per_player,
        );
        let max_no_shows_per_player = fields.check(
            pickup::MAX_NO_SHOWS_PER_PLAYER,
            &self.max_no_shows_per_player,
            pickup::max_no_shows_per_player,
        );
        let excessive_subs_ban_time = fields.check(
            pickup::EXCESSIVE_SUBS_BAN_TIME,
            &self.excessive_subs_ban_time,
            pickup::excessive_subs_ban_time,
        );
        let excessive_no_shows_ban_time = fields.check(
            pickup::EXCESSIVE_NO_SHOWS_BAN_TIME,
            &self.excessive_no_shows_ban_time,
            pickup::excessive_no_shows_ban_time,
        );
        fields.finish()?;

        Ok(PickupOptions {
            is_active: self.is_active,
            team_size: team_size.unwrap_or_default(),
            max_subs_per_player: max_subs_per_player.unwrap_or_default(),
            max_no_shows_per_player: max_no_shows_per_player.unwrap_or_default(),
            excessive_subs_ban_time: excessive_subs_ban_time.unwrap_or_default(),
            excessive_subs_ban_time_scale: self.excessive_subs_ban_time_scale,
            excessive_no_shows_ban_time: excessive_no_shows_ban_time.unwrap_or_default(),
            excessive_no_shows_ban_time_scale: self.excessive_no_shows_ban_time_scale,
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        let raw = match field {
            pickup::TEAM_SIZE => &self.team_size,
            pickup::MAX_SUBS_PER_PLAYER => &self.max_subs_per_player,
            pickup::MAX_NO_SHOWS_PER_PLAYER => &self.max_no_shows_per_player,
            pickup::EXCESSIVE_SUBS_BAN_TIME => &self.excessive_subs_ban_time,
            pickup::EXCESSIVE_NO_SHOWS_BAN_TIME => &self.excessive_no_shows_ban_time,
            _ => return ValidationResult::Valid,
        };
        pickup::validate(field, raw)
    }

    module_section!(pickup);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerListForm {
    pub is_active: bool,
    pub max_servers_to_display: String,
    pub time_between_queries: String,
}

impl SettingsForm for ServerListForm {
    type Options = ServerListOptions;

    const GROUP: SettingsGroup = SettingsGroup::Module(ModuleKind::ServerList);

    fn from_options(options: &ServerListOptions) -> Self {
        Self {
            is_active: options.is_active,
            max_servers_to_display: options.max_servers_to_display.to_string(),
            time_between_queries: options.time_between_queries.to_string(),
        }
    }

    fn parse(&self) -> Result<ServerListOptions, ValidationErrors> {
        let mut fields = FieldCollector::new();
        let max_servers_to_display = fields.check(
            server_list::MAX_SERVERS_TO_DISPLAY,
            &self.max_servers_to_display,
            server_list::max_servers_to_display,
        );
        let time_between_queries = fields.check(
            server_list::TIME_BETWEEN_QUERIES,
            &self.time_between_queries,
            server_list::time_between_queries,
        );
        fields.finish()?;

        Ok(ServerListOptions {
            is_active: self.is_active,
            max_servers_to_display: max_servers_to_display.unwrap_or_default(),
            time_between_queries: time_between_queries.unwrap_or_default(),
        })
    }

    fn validate_field(&self, field: &str) -> ValidationResult {
        match field {
            server_list::MAX_SERVERS_TO_DISPLAY => {
                server_list::validate(field, &self.max_servers_to_display)
            }
            server_list::TIME_BETWEEN_QUERIES => {
                server_list::validate(field, &self.time_between_queries)
            }
            _ => ValidationResult::Valid,
        }
    }

    module_section!(server_list);
}
