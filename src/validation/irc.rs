use super::{ValidationResult, parse_number};
use regex::Regex;
use std::sync::LazyLock;

pub const ADMIN_NICK: &str = "admin_nick";
pub const BOT_NICK: &str = "bot_nick";
pub const BOT_USER_NAME: &str = "bot_user_name";
pub const SERVER_ADDRESS: &str = "server_address";
pub const SERVER_PORT: &str = "server_port";
pub const CHANNEL: &str = "channel";
pub const CHANNEL_KEY: &str = "channel_key";
pub const NICK_SERVICE_USERNAME: &str = "nick_service_username";
pub const NICK_SERVICE_PASSWORD: &str = "nick_service_password";

pub const MAX_NICK_LENGTH: usize = 15;
pub const MAX_USER_NAME_LENGTH: usize = 10;
pub const MAX_CHANNEL_LENGTH: usize = 50;

// First character may not be a digit or '-'.
static NICKNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\[\]\\`_^{|}][A-Za-z0-9\[\]\\`_^{|}-]{0,14}$")
        .expect("valid nickname pattern")
});

static USER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,10}$").expect("valid user name pattern"));

fn nickname(raw: &str, label: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required.", label));
    }
    if !NICKNAME.is_match(trimmed) {
        return Err(format!(
            "{} must be 1-{} characters, start with a letter or one of []\\`_^{{|}}, \
             and contain only letters, digits, those symbols or '-'.",
            label, MAX_NICK_LENGTH
        ));
    }
    Ok(trimmed.to_string())
}

/// IRC nickname of the admin allowed to control the bot.
///
/// May be left blank while IRC is off; [`check_admin_nick_required`] covers
/// the active case.
pub fn admin_nick(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }
    nickname(raw, "Admin nickname")
}

/// Save-time rule: the relay cannot run without an admin to answer to.
pub fn check_admin_nick_required(active: bool, admin_nick: &str) -> Result<(), String> {
    if active && admin_nick.trim().is_empty() {
        return Err("Admin nickname is required to turn on IRC.".to_string());
    }
    Ok(())
}

pub fn bot_nick(raw: &str) -> Result<String, String> {
    nickname(raw, "Bot nickname")
}

pub fn bot_user_name(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Bot user name is required.".to_string());
    }
    if !USER_NAME.is_match(trimmed) {
        return Err(format!(
            "Bot user name must be 1-{} characters using letters, digits, '_' or '-'.",
            MAX_USER_NAME_LENGTH
        ));
    }
    Ok(trimmed.to_string())
}

pub fn server_address(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("IRC server address is required.".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) || trimmed.len() > 255 {
        return Err("IRC server address must be a host name or IP address.".to_string());
    }
    Ok(trimmed.to_string())
}

pub fn server_port(raw: &str) -> Result<u16, String> {
    let port: u16 = parse_number(raw, "IRC server port", "a number from 1 to 65535")?;
    if port == 0 {
        return Err("IRC server port must be a number from 1 to 65535.".to_string());
    }
    Ok(port)
}

pub fn channel(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("IRC channel is required.".to_string());
    }
    let valid_prefix = trimmed.starts_with('#') || trimmed.starts_with('&');
    let length = trimmed.chars().count();
    let valid_chars = !trimmed
        .chars()
        .any(|c| c == ' ' || c == ',' || c.is_control());
    if !valid_prefix || !(2..=MAX_CHANNEL_LENGTH).contains(&length) || !valid_chars {
        return Err(format!(
            "IRC channel must start with '#' or '&', be 2-{} characters, \
             and contain no spaces or commas.",
            MAX_CHANNEL_LENGTH
        ));
    }
    Ok(trimmed.to_string())
}

/// Optional channel key; blank means the channel has none.
pub fn channel_key(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err("IRC channel key cannot contain spaces or commas.".to_string());
    }
    Ok(trimmed.to_string())
}

/// Save-time rule: automatic nick-service authentication needs both credentials.
pub fn check_nick_service(
    auto_auth: bool,
    username: &str,
    password: &str,
) -> Vec<(&'static str, String)> {
    if !auto_auth {
        return Vec::new();
    }
    let mut failures = Vec::new();
    if username.trim().is_empty() {
        failures.push((
            NICK_SERVICE_USERNAME,
            "Nick service user name is required for automatic authentication.".to_string(),
        ));
    }
    if password.is_empty() {
        failures.push((
            NICK_SERVICE_PASSWORD,
            "Nick service password is required for automatic authentication.".to_string(),
        ));
    }
    failures
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        ADMIN_NICK => admin_nick(raw).into(),
        BOT_NICK => bot_nick(raw).into(),
        BOT_USER_NAME => bot_user_name(raw).into(),
        SERVER_ADDRESS => server_address(raw).into(),
        SERVER_PORT => server_port(raw).into(),
        CHANNEL => channel(raw).into(),
        CHANNEL_KEY => channel_key(raw).into(),
        _ => ValidationResult::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nicknames() {
        assert_eq!(bot_nick("qladminbot"), Ok("qladminbot".to_string()));
        assert!(bot_nick("[Visor]").is_ok());
        assert!(bot_nick("`tick|away").is_ok());
        assert!(bot_nick("9lives").is_err());
        assert!(bot_nick("-dash").is_err());
        assert!(bot_nick("has space").is_err());
        assert!(bot_nick(&"n".repeat(16)).is_err());
        assert_eq!(admin_nick(""), Ok(String::new()));
        assert!(admin_nick("9lives").unwrap_err().starts_with("Admin nickname"));
        assert!(check_admin_nick_required(true, "").is_err());
        assert!(check_admin_nick_required(false, "").is_ok());
    }

    #[test]
    fn test_user_name() {
        assert!(bot_user_name("ql_admin").is_ok());
        assert!(bot_user_name("waytoolongname").is_err());
        assert!(bot_user_name("dot.ted").is_err());
    }

    #[test]
    fn test_server_fields() {
        assert!(server_address("irc.quakenet.org").is_ok());
        assert!(server_address("irc quakenet").is_err());
        assert_eq!(server_port("6667"), Ok(6667));
        assert!(server_port("0").is_err());
        assert!(server_port("70000").is_err());
    }

    #[test]
    fn test_channel() {
        assert!(channel("#qlpickup").is_ok());
        assert!(channel("&local").is_ok());
        assert!(channel("qlpickup").is_err());
        assert!(channel("#").is_err());
        assert!(channel("#a,b").is_err());
        assert!(channel("#bell\u{7}").is_err());
    }

    #[test]
    fn test_channel_key_optional() {
        assert_eq!(channel_key(""), Ok(String::new()));
        assert!(channel_key("sekrit").is_ok());
        assert!(channel_key("two words").is_err());
    }

    #[test]
    fn test_nick_service_rule() {
        assert!(check_nick_service(false, "", "").is_empty());
        assert_eq!(check_nick_service(true, "", "").len(), 2);
        assert!(check_nick_service(true, "bot", "pw").is_empty());
    }
}
