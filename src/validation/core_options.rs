use super::{ValidationResult, parse_number, positive_u32};
use regex::Regex;
use std::sync::LazyLock;

pub const OWNER_NAME: &str = "owner_name";
pub const ACCOUNT_NAME: &str = "account_name";
pub const REQUIRED_TIME_BETWEEN_COMMANDS: &str = "required_time_between_commands";
pub const ELO_CACHE_EXPIRATION: &str = "elo_cache_expiration";

/// Longest wait between commands an admin may configure, in seconds.
pub const MAX_TIME_BETWEEN_COMMANDS: f64 = 60.0;

static QL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,32}$").expect("valid QL name pattern"));

fn ql_name(raw: &str, label: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required.", label));
    }
    if !QL_NAME.is_match(trimmed) {
        return Err(format!(
            "{} must be 1-32 characters using only letters, digits or underscores.",
            label
        ));
    }
    Ok(trimmed.to_string())
}

/// Quake Live name of the server owner.
pub fn owner_name(raw: &str) -> Result<String, String> {
    ql_name(raw, "Owner name")
}

/// Quake Live account the tool is logged in with.
pub fn account_name(raw: &str) -> Result<String, String> {
    ql_name(raw, "Account name")
}

pub fn required_time_between_commands(raw: &str) -> Result<f64, String> {
    let label = "Time between commands";
    let value: f64 = parse_number(raw, label, "a number of seconds")?;
    if !value.is_finite() || value <= 0.0 || value > MAX_TIME_BETWEEN_COMMANDS {
        return Err(format!(
            "{} must be greater than 0 and at most {} seconds.",
            label, MAX_TIME_BETWEEN_COMMANDS
        ));
    }
    Ok(value)
}

pub fn elo_cache_expiration(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Elo cache expiration (hours)")
}

/// Check a single core field by name, as done when it loses focus.
pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        OWNER_NAME => owner_name(raw).into(),
        ACCOUNT_NAME => account_name(raw).into(),
        REQUIRED_TIME_BETWEEN_COMMANDS => required_time_between_commands(raw).into(),
        ELO_CACHE_EXPIRATION => elo_cache_expiration(raw).into(),
        _ => ValidationResult::Valid,
    }
}
