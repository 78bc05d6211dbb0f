//! Inputs of the admin list actions (ban, vote, user).

use super::{positive_f64, required_text};
use crate::models::TimeScale;
use chrono::{DateTime, Utc};

pub const PLAYER_NAME: &str = "player_name";
pub const BAN_DURATION: &str = "ban_duration";
pub const VOTE_TEXT: &str = "vote_text";

pub const MAX_PLAYER_NAME_LENGTH: usize = 32;
pub const MAX_VOTE_TEXT_LENGTH: usize = 100;
/// Longest ban accepted: 100 years of 365 days.
pub const MAX_BAN_SECONDS: f64 = 100.0 * 365.0 * 86_400.0;

pub fn player_name(raw: &str) -> Result<String, String> {
    let name = required_text(raw, "Player name", MAX_PLAYER_NAME_LENGTH)?;
    if name.chars().any(char::is_whitespace) {
        return Err("Player name cannot contain spaces.".to_string());
    }
    Ok(name)
}

pub fn ban_duration(raw: &str) -> Result<f64, String> {
    positive_f64(raw, "Ban duration")
}

/// When a ban of `amount` `scale` placed at `now` runs out.
pub fn ban_expiration(
    now: DateTime<Utc>,
    amount: f64,
    scale: TimeScale,
) -> Result<DateTime<Utc>, String> {
    let too_long = || format!("A ban of {} {} is too long.", amount, scale);
    let seconds = amount * scale.to_duration(1.0).num_seconds() as f64;
    if !seconds.is_finite() || seconds > MAX_BAN_SECONDS {
        return Err(too_long());
    }
    now.checked_add_signed(scale.to_duration(amount))
        .ok_or_else(too_long)
}

/// Vote text as the server prints it, e.g. `map campgrounds`.
pub fn vote_text(raw: &str) -> Result<String, String> {
    let text = required_text(raw, "Vote text", MAX_VOTE_TEXT_LENGTH)?;
    Ok(text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name() {
        assert_eq!(player_name(" ^1doom "), Ok("^1doom".to_string()));
        assert!(player_name("").is_err());
        assert!(player_name("two words").is_err());
        assert!(player_name(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_ban_expiration() {
        let now = Utc::now();
        let expires = ban_expiration(now, 2.0, TimeScale::Hours).unwrap();
        assert_eq!((expires - now).num_hours(), 2);

        assert!(ban_expiration(now, 100.0, TimeScale::Years).is_ok());
        assert!(ban_expiration(now, 100.5, TimeScale::Years).is_err());
        assert!(ban_expiration(now, 1e12, TimeScale::Years).is_err());
    }

    #[test]
    fn test_vote_text_is_normalized() {
        assert_eq!(vote_text("  Map   Campgrounds "), Ok("map campgrounds".to_string()));
        assert!(vote_text("   ").is_err());
    }
}
