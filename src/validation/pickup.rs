use super::{ValidationResult, positive_f64, positive_u32, u32_in_range};

pub const TEAM_SIZE: &str = "team_size";
pub const MAX_SUBS_PER_PLAYER: &str = "max_subs_per_player";
pub const MAX_NO_SHOWS_PER_PLAYER: &str = "max_no_shows_per_player";
pub const EXCESSIVE_SUBS_BAN_TIME: &str = "excessive_subs_ban_time";
pub const EXCESSIVE_NO_SHOWS_BAN_TIME: &str = "excessive_no_shows_ban_time";

pub const MAX_TEAM_SIZE: u32 = 8;

pub fn team_size(raw: &str) -> Result<u32, String> {
    u32_in_range(raw, "Team size", 1, MAX_TEAM_SIZE)
}

pub fn max_subs_per_player(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Maximum subs per player")
}

pub fn max_no_shows_per_player(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Maximum no-shows per player")
}

pub fn excessive_subs_ban_time(raw: &str) -> Result<f64, String> {
    positive_f64(raw, "Excessive subs ban time")
}

pub fn excessive_no_shows_ban_time(raw: &str) -> Result<f64, String> {
    positive_f64(raw, "Excessive no-shows ban time")
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        TEAM_SIZE => team_size(raw).into(),
        MAX_SUBS_PER_PLAYER => max_subs_per_player(raw).into(),
        MAX_NO_SHOWS_PER_PLAYER => max_no_shows_per_player(raw).into(),
        EXCESSIVE_SUBS_BAN_TIME => excessive_subs_ban_time(raw).into(),
        EXCESSIVE_NO_SHOWS_BAN_TIME => excessive_no_shows_ban_time(raw).into(),
        _ => ValidationResult::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_size_bounds() {
        assert_eq!(team_size("4"), Ok(4));
        assert!(team_size("0").is_err());
        assert!(team_size("9").is_err());
    }

    #[test]
    fn test_limits_and_ban_times() {
        assert_eq!(max_subs_per_player("2"), Ok(2));
        assert!(max_no_shows_per_player("0").is_err());
        assert_eq!(excessive_subs_ban_time("1.5"), Ok(1.5));
        assert!(excessive_no_shows_ban_time("-2").is_err());
    }
}
