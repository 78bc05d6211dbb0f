use super::{ValidationResult, positive_u32};

pub const REPEAT_INTERVAL_MINUTES: &str = "repeat_interval_minutes";
pub const MESSAGE: &str = "message";

/// Longest message the game console will broadcast in one line.
pub const MAX_MESSAGE_LENGTH: usize = 150;

pub fn repeat_interval_minutes(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Repeat interval (minutes)")
}

/// Blank is allowed here; [`check_message_required`] rejects it once the
/// module is switched on.
pub fn message(raw: &str) -> Result<String, String> {
    let text = raw.trim();
    if text.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Message of the day must be at most {} characters.",
            MAX_MESSAGE_LENGTH
        ));
    }
    if text.contains('"') {
        return Err("Message of the day cannot contain double quotes.".to_string());
    }
    Ok(text.to_string())
}

/// Save-time rule: an active MOTD needs something to say.
pub fn check_message_required(active: bool, message: &str) -> Result<(), String> {
    if active && message.trim().is_empty() {
        return Err("Enter a message before turning on the message of the day.".to_string());
    }
    Ok(())
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        REPEAT_INTERVAL_MINUTES => repeat_interval_minutes(raw).into(),
        MESSAGE => message(raw).into(),
        _ => ValidationResult::Valid,
    }
}
