use super::{ValidationResult, parse_number, positive_u32};

pub const MINIMUM_REQUIRED_ELO: &str = "minimum_required_elo";
pub const MAXIMUM_REQUIRED_ELO: &str = "maximum_required_elo";

/// Zero means no lower limit.
pub fn minimum_required_elo(raw: &str) -> Result<u32, String> {
    parse_number(raw, "Minimum Elo", "a whole number")
}

/// The maximum is optional; blank means no upper limit.
pub fn maximum_required_elo(raw: &str) -> Result<Option<u32>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    positive_u32(raw, "Maximum Elo").map(Some)
}

/// Save-time rule over both bounds: the maximum may not be below the minimum.
pub fn check_bounds(minimum: u32, maximum: Option<u32>) -> Result<(), String> {
    match maximum {
        Some(maximum) if maximum < minimum => Err(format!(
            "Maximum Elo ({}) cannot be less than minimum Elo ({}).",
            maximum, minimum
        )),
        _ => Ok(()),
    }
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        MINIMUM_REQUIRED_ELO => minimum_required_elo(raw).into(),
        MAXIMUM_REQUIRED_ELO => maximum_required_elo(raw).into(),
        _ => ValidationResult::Valid,
    }
}
