use super::{ValidationResult, positive_u32};

pub const MINIMUM_DAYS_REQUIRED: &str = "minimum_days_required";

/// Minimum age of a player's account, in days.
pub fn minimum_days_required(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Minimum account age (days)")
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        MINIMUM_DAYS_REQUIRED => minimum_days_required(raw).into(),
        _ => ValidationResult::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_days() {
        assert_eq!(minimum_days_required("60"), Ok(60));
        assert!(minimum_days_required("0").is_err());
        assert!(minimum_days_required("").is_err());
        assert!(minimum_days_required("-5").is_err());
    }
}
