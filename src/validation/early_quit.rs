use super::{ValidationResult, positive_f64, positive_u32};

pub const MAX_QUITS_ALLOWED: &str = "max_quits_allowed";
pub const BAN_TIME: &str = "ban_time";

pub fn max_quits_allowed(raw: &str) -> Result<u32, String> {
    positive_u32(raw, "Maximum early quits")
}

pub fn ban_time(raw: &str) -> Result<f64, String> {
    positive_f64(raw, "Early quit ban time")
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        MAX_QUITS_ALLOWED => max_quits_allowed(raw).into(),
        BAN_TIME => ban_time(raw).into(),
        _ => ValidationResult::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_quits() {
        assert_eq!(max_quits_allowed("3"), Ok(3));
        assert!(max_quits_allowed("0").is_err());
        assert!(max_quits_allowed("two").is_err());
    }

    #[test]
    fn test_ban_time() {
        assert_eq!(ban_time("0.5"), Ok(0.5));
        assert!(ban_time("0").is_err());
        assert!(ban_time("").is_err());
    }
}
