use super::{ValidationResult, positive_f64, u32_in_range};

pub const MAX_SERVERS_TO_DISPLAY: &str = "max_servers_to_display";
pub const TIME_BETWEEN_QUERIES: &str = "time_between_queries";

pub const MAX_SERVERS: u32 = 10;

pub fn max_servers_to_display(raw: &str) -> Result<u32, String> {
    u32_in_range(raw, "Servers to display", 1, MAX_SERVERS)
}

pub fn time_between_queries(raw: &str) -> Result<f64, String> {
    positive_f64(raw, "Time between queries (seconds)")
}

pub fn validate(field: &str, raw: &str) -> ValidationResult {
    match field {
        MAX_SERVERS_TO_DISPLAY => max_servers_to_display(raw).into(),
        TIME_BETWEEN_QUERIES => time_between_queries(raw).into(),
        _ => ValidationResult::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_count() {
        assert_eq!(max_servers_to_display("10"), Ok(10));
        assert!(max_servers_to_display("11").is_err());
        assert!(max_servers_to_display("0").is_err());
    }

    #[test]
    fn test_query_interval() {
        assert_eq!(time_between_queries("45"), Ok(45.0));
        assert!(time_between_queries("0").is_err());
    }
}
