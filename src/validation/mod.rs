//! Field validators, one module per settings group.
//!
//! Every validator is a pure function from the raw text of one field to either
//! the typed value or a human-readable, field-specific message. They never
//! touch the view or storage. Rules that need two fields (Elo min/max, IRC
//! nick-service credentials) are not validators; the save path checks them
//! after every field passes.
//!
//! [`FieldCollector`] runs a group's validators and keeps *every* failure, so a
//! rejected save can mark all offending fields at once.

pub mod account_date;
pub mod core_options;
pub mod early_quit;
pub mod elo_limit;
pub mod irc;
pub mod lists;
pub mod motd;
pub mod pickup;
pub mod server_list;

use std::fmt;
use std::str::FromStr;

/// Outcome of checking one field, shown inline next to the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }
}

impl<T> From<Result<T, String>> for ValidationResult {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(_) => ValidationResult::Valid,
            Err(message) => ValidationResult::Invalid(message),
        }
    }
}

/// A failed field, named by the form field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failures of one save attempt, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field,
            message: message.into(),
        }])
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// Runs validators over a form and accumulates failures.
///
/// # Example
/// ```ignore
/// let mut fields = FieldCollector::new();
/// let days = fields.check("minimum_days_required", &form.minimum_days, account_date::minimum_days);
/// fields.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct FieldCollector {
    errors: Vec<FieldError>,
}

impl FieldCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `raw` for `field`, recording the failure if there is one.
    pub fn check<T>(
        &mut self,
        field: &'static str,
        raw: &str,
        validator: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        match validator(raw) {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(FieldError { field, message });
                None
            }
        }
    }

    /// Record a failure found outside a single-field validator.
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Parse a required numeric field as `T`.
pub(crate) fn parse_number<T: FromStr>(raw: &str, label: &str, kind: &str) -> Result<T, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required.", label));
    }
    trimmed
        .parse::<T>()
        .map_err(|_| format!("{} must be {}.", label, kind))
}

/// Parse a whole number greater than zero.
pub(crate) fn positive_u32(raw: &str, label: &str) -> Result<u32, String> {
    let value: u32 = parse_number(raw, label, "a whole number")?;
    if value == 0 {
        return Err(format!("{} must be greater than zero.", label));
    }
    Ok(value)
}

/// Parse a whole number within `min..=max`.
pub(crate) fn u32_in_range(raw: &str, label: &str, min: u32, max: u32) -> Result<u32, String> {
    let value: u32 = parse_number(raw, label, "a whole number")?;
    if !(min..=max).contains(&value) {
        return Err(format!("{} must be between {} and {}.", label, min, max));
    }
    Ok(value)
}

/// Parse a finite decimal number greater than zero.
pub(crate) fn positive_f64(raw: &str, label: &str) -> Result<f64, String> {
    let value: f64 = parse_number(raw, label, "a number")?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a number greater than zero.", label));
    }
    Ok(value)
}

/// Require non-blank text no longer than `max_len` characters.
pub(crate) fn required_text(raw: &str, label: &str, max_len: usize) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required.", label));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!(
            "{} must be at most {} characters.",
            label, max_len
        ));
    }
    Ok(trimmed.to_string())
}
