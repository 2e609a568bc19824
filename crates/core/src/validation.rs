//! Form input validation
//!
//! Provides the client-side validation applied to create/update payloads
//! before they are sent to the backend:
//! - Required fields
//! - Length and numeric-range constraints
//! - Ordered pairs (min/max bands)
//! - Pattern checks (email, hex color codes)
//!
//! # Example
//!
//! ```rust
//! use velora_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "XL")
//!     .ordered_pair("heightBand", 170.0, 190.0)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern for email fields
pub const EMAIL_PATTERN: &str = r"^[\w.+-]+@[\w.-]+\.\w+$";

/// Pattern for hex color codes (`#RGB` or `#RRGGBB`)
pub const HEX_COLOR_PATTERN: &str = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    #[must_use]
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate minimum length
    #[must_use]
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        if value.len() < min {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at least {} characters", min),
                code: "MIN_LENGTH".to_string(),
                expected: Some(format!(">= {} chars", min)),
                actual: Some(format!("{} chars", value.len())),
            });
        }
        self
    }

    /// Validate maximum length
    #[must_use]
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {} characters", max),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {} chars", max)),
                actual: Some(format!("{} chars", value.len())),
            });
        }
        self
    }

    /// Validate against a regex pattern
    #[must_use]
    pub fn pattern(mut self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(value) {
                    self.result.add_error(ValidationError {
                        field: field.to_string(),
                        message: format!("Must match {}", description),
                        code: "PATTERN".to_string(),
                        expected: Some(description.to_string()),
                        actual: Some(value.to_string()),
                    });
                }
            }
            Err(_) => {
                self.result.add_error(ValidationError {
                    field: field.to_string(),
                    message: "Invalid validation pattern".to_string(),
                    code: "INTERNAL".to_string(),
                    expected: None,
                    actual: None,
                });
            }
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    #[must_use]
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be one of: {}", allowed.join(", ")),
                code: "ONE_OF".to_string(),
                expected: Some(allowed.join(", ")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate a numeric range
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a value is not negative
    #[must_use]
    pub fn non_negative<T: PartialOrd + Default + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
    ) -> Self {
        if value < T::default() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Must not be negative".to_string(),
                code: "NON_NEGATIVE".to_string(),
                expected: Some(">= 0".to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a min/max pair is ordered (`min <= max`)
    #[must_use]
    pub fn ordered_pair<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        min: T,
        max: T,
    ) -> Self {
        if min > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Minimum must not exceed maximum".to_string(),
                code: "ORDERED_PAIR".to_string(),
                expected: Some("min <= max".to_string()),
                actual: Some(format!("{} > {}", min, max)),
            });
        }
        self
    }

    /// Add a custom validation
    #[must_use]
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    #[must_use]
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Validate a size's height/weight bands
///
/// Sizes carry fitting bands; both must be ordered and positive.
pub fn validate_size_bands(
    min_height: f64,
    max_height: f64,
    min_weight: f64,
    max_weight: f64,
) -> ValidationResult {
    Validator::new()
        .non_negative("minHeight", min_height)
        .non_negative("minWeight", min_weight)
        .ordered_pair("heightBand", min_height, max_height)
        .ordered_pair("weightBand", min_weight, max_weight)
        .validate()
}

/// Validate an email address field
pub fn validate_email(field: &str, value: &str) -> ValidationResult {
    Validator::new()
        .required(field, value)
        .pattern(field, value, EMAIL_PATTERN, "email format")
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("name", "").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_min_length_validation() {
        let result = Validator::new().min_length("name", "ab", 3).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "MIN_LENGTH");
    }

    #[test]
    fn test_max_length_validation() {
        let result = Validator::new()
            .max_length("name", "abcdefghijk", 5)
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "MAX_LENGTH");
    }

    #[test]
    fn test_email_pattern() {
        let result = validate_email("email", "ops@velora.shop");
        assert!(result.is_valid());

        let result = validate_email("email", "not-an-email");
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PATTERN");
    }

    #[test]
    fn test_hex_color_pattern() {
        let result = Validator::new()
            .pattern("code", "#1a2b3c", HEX_COLOR_PATTERN, "hex color")
            .validate();
        assert!(result.is_valid());

        let result = Validator::new()
            .pattern("code", "1a2b3c", HEX_COLOR_PATTERN, "hex color")
            .validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_one_of_validation() {
        let result = Validator::new()
            .one_of("role", "superhero", &["admin", "staff", "customer"])
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "ONE_OF");
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("page", 150, 0, 100).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_non_negative_validation() {
        let result = Validator::new().non_negative("price", -1.5).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "NON_NEGATIVE");
    }

    #[test]
    fn test_ordered_pair_validation() {
        let result = Validator::new().ordered_pair("heightBand", 190.0, 170.0).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "ORDERED_PAIR");
    }

    #[test]
    fn test_size_bands_valid() {
        let result = validate_size_bands(160.0, 175.0, 50.0, 70.0);
        assert!(result.is_valid());
    }

    #[test]
    fn test_size_bands_inverted() {
        let result = validate_size_bands(175.0, 160.0, 50.0, 70.0);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_chained_validation() {
        let result = Validator::new()
            .required("name", "test")
            .min_length("name", "test", 2)
            .max_length("name", "test", 10)
            .validate();
        assert!(result.is_valid());
    }

    proptest! {
        #[test]
        fn ordered_pairs_never_flag_sorted_input(a in 0.0f64..1000.0, b in 0.0f64..1000.0) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let result = Validator::new().ordered_pair("band", min, max).validate();
            prop_assert!(result.is_valid());
        }
    }
}
