//! Field-level request validation.
//!
//! Transport adapters run these checks before calling a service. All
//! violations of a request are collected, in rule order, into a single
//! [`DomainError::FieldValidation`].

use rust_decimal::Decimal;

use crate::error::DomainError;

/// Maximum length of a project name, in characters.
pub const NAME_MAX_LENGTH: usize = 200;

/// Maximum length of an entry description, in characters.
pub const DESCRIPTION_MAX_LENGTH: usize = 3000;

/// Largest time a single entry may record.
pub const TIME_SPENT_MAX: Decimal = Decimal::TEN;

const TIME_SPENT_INTEGER_DIGITS: u32 = 2;
const TIME_SPENT_FRACTION_DIGITS: u32 = 2;

/// Collects violation messages for one request.
#[derive(Debug, Default)]
pub struct FieldViolations {
    messages: Vec<String>,
}

impl FieldViolations {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `valid` holds.
    pub fn check(&mut self, valid: bool, message: impl Into<String>) -> &mut Self {
        if !valid {
            self.messages.push(message.into());
        }
        self
    }

    /// Returns the recorded messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether any rule was violated.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Turns the collected violations into a result.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            tracing::warn!(violations = ?self.messages, "request validation failed");
            Err(DomainError::FieldValidation(self.messages))
        }
    }
}

/// Project name: not blank, at most [`NAME_MAX_LENGTH`] characters.
pub fn check_project_name(violations: &mut FieldViolations, name: &str) {
    violations
        .check(!name.trim().is_empty(), "Name cannot be blank or null")
        .check(
            name.chars().count() <= NAME_MAX_LENGTH,
            format!("Name cannot be longer than {NAME_MAX_LENGTH} characters"),
        );
}

/// Entry time spent: greater than zero, at most ten, and at most two
/// integer and two fraction digits once trailing zeros are dropped.
pub fn check_time_spent(violations: &mut FieldViolations, time_spent: Decimal) {
    let (integer_digits, fraction_digits) = digit_counts(time_spent);

    violations
        .check(
            time_spent > Decimal::ZERO,
            "Value for timeSpent must be greater than 0",
        )
        .check(
            time_spent <= TIME_SPENT_MAX,
            "Maximum value for timeSpent is 10",
        )
        .check(
            integer_digits <= TIME_SPENT_INTEGER_DIGITS
                && fraction_digits <= TIME_SPENT_FRACTION_DIGITS,
            "Value for timeSpent be must within 0-10 range with maximum of two fraction digits",
        );
}

/// Entry description: at most [`DESCRIPTION_MAX_LENGTH`] characters.
pub fn check_description(violations: &mut FieldViolations, description: Option<&str>) {
    let length = description.map_or(0, |d| d.chars().count());
    violations.check(
        length <= DESCRIPTION_MAX_LENGTH,
        format!("Description cannot be longer than {DESCRIPTION_MAX_LENGTH} characters"),
    );
}

/// Project id used as a path parameter: strictly positive.
pub fn check_project_id(violations: &mut FieldViolations, project_id: i64) {
    violations.check(project_id > 0, "ProjectId cannot be negative value");
}

/// Returns (integer digits, fraction digits) of the value without trailing
/// fractional zeros.
fn digit_counts(value: Decimal) -> (u32, u32) {
    let normalized = value.normalize();
    let scale = normalized.scale();
    let precision = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    (precision.saturating_sub(scale), scale)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time_spent_messages(value: &str) -> Vec<String> {
        let mut violations = FieldViolations::new();
        check_time_spent(&mut violations, dec(value));
        violations.messages().to_vec()
    }

    #[test]
    fn empty_collector_is_ok() {
        assert!(FieldViolations::new().into_result().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut violations = FieldViolations::new();
        check_project_name(&mut violations, "   ");
        assert_eq!(violations.messages(), ["Name cannot be blank or null"]);
    }

    #[test]
    fn long_name_is_rejected() {
        let mut violations = FieldViolations::new();
        check_project_name(&mut violations, &"x".repeat(201));
        assert_eq!(
            violations.messages(),
            ["Name cannot be longer than 200 characters"]
        );

        let mut ok = FieldViolations::new();
        check_project_name(&mut ok, &"x".repeat(200));
        assert!(ok.is_empty());
    }

    #[test]
    fn time_spent_within_range_passes() {
        for value in ["0.01", "1", "4.98", "9.99", "10", "10.00", "2.50"] {
            assert!(time_spent_messages(value).is_empty(), "{value}");
        }
    }

    #[test]
    fn non_positive_time_spent_is_rejected() {
        assert_eq!(
            time_spent_messages("0"),
            ["Value for timeSpent must be greater than 0"]
        );
        assert_eq!(
            time_spent_messages("-1"),
            ["Value for timeSpent must be greater than 0"]
        );
    }

    #[test]
    fn time_spent_above_ten_is_rejected() {
        assert_eq!(
            time_spent_messages("10.01"),
            ["Maximum value for timeSpent is 10"]
        );
    }

    #[test]
    fn too_many_fraction_digits_is_rejected() {
        assert_eq!(
            time_spent_messages("1.234"),
            ["Value for timeSpent be must within 0-10 range with maximum of two fraction digits"]
        );
        assert_eq!(
            time_spent_messages("9.999999999999999999"),
            ["Value for timeSpent be must within 0-10 range with maximum of two fraction digits"]
        );
    }

    #[test]
    fn violations_keep_rule_order() {
        assert_eq!(
            time_spent_messages("100.5"),
            [
                "Maximum value for timeSpent is 10",
                "Value for timeSpent be must within 0-10 range with maximum of two fraction digits",
            ]
        );
    }

    #[test]
    fn description_length_is_bounded() {
        let mut violations = FieldViolations::new();
        check_description(&mut violations, None);
        check_description(&mut violations, Some(&"d".repeat(3000)));
        assert!(violations.is_empty());

        check_description(&mut violations, Some(&"d".repeat(3001)));
        assert_eq!(
            violations.messages(),
            ["Description cannot be longer than 3000 characters"]
        );
    }

    #[test]
    fn project_id_must_be_positive() {
        let mut violations = FieldViolations::new();
        check_project_id(&mut violations, 1);
        assert!(violations.is_empty());

        check_project_id(&mut violations, 0);
        check_project_id(&mut violations, -5);
        assert_eq!(violations.messages().len(), 2);
    }

    #[test]
    fn digit_counts_ignore_trailing_zeros() {
        assert_eq!(digit_counts(dec("10.00")), (2, 0));
        assert_eq!(digit_counts(dec("0.50")), (0, 1));
        assert_eq!(digit_counts(dec("4.98")), (1, 2));
    }
}
