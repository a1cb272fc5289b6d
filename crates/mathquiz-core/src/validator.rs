//! Result validators, one per kind of operation.
//!
//! Validators are stateless and shared between every problem (and every
//! strategy) of the same kind.

use crate::duration::{format_duration, format_seconds, parse_duration};
use crate::error::{QuizError, Result};
use crate::problem::{Operand, Solution};

/// Computes the canonical result of an operation and checks answers against it.
pub trait ResultValidator: Send + Sync {
    /// Short name used in logs and debug output.
    fn name(&self) -> &'static str;

    /// The correct result for `first` and `second`.
    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution>;

    /// Whether `answer` equals the correct result.
    fn validate(&self, answer: &Solution, first: &Operand, second: &Operand) -> Result<bool> {
        Ok(*answer == self.get_result(first, second)?)
    }
}

fn overflow(first: i64, op: &str, second: i64) -> QuizError {
    QuizError::validation(format!("{first} {op} {second} overflows"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdditionValidator;

impl ResultValidator for AdditionValidator {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (a, b) = (first.as_int()?, second.as_int()?);
        a.checked_add(b)
            .map(Solution::Number)
            .ok_or_else(|| overflow(a, "+", b))
    }
}

/// Callers guarantee `first >= second`; the validator does not check it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtractionValidator;

impl ResultValidator for SubtractionValidator {
    fn name(&self) -> &'static str {
        "subtraction"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (a, b) = (first.as_int()?, second.as_int()?);
        a.checked_sub(b)
            .map(Solution::Number)
            .ok_or_else(|| overflow(a, "-", b))
    }
}

/// Shared by the table, simple and complex multiplication strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplicationValidator;

impl ResultValidator for MultiplicationValidator {
    fn name(&self) -> &'static str {
        "multiplication"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (a, b) = (first.as_int()?, second.as_int()?);
        a.checked_mul(b)
            .map(Solution::Number)
            .ok_or_else(|| overflow(a, "×", b))
    }
}

/// Integer division written as `"{quotient}"` or `"{quotient}r{remainder}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivisionValidator;

impl ResultValidator for DivisionValidator {
    fn name(&self) -> &'static str {
        "division"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (dividend, divisor) = (first.as_int()?, second.as_int()?);
        if divisor > dividend {
            return Err(QuizError::validation(format!(
                "The first number ({dividend}) isn't greater than {divisor}"
            )));
        }
        if divisor <= 0 {
            return Err(QuizError::validation(format!(
                "cannot divide {dividend} by {divisor}"
            )));
        }

        let quotient = dividend / divisor;
        let remainder = dividend % divisor;
        Ok(Solution::Text(if remainder > 0 {
            format!("{quotient}r{remainder}")
        } else {
            quotient.to_string()
        }))
    }
}

/// Adds two durations component-wise and normalizes the sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeAdditionValidator;

impl ResultValidator for TimeAdditionValidator {
    fn name(&self) -> &'static str {
        "time addition"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (a, b) = (first.as_duration()?, second.as_duration()?);
        let context = || format!("An error occurred while validating: {a} + {b}");

        let sum = parse_duration(a)
            .and_then(|x| x.checked_add(&parse_duration(b)?))
            .and_then(format_duration)
            .map_err(|e| QuizError::validation_caused_by(context(), e))?;
        Ok(Solution::Text(sum))
    }
}

/// Subtracts two durations; the first must be strictly longer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSubtractionValidator;

impl ResultValidator for TimeSubtractionValidator {
    fn name(&self) -> &'static str {
        "time subtraction"
    }

    fn get_result(&self, first: &Operand, second: &Operand) -> Result<Solution> {
        let (a, b) = (first.as_duration()?, second.as_duration()?);
        let context = || format!("An error occurred while validating: {a} - {b}");

        let first_secs = parse_duration(a)
            .and_then(|x| x.total_seconds())
            .map_err(|e| QuizError::validation_caused_by(context(), e))?;
        let second_secs = parse_duration(b)
            .and_then(|x| x.total_seconds())
            .map_err(|e| QuizError::validation_caused_by(context(), e))?;

        if first_secs <= second_secs {
            return Err(QuizError::validation(format!(
                "The first time ({a}) isn't greater than {b}"
            )));
        }

        let diff = i64::try_from(first_secs - second_secs).unwrap_or(i64::MAX);
        format_seconds(diff)
            .map(Solution::Text)
            .map_err(|e| QuizError::validation_caused_by(context(), e))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn check(v: &dyn ResultValidator, answer: Solution, first: Operand, second: Operand) -> bool {
        v.validate(&answer, &first, &second).unwrap()
    }

    #[test]
    fn addition() {
        assert!(check(&AdditionValidator, 2.into(), 1.into(), 1.into()));
        assert!(!check(&AdditionValidator, 2.into(), 2.into(), 1.into()));
        assert!(AdditionValidator
            .get_result(&i64::MAX.into(), &1.into())
            .is_err());
    }

    #[test]
    fn subtraction() {
        assert!(check(&SubtractionValidator, 2.into(), 3.into(), 1.into()));
        assert!(!check(&SubtractionValidator, 2.into(), 2.into(), 1.into()));
    }

    #[test]
    fn multiplication() {
        assert!(check(&MultiplicationValidator, 9.into(), 3.into(), 3.into()));
        assert!(!check(&MultiplicationValidator, 8.into(), 3.into(), 3.into()));
    }

    #[test]
    fn integer_validators_reject_durations() {
        let err = AdditionValidator
            .get_result(&"5s".into(), &1.into())
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation { .. }));
    }

    #[test]
    fn division() {
        assert!(check(&DivisionValidator, "8r1".into(), 65.into(), 8.into()));
        assert!(check(&DivisionValidator, "8".into(), 64.into(), 8.into()));
        assert!(!check(&DivisionValidator, "8r2".into(), 65.into(), 8.into()));

        let err = DivisionValidator
            .validate(&"1".into(), &8.into(), &9.into())
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation { .. }));
        assert!(err
            .to_string()
            .contains("The first number (8) isn't greater than 9"));
    }

    #[test]
    fn time_addition() {
        assert_eq!(
            TimeAdditionValidator
                .get_result(&"50m56s".into(), &"40m14s".into())
                .unwrap(),
            Solution::from("1h31m10s")
        );
        assert!(check(&TimeAdditionValidator, "51m10s".into(), "30m56s".into(), "20m14s".into()));
        assert!(!check(&TimeAdditionValidator, "50m10s".into(), "30m56s".into(), "20m14s".into()));
    }

    #[test]
    fn time_addition_wraps_parse_failure() {
        let err = TimeAdditionValidator
            .get_result(&"50m".into(), &"40m14s".into())
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("An error occurred while validating: 50m + 40m14s"));
        let cause = err.source().expect("parse failure should be kept");
        assert!(cause.to_string().contains("50m"));
    }

    #[test]
    fn oversized_durations_fail_validation() {
        let err = TimeAdditionValidator
            .get_result(&"6000000000000000h0s".into(), &"1s".into())
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation { .. }));
        assert!(err.source().unwrap().to_string().contains("out of range"));

        let err = TimeSubtractionValidator
            .get_result(&"6000000000000000h0s".into(), &"1s".into())
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn time_subtraction() {
        assert!(check(&TimeSubtractionValidator, "1h30m10s".into(), "2h10m20s".into(), "40m10s".into()));
        assert!(check(&TimeSubtractionValidator, "30m10s".into(), "1h10m20s".into(), "40m10s".into()));

        let err = TimeSubtractionValidator
            .get_result(&"50m".into(), &"40m14s".into())
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("An error occurred while validating: 50m - 40m14s"));
        assert!(err.source().is_some());
    }

    #[test]
    fn time_subtraction_requires_longer_first() {
        let err = TimeSubtractionValidator
            .get_result(&"50m10s".into(), &"1h10m14s".into())
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("The first time (50m10s) isn't greater than 1h10m14s"));
        assert!(err.source().is_none());

        assert!(TimeSubtractionValidator
            .get_result(&"5m".into(), &"5m".into())
            .is_err());
        assert!(TimeSubtractionValidator
            .get_result(&"5m00s".into(), &"300s".into())
            .is_err());
    }
}
