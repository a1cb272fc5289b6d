//! Operand generation strategies, one per kind of operation.
//!
//! Every strategy samples operands inside its own domain and binds them with
//! its validator into a [`ComputeProblem`]. A range a strategy cannot honor is
//! reported as [`QuizError::BadArguments`] before any sampling happens.

use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::duration::{format_seconds, MAX_SECONDS};
use crate::error::{QuizError, Result};
use crate::operator::OperatorKey;
use crate::problem::ComputeProblem;
use crate::validator::ResultValidator;

/// Synthesizes problems of one kind.
pub trait GenerationStrategy: Send + Sync {
    /// The operator this strategy generates.
    fn key(&self) -> OperatorKey;

    /// The validator bound into every generated problem.
    fn validator(&self) -> Arc<dyn ResultValidator>;

    /// Generate one problem with operands drawn from `start..=end`.
    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem>;
}

fn sample(rng: &mut dyn RngCore, range: RangeInclusive<i64>) -> i64 {
    rng.random_range(range)
}

fn check_range(key: OperatorKey, start: i64, end: i64) -> Result<()> {
    if start > end {
        return Err(QuizError::bad_arguments(format!(
            "the start param ({start}) is greater than the end param ({end}) for operator {key}"
        )));
    }
    Ok(())
}

fn check_time_range(key: OperatorKey, start: i64, end: i64, max: i64) -> Result<()> {
    if start < 1 {
        return Err(QuizError::bad_arguments(format!(
            "the start param has to be at least 1 second for operator {key}: {start} given"
        )));
    }
    if end > max {
        return Err(QuizError::bad_arguments(format!(
            "the end param cannot exceed {max} seconds for operator {key}: {end} given"
        )));
    }
    check_range(key, start, end)
}

// ---------------------------------------------------------------------------
// Addition and subtraction
// ---------------------------------------------------------------------------

/// Both operands independently uniform in the range.
pub struct AdditionStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl AdditionStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for AdditionStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::Addition
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_range(self.key(), start, end)?;
        let first = sample(rng, start..=end);
        let second = sample(rng, start..=end);
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

/// Like addition, with the operands swapped so the result is never negative.
pub struct SubtractionStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl SubtractionStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for SubtractionStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::Subtraction
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_range(self.key(), start, end)?;
        let mut first = sample(rng, start..=end);
        let mut second = sample(rng, start..=end);
        if second > first {
            std::mem::swap(&mut first, &mut second);
        }
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

// ---------------------------------------------------------------------------
// Multiplication
// ---------------------------------------------------------------------------

/// Times tables: `start..=end` must sit inside `1..=10`; the second factor
/// is drawn from `1..=10`.
pub struct MultiplicationTableStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl MultiplicationTableStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for MultiplicationTableStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::MultiplicationTable
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        if !(1..=10).contains(&start) {
            return Err(QuizError::bad_arguments(format!(
                "the start param has to be between 1 and 10 included: {start} given"
            )));
        }
        if !(1..=10).contains(&end) {
            return Err(QuizError::bad_arguments(format!(
                "the end param has to be between 1 and 10 included: {end} given"
            )));
        }
        check_range(self.key(), start, end)?;

        let first = sample(rng, start..=end);
        let second = sample(rng, 1..=10);
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

/// Any first factor, single-digit second factor.
pub struct SimpleMultiplicationStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl SimpleMultiplicationStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for SimpleMultiplicationStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::SimpleMultiplication
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_range(self.key(), start, end)?;
        let first = sample(rng, start..=end);
        let second = sample(rng, 1..=9);
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

/// Both factors drawn from the range, so both may have several digits.
pub struct ComplexMultiplicationStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl ComplexMultiplicationStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for ComplexMultiplicationStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::ComplexMultiplication
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_range(self.key(), start, end)?;
        let first = sample(rng, start..=end);
        let second = sample(rng, start..=end);
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

// ---------------------------------------------------------------------------
// Division
// ---------------------------------------------------------------------------

/// Draw a divisor from `divisors` and a dividend from `start..=end` that is
/// at least the divisor.
///
/// When `end` falls inside `divisors`, the divisor is capped at `end`. The
/// dividend is drawn once from `max(start, divisor)..=end`, which is the
/// distribution redrawing until `divisor <= dividend` would give.
fn sample_division(
    key: OperatorKey,
    rng: &mut dyn RngCore,
    start: i64,
    end: i64,
    divisors: RangeInclusive<i64>,
) -> Result<(i64, i64)> {
    check_range(key, start, end)?;
    let (low, high) = divisors.into_inner();
    if end < low {
        return Err(QuizError::bad_arguments(format!(
            "the end param has to be at least {low} for operator {key}: {end} given"
        )));
    }

    let divisor = sample(rng, low..=high.min(end));
    let dividend = sample(rng, start.max(divisor)..=end);
    Ok((dividend, divisor))
}

/// Divisors from 2 to 9.
pub struct SingleDivisorStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl SingleDivisorStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for SingleDivisorStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::SingleDivisor
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        let (dividend, divisor) = sample_division(self.key(), rng, start, end, 2..=9)?;
        Ok(ComputeProblem::new(dividend, divisor, self.key(), self.validator()))
    }
}

/// Two-digit divisors, from 10 to 99.
pub struct DoubleDivisorStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl DoubleDivisorStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for DoubleDivisorStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::DoubleDivisor
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        let (dividend, divisor) = sample_division(self.key(), rng, start, end, 10..=99)?;
        Ok(ComputeProblem::new(dividend, divisor, self.key(), self.validator()))
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Two durations of `start..=end` seconds each. `end` is capped at half a
/// day so the sum still formats.
pub struct TimeAdditionStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl TimeAdditionStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for TimeAdditionStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::TimeAddition
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_time_range(self.key(), start, end, MAX_SECONDS / 2)?;
        let first = format_seconds(sample(rng, start..=end))?;
        let second = format_seconds(sample(rng, start..=end))?;
        Ok(ComputeProblem::new(first, second, self.key(), self.validator()))
    }
}

/// Two durations where the first is strictly longer than the second.
pub struct TimeSubtractionStrategy {
    validator: Arc<dyn ResultValidator>,
}

impl TimeSubtractionStrategy {
    pub fn new(validator: Arc<dyn ResultValidator>) -> Self {
        Self { validator }
    }
}

impl GenerationStrategy for TimeSubtractionStrategy {
    fn key(&self) -> OperatorKey {
        OperatorKey::TimeSubtraction
    }

    fn validator(&self) -> Arc<dyn ResultValidator> {
        Arc::clone(&self.validator)
    }

    fn generate(&self, rng: &mut dyn RngCore, start: i64, end: i64) -> Result<ComputeProblem> {
        check_time_range(self.key(), start, end, MAX_SECONDS)?;
        if start == end {
            return Err(QuizError::bad_arguments(format!(
                "operator {} needs two distinct durations: the range {start}..={end} holds one",
                self.key()
            )));
        }

        let mut first = sample(rng, start..=end);
        let mut second = sample(rng, start..=end);
        if second > first {
            std::mem::swap(&mut first, &mut second);
        }
        if first == second {
            if first > start {
                second = sample(rng, start..=first - 1);
            } else {
                first = sample(rng, start + 1..=end);
            }
        }

        Ok(ComputeProblem::new(
            format_seconds(first)?,
            format_seconds(second)?,
            self.key(),
            self.validator(),
        ))
    }
}
