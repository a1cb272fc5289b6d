//! Problem value types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::operator::OperatorKey;
use crate::validator::ResultValidator;

/// One side of an operation: an integer, or a duration string for time kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Int(i64),
    Duration(String),
}

impl Operand {
    /// The integer value, or a validation error for duration operands.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Operand::Int(n) => Ok(*n),
            Operand::Duration(s) => Err(QuizError::validation(format!(
                "expected an integer operand, got duration {s}"
            ))),
        }
    }

    /// The duration string, or a validation error for integer operands.
    pub fn as_duration(&self) -> Result<&str> {
        match self {
            Operand::Duration(s) => Ok(s),
            Operand::Int(n) => Err(QuizError::validation(format!(
                "expected a duration operand, got integer {n}"
            ))),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(n) => write!(f, "{n}"),
            Operand::Duration(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Int(n)
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Int(n.into())
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Duration(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Duration(s)
    }
}

/// The result of an operation, or a user's answer to one.
///
/// Integer kinds produce `Number`; division (`8r1`) and time kinds
/// (`1h31m10s`) produce `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Solution {
    Number(i64),
    Text(String),
}

impl Solution {
    /// Read a raw answer in the same shape as `self`.
    ///
    /// Integer answers that fail to parse yield [`QuizError::InvalidAnswer`];
    /// text answers are only trimmed.
    pub fn parse_answer(&self, raw: &str) -> Result<Solution> {
        let trimmed = raw.trim();
        match self {
            Solution::Number(_) => trimmed
                .parse::<i64>()
                .map(Solution::Number)
                .map_err(|source| QuizError::InvalidAnswer {
                    input: trimmed.to_string(),
                    source,
                }),
            Solution::Text(_) => Ok(Solution::Text(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Number(n) => write!(f, "{n}"),
            Solution::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Solution {
    fn from(n: i64) -> Self {
        Solution::Number(n)
    }
}

impl From<i32> for Solution {
    fn from(n: i32) -> Self {
        Solution::Number(n.into())
    }
}

impl From<&str> for Solution {
    fn from(s: &str) -> Self {
        Solution::Text(s.to_string())
    }
}

/// Identity of a problem inside a session's answer cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub first: Operand,
    pub second: Operand,
    pub operator: OperatorKey,
}

impl AnswerKey {
    pub fn new(first: impl Into<Operand>, second: impl Into<Operand>, operator: OperatorKey) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            operator,
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.first, self.second, self.operator)
    }
}

/// Two operands bound to an operator and the validator that checks answers.
///
/// Immutable once built. The validator is shared with every other problem
/// of the same kind.
#[derive(Clone)]
pub struct ComputeProblem {
    first: Operand,
    second: Operand,
    operator: OperatorKey,
    validator: Arc<dyn ResultValidator>,
}

impl ComputeProblem {
    pub fn new(
        first: impl Into<Operand>,
        second: impl Into<Operand>,
        operator: OperatorKey,
        validator: Arc<dyn ResultValidator>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            operator,
            validator,
        }
    }

    pub fn first(&self) -> &Operand {
        &self.first
    }

    pub fn second(&self) -> &Operand {
        &self.second
    }

    pub fn operator(&self) -> OperatorKey {
        self.operator
    }

    /// The `(first, second, operator)` identity used for deduplication.
    pub fn key(&self) -> AnswerKey {
        AnswerKey {
            first: self.first.clone(),
            second: self.second.clone(),
            operator: self.operator,
        }
    }

    /// The expected result, as computed by the bound validator.
    pub fn get_good_result(&self) -> Result<Solution> {
        self.validator.get_result(&self.first, &self.second)
    }

    /// Check an already-typed answer.
    pub fn validate(&self, answer: &Solution) -> Result<bool> {
        self.validator.validate(answer, &self.first, &self.second)
    }

    /// Parse a raw answer in the shape this problem expects, then check it.
    pub fn check_answer(&self, raw: &str) -> Result<bool> {
        let answer = self.get_good_result()?.parse_answer(raw)?;
        self.validate(&answer)
    }
}

impl fmt::Display for ComputeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.first, self.operator, self.second)
    }
}

impl fmt::Debug for ComputeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeProblem")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("operator", &self.operator)
            .field("validator", &self.validator.name())
            .finish()
    }
}
