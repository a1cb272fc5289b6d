//! Operation keys.
//!
//! The set is closed: each key names one generation strategy paired with one
//! result validator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Identifies a kind of problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperatorKey {
    #[serde(rename = "+")]
    Addition,
    #[serde(rename = "-")]
    Subtraction,
    #[serde(rename = "×")]
    MultiplicationTable,
    #[serde(rename = "1×")]
    SimpleMultiplication,
    #[serde(rename = "n×")]
    ComplexMultiplication,
    #[serde(rename = "÷")]
    SingleDivisor,
    #[serde(rename = "2÷")]
    DoubleDivisor,
    #[serde(rename = "t+")]
    TimeAddition,
    #[serde(rename = "t-")]
    TimeSubtraction,
}

impl OperatorKey {
    /// Every key, in catalog order.
    pub const ALL: [OperatorKey; 9] = [
        OperatorKey::Addition,
        OperatorKey::Subtraction,
        OperatorKey::MultiplicationTable,
        OperatorKey::SimpleMultiplication,
        OperatorKey::ComplexMultiplication,
        OperatorKey::SingleDivisor,
        OperatorKey::DoubleDivisor,
        OperatorKey::TimeAddition,
        OperatorKey::TimeSubtraction,
    ];

    /// The short symbol typed on the command line.
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKey::Addition => "+",
            OperatorKey::Subtraction => "-",
            OperatorKey::MultiplicationTable => "×",
            OperatorKey::SimpleMultiplication => "1×",
            OperatorKey::ComplexMultiplication => "n×",
            OperatorKey::SingleDivisor => "÷",
            OperatorKey::DoubleDivisor => "2÷",
            OperatorKey::TimeAddition => "t+",
            OperatorKey::TimeSubtraction => "t-",
        }
    }

    /// Human-readable description for operator listings.
    pub fn description(&self) -> &'static str {
        match self {
            OperatorKey::Addition => "Key for addition operation",
            OperatorKey::Subtraction => "Key for subtraction operation",
            OperatorKey::MultiplicationTable => "Key for table operation (ex. 4 × 3)",
            OperatorKey::SimpleMultiplication => "Key for simple multiplication (ex. 45 × 2)",
            OperatorKey::ComplexMultiplication => "Key for complex multiplication (ex. 12 × 11)",
            OperatorKey::SingleDivisor => "Key for single divisor (ex. 35 ÷ 5)",
            OperatorKey::DoubleDivisor => "Key for double divisor (ex. 234 ÷ 25)",
            OperatorKey::TimeAddition => "Key for time addition (ex. 34m24s + 54m31s)",
            OperatorKey::TimeSubtraction => "Key for time subtraction (ex. 54m48s - 45m21s)",
        }
    }

    /// Key used at position `index` when no operator is forced:
    /// additions on even positions, subtractions on odd ones.
    pub fn alternating(index: usize) -> OperatorKey {
        if index % 2 == 0 {
            OperatorKey::Addition
        } else {
            OperatorKey::Subtraction
        }
    }
}

impl fmt::Display for OperatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for OperatorKey {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Plain ASCII spellings for terminals without × and ÷.
        let normalized = match trimmed {
            "x" | "*" => "×",
            "1x" | "1*" => "1×",
            "nx" | "n*" => "n×",
            "/" => "÷",
            "2/" => "2÷",
            other => other,
        };
        OperatorKey::ALL
            .into_iter()
            .find(|key| key.symbol() == normalized)
            .ok_or_else(|| QuizError::bad_arguments(format!("the operator {trimmed} not exists")))
    }
}

/// All `(key, description)` pairs, in catalog order.
pub fn operators_list() -> Vec<(OperatorKey, &'static str)> {
    OperatorKey::ALL
        .into_iter()
        .map(|key| (key, key.description()))
        .collect()
}
