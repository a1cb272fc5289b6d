//! mathquiz-core: Problem generation, answer validation, and quiz sessions.
//!
//! Each kind of problem pairs a [`strategy::GenerationStrategy`] with a
//! [`validator::ResultValidator`]; the [`registry::StrategyRegistry`] maps
//! operator keys to strategies, and [`session::QuizSession`] drives a run.

pub mod cache;
pub mod duration;
pub mod error;
pub mod io;
pub mod operator;
pub mod problem;
pub mod registry;
pub mod session;
pub mod strategy;
pub mod validator;

pub use cache::{AnswerCache, ReusePolicy};
pub use error::{QuizError, Result};
pub use operator::OperatorKey;
pub use problem::{AnswerKey, ComputeProblem, Operand, Solution};
pub use registry::StrategyRegistry;
pub use session::{QuizRequest, QuizSession, SessionOptions, SessionSummary};
