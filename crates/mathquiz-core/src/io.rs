//! Seams between a quiz session and its user interface.
//!
//! A session reads answers from an [`AnswerSource`] and reports progress to a
//! [`SessionReporter`]. The CLI implements both on the terminal; tests use the
//! scripted implementations below.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::error::QuizError;
use crate::problem::{ComputeProblem, Solution};
use crate::session::{QuizRequest, SessionSummary};

/// Supplies one raw answer per presented problem.
pub trait AnswerSource {
    /// The next answer, or `None` once input is exhausted.
    fn next_answer(&mut self, problem: &ComputeProblem) -> io::Result<Option<String>>;
}

/// Progress reporting trait.
pub trait SessionReporter {
    fn on_session_start(&self, request: &QuizRequest);
    fn on_problem(&self, index: usize, problem: &ComputeProblem);
    fn on_correct(&self, problem: &ComputeProblem);
    fn on_incorrect(&self, problem: &ComputeProblem, expected: &Solution);
    /// The answer could not be parsed or validated; the question is not scored.
    fn on_answer_error(&self, problem: &ComputeProblem, error: &QuizError);
    fn on_timing(&self, elapsed: Duration, total: Duration);
    fn on_score(&self, score: usize, limit: usize);
    fn on_session_complete(&self, summary: &SessionSummary);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl SessionReporter for NoopReporter {
    fn on_session_start(&self, _: &QuizRequest) {}
    fn on_problem(&self, _: usize, _: &ComputeProblem) {}
    fn on_correct(&self, _: &ComputeProblem) {}
    fn on_incorrect(&self, _: &ComputeProblem, _: &Solution) {}
    fn on_answer_error(&self, _: &ComputeProblem, _: &QuizError) {}
    fn on_timing(&self, _: Duration, _: Duration) {}
    fn on_score(&self, _: usize, _: usize) {}
    fn on_session_complete(&self, _: &SessionSummary) {}
}

/// Replays a fixed list of answers, then reports end of input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, _: &ComputeProblem) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front())
    }
}

/// Answers every problem with its expected result.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolvingAnswers;

impl AnswerSource for SolvingAnswers {
    fn next_answer(&mut self, problem: &ComputeProblem) -> io::Result<Option<String>> {
        problem
            .get_good_result()
            .map(|solution| Some(solution.to_string()))
            .map_err(io::Error::other)
    }
}
