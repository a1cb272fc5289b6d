//! Quiz session orchestrator.
//!
//! A session front-loads `limit` problems, then presents them one at a time,
//! regenerating any problem the answer cache withholds, and keeps the score.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::{AnswerCache, ReusePolicy};
use crate::error::{QuizError, Result};
use crate::io::{AnswerSource, SessionReporter};
use crate::operator::OperatorKey;
use crate::problem::ComputeProblem;
use crate::registry::StrategyRegistry;

/// What to generate for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Lower bound of the operand range.
    pub start: i64,
    /// Upper bound of the operand range.
    pub end: i64,
    /// Number of problems.
    pub limit: usize,
    /// Fixed operator; additions and subtractions alternate when `None`.
    #[serde(default)]
    pub operator: Option<OperatorKey>,
    /// Measure the time taken to answer each problem.
    #[serde(default)]
    pub timer: bool,
    /// Seed for a reproducible run; the OS seeds the generator otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl QuizRequest {
    pub fn new(start: i64, end: i64, limit: usize) -> Self {
        Self {
            start,
            end,
            limit,
            operator: None,
            timer: false,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_operator(mut self, operator: OperatorKey) -> Self {
        self.operator = Some(operator);
        self
    }

    #[must_use]
    pub fn with_timer(mut self, timer: bool) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The operator used for the problem at `index`.
    pub fn operator_at(&self, index: usize) -> OperatorKey {
        self.operator
            .unwrap_or_else(|| OperatorKey::alternating(index))
    }
}

/// Tuning knobs that come from configuration rather than the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub reuse_policy: ReusePolicy,
    /// Attempts allowed to find a problem the cache does not withhold.
    pub max_regenerations: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reuse_policy: ReusePolicy::Correct,
            max_regenerations: 1000,
        }
    }
}

/// How a presented problem ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Correct,
    Incorrect,
    InvalidAnswer,
    ValidationFailed,
}

/// One presented problem and what happened to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub problem: String,
    pub answer: String,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<f64>,
}

/// Result of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub start: i64,
    pub end: i64,
    pub limit: usize,
    #[serde(default)]
    pub operator: Option<OperatorKey>,
    pub score: usize,
    pub outcomes: Vec<QuestionOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_secs: Option<f64>,
}

impl SessionSummary {
    /// Number of problems the user was shown and answered.
    pub fn answered(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.score == self.limit
    }
}

/// Drives one quiz run.
pub struct QuizSession<'r> {
    registry: &'r StrategyRegistry,
    request: QuizRequest,
    options: SessionOptions,
    rng: StdRng,
    cache: AnswerCache,
    score: usize,
    total_time: Duration,
}

impl<'r> QuizSession<'r> {
    /// Start a session with an empty answer cache.
    pub fn new(registry: &'r StrategyRegistry, request: QuizRequest, options: SessionOptions) -> Self {
        let rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            registry,
            request,
            options,
            rng,
            cache: AnswerCache::new(),
            score: 0,
            total_time: Duration::ZERO,
        }
    }

    pub fn request(&self) -> &QuizRequest {
        &self.request
    }

    pub fn cache(&self) -> &AnswerCache {
        &self.cache
    }

    /// Mutable access to the cache, e.g. to carry answers over deliberately.
    pub fn cache_mut(&mut self) -> &mut AnswerCache {
        &mut self.cache
    }

    /// Correct answers across every run since the session was created or reset.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Timed answering across every run since the session was created or reset.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Forget every answer and the score, as for a brand new session.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.score = 0;
        self.total_time = Duration::ZERO;
    }

    /// Generate the whole batch up front. Any generation error aborts it.
    pub fn generate_batch(&mut self) -> Result<Vec<ComputeProblem>> {
        let QuizRequest { start, end, .. } = self.request;
        (0..self.request.limit)
            .map(|index| {
                let key = self.request.operator_at(index);
                self.registry.generate(&mut self.rng, key, start, end)
            })
            .collect()
    }

    /// Generate one problem of kind `key` that the cache does not withhold.
    pub fn next_problem(&mut self, key: OperatorKey) -> Result<ComputeProblem> {
        let problem = self
            .registry
            .generate(&mut self.rng, key, self.request.start, self.request.end)?;
        self.ensure_fresh(problem)
    }

    /// Regenerate `problem` with the same operator until the cache no longer
    /// withholds it.
    pub fn ensure_fresh(&mut self, mut problem: ComputeProblem) -> Result<ComputeProblem> {
        let mut attempts = 0;
        let mut key = problem.key();
        while self.cache.blocks(&key, self.options.reuse_policy) {
            if attempts >= self.options.max_regenerations {
                return Err(QuizError::bad_arguments(format!(
                    "no unanswered {} problem left in {}..={} after {attempts} attempts",
                    key.operator, self.request.start, self.request.end
                )));
            }
            debug!("key {key} already answered, regenerating");
            attempts += 1;
            problem = self.registry.generate(
                &mut self.rng,
                key.operator,
                self.request.start,
                self.request.end,
            )?;
            key = problem.key();
        }
        Ok(problem)
    }

    /// Run the quiz to completion, or until `answers` runs dry.
    ///
    /// Generation errors abort the run. Answer and validation errors only
    /// skip scoring for the question at hand.
    ///
    /// Runs on the same session share its cache, score and total time; only
    /// [`QuizSession::reset`] clears them. The returned summary and the
    /// reporter's score and timing describe this run alone.
    pub fn run(
        &mut self,
        answers: &mut dyn AnswerSource,
        reporter: &dyn SessionReporter,
    ) -> Result<SessionSummary> {
        let session_id = Uuid::new_v4();
        let started_at = Utc::now();
        let limit = self.request.limit;
        let mut score = 0;
        let mut run_time = Duration::ZERO;

        info!(
            %session_id,
            start = self.request.start,
            end = self.request.end,
            limit,
            operator = ?self.request.operator,
            "quiz session started"
        );
        if self.request.timer {
            info!("timer is activated");
        }
        reporter.on_session_start(&self.request);

        let problems = self.generate_batch()?;
        debug!("problems generated: {problems:?}");

        let mut outcomes = Vec::with_capacity(limit);
        for (index, generated) in problems.into_iter().enumerate() {
            let problem = self.ensure_fresh(generated)?;
            reporter.on_problem(index, &problem);

            let asked_at = Instant::now();
            let Some(raw) = answers.next_answer(&problem)? else {
                info!("answer source exhausted after {index} problem(s)");
                break;
            };
            let elapsed = asked_at.elapsed();

            let elapsed_secs = if self.request.timer {
                run_time += elapsed;
                self.total_time += elapsed;
                reporter.on_timing(elapsed, run_time);
                Some(elapsed.as_secs_f64())
            } else {
                None
            };

            let status = match problem.check_answer(&raw) {
                Ok(true) => {
                    score += 1;
                    self.score += 1;
                    self.cache.record(problem.key(), true);
                    reporter.on_correct(&problem);
                    OutcomeStatus::Correct
                }
                Ok(false) => {
                    self.cache.record(problem.key(), false);
                    let expected = problem.get_good_result()?;
                    reporter.on_incorrect(&problem, &expected);
                    OutcomeStatus::Incorrect
                }
                Err(e @ QuizError::InvalidAnswer { .. }) => {
                    warn!("Input error: {e}");
                    reporter.on_answer_error(&problem, &e);
                    OutcomeStatus::InvalidAnswer
                }
                Err(e) if e.is_recoverable() => {
                    error!("validation failed for {problem}: {e}");
                    reporter.on_answer_error(&problem, &e);
                    OutcomeStatus::ValidationFailed
                }
                Err(e) => return Err(e),
            };

            reporter.on_score(score, limit);
            outcomes.push(QuestionOutcome {
                problem: problem.to_string(),
                answer: raw.trim().to_string(),
                status,
                elapsed_secs,
            });
        }

        info!("final score: {score}/{limit}");
        let total_time_secs = self.request.timer.then(|| {
            let total = run_time.as_secs_f64();
            info!("total time: {total:04.2}");
            total
        });

        let summary = SessionSummary {
            session_id,
            started_at,
            start: self.request.start,
            end: self.request.end,
            limit,
            operator: self.request.operator,
            score,
            outcomes,
            total_time_secs,
        };
        reporter.on_session_complete(&summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{NoopReporter, ScriptedAnswers, SolvingAnswers};
    use crate::problem::AnswerKey;

    fn registry() -> StrategyRegistry {
        StrategyRegistry::standard()
    }

    #[test]
    fn batch_alternates_without_operator() {
        let registry = registry();
        let mut session =
            QuizSession::new(&registry, QuizRequest::new(1, 20, 4).with_seed(1), SessionOptions::default());
        let keys: Vec<_> = session
            .generate_batch()
            .unwrap()
            .iter()
            .map(|p| p.operator())
            .collect();
        assert_eq!(
            keys,
            vec![
                OperatorKey::Addition,
                OperatorKey::Subtraction,
                OperatorKey::Addition,
                OperatorKey::Subtraction
            ]
        );
    }

    #[test]
    fn batch_uses_fixed_operator() {
        let registry = registry();
        let request = QuizRequest::new(1, 9, 5)
            .with_operator(OperatorKey::SimpleMultiplication)
            .with_seed(3);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let batch = session.generate_batch().unwrap();
        assert_eq!(batch.len(), 5);
        assert!(batch
            .iter()
            .all(|p| p.operator() == OperatorKey::SimpleMultiplication));
    }

    #[test]
    fn generation_error_aborts_the_run() {
        let registry = registry();
        let request = QuizRequest::new(12, 20, 3)
            .with_operator(OperatorKey::MultiplicationTable)
            .with_seed(1);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let err = session
            .run(&mut ScriptedAnswers::new(["1", "2", "3"]), &NoopReporter)
            .unwrap_err();
        assert!(matches!(err, QuizError::BadArguments(_)));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn invalid_input_skips_scoring() {
        let registry = registry();
        let request = QuizRequest::new(1, 1, 1)
            .with_operator(OperatorKey::Addition)
            .with_seed(1);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let summary = session
            .run(&mut ScriptedAnswers::new(["two"]), &NoopReporter)
            .unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.outcomes[0].status, OutcomeStatus::InvalidAnswer);
        assert!(session.cache().is_empty());
    }

    #[test]
    fn wrong_answers_are_cached_as_false() {
        let registry = registry();
        let request = QuizRequest::new(1, 1, 1)
            .with_operator(OperatorKey::Addition)
            .with_seed(1);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let summary = session
            .run(&mut ScriptedAnswers::new(["3"]), &NoopReporter)
            .unwrap();
        assert_eq!(summary.outcomes[0].status, OutcomeStatus::Incorrect);
        assert_eq!(
            session.cache().get(&AnswerKey::new(1, 1, OperatorKey::Addition)),
            Some(false)
        );
    }

    #[test]
    fn exhausted_input_stops_early() {
        let registry = registry();
        let request = QuizRequest::new(1, 50, 4)
            .with_operator(OperatorKey::Addition)
            .with_seed(9);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let summary = session
            .run(&mut ScriptedAnswers::new(["0"]), &NoopReporter)
            .unwrap();
        assert_eq!(summary.answered(), 1);
        assert_eq!(summary.limit, 4);
    }

    #[test]
    fn timer_accumulates_total() {
        let registry = registry();
        let request = QuizRequest::new(1, 9, 3)
            .with_operator(OperatorKey::Addition)
            .with_timer(true)
            .with_seed(5);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        let summary = session.run(&mut SolvingAnswers, &NoopReporter).unwrap();
        assert!(summary.total_time_secs.is_some());
        assert!(summary.outcomes.iter().all(|o| o.elapsed_secs.is_some()));
    }

    #[test]
    fn range_too_small_for_limit_gives_up() {
        let registry = registry();
        let request = QuizRequest::new(2, 2, 2)
            .with_operator(OperatorKey::Addition)
            .with_seed(1);
        let options = SessionOptions {
            max_regenerations: 25,
            ..SessionOptions::default()
        };
        let mut session = QuizSession::new(&registry, request, options);
        let err = session.run(&mut SolvingAnswers, &NoopReporter).unwrap_err();
        assert!(matches!(err, QuizError::BadArguments(_)));
        assert!(err.to_string().contains("after 25 attempts"));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn any_policy_withholds_wrong_answers() {
        let registry = registry();
        let request = QuizRequest::new(1, 2, 1)
            .with_operator(OperatorKey::Addition)
            .with_seed(11);
        let options = SessionOptions {
            reuse_policy: ReusePolicy::Any,
            ..SessionOptions::default()
        };
        let mut session = QuizSession::new(&registry, request, options);
        for (a, b) in [(1, 1), (1, 2), (2, 1)] {
            session
                .cache_mut()
                .record(AnswerKey::new(a, b, OperatorKey::Addition), false);
        }
        let problem = session.next_problem(OperatorKey::Addition).unwrap();
        assert_eq!(problem.key(), AnswerKey::new(2, 2, OperatorKey::Addition));
    }

    #[test]
    fn later_runs_keep_the_session_state() {
        let registry = registry();
        let request = QuizRequest::new(1, 9, 2)
            .with_operator(OperatorKey::Addition)
            .with_timer(true)
            .with_seed(6);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());

        let first = session.run(&mut SolvingAnswers, &NoopReporter).unwrap();
        let after_first = session.total_time();
        let second = session.run(&mut SolvingAnswers, &NoopReporter).unwrap();

        assert_eq!((first.score, second.score), (2, 2));
        assert_eq!(session.score(), 4);
        assert_eq!(session.cache().len(), 4);
        assert!(session.total_time() >= after_first);
        assert!(second.total_time_secs.unwrap() <= session.total_time().as_secs_f64());

        let asked_twice = first
            .outcomes
            .iter()
            .any(|o| second.outcomes.iter().any(|p| p.problem == o.problem));
        assert!(!asked_twice);
    }

    #[test]
    fn reset_clears_cache_and_score() {
        let registry = registry();
        let request = QuizRequest::new(1, 9, 2)
            .with_operator(OperatorKey::Addition)
            .with_seed(2);
        let mut session = QuizSession::new(&registry, request, SessionOptions::default());
        session.run(&mut SolvingAnswers, &NoopReporter).unwrap();
        assert_eq!(session.score(), 2);
        assert!(!session.cache().is_empty());

        session.reset();
        assert_eq!(session.score(), 0);
        assert!(session.cache().is_empty());
    }
}
