//! The default `mathquiz <start> <end> <limit>` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, warn};

use mathquiz_config::{init_logging, load_config_from};
use mathquiz_core::io::{AnswerSource, SessionReporter};
use mathquiz_core::strategy::GenerationStrategy;
use mathquiz_core::{
    ComputeProblem, QuizError, QuizRequest, QuizSession, SessionSummary, Solution,
    StrategyRegistry,
};

use super::list_operators::operator_table;

/// Options collected from the command line.
pub struct RunArgs {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub limit: Option<usize>,
    pub operator: Option<String>,
    pub timer: bool,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub json: bool,
}

/// Terminal progress reporter.
struct ConsoleReporter;

impl SessionReporter for ConsoleReporter {
    fn on_session_start(&self, request: &QuizRequest) {
        if request.timer {
            println!("Timer is on, answer as fast as you can.");
        }
    }

    fn on_problem(&self, _index: usize, problem: &ComputeProblem) {
        print!("{problem} ");
        flush_prompt(&mut io::stdout());
    }

    fn on_correct(&self, _problem: &ComputeProblem) {
        println!("Good answer!");
    }

    fn on_incorrect(&self, _problem: &ComputeProblem, expected: &Solution) {
        println!("Wrong answer, the expected result was: {expected}");
    }

    fn on_answer_error(&self, _problem: &ComputeProblem, error: &QuizError) {
        match error {
            QuizError::InvalidAnswer { .. } => println!("Input error: {error}"),
            _ => println!("Could not check the answer: {error}"),
        }
    }

    fn on_timing(&self, elapsed: Duration, _total: Duration) {
        println!("Response time: {:04.2} seconds", elapsed.as_secs_f64());
    }

    fn on_score(&self, score: usize, limit: usize) {
        println!("Your score is {score} / {limit}");
    }

    fn on_session_complete(&self, summary: &SessionSummary) {
        if let Some(total) = summary.total_time_secs {
            println!("Total response time: {total:04.2} seconds");
        }
    }
}

/// Push a prompt without a trailing newline to the terminal. A failure only
/// costs the prompt, so it is logged rather than returned.
fn flush_prompt(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to flush the prompt: {e}");
            false
        }
    }
}

/// Reads one answer per line until end of input.
struct LineAnswers<R> {
    reader: R,
}

impl<R: BufRead> AnswerSource for LineAnswers<R> {
    fn next_answer(&mut self, _problem: &ComputeProblem) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            // Keep the prompt line from running into the shell prompt.
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Explain a bad request and show what is available instead.
fn report_bad_arguments(error: &QuizError, registry: &StrategyRegistry) {
    error!("{error}");
    println!("An error occurred: {error}");
    println!("Here are the available operators:");
    println!("{}", operator_table(registry));
}

pub fn execute(args: RunArgs) -> Result<()> {
    let (Some(start), Some(end), Some(limit)) = (args.start, args.end, args.limit) else {
        anyhow::bail!("start, end and limit are required");
    };

    let config = load_config_from(args.config.as_deref())?;
    init_logging(&config.log)?;

    let registry = StrategyRegistry::standard();

    let mut request = QuizRequest::new(start, end, limit).with_timer(args.timer);
    if let Some(op) = args.operator.as_deref() {
        match registry.resolve_str(op) {
            Ok(strategy) => request = request.with_operator(strategy.key()),
            Err(e) => {
                report_bad_arguments(&e, &registry);
                return Ok(());
            }
        }
    }
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }

    let mut session = QuizSession::new(&registry, request, config.quiz.session_options());
    let mut answers = LineAnswers {
        reader: io::stdin().lock(),
    };

    match session.run(&mut answers, &ConsoleReporter) {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
        Err(e @ QuizError::BadArguments(_)) => {
            report_bad_arguments(&e, &registry);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
