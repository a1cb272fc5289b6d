//! mathquiz CLI: randomized arithmetic and time practice on the terminal.

use std::path::PathBuf;
use std::process;

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(
    name = "mathquiz",
    about = "Randomized arithmetic and time practice quiz",
    disable_version_flag = true
)]
struct Cli {
    /// Lower bound of the operand range
    #[arg(
        required_unless_present_any = ["list_operator", "version", "init_config"],
        allow_negative_numbers = true
    )]
    start: Option<i64>,

    /// Upper bound of the operand range
    #[arg(
        required_unless_present_any = ["list_operator", "version", "init_config"],
        allow_negative_numbers = true
    )]
    end: Option<i64>,

    /// Number of problems to generate
    #[arg(required_unless_present_any = ["list_operator", "version", "init_config"])]
    limit: Option<usize>,

    /// Operator key (see --list-operator); alternates '+' and '-' when omitted
    #[arg(short, long)]
    operator: Option<String>,

    /// Time each answer and print the total at the end
    #[arg(short, long)]
    timer: bool,

    /// Display the available operators and exit
    #[arg(short, long)]
    list_operator: bool,

    /// Config file name or path (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed the generator for a reproducible quiz
    #[arg(long)]
    seed: Option<u64>,

    /// Print the session summary as JSON when the quiz ends
    #[arg(long)]
    json: bool,

    /// Write a starter mathquiz.toml in the current directory
    #[arg(long)]
    init_config: bool,

    /// Display version information and exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = if cli.version {
        commands::version::execute()
    } else if cli.list_operator {
        commands::list_operators::execute()
    } else if cli.init_config {
        commands::init::execute()
    } else {
        commands::run::execute(commands::run::RunArgs {
            start: cli.start,
            end: cli.end,
            limit: cli.limit,
            operator: cli.operator,
            timer: cli.timer,
            config: cli.config,
            seed: cli.seed,
            json: cli.json,
        })
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
