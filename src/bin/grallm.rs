//! grallm CLI: why-question tutor grounded in ConceptNet.
//!
//! Usage:
//!   grallm ask <question> [--json] [--config path]
//!   grallm examples
//!   grallm config [--config path]

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use grallm::{Tutor, TutorConfig, TutorReply};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_QUESTIONS: &[&str] = &[
    "Why do we use sunscreen?",
    "Why should I drink water when I exercise?",
    "Why is it important to get enough sleep?",
    "Why can't you see the stars during the day?",
];

#[derive(Parser)]
#[command(
    name = "grallm",
    version,
    about = "Answer why-questions with commonsense-grounded explanations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file (default: <config dir>/grallm/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log pipeline stages to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question and print the answer and grounded explanation
    Ask {
        /// The question, e.g. "Why is the sky blue?"
        question: String,
        /// Print the full reply as JSON
        #[arg(long)]
        json: bool,
    },
    /// List sample questions
    Examples,
    /// Print the resolved configuration as YAML (API key omitted)
    Config,
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    model: &'a str,
    #[serde(flatten)]
    reply: &'a TutorReply,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "grallm=warn",
        1 => "grallm=info",
        _ => "grallm=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_reply(reply: &TutorReply) {
    println!("Answer:\n{}\n", reply.answer);
    println!("Grounded explanation:\n{}", reply.explanation);
    if !reply.relations.is_empty() {
        println!("\nRelations:");
        for relation in &reply.relations {
            println!("  - {}", relation);
        }
    }
}

fn cmd_ask(config_path: Option<PathBuf>, question: &str, json: bool) -> i32 {
    let config = match TutorConfig::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let tutor = match Tutor::from_config(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start async runtime: {}", e);
            return 1;
        }
    };

    let reply = runtime.block_on(tutor.run(question));

    if json {
        let report = Report {
            generated_at: Utc::now(),
            model: &config.llm.model,
            reply: &reply,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        print_reply(&reply);
    }
    0
}

fn cmd_examples() -> i32 {
    for question in EXAMPLE_QUESTIONS {
        println!("{}", question);
    }
    0
}

fn cmd_config(config_path: Option<PathBuf>) -> i32 {
    let config = match TutorConfig::resolve(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match serde_yaml::to_string(&config) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }
    if let Err(e) = config.validate() {
        eprintln!("Warning: {}", e);
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match cli.command {
        Commands::Ask { question, json } => cmd_ask(cli.config, &question, json),
        Commands::Examples => cmd_examples(),
        Commands::Config => cmd_config(cli.config),
    };
    std::process::exit(code);
}
