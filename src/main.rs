use std::{path::PathBuf, process::ExitCode};

use calcguard::{
    calculator,
    tools::{Tool, ToolCall, ToolRegistry, faq::{DEFAULT_FAQ_PATH, FaqLookup}},
};
use clap::{Parser, Subcommand};

/// calcguard evaluates untrusted arithmetic expressions against a fixed
/// allow-list and exposes them, with FAQ and retail helpers, as agent tools.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the FAQ file used by the `faq_lookup` tool.
    #[arg(long, global = true, env = "CALCGUARD_FAQ", default_value = DEFAULT_FAQ_PATH)]
    faq: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluates an arithmetic expression and prints the result.
    Calc {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Answers a question from the FAQ file.
    Faq {
        #[arg(allow_hyphen_values = true)]
        question: String,
    },
    /// Prints the definitions of all tools as JSON.
    Tools,
    /// Invokes a tool by name with a JSON object of arguments.
    Invoke {
        name:      String,
        #[arg(allow_hyphen_values = true)]
        arguments: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let output: Result<String, Box<dyn std::error::Error>> = match args.command {
        Command::Calc { expression } => Ok(calculator(&expression)),
        Command::Faq { question } => {
            let arguments = serde_json::json!({ "question": question }).to_string();
            FaqLookup::new(&args.faq).call(&arguments).map_err(Into::into)
        },
        Command::Tools => {
            let definitions = ToolRegistry::with_defaults(&args.faq).definitions();
            serde_json::to_string_pretty(&definitions).map_err(Into::into)
        },
        Command::Invoke { name, arguments } => {
            ToolRegistry::with_defaults(&args.faq).invoke(&ToolCall::new(name, arguments))
                                                  .map_err(Into::into)
        },
    };

    match output {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
