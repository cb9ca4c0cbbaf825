use financial_query_engine::{config::{init_tracing, Config}, repl::run_repl};
use std::io;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries only answers
    init_tracing("warn", true);
    let engine = config.build_engine()?;

    info!("Financial chatbot console starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_repl(&engine, stdin.lock(), stdout.lock())?;

    Ok(())
}
