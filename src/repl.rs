//! Interactive line-oriented loop
//!
//! Generic over reader and writer so the console binary and tests share it.

use crate::engine::QueryEngine;
use crate::formatter::HELP_TEXT;
use crate::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];
const HELP_KEYWORDS: &[&str] = &["help", "?"];

const RULE: &str = "--------------------------------------------------------------------------------";

pub const BANNER: &str = "🤖 FINANCIAL CHATBOT

I understand natural language questions about Microsoft, Tesla, and Apple
(fiscal years 2022-2024). Try asking in your own words!

💡 EXAMPLE QUERIES:
- 'What was Microsoft's revenue in 2024?'
- 'MSFT profit margin'
- 'Compare cash flow'
- 'Which company has best ROE?'

Type 'help' for more examples or 'exit' to quit";

pub const FAREWELL: &str = "Thank you for using the Financial Chatbot!";

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&line.as_str())
}

fn is_help_command(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    HELP_KEYWORDS.contains(&line.as_str())
}

/// Read queries until an exit keyword or end of input
pub fn run_repl<R, W>(engine: &QueryEngine, input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}\n{}\n{}", RULE, BANNER, RULE)?;

    let mut lines = input.lines();
    loop {
        write!(output, "\n💬 Your Query: ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let text = if is_help_command(&line) {
            HELP_TEXT.to_string()
        } else {
            debug!(query = %line, "Processing console query");
            engine.process(&line).text
        };

        writeln!(output, "\n🤖 Chatbot Response:\n{}\n{}", text, RULE)?;
    }

    writeln!(output, "\n{}", FAREWELL)?;
    output.flush()?;
    Ok(())
}
