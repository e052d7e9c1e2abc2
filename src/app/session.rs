use crate::config::OutputFormat;
use crate::core::engine::EmiEngine;
use crate::core::{ChartRenderer, DisplaySink, LoanField};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  principal <amount>   set the loan amount
  rate <percent>       set the annual interest rate
  tenure <months>      set the tenure
  calc                 recalculate (an empty line does the same)
  show                 print the current inputs
  help                 print this message
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(LoanField, String),
    Calculate,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// The value after a field name is taken verbatim, so `principal -5`
    /// stores `-5` and `principal` alone stores an empty string.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };

        if let Some(field) = LoanField::from_key(word) {
            return Command::Set(field, rest.to_string());
        }

        match word.trim() {
            "" | "calc" | "calculate" => Command::Calculate,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Stream for `show`, `help` and unknown-command replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    Stdout,
    Stderr,
}

impl MessageTarget {
    /// JSON results own stdout as one object per line, so replies move to stderr.
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => MessageTarget::Stdout,
            OutputFormat::Json => MessageTarget::Stderr,
        }
    }

    pub fn writer(self) -> Box<dyn Write> {
        match self {
            MessageTarget::Stdout => Box::new(std::io::stdout()),
            MessageTarget::Stderr => Box::new(std::io::stderr()),
        }
    }
}

/// Reads commands until `quit` or end of input. Returns how many times the
/// engine was re-run.
pub fn run_session<D, C, R, W>(engine: &mut EmiEngine<D, C>, input: R, out: &mut W) -> Result<usize>
where
    D: DisplaySink,
    C: ChartRenderer,
    R: BufRead,
    W: Write,
{
    let mut runs = 0;

    for line in input.lines() {
        let command = Command::parse(&line?);
        tracing::debug!("Session command: {:?}", command);

        match command {
            Command::Set(field, value) => engine.set_field(field, value),
            Command::Calculate => {
                engine.run()?;
                runs += 1;
            }
            Command::Show => {
                for field in LoanField::ALL {
                    writeln!(out, "{}: {}", field.label(), engine.form().get(field))?;
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
            Command::Unknown(text) => {
                writeln!(out, "Unknown command '{}'. Type 'help' for a list.", text)?;
            }
        }
    }

    tracing::debug!("Session finished after {} recalculations", runs);
    Ok(runs)
}
