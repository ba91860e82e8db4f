//! Interactive prompt loop driving a [`FormController`].
//!
//! Each turn renders the form, prompts for the next required field, and
//! reads one line:
//!
//! * a bare value answers the prompted field;
//! * `field=value` sets any field by name (`postalCode=1000001`,
//!   `electricity-bill=5,000`); an empty value clears it;
//! * `:submit`, `:reset`, `:log <level>`, `:help`, and `:quit` are commands.

use std::io::{self, BufRead, Write};

use sim_core::engine::SavingsCalculator;
use sim_core::{
    FieldInput, FieldName, FormController, FormData, SinkError, StepId, SubmissionSink,
    SubmitError,
};
use tracing::{debug, info, warn};

use crate::logging;
use crate::report::{render_errors, render_estimate, render_form, render_prompt};

const HELP: &str = "\
Enter a value for the prompted field, or field=value for any field.
Commands:
  :submit        submit the finished form
  :reset         clear every field
  :log <level>   change log verbosity (error, warn, info, debug, trace)
  :help          show this help
  :quit          leave
";

/// Sink for the terminal session: records each lead in the log.
#[derive(Debug, Default)]
pub struct LogSink {
    pub accepted: usize,
}

impl SubmissionSink for LogSink {
    fn accept(
        &mut self,
        lead: &FormData,
    ) -> Result<(), SinkError> {
        self.accepted += 1;
        info!(
            postal_code = lead.postal_code.as_deref().unwrap_or_default(),
            company = ?lead.company,
            plan = ?lead.plan,
            capacity = ?lead.capacity,
            "lead recorded"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Reset,
    Submit,
    Help,
    Log(String),
    Set { field: FieldName, raw: String },
    Answer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandError {
    Unknown(String),
    UnknownField(String),
}

fn parse_field_name(name: &str) -> Option<FieldName> {
    FieldName::parse(name).or_else(|| StepId::parse(name).map(|step| step.field()))
}

fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("quit" | "q"), None) => Ok(Command::Quit),
            (Some("reset"), None) => Ok(Command::Reset),
            (Some("submit"), None) => Ok(Command::Submit),
            (Some("help" | "h"), None) => Ok(Command::Help),
            (Some("log"), Some(level)) => Ok(Command::Log(level.to_string())),
            _ => Err(CommandError::Unknown(line.to_string())),
        };
    }

    match line.split_once('=') {
        Some((name, raw)) => parse_field_name(name.trim())
            .map(|field| Command::Set {
                field,
                raw: raw.to_string(),
            })
            .ok_or_else(|| CommandError::UnknownField(name.trim().to_string())),
        None => Ok(Command::Answer(line.to_string())),
    }
}

/// Terminal front end over any line reader and writer.
pub struct Session<'a, R, W, S: ?Sized> {
    input: R,
    output: W,
    sink: &'a mut S,
    calculator: SavingsCalculator,
    controller: FormController,
}

impl<'a, R, W, S> Session<'a, R, W, S>
where
    R: BufRead,
    W: Write,
    S: SubmissionSink + ?Sized,
{
    pub fn new(
        input: R,
        output: W,
        sink: &'a mut S,
        calculator: SavingsCalculator,
    ) -> Self {
        Self {
            input,
            output,
            sink,
            calculator,
            controller: FormController::new(),
        }
    }

    /// Runs until `:quit` or end of input. Returns the number of
    /// successful submissions.
    pub fn run(&mut self) -> io::Result<usize> {
        let mut submitted = 0;
        writeln!(self.output, "Electricity savings simulator. Type :help for commands.")?;

        loop {
            let snapshot = self.controller.snapshot();
            write!(self.output, "\n{}", render_form(&snapshot))?;
            let prompted = snapshot.state.next_required_field;
            match prompted {
                Some(field) => write!(self.output, "{}", render_prompt(field, &snapshot.data))?,
                None => write!(self.output, "> ")?,
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Reset) => {
                    self.controller.reset();
                    writeln!(self.output, "Form cleared.")?;
                }
                Ok(Command::Submit) => {
                    if self.submit()? {
                        submitted += 1;
                    }
                }
                Ok(Command::Help) => write!(self.output, "{HELP}")?,
                Ok(Command::Log(level)) => match logging::set_log_level(&level) {
                    Ok(()) => writeln!(self.output, "Log level set to {level}.")?,
                    Err(error) => writeln!(self.output, "Cannot change log level: {error:#}")?,
                },
                Ok(Command::Set { field, raw }) => self.set(field, &raw)?,
                Ok(Command::Answer(raw)) => match prompted {
                    Some(field) => self.set(field, &raw)?,
                    None if raw.is_empty() => {}
                    None => writeln!(
                        self.output,
                        "Every step is filled in. Use :submit, or field=value to change a field."
                    )?,
                },
                Err(CommandError::Unknown(command)) => {
                    writeln!(self.output, "Unknown command '{command}'. Type :help.")?;
                }
                Err(CommandError::UnknownField(name)) => {
                    writeln!(self.output, "Unknown field '{name}'.")?;
                }
            }
        }

        Ok(submitted)
    }

    fn set(
        &mut self,
        field: FieldName,
        raw: &str,
    ) -> io::Result<()> {
        match FieldInput::parse(field, raw) {
            Ok(input) => {
                let reset = self.controller.apply(input);
                if !reset.is_empty() {
                    let names = reset
                        .iter()
                        .filter(|field| **field != FieldName::Area)
                        .map(|field| field.label())
                        .collect::<Vec<_>>();
                    if !names.is_empty() {
                        writeln!(self.output, "Cleared: {}", names.join(", "))?;
                    }
                }
            }
            Err(error) => {
                warn!(field = %field, %error, "rejected input");
                writeln!(self.output, "{error}")?;
            }
        }
        Ok(())
    }

    fn submit(&mut self) -> io::Result<bool> {
        match self.controller.submit(&mut *self.sink, &self.calculator) {
            Ok(submission) => {
                writeln!(self.output, "Thank you! Your estimate:")?;
                write!(self.output, "{}", render_estimate(&submission.estimate))?;
                Ok(true)
            }
            Err(SubmitError::Invalid(errors)) => {
                writeln!(self.output, "Please fix the following first:")?;
                write!(self.output, "{}", render_errors(&errors))?;
                Ok(false)
            }
            Err(SubmitError::Incomplete { next_field }) => {
                let next = next_field.map_or("a field", |field| field.label());
                writeln!(self.output, "The form is not finished yet; {next} is still needed.")?;
                Ok(false)
            }
            Err(error @ SubmitError::Sink(_)) => {
                debug!(%error, "submission failed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(":quit"), Ok(Command::Quit));
        assert_eq!(parse_command(" :submit \n"), Ok(Command::Submit));
        assert_eq!(
            parse_command(":log debug"),
            Ok(Command::Log("debug".to_string()))
        );
        assert_eq!(
            parse_command(":frobnicate"),
            Err(CommandError::Unknown(":frobnicate".to_string()))
        );
    }

    #[test]
    fn parses_assignments_by_field_or_step_name() {
        assert_eq!(
            parse_command("postalCode=100-0001"),
            Ok(Command::Set {
                field: FieldName::PostalCode,
                raw: "100-0001".to_string()
            })
        );
        assert_eq!(
            parse_command("electricity-bill = 5,000"),
            Ok(Command::Set {
                field: FieldName::ElectricityBill,
                raw: " 5,000".to_string()
            })
        );
        assert_eq!(
            parse_command("voltage=100"),
            Err(CommandError::UnknownField("voltage".to_string()))
        );
    }

    #[test]
    fn bare_text_is_an_answer() {
        assert_eq!(
            parse_command("tepco\n"),
            Ok(Command::Answer("tepco".to_string()))
        );
    }

    #[test]
    fn log_sink_counts_leads() {
        let mut sink = LogSink::default();

        sink.accept(&FormData::default()).unwrap();

        assert_eq!(sink.accepted, 1);
    }
}
