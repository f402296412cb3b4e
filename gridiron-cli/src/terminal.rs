//! Interactive console front-end for a single drive.

use colored::Colorize;
use gridiron_game::{DriveEvent, InputSource, OutputSink, TurnPrompt};
use std::io::{BufRead, Write};

/// Reads answers line by line, prompting on `writer` first.
///
/// Answers given on the command line are used instead of asking.
pub struct TerminalInput<R, W> {
    reader: R,
    writer: W,
    name: Option<String>,
    specialty: Option<String>,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, writer: W, name: Option<String>, specialty: Option<String>) -> Self {
        Self {
            reader,
            writer,
            name,
            specialty,
        }
    }

    /// `None` at end of input or on a read error.
    fn ask(&mut self, question: &str) -> Option<String> {
        let _ = write!(self.writer, "{} ", question.bold());
        let _ = self.writer.flush();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']);
                Some(trimmed.to_string())
            }
            Err(err) => {
                log::warn!("failed to read input: {err}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> InputSource for TerminalInput<R, W> {
    fn name(&mut self) -> Option<String> {
        self.name
            .take()
            .or_else(|| self.ask("Enter your player's name:"))
    }

    fn specialty(&mut self) -> Option<String> {
        self.specialty
            .take()
            .or_else(|| self.ask("Choose your specialty (passing or running):"))
    }

    fn choice(&mut self, prompt: &TurnPrompt) -> Option<String> {
        let _ = writeln!(self.writer, "\n{}", prompt.message());
        self.ask(">")
    }
}

/// Colored rendering of drive events.
pub struct ConsoleSink<W> {
    writer: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn event(&mut self, event: &DriveEvent<'_>) {
        let message = event.message();
        let styled = match event {
            DriveEvent::Intro { .. } => message.bright_cyan(),
            DriveEvent::SetupRejected(_) => message.red().bold(),
            DriveEvent::InvalidChoice(_) => message.yellow(),
            DriveEvent::PlayResolved { result, .. } if result.is_gain() => message.green(),
            DriveEvent::PlayResolved { .. } => message.red(),
            DriveEvent::Finished(summary) if summary.ending.is_win() => {
                message.bright_green().bold()
            }
            DriveEvent::Finished(_) => message.bright_yellow().bold(),
        };
        let _ = writeln!(self.writer, "\n{styled}");
    }

    fn stats(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{}", line.dimmed());
        let _ = self.writer.flush();
    }
}
