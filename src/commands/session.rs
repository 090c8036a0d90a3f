//! Command session - the line-oriented read loop.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::{BufRead, Write};

use super::{Command, Dispatcher, OutputFormat, Response, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Write every input line back before processing it
    pub echo: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines read, blank ones included
    pub lines: usize,
    /// Lines that parsed into a command
    pub commands: usize,
    /// Stopped at `END` rather than at end of input
    pub ended: bool,
}

/// Process commands from `input` until `END` or end of input.
///
/// Works on any reader and writer so tests can drive it without a terminal.
pub fn run_session<I: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    input: &mut I,
    output: &mut W,
    options: SessionOptions,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input
            .read_until(b'\n', &mut buf)
            .context("Failed to read command")?
            == 0
        {
            break;
        }
        summary.lines += 1;

        // Undecodable bytes become U+FFFD; such lines fall through as unknown verbs.
        let line = String::from_utf8_lossy(&buf);
        let text = line.trim_end_matches(['\n', '\r']);
        if options.echo {
            writeln!(output, "{}", text)?;
        }
        if text.trim().is_empty() {
            continue;
        }

        let command = match text.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping line {}: {}", summary.lines, e);
                continue;
            }
        };
        summary.commands += 1;

        let response = dispatcher.dispatch(command);
        for rendered in render(&response, options.format)? {
            writeln!(output, "{}", rendered)?;
        }

        if response == Response::End {
            debug!("END received after {} line(s)", summary.lines);
            summary.ended = true;
            break;
        }
    }

    output.flush()?;
    Ok(summary)
}
