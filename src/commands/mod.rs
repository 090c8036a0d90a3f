use anyhow::{Result, bail};
use log::debug;
use std::io::{self, BufRead, Write};

use crate::domain::service::GraphEngine;
use crate::runtime::Runtime;

mod command;
pub mod config;
mod dispatch;
mod render;
mod session;

pub use command::Command;
pub use config::{Config, ConfigOverrides};
pub use dispatch::{Dispatcher, Response};
pub use render::{OutputFormat, render};
pub use session::{SessionOptions, SessionSummary, run_session};

const BANNER: &str = "Enter commands followed by the enter key, END to finish.\n\
                      Example:\n  \
                      DEPEND TCPIP NETCARD\n\
                      Or pass a command script: depman SCRIPT\n";

/// Run one command session against real standard input and output.
#[tracing::instrument(skip(runtime, config))]
pub fn run<R: Runtime>(runtime: R, config: Config) -> Result<SessionSummary> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    run_with_io(&runtime, &config, &mut input, &mut output)
}

/// Run one command session, reading the configured script or `stdin`.
pub fn run_with_io<R: Runtime, I: BufRead, W: Write>(
    runtime: &R,
    config: &Config,
    stdin: &mut I,
    output: &mut W,
) -> Result<SessionSummary> {
    let mut dispatcher = Dispatcher::new(GraphEngine::new(config.graph));
    // Echoed input would corrupt a JSON stream.
    let text_output = config.format == OutputFormat::Text;

    let summary = match &config.script {
        Some(path) => {
            if !runtime.exists(path) {
                bail!("Command script {:?} not found.", path);
            }
            debug!("Reading commands from {:?}", path);
            let content = runtime.read(path)?;
            let options = SessionOptions {
                echo: config.echo.unwrap_or(text_output),
                format: config.format,
            };
            run_session(&mut dispatcher, &mut content.as_slice(), output, options)?
        }
        None => {
            let interactive = runtime.stdin_is_terminal();
            debug!("Reading commands from stdin (interactive: {})", interactive);
            if interactive && text_output {
                write!(output, "{}", BANNER)?;
            }
            let options = SessionOptions {
                echo: config.echo.unwrap_or(text_output && !interactive),
                format: config.format,
            };
            run_session(&mut dispatcher, stdin, output, options)?
        }
    };

    debug!(
        "Session finished: {} line(s), {} command(s), {} component(s) known",
        summary.lines,
        summary.commands,
        dispatcher.engine().registry().len()
    );
    Ok(summary)
}
