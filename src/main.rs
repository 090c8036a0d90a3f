use anyhow::Result;
use clap::Parser;
use clap::builder::BoolishValueParser;
use depman::commands::config::{CascadeMode, ENV_ALLOW_CYCLES, ENV_CASCADE, ENV_ECHO, ENV_FORMAT};
use depman::commands::{Config, ConfigOverrides, OutputFormat};
use std::path::PathBuf;

/// depman - component dependency manager
///
/// Reads commands one per line and tracks which components are installed.
///
/// Commands:
///   DEPEND NAME DEP...   declare that NAME requires each DEP
///   INSTALL NAME         install NAME and everything it needs
///   REMOVE NAME          remove NAME unless something still needs it
///   LIST                 list installed components
///   END                  stop reading commands
///
/// Examples:
///   depman commands.txt      # run a command script
///   depman < commands.txt    # same, from standard input
#[derive(Parser, Debug)]
#[command(author, version = env!("DEPMAN_VERSION"), about, verbatim_doc_comment)]
struct Cli {
    /// Command script to run (reads standard input when omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Install dependency cycles instead of rejecting them (also via DEPMAN_ALLOW_CYCLES)
    #[arg(long, env = ENV_ALLOW_CYCLES, value_parser = BoolishValueParser::new())]
    allow_cycles: bool,

    /// Which dependencies REMOVE may cascade to (also via DEPMAN_CASCADE)
    #[arg(long, value_enum, ignore_case = true, env = ENV_CASCADE, value_name = "MODE")]
    cascade: Option<CascadeMode>,

    /// Output format (also via DEPMAN_FORMAT)
    #[arg(long, value_enum, ignore_case = true, env = ENV_FORMAT, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Echo each command line before its output (default for scripts and pipes; also via DEPMAN_ECHO)
    #[arg(
        long,
        env = ENV_ECHO,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_echo"
    )]
    echo: Option<bool>,

    /// Never echo command lines
    #[arg(long, overrides_with = "echo")]
    no_echo: bool,
}

impl Cli {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            script: self.script,
            allow_cycles: Some(self.allow_cycles),
            cascade: self.cascade,
            format: self.format,
            echo: if self.no_echo { Some(false) } else { self.echo },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = depman::runtime::RealRuntime;

    let config = Config::new(cli.overrides());
    depman::commands::run(runtime, config)?;
    Ok(())
}
