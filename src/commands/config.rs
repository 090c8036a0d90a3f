//! Configuration for a command session.
//!
//! The CLI resolves every setting (flag first, then its `DEPMAN_*`
//! environment variable); `Config::new` fills in the defaults for whatever
//! is still unset.

use clap::ValueEnum;
use log::debug;
use std::path::PathBuf;

use crate::domain::service::{CascadePolicy, CyclePolicy, GraphOptions};

use super::OutputFormat;

pub const ENV_ALLOW_CYCLES: &str = "DEPMAN_ALLOW_CYCLES";
pub const ENV_CASCADE: &str = "DEPMAN_CASCADE";
pub const ENV_FORMAT: &str = "DEPMAN_FORMAT";
pub const ENV_ECHO: &str = "DEPMAN_ECHO";

/// Which dependencies `REMOVE` may cascade to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CascadeMode {
    /// Any dependency nothing else needs
    All,
    /// Only implicitly installed dependencies nothing else needs
    Implicit,
}

impl From<CascadeMode> for CascadePolicy {
    fn from(mode: CascadeMode) -> Self {
        match mode {
            CascadeMode::All => CascadePolicy::All,
            CascadeMode::Implicit => CascadePolicy::ImplicitOnly,
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub script: Option<PathBuf>,
    pub allow_cycles: Option<bool>,
    pub cascade: Option<CascadeMode>,
    pub format: Option<OutputFormat>,
    pub echo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command script to read; standard input when absent
    pub script: Option<PathBuf>,
    /// Forced echo setting; decided from the input source when absent
    pub echo: Option<bool>,
    pub format: OutputFormat,
    pub graph: GraphOptions,
}

impl Config {
    /// Build the configuration, using defaults for anything not overridden.
    #[tracing::instrument]
    pub fn new(overrides: ConfigOverrides) -> Self {
        let cycles = if overrides.allow_cycles.unwrap_or(false) {
            CyclePolicy::Ignore
        } else {
            CyclePolicy::Reject
        };

        let config = Config {
            script: overrides.script,
            echo: overrides.echo,
            format: overrides.format.unwrap_or_default(),
            graph: GraphOptions {
                cycles,
                cascade: overrides
                    .cascade
                    .map(CascadePolicy::from)
                    .unwrap_or_default(),
            },
        };
        debug!("Resolved config: {:?}", config);
        config
    }

    /// Defaults with standard input as the command source.
    pub fn for_test() -> Self {
        Self::new(ConfigOverrides::default())
    }
}
