//! Terminal detection.

use std::io::{self, IsTerminal};

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn stdin_is_terminal_impl(&self) -> bool {
        io::stdin().is_terminal()
    }
}
