//! Runtime abstraction for process-level operations.
//!
//! This module provides a trait-based abstraction over the few things the
//! command layer needs from the outside world, enabling dependency injection
//! and testability.
//!
//! # Structure
//!
//! - `fs` - Reading command scripts
//! - `term` - Terminal detection for standard input

mod fs;
mod term;

use anyhow::Result;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // File System
    /// Raw file contents; decoding is left to the caller.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    fn exists(&self, path: &Path) -> bool;

    // Terminal
    /// True when standard input is attached to an interactive terminal.
    fn stdin_is_terminal(&self) -> bool;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn stdin_is_terminal(&self) -> bool {
        self.stdin_is_terminal_impl()
    }
}
