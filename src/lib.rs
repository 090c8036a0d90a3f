pub mod commands;
pub mod domain;
pub mod runtime;
