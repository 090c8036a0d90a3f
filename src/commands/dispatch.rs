//! Command dispatcher - routes parsed commands to the graph engine.

use log::debug;
use serde::Serialize;

use crate::domain::model::{InstallOutcome, RemoveOutcome};
use crate::domain::service::{GraphEngine, GraphError};

use super::Command;

/// Structured result of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// `DEPEND` recorded its edges.
    Declared {
        name: String,
        dependencies: Vec<String>,
    },
    Install(InstallOutcome),
    /// `INSTALL` refused because the dependency chain loops back on itself.
    InstallRejected { name: String, cycle: Vec<String> },
    Remove(RemoveOutcome),
    List { installed: Vec<String> },
    End,
    /// Unknown verb; produces no output.
    Ignored { verb: String },
}

/// Owns the graph for one command session and applies commands to it.
pub struct Dispatcher {
    engine: GraphEngine,
}

impl Dispatcher {
    pub fn new(engine: GraphEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &GraphEngine {
        &self.engine
    }

    pub fn into_engine(self) -> GraphEngine {
        self.engine
    }

    /// Apply a single command.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, command: Command) -> Response {
        match command {
            Command::Depend { name, dependencies } => {
                self.engine.declare(&name);
                for dependency in &dependencies {
                    self.engine.add_dependency(&name, dependency);
                }
                Response::Declared { name, dependencies }
            }
            Command::Install { name } => match self.engine.install(&name) {
                Ok(outcome) => Response::Install(outcome),
                Err(GraphError::CyclicDependency { component, cycle }) => {
                    Response::InstallRejected {
                        name: component,
                        cycle,
                    }
                }
            },
            Command::Remove { name } => Response::Remove(self.engine.remove(&name)),
            Command::List => Response::List {
                installed: self.engine.list(),
            },
            Command::End => Response::End,
            Command::Unknown { verb } => {
                debug!("Ignoring unknown command {}", verb);
                Response::Ignored { verb }
            }
        }
    }
}
