//! Domain layer - the dependency graph and its state machines.
//!
//! - `model` holds the component entity and the structured operation results.
//! - `service` holds the registry and the graph engine that traverses it.

pub mod model;
pub mod service;
