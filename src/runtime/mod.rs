//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the application's
//! runtime environment:
//!
//! - **Store lifecycle management**: Starting, wiring, and shutting down
//!   the store actors
//! - **Dependency wiring**: Handing the externally owned inventory client
//!   to the endpoint that consumes it
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`CatalogSystem`] - The orchestrator that owns all store actors and
//!   endpoints
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::*;
pub use self::tracing::*;
