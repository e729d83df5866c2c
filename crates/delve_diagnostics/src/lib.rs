//! Logging setup for Delve.
//!
//! The solver crates only emit `tracing` events. This crate installs the
//! subscriber that renders them:
//!
//! - [`TracingSetup`] - Builder that configures and installs the subscriber
//! - [`TracingConfig`] - The settings a setup was installed with
//! - [`TracingFormat`] - Pretty, compact or JSON output
//!
//! # Example
//!
//! ```no_run
//! use delve_diagnostics::{TracingFormat, TracingSetup};
//! use tracing::Level;
//!
//! TracingSetup::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .init();
//! ```

mod tracing_setup;

pub use tracing_setup::{TracingConfig, TracingError, TracingFormat, TracingSetup};
