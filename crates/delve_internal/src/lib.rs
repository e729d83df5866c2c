//! # Delve Internal Library
//!
//! Re-exports the core Delve crates for convenience.

/// Dungeon graphs, traversal policies and the quest solver.
pub use delve_graph;

/// Logging setup.
pub use delve_diagnostics;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use delve_diagnostics::{TracingFormat, TracingSetup};
    pub use delve_graph::prelude::*;
}
