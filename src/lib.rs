//! Dungeon quest solvability in Rust.
//!
//! Models a dungeon as a weighted directed graph whose passages may be
//! locked behind keys or slowed by terrain, and decides whether an agent
//! collecting items along the way can reach a goal room.

pub use delve_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use delve_internal::prelude::*;
}
