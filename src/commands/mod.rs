//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `migrate.rs` — the react/node migration sequences.
//! - `inspect.rs` — check/doctor read-only commands.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod inspect;
pub mod migrate;

pub use inspect::handle_inspect_commands;
pub use migrate::handle_migrate_commands;
