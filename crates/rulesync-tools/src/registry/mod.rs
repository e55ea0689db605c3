//! Tool registry: which tool supports which feature.
//!
//! Consulted before a processor is built; the adapter lookups in
//! [`crate::rules`], [`crate::ignore`], [`crate::commands`] and [`crate::mcp`]
//! hold the per-tool file layouts.

mod builtins;
mod store;
mod types;

pub use builtins::{BUILTIN_COUNT, builtin_registrations};
pub use store::ToolRegistry;
pub use types::ToolRegistration;
