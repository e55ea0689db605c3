//! Shared test utilities for the rulesync workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`CanonicalTree`] builder for canonical `.rulesync` layouts
//! - [`repo`]: [`TestRepo`], a temporary directory with file assertions

pub mod repo;
pub mod tree;

pub use repo::TestRepo;
pub use tree::CanonicalTree;
