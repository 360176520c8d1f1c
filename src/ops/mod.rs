//! High-level operations.
//!
//! This module contains the implementation of tsref commands.

pub mod root_refs;
pub mod sync_refs;

pub use root_refs::{
    collect_composite_projects, update_root_references, RootProject, RootRefsOptions, RootRefsPlan,
};
pub use sync_refs::{
    sync_all, sync_references, SyncOptions, SyncOutcome, SyncReport, SyncSummary,
};
