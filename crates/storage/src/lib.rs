//! Storage layer for atelier
//!
//! This crate implements the shared state behind every workspace:
//! - UserStore: DashMap-sharded user records with per-username atomicity
//! - ShareTable (inside UserStore): sharee → owner → folder mappings
//! - Snapshot persistence: bincode, temp-file + atomic rename, tolerant of
//!   a missing file on first start
//! - WorkspaceFs: filesystem side effects under an injected storage root,
//!   one handler per mutation variant, plus mirror-area helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fs;
pub mod record;
pub mod snapshot;
pub mod store;

pub use fs::WorkspaceFs;
pub use record::UserRecord;
pub use snapshot::SnapshotData;
pub use store::UserStore;
