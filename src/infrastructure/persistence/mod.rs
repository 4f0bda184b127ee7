//! Persistence adapters implementing the domain's `SnapshotStore` port.

pub mod json_snapshot_store;

pub use json_snapshot_store::JsonSnapshotStore;
