//! External collaborator interfaces (time, persistence, change notification).

pub mod clock;
pub mod observer;
pub mod snapshot_store;

pub use clock::{Clock, FixedClock, SteppableClock, SystemClock};
pub use observer::ChangeObserver;
pub use snapshot_store::SnapshotStore;
