//! Pool instances and the bounded handle registry
//!
//! A `PoolInstance` owns one pool's bytes and serves them as a
//! position-tracked stream; the `PoolRegistry` bounds how many instances
//! are resident at once and maps small integer handles onto them.

pub mod instance;
pub mod region;
pub mod registry;

// Re-export main types
pub use instance::{OpenMode, PoolInstance, ReadStep};
pub use region::RegionSpan;
pub use registry::{Handle, PoolRegistry, NO_HANDLE};
