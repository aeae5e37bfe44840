//! # vtpool - Bounded Object Pool Store
//!
//! vtpool holds serialized display object pools in a fixed table of
//! channels and serves them back as position-tracked, chunked byte
//! streams, the way a vehicle-bus display terminal pulls a pool across
//! the wire in small blocks over time.
//!
//! ## Features
//!
//! - **Bounded handle table**: a fixed number of resident pools, small
//!   integer handles, rotating allocation so freed handles are not
//!   immediately reissued
//! - **Chunked streaming**: exact-size reads composed from partial
//!   underlying reads, with position tracking and rewind
//! - **Pluggable compression**: codec strategies selected at store
//!   construction; raw passthrough and lz4 ship in the box
//! - **Sentinel-based surface**: the transfer-facing facade never
//!   panics or unwinds, every failure is a checkable return value
//! - **Injected pool parser**: object counting and region partitioning
//!   stay behind a trait, the pool bytes themselves are opaque here
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 PoolStore (facade)              │
//! ├─────────────────────────────────────────────────┤
//! │  PoolRegistry            │  per-handle          │
//! │  - fixed slot table      │  PoolInstance        │
//! │  - rotating cursor       │  - raw pool bytes    │
//! │  - handle recycling      │  - regions + cursors │
//! └─────────────────────────────────────────────────┘
//!           │                         │
//!           ▼                         ▼
//! ┌─────────────────┐    ┌─────────────────────────┐
//! │   ExactReader   │    │    Codec strategies     │
//! │  (fill loops)   │    │  (passthrough, lz4)     │
//! └─────────────────┘    └─────────────────────────┘
//! ```

// Core modules
pub mod codec;
pub mod error;
pub mod pool;
pub mod scan;
pub mod store;
pub mod stream;

// Main API re-exports
pub use codec::{Codec, DecodeSession, DecodeStep, Lz4Codec, PassthroughCodec};
pub use error::{PoolStoreError, Result};
pub use pool::{Handle, OpenMode, PoolInstance, PoolRegistry, ReadStep, RegionSpan, NO_HANDLE};
pub use scan::{OpaqueScanner, PoolScanner, PresetScanner};
pub use store::{PoolStore, PoolSummary, StoreConfig, READ_EOF};
pub use stream::ExactReader;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants
pub mod defaults {
    /// Maximum number of concurrently resident pools
    pub const MAX_POOLS: usize = 16;

    /// Consecutive zero-byte reads tolerated by an exact-size fill
    /// before it aborts as stalled
    pub const ZERO_READ_LIMIT: u32 = 256;
}
