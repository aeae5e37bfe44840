//! Introspection records for registered pools

use serde::{Deserialize, Serialize};

use crate::pool::Handle;

/// Snapshot of one registered pool's vitals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    /// Handle the pool is registered under
    pub handle: Handle,
    /// Total raw byte count
    pub size: u32,
    /// Object count parsed at load time
    pub object_count: u16,
    /// Whether the pool is currently open for streaming
    pub open: bool,
    /// Codec strategy the pool was loaded with
    pub codec: String,
    /// Regions in streaming order
    pub region_count: usize,
    /// Regions holding a compressed archive
    pub compressed_regions: usize,
}
