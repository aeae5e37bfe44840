//! Store facade consumed by the transfer protocol layer
//!
//! The facade speaks the transfer layer's dialect: failures come back as
//! sentinel values, never as errors. Handle 0 means a load failed or a
//! handle is unknown; `READ_EOF` means a read has nothing more to give
//! or failed outright. Library code underneath distinguishes those
//! outcomes properly; the conflation lives only here, for compatibility
//! with the consumer's contract.

pub mod config;
pub mod summary;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};
use memmap2::MmapOptions;

use crate::codec::{Codec, PassthroughCodec};
use crate::error::{PoolStoreError, Result};
use crate::pool::{Handle, OpenMode, PoolInstance, PoolRegistry, ReadStep, NO_HANDLE};
use crate::scan::{OpaqueScanner, PoolScanner};
use crate::stream::ExactReader;

// Re-export main types
pub use config::StoreConfig;
pub use summary::PoolSummary;

/// Sentinel returned by read and position queries for both end of data
/// and hard failure
pub const READ_EOF: u32 = u32::MAX;

/// Bounded, handle-indexed store of object pools
///
/// Owns the registry, the codec strategy, and the scanner seam. All
/// operations are synchronous and expect one logical caller; a
/// multi-threaded host wraps the store in its own mutex.
#[derive(Debug)]
pub struct PoolStore {
    registry: PoolRegistry,
    codec: Arc<dyn Codec>,
    scanner: Arc<dyn PoolScanner>,
    zero_read_limit: Option<u32>,
}

impl PoolStore {
    /// Create a store with default configuration, raw serving, and the
    /// opaque scanner
    pub fn new() -> Self {
        Self::with_parts(
            StoreConfig::default(),
            Arc::new(PassthroughCodec),
            Arc::new(OpaqueScanner),
        )
        .expect("default store configuration is valid")
    }

    /// Create a store with a specific codec strategy
    pub fn with_codec(codec: Arc<dyn Codec>) -> Self {
        Self::with_parts(StoreConfig::default(), codec, Arc::new(OpaqueScanner))
            .expect("default store configuration is valid")
    }

    /// Create a store from explicit parts
    pub fn with_parts(
        config: StoreConfig,
        codec: Arc<dyn Codec>,
        scanner: Arc<dyn PoolScanner>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: PoolRegistry::new(config.max_pools),
            codec,
            scanner,
            zero_read_limit: config.zero_read_limit,
        })
    }

    /// Load a pool from a file
    ///
    /// Returns the new handle, or 0 when the file cannot be read or the
    /// table is full. An empty or zero-object file still registers as a
    /// loaded-but-empty pool.
    pub fn load_by_filename(&mut self, path: impl AsRef<Path>) -> Handle {
        let path = path.as_ref();
        match Self::read_pool_file(path) {
            Ok(bytes) => {
                debug!("loading pool from {} ({} bytes)", path.display(), bytes.len());
                self.load_by_bytes(bytes)
            }
            Err(e) => {
                warn!("failed to read pool file {}: {}", path.display(), e);
                NO_HANDLE
            }
        }
    }

    /// Load a pool from owned bytes
    ///
    /// Returns the new handle, or 0 when the table is full.
    pub fn load_by_bytes(&mut self, bytes: Vec<u8>) -> Handle {
        let instance = PoolInstance::load(bytes, self.scanner.as_ref(), Arc::clone(&self.codec));
        self.registry.register(instance).unwrap_or(NO_HANDLE)
    }

    /// Destroy a pool and release its handle for reuse
    ///
    /// Returns `false` for unknown or already-freed handles.
    pub fn free(&mut self, handle: Handle) -> bool {
        self.registry.free(handle)
    }

    /// Check whether a pool is open; unknown handles report `false`
    pub fn is_open(&self, handle: Handle) -> bool {
        self.registry
            .lookup(handle)
            .map(PoolInstance::is_open)
            .unwrap_or(false)
    }

    /// Open a pool for streaming
    ///
    /// Returns `false` for unknown handles and for pools with nothing
    /// to serve.
    pub fn open(&mut self, handle: Handle, mode: OpenMode) -> bool {
        self.registry
            .lookup_mut(handle)
            .map(|instance| instance.open(mode))
            .unwrap_or(false)
    }

    /// Close a pool, discarding its bytes; unknown handles are a no-op
    pub fn close(&mut self, handle: Handle) {
        if let Some(instance) = self.registry.lookup_mut(handle) {
            instance.close();
        }
    }

    /// Read exactly `dst.len()` bytes
    ///
    /// Returns the byte count on success, `READ_EOF` when the stream
    /// ends first (bytes already produced stay in `dst` and in the pool
    /// position), and `READ_EOF` again for unknown handles and stalled
    /// fills.
    pub fn read_exact(&mut self, handle: Handle, dst: &mut [u8]) -> u32 {
        let Some(instance) = self.registry.lookup_mut(handle) else {
            return READ_EOF;
        };
        let outcome = ExactReader::new(instance)
            .with_zero_read_limit(self.zero_read_limit)
            .fill(dst);
        Self::fold_read(handle, outcome)
    }

    /// Read a single chunk without retrying
    ///
    /// Returns the produced byte count (possibly zero), or `READ_EOF`
    /// when the stream has ended or the handle is unknown.
    pub fn read_once(&mut self, handle: Handle, dst: &mut [u8]) -> u32 {
        let Some(instance) = self.registry.lookup_mut(handle) else {
            return READ_EOF;
        };
        Self::fold_read(handle, instance.read(dst))
    }

    /// Bytes delivered since the last open or rewind
    ///
    /// `READ_EOF` when the handle is unknown or the pool has no data.
    pub fn pos(&self, handle: Handle) -> u32 {
        self.registry
            .lookup(handle)
            .and_then(PoolInstance::pos)
            .unwrap_or(READ_EOF)
    }

    /// Total raw byte count; unknown handles report 0
    pub fn size(&self, handle: Handle) -> u32 {
        self.registry
            .lookup(handle)
            .map(PoolInstance::size)
            .unwrap_or(0)
    }

    /// Object count parsed at load time; unknown handles report 0
    pub fn num_objects(&self, handle: Handle) -> u16 {
        self.registry
            .lookup(handle)
            .map(PoolInstance::num_objects)
            .unwrap_or(0)
    }

    /// Upper bound on a single object's size; unknown handles report 0
    pub fn max_object_size(&self, handle: Handle) -> u32 {
        self.registry
            .lookup(handle)
            .map(PoolInstance::max_object_size)
            .unwrap_or(0)
    }

    /// Rewind a pool to the beginning; no-op for unknown or unopened
    /// handles
    pub fn seek_to_begin(&mut self, handle: Handle) {
        if let Some(instance) = self.registry.lookup_mut(handle) {
            instance.seek_to_begin();
        }
    }

    /// Number of registered pools
    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    /// Pool table capacity
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Snapshot of one registered pool's vitals
    pub fn summary(&self, handle: Handle) -> Option<PoolSummary> {
        self.registry.lookup(handle).map(|instance| PoolSummary {
            handle,
            size: instance.size(),
            object_count: instance.num_objects(),
            open: instance.is_open(),
            codec: instance.codec_name().to_string(),
            region_count: instance.region_count(),
            compressed_regions: instance.compressed_regions(),
        })
    }

    /// Snapshots of every registered pool, in slot order
    pub fn summaries(&self) -> Vec<PoolSummary> {
        self.registry
            .handles()
            .into_iter()
            .filter_map(|handle| self.summary(handle))
            .collect()
    }

    fn fold_read(handle: Handle, outcome: Result<ReadStep>) -> u32 {
        match outcome {
            Ok(ReadStep::Chunk(n)) => n as u32,
            Ok(ReadStep::EndOfData) => READ_EOF,
            Err(e) => {
                warn!("read on handle {} failed: {}", handle, e);
                READ_EOF
            }
        }
    }

    fn read_pool_file(path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(|e| PoolStoreError::from_io(e, "open pool file"))?;
        let len = file
            .metadata()
            .map_err(|e| PoolStoreError::from_io(e, "stat pool file"))?
            .len();
        if len == 0 {
            return Ok(Vec::new());
        }

        // Map read-only and copy out; the instance owns its bytes and
        // the mapping ends with this scope.
        let mmap = unsafe {
            MmapOptions::new()
                .map(&file)
                .map_err(|e| PoolStoreError::from_io(e, "map pool file"))?
        };
        Ok(mmap.to_vec())
    }
}

impl Default for PoolStore {
    fn default() -> Self {
        Self::new()
    }
}
