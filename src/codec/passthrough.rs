//! Passthrough codec: regions are served raw

use crate::error::{PoolStoreError, Result};

use super::traits::{Codec, DecodeSession};

/// Codec strategy that never compresses
///
/// Every `compress` call reports an empty archive, which routes the
/// region to the raw serving path. This is the strategy to pick when the
/// transport would rather spend bytes than cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCodec;

impl Codec for PassthroughCodec {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn compress(&self, _raw: &[u8]) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn open_session(&self, _archive: &[u8]) -> Result<Box<dyn DecodeSession>> {
        // Unreachable through the store: passthrough never produces an
        // archive, so no region ever asks it for a session.
        Err(PoolStoreError::codec(
            self.name(),
            "passthrough regions are served raw, no session exists",
        ))
    }
}
