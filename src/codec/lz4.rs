//! LZ4 block codec strategy

use lz4_flex::block::{compress_prepend_size, decompress_size_prepended};

use crate::error::{PoolStoreError, Result};

use super::traits::{Codec, DecodeSession, DecodeStep};

/// Codec strategy over lz4 block compression
///
/// Archives carry the decompressed size prepended, so a session can
/// restore the region without any out-of-band length bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        Ok(compress_prepend_size(raw))
    }

    fn open_session(&self, archive: &[u8]) -> Result<Box<dyn DecodeSession>> {
        // The block format has no streaming decoder; decode once here
        // and serve the payload in chunks from the session cursor.
        let decoded = decompress_size_prepended(archive)
            .map_err(|e| PoolStoreError::codec(self.name(), e.to_string()))?;
        Ok(Box::new(Lz4Session { decoded, next: 0 }))
    }
}

/// Incremental cursor over a decoded lz4 archive
#[derive(Debug)]
struct Lz4Session {
    decoded: Vec<u8>,
    next: usize,
}

impl DecodeSession for Lz4Session {
    fn decode(&mut self, dst: &mut [u8]) -> Result<DecodeStep> {
        if self.next >= self.decoded.len() {
            return Ok(DecodeStep::Finished);
        }
        let n = dst.len().min(self.decoded.len() - self.next);
        dst[..n].copy_from_slice(&self.decoded[self.next..self.next + n]);
        self.next += n;
        Ok(DecodeStep::Produced(n))
    }

    fn rewind(&mut self) {
        self.next = 0;
    }
}
