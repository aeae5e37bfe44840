//! Exact-size reader over a pool instance

use log::warn;

use crate::error::{PoolStoreError, Result};
use crate::pool::{PoolInstance, ReadStep};

/// Reader that satisfies exact byte counts through repeated pool reads
///
/// A zero-byte, non-terminal read counts as progress and the loop tries
/// again. Left unbounded that is a spin risk, so the reader cuts the
/// fill off after a configurable number of consecutive empty reads.
#[derive(Debug)]
pub struct ExactReader<'a> {
    instance: &'a mut PoolInstance,
    /// Consecutive zero-byte reads tolerated before the fill aborts;
    /// `None` removes the guard
    zero_read_limit: Option<u32>,
}

impl<'a> ExactReader<'a> {
    /// Create a reader with the default zero-read guard
    pub fn new(instance: &'a mut PoolInstance) -> Self {
        Self {
            instance,
            zero_read_limit: Some(crate::defaults::ZERO_READ_LIMIT),
        }
    }

    /// Override or remove the zero-read guard
    pub fn with_zero_read_limit(mut self, limit: Option<u32>) -> Self {
        self.zero_read_limit = limit;
        self
    }

    /// Fill `dst` completely
    ///
    /// Returns `Chunk(dst.len())` once every byte is delivered. End of
    /// data part-way through reports `EndOfData` instead of a partial
    /// count; bytes already produced stay in `dst` and remain counted in
    /// the pool position.
    pub fn fill(&mut self, dst: &mut [u8]) -> Result<ReadStep> {
        let mut delivered = 0;
        let mut zero_reads = 0u32;

        while delivered < dst.len() {
            match self.instance.read(&mut dst[delivered..])? {
                ReadStep::Chunk(0) => {
                    zero_reads += 1;
                    if let Some(limit) = self.zero_read_limit {
                        if zero_reads >= limit {
                            warn!(
                                "fill stalled after {} consecutive empty reads",
                                zero_reads
                            );
                            return Err(PoolStoreError::stalled_stream(zero_reads));
                        }
                    }
                }
                ReadStep::Chunk(n) => {
                    delivered += n;
                    zero_reads = 0;
                }
                ReadStep::EndOfData => return Ok(ReadStep::EndOfData),
            }
        }

        Ok(ReadStep::Chunk(delivered))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::codec::PassthroughCodec;
    use crate::pool::OpenMode;
    use crate::scan::OpaqueScanner;

    fn open_pool(bytes: &[u8]) -> PoolInstance {
        let mut instance =
            PoolInstance::load(bytes.to_vec(), &OpaqueScanner, Arc::new(PassthroughCodec));
        assert!(instance.open(OpenMode::Stream));
        instance
    }

    #[test]
    fn test_fill_delivers_exact_counts() {
        let data: Vec<u8> = (0..64).collect();
        let mut instance = open_pool(&data);

        let mut out = Vec::new();
        let mut chunk = [0u8; 7];
        loop {
            let want = chunk.len().min(data.len() - out.len());
            match ExactReader::new(&mut instance)
                .fill(&mut chunk[..want])
                .unwrap()
            {
                ReadStep::Chunk(n) => {
                    assert_eq!(n, want);
                    out.extend_from_slice(&chunk[..n]);
                }
                ReadStep::EndOfData => break,
            }
            if out.len() == data.len() {
                break;
            }
        }
        assert_eq!(out, data);
    }

    #[test]
    fn test_end_of_data_wins_over_partial_fill() {
        let mut instance = open_pool(&[9u8; 10]);

        // Ask for more than the pool holds: the first inner read gives
        // 10 bytes, the second reports end of data, and the fill
        // propagates that instead of the partial count.
        let mut chunk = [0u8; 16];
        assert_eq!(
            ExactReader::new(&mut instance).fill(&mut chunk).unwrap(),
            ReadStep::EndOfData
        );
        assert_eq!(&chunk[..10], &[9u8; 10]);
        assert_eq!(instance.pos(), Some(10));
    }

    #[test]
    fn test_empty_fill_is_trivially_complete() {
        let mut instance = open_pool(b"bytes");
        let mut chunk = [0u8; 0];
        assert_eq!(
            ExactReader::new(&mut instance).fill(&mut chunk).unwrap(),
            ReadStep::Chunk(0)
        );
    }
}
