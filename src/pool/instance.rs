//! A single loaded object pool and its streaming lifecycle
//!
//! An instance moves through load -> open -> read* -> close. Loading
//! parses the object count through the scanner seam and compresses each
//! region through the store's codec; opening creates decode cursors and
//! resets the position; reads walk the regions in order and advance the
//! position by whatever they produce; closing drops the pool bytes and
//! every cursor.

use std::sync::Arc;

use log::{debug, warn};

use crate::codec::{Codec, DecodeStep};
use crate::error::Result;
use crate::scan::PoolScanner;

use super::region::{Region, RegionCursor, RegionSpan};

/// Outcome of one read call on a pool instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStep {
    /// Bytes written into the destination; zero is valid and means
    /// "call again"
    Chunk(usize),
    /// Every region is exhausted, or the pool is closed or empty
    EndOfData,
}

impl ReadStep {
    /// Bytes produced by this step, zero at end of data
    pub fn produced(&self) -> usize {
        match self {
            ReadStep::Chunk(n) => *n,
            ReadStep::EndOfData => 0,
        }
    }

    /// Check whether the stream ended
    pub fn is_end(&self) -> bool {
        matches!(self, ReadStep::EndOfData)
    }
}

/// Access mode requested by the transfer layer when opening a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Sequential front-to-back streaming
    #[default]
    Stream,
    /// Streaming with rewinds expected between drains
    Seekable,
}

/// One resident object pool and its streaming state
#[derive(Debug)]
pub struct PoolInstance {
    /// The original, uncompressed pool bytes; dropped on close
    raw: Vec<u8>,
    /// Object count reported by the scanner at load time
    object_count: u16,
    /// Bytes delivered since the last open or rewind
    position: u32,
    open: bool,
    mode: OpenMode,
    /// Regions in streaming order
    regions: Vec<Region>,
    codec: Arc<dyn Codec>,
}

impl PoolInstance {
    /// Load a pool from owned bytes
    ///
    /// Empty input or a zero object count yields a loaded-but-empty
    /// instance: not an error, but every downstream query reports
    /// zero/closed. Otherwise each non-empty region is handed to the
    /// codec; an empty or failed compression falls back to raw serving.
    pub fn load(bytes: Vec<u8>, scanner: &dyn PoolScanner, codec: Arc<dyn Codec>) -> Self {
        let object_count = scanner.count_objects(&bytes);
        if bytes.is_empty() || object_count == 0 {
            debug!(
                "pool rejected as empty ({} bytes, {} objects)",
                bytes.len(),
                object_count
            );
            return Self::empty(codec);
        }

        let mut regions = Vec::new();
        for span in scanner.split_regions(&bytes) {
            if span.end() > bytes.len() {
                warn!(
                    "region {} spans {}..{} past pool end {}, skipping",
                    span.id,
                    span.offset,
                    span.end(),
                    bytes.len()
                );
                continue;
            }
            let archive = if span.is_empty() {
                Vec::new()
            } else {
                match codec.compress(&bytes[span.offset..span.end()]) {
                    Ok(archive) => archive,
                    Err(e) => {
                        warn!(
                            "codec {} failed on region {}: {}, serving raw",
                            codec.name(),
                            span.id,
                            e
                        );
                        Vec::new()
                    }
                }
            };
            regions.push(Region::new(span, archive));
        }

        debug!(
            "loaded pool: {} bytes, {} objects, {} regions ({} compressed)",
            bytes.len(),
            object_count,
            regions.len(),
            regions.iter().filter(|r| r.is_compressed()).count()
        );

        Self {
            raw: bytes,
            object_count,
            position: 0,
            open: false,
            mode: OpenMode::default(),
            regions,
            codec,
        }
    }

    /// Create a permanently-empty instance
    fn empty(codec: Arc<dyn Codec>) -> Self {
        Self {
            raw: Vec::new(),
            object_count: 0,
            position: 0,
            open: false,
            mode: OpenMode::default(),
            regions: Vec::new(),
            codec,
        }
    }

    /// Open the instance for streaming
    ///
    /// Resets the position and creates a decode cursor per region.
    /// Returns `false` when there is nothing to serve.
    pub fn open(&mut self, mode: OpenMode) -> bool {
        if self.raw.is_empty() {
            return false;
        }

        self.position = 0;
        self.mode = mode;
        for region in &mut self.regions {
            region.cursor = Some(if region.is_compressed() {
                match self.codec.open_session(&region.archive) {
                    Ok(session) => RegionCursor::Coded(session),
                    Err(e) => {
                        warn!(
                            "codec {} session failed on region {}: {}, serving raw",
                            self.codec.name(),
                            region.span.id,
                            e
                        );
                        RegionCursor::Raw { next: 0 }
                    }
                }
            } else {
                RegionCursor::Raw { next: 0 }
            });
        }
        self.open = true;
        true
    }

    /// Read the next chunk into `dst`
    ///
    /// Walks the regions in order and serves from the first one that
    /// still has data; a drained region hands over to the next. A
    /// closed or empty instance reports end of data.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<ReadStep> {
        if !self.open || self.raw.is_empty() {
            return Ok(ReadStep::EndOfData);
        }

        for region in &mut self.regions {
            let Some(cursor) = region.cursor.as_mut() else {
                continue;
            };
            match cursor {
                RegionCursor::Raw { next } => {
                    if *next >= region.span.len {
                        continue;
                    }
                    let n = dst.len().min(region.span.len - *next);
                    let start = region.span.offset + *next;
                    dst[..n].copy_from_slice(&self.raw[start..start + n]);
                    *next += n;
                    self.position += n as u32;
                    return Ok(ReadStep::Chunk(n));
                }
                RegionCursor::Coded(session) => match session.decode(dst)? {
                    DecodeStep::Produced(n) => {
                        self.position += n as u32;
                        return Ok(ReadStep::Chunk(n));
                    }
                    DecodeStep::Finished => continue,
                },
            }
        }

        Ok(ReadStep::EndOfData)
    }

    /// Close the instance and discard the pool bytes
    ///
    /// Reads on a closed instance report end of data.
    pub fn close(&mut self) {
        self.raw = Vec::new();
        self.regions.clear();
        self.open = false;
    }

    /// Rewind every region to offset zero and reset the position
    ///
    /// Has no effect on an instance that is not open.
    pub fn seek_to_begin(&mut self) {
        if !self.open {
            return;
        }
        self.position = 0;
        for region in &mut self.regions {
            match region.cursor.as_mut() {
                Some(RegionCursor::Raw { next }) => *next = 0,
                Some(RegionCursor::Coded(session)) => session.rewind(),
                None => {}
            }
        }
    }

    /// Check whether the instance is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Access mode recorded at the last open
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Bytes delivered since the last open or rewind
    ///
    /// `None` when the instance has no data to serve.
    pub fn pos(&self) -> Option<u32> {
        if self.raw.is_empty() {
            None
        } else {
            Some(self.position)
        }
    }

    /// Total raw byte count of the pool
    pub fn size(&self) -> u32 {
        self.raw.len() as u32
    }

    /// Object count parsed at load time
    pub fn num_objects(&self) -> u16 {
        self.object_count
    }

    /// Upper bound on a single object's size, used by consumers to size
    /// their own buffers
    pub fn max_object_size(&self) -> u32 {
        self.raw.len() as u32
    }

    /// Name of the codec strategy this instance was loaded with
    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Number of regions in streaming order
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Number of regions holding a compressed archive
    pub fn compressed_regions(&self) -> usize {
        self.regions.iter().filter(|r| r.is_compressed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PassthroughCodec;
    use crate::scan::OpaqueScanner;

    fn load_raw(bytes: &[u8]) -> PoolInstance {
        PoolInstance::load(bytes.to_vec(), &OpaqueScanner, Arc::new(PassthroughCodec))
    }

    #[test]
    fn test_empty_input_loads_as_empty_instance() {
        let instance = load_raw(&[]);
        assert_eq!(instance.size(), 0);
        assert_eq!(instance.num_objects(), 0);
        assert_eq!(instance.pos(), None);
        assert!(!instance.is_open());
    }

    #[test]
    fn test_open_fails_on_empty_instance() {
        let mut instance = load_raw(&[]);
        assert!(!instance.open(OpenMode::Stream));
        assert!(!instance.is_open());
    }

    #[test]
    fn test_read_advances_position() {
        let data: Vec<u8> = (0..100).collect();
        let mut instance = load_raw(&data);
        assert!(instance.open(OpenMode::Stream));
        assert_eq!(instance.pos(), Some(0));

        let mut chunk = [0u8; 30];
        assert_eq!(instance.read(&mut chunk).unwrap(), ReadStep::Chunk(30));
        assert_eq!(&chunk[..], &data[..30]);
        assert_eq!(instance.pos(), Some(30));

        // Short final chunk, then end of data
        let mut rest = [0u8; 100];
        assert_eq!(instance.read(&mut rest).unwrap(), ReadStep::Chunk(70));
        assert_eq!(instance.read(&mut rest).unwrap(), ReadStep::EndOfData);
        assert_eq!(instance.pos(), Some(100));
    }

    #[test]
    fn test_read_before_open_is_end_of_data() {
        let mut instance = load_raw(b"pool");
        let mut chunk = [0u8; 4];
        assert_eq!(instance.read(&mut chunk).unwrap(), ReadStep::EndOfData);
    }

    #[test]
    fn test_seek_to_begin_replays_the_stream() {
        let data = b"replayable pool contents".to_vec();
        let mut instance = load_raw(&data);
        assert!(instance.open(OpenMode::Seekable));

        let mut first = vec![0u8; data.len()];
        assert_eq!(
            instance.read(&mut first).unwrap(),
            ReadStep::Chunk(data.len())
        );

        instance.seek_to_begin();
        assert_eq!(instance.pos(), Some(0));

        let mut second = vec![0u8; data.len()];
        assert_eq!(
            instance.read(&mut second).unwrap(),
            ReadStep::Chunk(data.len())
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_seek_on_closed_instance_is_a_no_op() {
        let mut instance = load_raw(b"pool");
        instance.seek_to_begin();
        assert!(!instance.is_open());
        assert_eq!(instance.pos(), Some(0));
    }

    #[test]
    fn test_close_discards_the_pool() {
        let mut instance = load_raw(b"pool bytes");
        assert!(instance.open(OpenMode::Stream));
        instance.close();

        assert!(!instance.is_open());
        assert_eq!(instance.size(), 0);
        assert_eq!(instance.pos(), None);
        let mut chunk = [0u8; 8];
        assert_eq!(instance.read(&mut chunk).unwrap(), ReadStep::EndOfData);
    }

    #[test]
    fn test_out_of_range_region_is_skipped() {
        #[derive(Debug)]
        struct BadScanner;
        impl crate::scan::PoolScanner for BadScanner {
            fn count_objects(&self, _pool: &[u8]) -> u16 {
                1
            }
            fn split_regions(&self, pool: &[u8]) -> Vec<RegionSpan> {
                vec![
                    RegionSpan::new(0, 0, pool.len()),
                    RegionSpan::new(1, pool.len(), 64),
                ]
            }
        }

        let instance =
            PoolInstance::load(vec![7u8; 32], &BadScanner, Arc::new(PassthroughCodec));
        assert_eq!(instance.region_count(), 1);
    }
}
