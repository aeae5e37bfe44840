//! Compression codec strategies
//!
//! Codecs are runtime-selected strategy objects: a store is constructed
//! with one codec and every pool it loads compresses and decodes through
//! that strategy. The passthrough codec serves regions straight from the
//! pool buffer, so a store without compression is just a store with a
//! different strategy, not a different build.

pub mod lz4;
pub mod passthrough;
pub mod traits;

// Re-export main types
pub use lz4::Lz4Codec;
pub use passthrough::PassthroughCodec;
pub use traits::{Codec, DecodeSession, DecodeStep};
