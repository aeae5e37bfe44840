//! Exact-size read composition
//!
//! A single pool read may legally produce fewer bytes than asked for.
//! The reader here turns that into the exact-size contract the transfer
//! layer wants: loop until the destination is full or the stream ends.

pub mod reader;

// Re-export main types
pub use reader::ExactReader;
