//! puff - raw DEFLATE (RFC 1951) decompression.
//!
//! A small, fast decoder for raw deflate bitstreams, the payload format
//! inside zlib, gzip and PNG IDAT. No container parsing, no checksums, no
//! streaming: one contiguous input buffer in, decoded bytes out. Named for
//! [puff.c](https://github.com/madler/zlib/tree/master/contrib/puff) by
//! Mark Adler.
//!
//! Decoding runs through a 9-bit primary / 64-entry overflow two-level
//! Huffman table, so short codes resolve in a single lookup and even
//! 15-bit codes take only two.
//!
//! ```
//! // "abcd" encoded as a fixed-Huffman block.
//! let stream = [0x4b, 0x4c, 0x4a, 0x4e, 0x01, 0x00];
//! assert_eq!(puff::inflate(&stream).unwrap(), b"abcd");
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

mod bits;
mod error;
mod huffman;
mod inflate;
mod inflate_tables;
mod lz77;

pub use bits::BitStream;
pub use error::{PuffError, PuffResult};
pub use huffman::{Huffman, MAX_CODE_LENGTH};
pub use inflate::{inflate, inflate_into};
