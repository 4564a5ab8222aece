//! Deflate block decoding (RFC 1951).
//!
//! The driver walks the stream one block at a time until the final-block
//! flag: stored blocks are bulk byte copies, fixed blocks use the RFC's
//! built-in code lengths, dynamic blocks carry their own Huffman tables
//! encoded with a meta table over code-length symbols. Block bodies are a
//! single loop over literal/length symbols, expanding each length/distance
//! pair into an overlapping copy within the output buffer.

use crate::bits::BitStream;
use crate::error::{PuffError, PuffResult};
use crate::huffman::Huffman;
use crate::inflate_tables::{
    CODE_LENGTH_ORDER, DIST_EXTRA_BITS, DIST_START, FIXED_DIST_LENGTHS, FIXED_LITLEN_LENGTHS,
    LEN_EXTRA_BITS, LEN_START,
};
use crate::lz77::lz77_copy;

/// End of block symbol in the literal/length alphabet.
const END_OF_BLOCK: u16 = 256;

/// Number of literal/length codes a dynamic block may define.
const NUM_LITLEN_CODES: usize = 286;

/// Number of distance codes a dynamic block may define.
const NUM_DIST_CODES: usize = 30;

/// Number of codes in the code-length alphabet.
const NUM_CODE_LENGTH_CODES: usize = 19;

/// Decode a raw deflate stream into a fresh buffer.
pub fn inflate(src: &[u8]) -> PuffResult<Vec<u8>> {
    let mut dst = Vec::new();
    inflate_into(&mut dst, src)?;
    Ok(dst)
}

/// Decode a raw deflate stream, appending to `dst`.
///
/// Returns the number of bytes appended. On error, bytes decoded before
/// the failure point are left in `dst` but carry no guarantee.
pub fn inflate_into(dst: &mut Vec<u8>, src: &[u8]) -> PuffResult<usize> {
    let start = dst.len();
    dst.reserve(src.len().saturating_mul(3).max(64));
    Inflater::new(src).run(dst)?;
    Ok(dst.len() - start)
}

struct Inflater<'a> {
    stream: BitStream<'a>,
}

impl<'a> Inflater<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            stream: BitStream::new(src),
        }
    }

    fn run(&mut self, output: &mut Vec<u8>) -> PuffResult<()> {
        loop {
            let bfinal = self.stream.read_bits(1)?;
            let btype = self.stream.read_bits(2)?;

            match btype {
                0 => self.stored_block(output)?,
                1 => self.fixed_block(output)?,
                2 => self.dynamic_block(output)?,
                _ => return Err(PuffError::InvalidBlockType),
            }

            if bfinal == 1 {
                return Ok(());
            }
        }
    }

    /// BTYPE=00: byte-aligned LEN/NLEN header, then raw bytes.
    fn stored_block(&mut self, output: &mut Vec<u8>) -> PuffResult<()> {
        self.stream.align_to_byte();

        let len = self.stream.read_u16_le()?;
        let nlen = self.stream.read_u16_le()?;
        if len != !nlen {
            return Err(PuffError::InvalidStoredBlock);
        }

        self.stream.copy_bytes(output, len as usize)
    }

    /// BTYPE=01: the RFC's fixed code lengths.
    fn fixed_block(&mut self, output: &mut Vec<u8>) -> PuffResult<()> {
        let literal = Huffman::build(&FIXED_LITLEN_LENGTHS, FIXED_LITLEN_LENGTHS.len())?;
        let distance = Huffman::build(&FIXED_DIST_LENGTHS, FIXED_DIST_LENGTHS.len())?;
        self.huffman_block(output, &literal, &distance)
    }

    /// BTYPE=10: read the code-length table, then the literal/length and
    /// distance tables it encodes, then the block body.
    fn dynamic_block(&mut self, output: &mut Vec<u8>) -> PuffResult<()> {
        let hlit = self.stream.read_bits(5)? as usize + 257;
        let hdist = self.stream.read_bits(5)? as usize + 1;
        let hclen = self.stream.read_bits(4)? as usize + 4;

        let mut meta_lengths = [0u8; NUM_CODE_LENGTH_CODES];
        for &position in CODE_LENGTH_ORDER.iter().take(hclen) {
            meta_lengths[position] = self.stream.read_bits(3)? as u8;
        }
        let meta = Huffman::build(&meta_lengths, NUM_CODE_LENGTH_CODES)?;

        // One flat sequence of hlit + hdist code lengths; runs of the
        // repeat opcodes may not spill past it.
        let total = hlit + hdist;
        let mut unpacked: Vec<u8> = Vec::with_capacity(total);
        while unpacked.len() < total {
            let symbol = meta.decode(&mut self.stream)?;
            match symbol {
                0..=15 => unpacked.push(symbol as u8),
                16 => {
                    let prev = *unpacked.last().ok_or(PuffError::InvalidRepeat)?;
                    let count = self.stream.read_bits(2)? as usize + 3;
                    unpacked.resize(unpacked.len() + count, prev);
                }
                17 => {
                    let count = self.stream.read_bits(3)? as usize + 3;
                    unpacked.resize(unpacked.len() + count, 0);
                }
                18 => {
                    let count = self.stream.read_bits(7)? as usize + 11;
                    unpacked.resize(unpacked.len() + count, 0);
                }
                _ => return Err(PuffError::InvalidCode),
            }
        }
        if unpacked.len() > total {
            return Err(PuffError::InvalidTable);
        }

        let literal = Huffman::build(&unpacked[..hlit], NUM_LITLEN_CODES)?;
        let distance = Huffman::build(&unpacked[hlit..], NUM_DIST_CODES)?;
        self.huffman_block(output, &literal, &distance)
    }

    /// Decode a compressed block body: literals, end-of-block, and
    /// length/distance pairs.
    fn huffman_block(
        &mut self,
        output: &mut Vec<u8>,
        literal: &Huffman,
        distance: &Huffman,
    ) -> PuffResult<()> {
        loop {
            let symbol = literal.decode(&mut self.stream)?;

            if symbol < END_OF_BLOCK {
                output.push(symbol as u8);
                continue;
            }
            if symbol == END_OF_BLOCK {
                return Ok(());
            }

            let length_index = (symbol - 257) as usize;
            if length_index >= LEN_START.len() {
                return Err(PuffError::InvalidCode);
            }
            let total_length = LEN_START[length_index] as usize
                + self.stream.read_bits(LEN_EXTRA_BITS[length_index] as u32)? as usize;

            let distance_index = distance.decode(&mut self.stream)? as usize;
            if distance_index >= DIST_START.len() {
                return Err(PuffError::InvalidCode);
            }
            let total_distance = DIST_START[distance_index] as usize
                + self.stream.read_bits(DIST_EXTRA_BITS[distance_index] as u32)? as usize;

            // A reference may reach back to offset 0 but never before it.
            if total_distance > output.len() {
                return Err(PuffError::InvalidDistance);
            }

            lz77_copy(output, total_distance, total_length);
        }
    }
}
