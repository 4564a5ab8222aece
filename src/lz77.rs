//! Back-reference copy kernel.
//!
//! The hot loop of inflate is copying `length` bytes from `distance` bytes
//! back in the output, where source and destination may overlap. The
//! contract is byte-by-byte forward copy: with a small distance the copy
//! replicates a pattern. When `distance >= 8` an 8-byte load can never
//! alias its own store, so the loop moves whole words and is allowed to
//! spill up to 7 bytes past the logical end into reserved capacity.

/// Capacity reserved past the copy so word-wide stores stay in bounds.
pub(crate) const COPY_SLOP: usize = 16;

/// Append `length` bytes read from `distance` back in `output`.
///
/// `distance` must be in `1..=output.len()` and `length` nonzero; the
/// block decoder validates both.
#[inline(always)]
pub(crate) fn lz77_copy(output: &mut Vec<u8>, distance: usize, length: usize) {
    debug_assert!(distance >= 1 && distance <= output.len());
    debug_assert!(length >= 1);

    // Grow before taking pointers: the wide path stores past `length`.
    output.reserve(length + COPY_SLOP);
    let op = output.len();

    unsafe {
        output.set_len(op + length);
        let ptr = output.as_mut_ptr();
        let mut dst = ptr.add(op);
        let mut src = ptr.add(op - distance);

        if distance == 1 {
            // Run of one byte.
            std::ptr::write_bytes(dst, *src, length);
        } else if distance >= 8 {
            let mut remaining = length as isize;
            while remaining > 0 {
                (dst as *mut u64).write_unaligned((src as *const u64).read_unaligned());
                dst = dst.add(8);
                src = src.add(8);
                remaining -= 8;
            }
        } else {
            // Distances 2..=7 alias within a word; copy bytewise so the
            // pattern replicates.
            for i in 0..length {
                *dst.add(i) = *src.add(i);
            }
        }
    }
}
