use std::io;

use byteorder::ByteOrder;

use crate::error::{Error, Result};
use super::{Digest, DigestAlgorithm};

/// Message block size shared by MD5, SHA-1 and SHA-256.
pub const BLOCK_LEN: usize = 64;

// Offset of the message length field within the final block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// A Merkle–Damgård compression function together with its chaining state.
pub trait ChunkedDigestAlgorithm {
    type Digest: Digest;
    /// Byte order of the message words and of the trailing length field.
    type Order: ByteOrder;

    fn new() -> Self;
    /// Folds one block of exactly `BLOCK_LEN` bytes into the state.
    fn update_chunk(&mut self, chunk: &[u8]);
    fn digest(self) -> Self::Digest;
}

/// Buffers arbitrary input into whole blocks and applies the standard
/// `0x80 || zeros || length` finalization on top of a compression function.
///
/// The bit length is kept modulo 2^64, as RFC 1321 and FIPS 180-4 define it.
/// Inputs beyond 2^61 bytes therefore wrap silently in `update`; use
/// `try_update` to have that reported instead.
#[derive(Debug, Clone)]
pub struct ChunkedDigestWrapper<Inner: ChunkedDigestAlgorithm> {
    // Hash state
    inner: Inner,
    // Message length (in bits, modulo 2^64)
    ml: u64,
    // In-progress chunk
    buffer_len: usize,
    buffer: [u8; BLOCK_LEN],
}

impl<Inner: ChunkedDigestAlgorithm> ChunkedDigestWrapper<Inner> {
    /// Number of message bits absorbed so far, modulo 2^64.
    pub fn bit_len(&self) -> u64 {
        self.ml
    }

    /// Like `update`, but fails with `Error::LengthOverflow` instead of
    /// wrapping the bit counter. The state is untouched on failure.
    pub fn try_update(&mut self, input: &[u8]) -> Result<()> {
        (input.len() as u64)
            .checked_mul(8)
            .and_then(|bits| self.ml.checked_add(bits))
            .ok_or(Error::LengthOverflow)?;
        self.update(input);
        Ok(())
    }
}

impl<Inner: ChunkedDigestAlgorithm> DigestAlgorithm for ChunkedDigestWrapper<Inner> {
    type Digest = Inner::Digest;

    fn new() -> Self {
        ChunkedDigestWrapper {
            inner: Inner::new(),
            ml: 0,
            buffer_len: 0,
            buffer: [0; BLOCK_LEN],
        }
    }

    fn reset(&mut self) {
        self.inner = Inner::new();
        self.ml = 0;
        self.buffer_len = 0;
    }

    fn update(&mut self, mut input: &[u8]) {
        // Update message length (in bits). Both steps wrap, which gives the
        // same result as the exact bit count modulo 2^64.
        self.ml = self.ml.wrapping_add((input.len() as u64).wrapping_mul(8));

        let buffer_len = self.buffer_len;

        // If buffer is already partially filled
        if buffer_len > 0 {
            let remaining = BLOCK_LEN - buffer_len;
            // If input is not long enough to fill remaining space in buffer
            if input.len() < remaining {
                self.buffer[buffer_len..buffer_len + input.len()].copy_from_slice(input);
                self.buffer_len += input.len();
                return;
            }
            // Fill the remaining space with input data and process the chunk
            self.buffer[buffer_len..].copy_from_slice(&input[..remaining]);
            input = &input[remaining..];
            self.inner.update_chunk(&self.buffer);
        }

        // Buffer is empty at this point, so can directly read chunks from input
        let mut chunks = input.chunks_exact(BLOCK_LEN);
        for chunk in &mut chunks {
            self.inner.update_chunk(chunk);
        }

        // Partially fill the buffer with any left-over input
        let rest = chunks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    fn digest(mut self) -> Self::Digest {
        let ml = self.ml;

        // Append 1 bit
        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        // Ensure there's room to write the message length
        if self.buffer_len > LENGTH_OFFSET {
            self.buffer[self.buffer_len..].fill(0);
            self.buffer_len = 0;
            self.inner.update_chunk(&self.buffer);
        }

        // Fill remaining space with zeros followed by the message length
        self.buffer[self.buffer_len..LENGTH_OFFSET].fill(0);
        Inner::Order::write_u64(&mut self.buffer[LENGTH_OFFSET..], ml);
        // Final chunk computation
        self.inner.update_chunk(&self.buffer);
        self.inner.digest()
    }
}

impl<Inner: ChunkedDigestAlgorithm> io::Write for ChunkedDigestWrapper<Inner> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use byteorder::{BigEndian, LittleEndian};
    use std::marker::PhantomData;

    use super::*;

    // Block count followed by the last compressed block
    define_digest!(TraceDigest, 8 + BLOCK_LEN);

    /// Records how many blocks were compressed and what the last one held,
    /// so padding can be checked independently of any real hash.
    #[derive(Debug, Clone)]
    struct Trace<O> {
        blocks: u64,
        last: [u8; BLOCK_LEN],
        order: PhantomData<O>,
    }

    impl<O: ByteOrder> ChunkedDigestAlgorithm for Trace<O> {
        type Digest = TraceDigest;
        type Order = O;

        fn new() -> Self {
            Trace { blocks: 0, last: [0; BLOCK_LEN], order: PhantomData }
        }

        fn update_chunk(&mut self, chunk: &[u8]) {
            assert_eq!(chunk.len(), BLOCK_LEN);
            self.blocks += 1;
            self.last.copy_from_slice(chunk);
        }

        fn digest(self) -> TraceDigest {
            let mut result = [0; 8 + BLOCK_LEN];
            BigEndian::write_u64(&mut result[..8], self.blocks);
            result[8..].copy_from_slice(&self.last);
            TraceDigest(result)
        }
    }

    type BigTrace = ChunkedDigestWrapper<Trace<BigEndian>>;
    type LittleTrace = ChunkedDigestWrapper<Trace<LittleEndian>>;

    fn blocks(digest: &TraceDigest) -> u64 {
        BigEndian::read_u64(&digest.0[..8])
    }

    fn last_block(digest: &TraceDigest) -> &[u8] {
        &digest.0[8..]
    }

    fn length_field(digest: &TraceDigest) -> &[u8] {
        &last_block(digest)[LENGTH_OFFSET..]
    }

    #[test]
    fn padding_block_count() {
        let data = [0xffu8; 200];
        for &(len, expected) in &[
            (0, 1), (1, 1), (55, 1), (56, 2), (63, 2), (64, 2),
            (65, 2), (119, 2), (120, 3), (128, 3),
        ] {
            let digest = BigTrace::compute(&data[..len]);
            assert_eq!(blocks(&digest), expected, "len {}", len);
        }
    }

    #[test]
    fn marker_fits_before_length_field() {
        let digest = BigTrace::compute(&[0xff; 55]);
        assert_eq!(blocks(&digest), 1);
        let block = last_block(&digest);
        assert!(block[..55].iter().all(|&b| b == 0xff));
        assert_eq!(block[55], 0x80);
        assert_eq!(length_field(&digest), &[0, 0, 0, 0, 0, 0, 0x01, 0xb8]);
    }

    #[test]
    fn marker_spills_into_extra_block() {
        let digest = BigTrace::compute(&[0xff; 56]);
        assert_eq!(blocks(&digest), 2);
        // The final block carries nothing but zeros and the length
        assert!(last_block(&digest)[..LENGTH_OFFSET].iter().all(|&b| b == 0));
        assert_eq!(length_field(&digest), &[0, 0, 0, 0, 0, 0, 0x01, 0xc0]);
    }

    #[test]
    fn stale_buffer_bytes_are_zeroed() {
        // Leaves a full block of 0xaa in the buffer with only six bytes live
        let mut state = BigTrace::new();
        state.update(&[0xaa; 10]);
        state.update(&[0xbb; 60]);
        assert_eq!(state.buffer_len, 6);
        assert_eq!(state.inner.blocks, 1);

        let digest = state.digest();
        assert_eq!(blocks(&digest), 2);
        let block = last_block(&digest);
        assert_eq!(&block[..6], &[0xbb; 6]);
        assert_eq!(block[6], 0x80);
        assert!(block[7..LENGTH_OFFSET].iter().all(|&b| b == 0));
        assert_eq!(length_field(&digest), &[0, 0, 0, 0, 0, 0, 0x02, 0x30]);
    }

    #[test]
    fn length_field_byte_order() {
        let big = BigTrace::compute(b"abc");
        assert_eq!(length_field(&big), &[0, 0, 0, 0, 0, 0, 0, 24]);
        let little = LittleTrace::compute(b"abc");
        assert_eq!(length_field(&little), &[24, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn bit_len_counts_bits() {
        let mut state = BigTrace::new();
        assert_eq!(state.bit_len(), 0);
        state.update(b"hello");
        state.update(&[]);
        state.update(&[0; 100]);
        assert_eq!(state.bit_len(), 105 * 8);
        state.reset();
        assert_eq!(state.bit_len(), 0);
        assert_eq!(state.buffer_len, 0);
        assert_eq!(state.inner.blocks, 0);
    }

    #[test]
    fn bit_len_wraps_modulo_2_64() {
        let mut state = BigTrace::new();
        state.ml = u64::MAX - 7;
        state.update(&[1, 2]);
        assert_eq!(state.bit_len(), 8);

        let digest = state.digest();
        assert_eq!(length_field(&digest), &[0, 0, 0, 0, 0, 0, 0, 8]);
    }

    #[test]
    fn try_update_rejects_overflow() {
        let mut state = BigTrace::new();
        state.ml = u64::MAX - 15;
        assert_eq!(state.try_update(&[1]), Ok(()));
        assert_eq!(state.bit_len(), u64::MAX - 7);
        assert_eq!(state.buffer_len, 1);

        assert_eq!(state.try_update(&[2]), Err(Error::LengthOverflow));
        assert_eq!(state.bit_len(), u64::MAX - 7);
        assert_eq!(state.buffer_len, 1);

        // Empty input never overflows
        assert_eq!(state.try_update(&[]), Ok(()));
    }

    #[test]
    fn io_write_feeds_update() {
        use std::io::Write;

        let mut state = BigTrace::new();
        state.write_all(&[7; 130]).unwrap();
        state.flush().unwrap();
        assert_eq!(state.bit_len(), 130 * 8);
        assert_eq!(state.inner.blocks, 2);
        assert_eq!(state.buffer_len, 2);
    }
}
