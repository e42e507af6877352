use byteorder::{BigEndian, ByteOrder};
use super::chunked::{ChunkedDigestAlgorithm, ChunkedDigestWrapper};

define_digest!(SHA1Digest, 20);

const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

const IV: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

#[derive(Debug, Clone)]
pub struct SHA1Chunked {
    h: [u32; 5],
}

impl ChunkedDigestAlgorithm for SHA1Chunked {
    type Digest = SHA1Digest;
    type Order = BigEndian;

    fn new() -> Self {
        SHA1Chunked { h: IV }
    }

    fn update_chunk(&mut self, chunk: &[u8]) {
        // Compute 80 words
        let mut w = [0; 80];
        BigEndian::read_u32_into(chunk, &mut w[..16]);
        for i in 16..80 {
            w[i] = (w[i-3] ^ w[i-8] ^ w[i-14] ^ w[i-16]).rotate_left(1);
        }

        // Copy hash state
        let mut h = self.h;

        // Bitwise functions
        let choose   = |x: u32, y: u32, z: u32| (x & y) | (!x & z);
        let parity   = |x: u32, y: u32, z: u32| x ^ y ^ z;
        let majority = |x: u32, y: u32, z: u32| (x & y) | (y & z) | (x & z);

        for i in 0..80 {
            let f = match i / 20 {
                0 => choose(h[1], h[2], h[3]),
                2 => majority(h[1], h[2], h[3]),
                _ => parity(h[1], h[2], h[3]),
            };
            let temp = h[0].rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(h[4])
                .wrapping_add(K[i / 20])
                .wrapping_add(w[i]);

            // (e, d, c, b, a) <- (d, c, b <<< 30, a, temp)
            h.copy_within(0..4, 1);
            h[2] = h[2].rotate_left(30);
            h[0] = temp;
        }

        // Update hash state
        for i in 0..5 {
            self.h[i] = self.h[i].wrapping_add(h[i]);
        }
    }

    fn digest(self) -> Self::Digest {
        let mut result = [0; 20];
        BigEndian::write_u32_into(&self.h, &mut result);
        SHA1Digest(result)
    }
}

pub type SHA1 = ChunkedDigestWrapper<SHA1Chunked>;
