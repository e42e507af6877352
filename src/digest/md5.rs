//! MD5 as specified in RFC 1321.
//!
//! MD5 is not collision resistant. It is provided for checksums and
//! interoperability with existing formats.

use byteorder::{ByteOrder, LittleEndian};
use super::chunked::{ChunkedDigestAlgorithm, ChunkedDigestWrapper};

define_digest!(MD5Digest, 16);

// Left rotation per round
const S: [u32; 64] = [
    7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,
    5,  9, 14, 20,  5,  9, 14, 20,  5,  9, 14, 20,  5,  9, 14, 20,
    4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,
    6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,
];

// floor(abs(sin(i + 1)) * 2^32)
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

#[derive(Debug, Clone)]
pub struct MD5Chunked {
    h: [u32; 4],
}

impl ChunkedDigestAlgorithm for MD5Chunked {
    type Digest = MD5Digest;
    type Order = LittleEndian;

    fn new() -> Self {
        MD5Chunked { h: IV }
    }

    fn update_chunk(&mut self, chunk: &[u8]) {
        // No schedule expansion, rounds index straight into the 16 words
        let mut m = [0; 16];
        LittleEndian::read_u32_into(chunk, &mut m);

        let [mut a, mut b, mut c, mut d] = self.h;

        for i in 0..64 {
            let (f, g) = match i {
                 0..=15 => ((b & c) | (!b & d), i),
                16..=31 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
                      _ => (c ^ (b | !d), (7 * i) % 16),
            };
            let f = f
                .wrapping_add(a)
                .wrapping_add(K[i])
                .wrapping_add(m[g]);

            a = d;
            d = c;
            c = b;
            b = b.wrapping_add(f.rotate_left(S[i]));
        }

        for (h, v) in self.h.iter_mut().zip([a, b, c, d]) {
            *h = h.wrapping_add(v);
        }
    }

    fn digest(self) -> Self::Digest {
        let mut result = [0; 16];
        LittleEndian::write_u32_into(&self.h, &mut result);
        MD5Digest(result)
    }
}

pub type MD5 = ChunkedDigestWrapper<MD5Chunked>;
