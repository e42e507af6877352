//! Streaming MD5, SHA-1 and SHA-256.
//!
//! Every algorithm is a Merkle–Damgård compression function plugged into the
//! shared `ChunkedDigestWrapper` driver, which buffers input into 64-byte
//! blocks and applies the standard length padding. Pick an algorithm at
//! compile time through `DigestAlgorithm`, or at runtime through `Hasher`.
//!
//! ```
//! use mdhash::{Algorithm, DigestAlgorithm, Hasher, SHA256};
//!
//! let mut state = SHA256::new();
//! state.update(b"The quick brown fox ");
//! state.update(b"jumps over the lazy dog");
//! let digest = state.digest();
//!
//! let mut hasher = Hasher::new(Algorithm::Sha256);
//! hasher.add(b"The quick brown fox jumps over the lazy dog").unwrap();
//! assert_eq!(hasher.close().unwrap().to_hex(), digest.to_hex());
//! ```

pub mod error;
pub mod digest;

pub use digest::{Digest, DigestAlgorithm};
pub use digest::chunked::{ChunkedDigestAlgorithm, ChunkedDigestWrapper};
pub use digest::hasher::{Algorithm, AnyDigest, Hasher};
pub use digest::md5::{MD5, MD5Digest};
pub use digest::sha1::{SHA1, SHA1Digest};
pub use digest::sha2::{SHA256, SHA256Digest};
pub use error::{Error, Result};
