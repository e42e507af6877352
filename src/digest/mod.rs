use std::fmt::{Debug, Display};

#[macro_use]
pub mod macros;
pub mod chunked;
pub mod hasher;
pub mod md5;
pub mod sha1;
pub mod sha2;

/// A finished, fixed-length message digest.
pub trait Digest: Copy + Eq + AsRef<[u8]> + Into<Box<[u8]>> + Debug + Display {
    /// Digest length in bytes.
    const LEN: usize;
}

/// Streaming interface shared by every digest algorithm.
///
/// `digest` consumes the state, so a finalized computation cannot be fed or
/// closed again. Use `reset` (or a fresh `new`) to start another message.
pub trait DigestAlgorithm {
    type Digest: Digest;

    fn new() -> Self;
    fn reset(&mut self);
    fn update(&mut self, input: &[u8]);
    fn digest(self) -> Self::Digest;

    fn compute(input: &[u8]) -> Self::Digest where Self: Sized {
        let mut state = Self::new();
        state.update(input);
        state.digest()
    }
}
