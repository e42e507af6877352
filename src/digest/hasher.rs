//! Runtime-selected streaming hash.
//!
//! `Hasher` presents the `clear / add / close` contract over the closed set
//! of supported algorithms. Unlike the generic `DigestAlgorithm` API, where
//! `digest` consumes the state, `close` leaves the hasher in an explicit
//! finalized state: further `add` or `close` calls fail with
//! `Error::Finalized` until `clear` is called.

use std::fmt;
use std::io;
use std::mem;
use std::str::FromStr;

use tracing::{trace, warn};

use crate::error::{Error, Result};
use super::chunked::BLOCK_LEN;
use super::md5::{MD5, MD5Digest};
use super::sha1::{SHA1, SHA1Digest};
use super::sha2::{SHA256, SHA256Digest};
use super::{Digest, DigestAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Md5, Algorithm::Sha1, Algorithm::Sha256];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Md5 => MD5Digest::LEN,
            Algorithm::Sha1 => SHA1Digest::LEN,
            Algorithm::Sha256 => SHA256Digest::LEN,
        }
    }

    /// Compression block length in bytes.
    pub fn block_len(self) -> usize {
        BLOCK_LEN
    }

    /// One-shot digest of `input`.
    pub fn compute(self, input: &[u8]) -> AnyDigest {
        match self {
            Algorithm::Md5 => AnyDigest::Md5(MD5::compute(input)),
            Algorithm::Sha1 => AnyDigest::Sha1(SHA1::compute(input)),
            Algorithm::Sha256 => AnyDigest::Sha256(SHA256::compute(input)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts `md5`, `sha1`, `sha-1`, `sha256` and `sha-256`, in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            "sha256" | "sha-256" => Ok(Algorithm::Sha256),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// A digest produced by `Hasher`, tagged with its algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyDigest {
    Md5(MD5Digest),
    Sha1(SHA1Digest),
    Sha256(SHA256Digest),
}

impl AnyDigest {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AnyDigest::Md5(_) => Algorithm::Md5,
            AnyDigest::Sha1(_) => Algorithm::Sha1,
            AnyDigest::Sha256(_) => Algorithm::Sha256,
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_ref())
    }
}

impl AsRef<[u8]> for AnyDigest {
    fn as_ref(&self) -> &[u8] {
        match self {
            AnyDigest::Md5(digest) => digest.as_ref(),
            AnyDigest::Sha1(digest) => digest.as_ref(),
            AnyDigest::Sha256(digest) => digest.as_ref(),
        }
    }
}

impl From<AnyDigest> for Box<[u8]> {
    fn from(digest: AnyDigest) -> Box<[u8]> {
        digest.as_ref().into()
    }
}

impl fmt::Display for AnyDigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.as_ref()))
    }
}

#[derive(Debug, Clone)]
enum State {
    Md5(MD5),
    Sha1(SHA1),
    Sha256(SHA256),
    Finalized(Algorithm),
}

impl State {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => State::Md5(MD5::new()),
            Algorithm::Sha1 => State::Sha1(SHA1::new()),
            Algorithm::Sha256 => State::Sha256(SHA256::new()),
        }
    }

    fn algorithm(&self) -> Algorithm {
        match self {
            State::Md5(_) => Algorithm::Md5,
            State::Sha1(_) => Algorithm::Sha1,
            State::Sha256(_) => Algorithm::Sha256,
            State::Finalized(algorithm) => *algorithm,
        }
    }
}

/// Streaming hash over one of the supported algorithms.
#[derive(Debug, Clone)]
pub struct Hasher {
    state: State,
}

impl Hasher {
    pub fn new(algorithm: Algorithm) -> Self {
        Hasher { state: State::new(algorithm) }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.state.algorithm()
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized(_))
    }

    /// Bits absorbed since the last `clear`, or `None` once finalized.
    pub fn bit_len(&self) -> Option<u64> {
        match &self.state {
            State::Md5(state) => Some(state.bit_len()),
            State::Sha1(state) => Some(state.bit_len()),
            State::Sha256(state) => Some(state.bit_len()),
            State::Finalized(_) => None,
        }
    }

    /// Returns the hasher to its initial state, finalized or not.
    pub fn clear(&mut self) {
        match &mut self.state {
            State::Md5(state) => state.reset(),
            State::Sha1(state) => state.reset(),
            State::Sha256(state) => state.reset(),
            State::Finalized(algorithm) => {
                let algorithm = *algorithm;
                self.state = State::new(algorithm);
            }
        }
        trace!(algorithm = %self.algorithm(), "hasher cleared");
    }

    pub fn add(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            State::Md5(state) => state.update(data),
            State::Sha1(state) => state.update(data),
            State::Sha256(state) => state.update(data),
            State::Finalized(algorithm) => {
                warn!(algorithm = %algorithm, len = data.len(), "add on a finalized hasher");
                return Err(Error::Finalized);
            }
        }
        Ok(())
    }

    /// Pads the message, produces its digest and leaves the hasher finalized.
    pub fn close(&mut self) -> Result<AnyDigest> {
        let algorithm = self.algorithm();
        let bits = self.bit_len();
        let digest = match mem::replace(&mut self.state, State::Finalized(algorithm)) {
            State::Md5(state) => AnyDigest::Md5(state.digest()),
            State::Sha1(state) => AnyDigest::Sha1(state.digest()),
            State::Sha256(state) => AnyDigest::Sha256(state.digest()),
            State::Finalized(_) => {
                warn!(algorithm = %algorithm, "close on a finalized hasher");
                return Err(Error::Finalized);
            }
        };
        trace!(algorithm = %algorithm, bits = ?bits, digest = %digest, "hasher closed");
        Ok(digest)
    }
}

impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
