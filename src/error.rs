/// Errors reported by the streaming hash interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `add` or `close` was called after the digest had already been produced.
    #[error("hash already finalized, clear it before reuse")]
    Finalized,
    /// The cumulative message length no longer fits the 64-bit bit counter.
    #[error("total message length exceeds 2^64 - 1 bits")]
    LengthOverflow,
    /// An algorithm name that is not one of `md5`, `sha1` or `sha256`.
    #[error("unknown digest algorithm: {0:?}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::Finalized.to_string(), "hash already finalized, clear it before reuse");
        assert_eq!(
            Error::UnknownAlgorithm("sha3".to_owned()).to_string(),
            "unknown digest algorithm: \"sha3\"",
        );
    }
}
