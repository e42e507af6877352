
macro_rules! define_digest {
    ($digest:ident, $size:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $digest([u8; $size]);

        impl $digest {
            /// Lowercase hexadecimal rendering of the digest.
            pub fn to_hex(&self) -> String {
                ::hex::encode(&self.0)
            }
        }

        impl AsRef<[u8]> for $digest {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<$digest> for Box<[u8]> {
            fn from(digest: $digest) -> Box<[u8]> {
                Box::new(digest.0)
            }
        }

        impl From<$digest> for [u8; $size] {
            fn from(digest: $digest) -> [u8; $size] {
                digest.0
            }
        }

        impl ::std::fmt::Debug for $digest {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}(\"{}\")", stringify!($digest), ::hex::encode(&self.0))
            }
        }

        impl ::std::fmt::Display for $digest {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&::hex::encode(&self.0))
            }
        }

        impl $crate::digest::Digest for $digest {
            const LEN: usize = $size;
        }
    }
}
