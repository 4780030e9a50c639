//! Error types for the signature engine.

use core::fmt;

/// Errors that can occur while decoding keys, signatures, or seeds.
///
/// Verification itself never returns an error: any malformed signature
/// or public key simply fails to verify, so callers cannot distinguish
/// a decode failure from a forged signature.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchnorrError {
    /// An input slice had a length other than the one the operation
    /// requires.
    InvalidLength,
    /// A 32-byte string was not the canonical encoding of a group
    /// element, or a signature lacked the scheme marker.
    PointDecode,
}

impl fmt::Display for SchnorrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchnorrError::InvalidLength => write!(f, "input has the wrong length"),
            SchnorrError::PointDecode => write!(f, "malformed point or signature encoding"),
        }
    }
}

impl std::error::Error for SchnorrError {}
