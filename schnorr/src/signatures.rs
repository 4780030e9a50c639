//! Signature type and transcript construction for the signature engine.

use curve::{CompressedRistretto, Scalar};
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{
    PROTOCOL_LABEL, PROTO_NAME, SIGNATURE_LENGTH, SIGNATURE_MARKER,
};
use crate::errors::SchnorrError;
use crate::transcript::Transcript;

/// A Schnorr signature consisting of a compressed point and a scalar.
///
/// The signature is the pair `(R, s)` where `R = B * r` commits to the
/// witness scalar and `s = k * sk + r` is the response to the
/// transcript challenge `k`. On the wire the pair is 64 bytes with the
/// scheme marker set in the final byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The compressed commitment point R.
    pub(crate) r: CompressedRistretto,
    /// The response scalar s.
    pub(crate) s: Scalar,
}

impl Signature {
    /// Serializes the signature to its 64-byte wire form.
    ///
    /// Byte 63 carries the scheme marker; the scalar's own top bit is
    /// always clear, so the marker is recoverable unambiguously.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.r.as_bytes());
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes[63] |= SIGNATURE_MARKER;
        bytes
    }

    /// Deserializes a signature from its 64-byte wire form.
    ///
    /// Fails with [`SchnorrError::InvalidLength`] for any other length
    /// and with [`SchnorrError::PointDecode`] if the scheme marker is
    /// absent. The commitment point is kept compressed; it is only
    /// decompressed during verification.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::{Keypair, Signature};
    ///
    /// let keypair = Keypair::from_seed(&[7u8; 32]);
    /// let sig = keypair.sign(b"message");
    ///
    /// let restored = Signature::from_bytes(&sig.to_bytes()).expect("decode");
    /// assert_eq!(restored, sig);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SchnorrError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SchnorrError::InvalidLength);
        }
        if bytes[63] & SIGNATURE_MARKER == 0 {
            return Err(SchnorrError::PointDecode);
        }

        let mut r_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&bytes[..32]);

        let mut s_bytes = [0u8; 32];
        s_bytes.copy_from_slice(&bytes[32..]);
        s_bytes[31] &= !SIGNATURE_MARKER;

        Ok(Signature {
            r: CompressedRistretto(r_bytes),
            s: Scalar::from_bytes_mod_order(s_bytes),
        })
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Signature, D::Error> {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "a 64-byte marked Schnorr signature")
            }

            fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Signature, E> {
                Signature::from_bytes(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

/// Builds the signing transcript shared by signing and verification:
/// the protocol label, the context label, the message, and the scheme
/// name, in that order.
pub(crate) fn signing_transcript(context: &[u8], message: &[u8]) -> Transcript {
    let mut t = Transcript::new(PROTOCOL_LABEL);
    t.append_context_label(context);
    t.append_message(message);
    t.proto_name(PROTO_NAME);
    t
}
