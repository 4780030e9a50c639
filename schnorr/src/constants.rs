//! Constants used by the signature engine.

/// Size of a key-generation seed in bytes.
pub const SEED_LENGTH: usize = 32;

/// Size of a serialized secret key in bytes.
///
/// A secret key is a 32-byte scalar followed by the 32-byte nonce seed
/// used for deterministic witness derivation.
pub const SECRET_KEY_LENGTH: usize = 64;

/// Size of a serialized public key in bytes.
///
/// A public key is a compressed Ristretto point.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Size of a serialized keypair in bytes.
///
/// A keypair is the secret key (64 bytes) followed by the public key
/// (32 bytes).
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// Size of a serialized signature in bytes.
///
/// A signature is the compressed commitment point R (32 bytes) followed
/// by the response scalar s (32 bytes), with the scheme marker set in
/// the final byte.
pub const SIGNATURE_LENGTH: usize = 64;

/// Context label bound into every signing transcript.
///
/// Signatures produced under a different context label fail
/// verification, keeping this scheme's signatures unusable in any
/// protocol that domain-separates with another label.
pub(crate) const SIGNING_CONTEXT: &[u8] = b"bizinikiwi";

/// Protocol label the transcript duplex is initialized with.
pub(crate) const PROTOCOL_LABEL: &[u8] = b"SigningContext";

/// Scheme name committed to the transcript after the message.
pub(crate) const PROTO_NAME: &[u8] = b"Schnorr-sig";

/// Marker bit set in byte 63 of a serialized signature.
///
/// Distinguishes this scheme's signatures from encodings used by older
/// or adjacent schemes; the bit is cleared again before the scalar is
/// interpreted.
pub(crate) const SIGNATURE_MARKER: u8 = 0x80;

/// Sponge rate of the STROBE-128 duplex, in bytes.
pub(crate) const STROBE_R: u8 = 166;
