//! Secret keys, public keys, and keypairs for the signature engine.

use curve::{CompressedRistretto, RistrettoPoint, Scalar, RISTRETTO_BASEPOINT};
use rand::{CryptoRng, RngCore};
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::constants::{
    KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNING_CONTEXT,
};
use crate::errors::SchnorrError;
use crate::signatures::{signing_transcript, Signature};

/// A secret signing key.
///
/// Holds the secret scalar together with a 32-byte nonce seed. The
/// nonce seed never leaves the key; it feeds the transcript's witness
/// derivation so that signing is deterministic without ever reusing a
/// witness across distinct messages. Both halves are wiped on drop.
#[derive(Clone)]
pub struct SecretKey {
    /// The secret scalar `sk`.
    pub(crate) key: Scalar,
    /// Seed for deterministic witness derivation.
    pub(crate) nonce: [u8; 32],
}

/// A public verifying key: a point on the Ristretto group.
///
/// Kept in both compressed and decompressed form, so signing can
/// commit the canonical encoding without re-compressing and
/// verification can use the group element without re-decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) compressed: CompressedRistretto,
    pub(crate) point: RistrettoPoint,
}

/// A secret key together with its public counterpart.
#[derive(Clone)]
pub struct Keypair {
    /// The secret half.
    pub secret: SecretKey,
    /// The public half.
    pub public: PublicKey,
}

/// Interprets a clamped Ed25519-style scalar as a multiple of the
/// cofactor and divides it out, shifting the value right by three bits
/// across the full 32-byte little-endian encoding.
fn divide_scalar_bytes_by_cofactor(scalar: &mut [u8; 32]) {
    let mut low = 0u8;
    for byte in scalar.iter_mut().rev() {
        let carried = *byte & 0b0000_0111;
        *byte = (*byte >> 3) | low;
        low = carried << 5;
    }
}

impl SecretKey {
    /// Derives a secret key from a 32-byte seed.
    ///
    /// The seed is expanded with SHA-512. The low half is clamped the
    /// way Ed25519 clamps its scalars and then divided by the cofactor,
    /// yielding a scalar already reduced mod ℓ; the high half becomes
    /// the nonce seed. The same seed always yields the same key.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::SecretKey;
    ///
    /// let secret = SecretKey::from_seed(&[1u8; 32]);
    /// let again = SecretKey::from_seed(&[1u8; 32]);
    /// assert_eq!(secret.to_bytes(), again.to_bytes());
    /// ```
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> SecretKey {
        let digest = Sha512::digest(seed);

        let mut key = [0u8; 32];
        key.copy_from_slice(&digest[..32]);
        key[0] &= 248;
        key[31] &= 63;
        key[31] |= 64;
        divide_scalar_bytes_by_cofactor(&mut key);

        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&digest[32..]);

        let secret = SecretKey {
            key: Scalar::from_bytes_mod_order(key),
            nonce,
        };
        key.zeroize();
        secret
    }

    /// Deserializes a secret key from its 64-byte form: the scalar
    /// followed by the nonce seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SchnorrError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(SchnorrError::InvalidLength);
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[..32]);
        let mut nonce = [0u8; 32];
        nonce.copy_from_slice(&bytes[32..]);

        Ok(SecretKey {
            key: Scalar::from_bytes_mod_order(key),
            nonce,
        })
    }

    /// Serializes the secret key to its 64-byte form.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        let mut bytes = [0u8; SECRET_KEY_LENGTH];
        bytes[..32].copy_from_slice(&self.key.to_bytes());
        bytes[32..].copy_from_slice(&self.nonce);
        bytes
    }

    /// Derives the public key `pk = B * sk`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(RISTRETTO_BASEPOINT * &self.key)
    }

    /// Signs a message under the fixed signing context.
    ///
    /// The transcript binds the context label, the message, the scheme
    /// name, the public key, and the commitment point; the witness is
    /// derived deterministically from the transcript and the nonce
    /// seed, so equal inputs produce equal signatures.
    pub fn sign(&self, message: &[u8], public_key: &PublicKey) -> Signature {
        let mut t = signing_transcript(SIGNING_CONTEXT, message);
        t.commit_point(b"sign:pk", &public_key.compressed);

        let r = t.witness_scalar(b"signing", &self.nonce);
        let commitment = (RISTRETTO_BASEPOINT * &r).compress();
        t.commit_point(b"sign:R", &commitment);

        let k = t.challenge_scalar(b"sign:c");
        let s = k * self.key + r;

        Signature { r: commitment, s }
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize();
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretKey {{ key: <secret>, nonce: <secret> }}")
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<SecretKey, D::Error> {
        struct SecretKeyVisitor;

        impl<'de> Visitor<'de> for SecretKeyVisitor {
            type Value = SecretKey;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "a 64-byte secret key")
            }

            fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<SecretKey, E> {
                SecretKey::from_bytes(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_bytes(SecretKeyVisitor)
    }
}

impl PublicKey {
    pub(crate) fn from_point(point: RistrettoPoint) -> PublicKey {
        PublicKey {
            compressed: point.compress(),
            point,
        }
    }

    /// Deserializes a public key from its canonical 32-byte encoding.
    ///
    /// Fails with [`SchnorrError::PointDecode`] if the bytes are not a
    /// canonical Ristretto encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SchnorrError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(SchnorrError::InvalidLength);
        }

        let mut compressed = [0u8; 32];
        compressed.copy_from_slice(bytes);
        let compressed = CompressedRistretto(compressed);
        let point = compressed.decompress().ok_or(SchnorrError::PointDecode)?;

        Ok(PublicKey { compressed, point })
    }

    /// Serializes the public key to its canonical 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// Verifies a signature on a message under the fixed signing
    /// context.
    ///
    /// Rebuilds the signing transcript, recomputes the challenge `k`,
    /// and checks `R + pk * k == B * s`. Every failure mode, including
    /// a commitment point that fails to decode and the identity public
    /// key, reports plain `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::Keypair;
    ///
    /// let keypair = Keypair::from_seed(&[7u8; 32]);
    /// let sig = keypair.sign(b"message");
    /// assert!(keypair.public.verify(b"message", &sig));
    /// assert!(!keypair.public.verify(b"other message", &sig));
    /// ```
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if self.point.is_identity() {
            return false;
        }
        let commitment = match signature.r.decompress() {
            Some(point) => point,
            None => return false,
        };

        let mut t = signing_transcript(SIGNING_CONTEXT, message);
        t.commit_point(b"sign:pk", &self.compressed);
        t.commit_point(b"sign:R", &signature.r);
        let k = t.challenge_scalar(b"sign:c");

        commitment + self.point * &k == RISTRETTO_BASEPOINT * &signature.s
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.compressed.as_bytes())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<PublicKey, D::Error> {
        struct PublicKeyVisitor;

        impl<'de> Visitor<'de> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "a canonical 32-byte public key")
            }

            fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<PublicKey, E> {
                PublicKey::from_bytes(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}

impl Keypair {
    /// Derives a keypair deterministically from a 32-byte seed.
    ///
    /// # Example
    ///
    /// ```
    /// use schnorr::Keypair;
    ///
    /// let keypair = Keypair::from_seed(&[42u8; 32]);
    /// let sig = keypair.sign(b"message");
    /// assert!(keypair.public.verify(b"message", &sig));
    /// ```
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Keypair {
        let secret = SecretKey::from_seed(seed);
        let public = secret.public_key();
        Keypair { secret, public }
    }

    /// Generates a keypair from a fresh random seed.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Keypair {
        let mut seed = [0u8; SEED_LENGTH];
        rng.fill_bytes(&mut seed);
        let keypair = Keypair::from_seed(&seed);
        seed.zeroize();
        keypair
    }

    /// Deserializes a keypair from its 96-byte form: the secret key
    /// followed by the public key.
    ///
    /// The embedded public key must decode; it is trusted to match the
    /// secret half, as callers are expected to round-trip bytes
    /// produced by [`Keypair::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SchnorrError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SchnorrError::InvalidLength);
        }

        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;

        Ok(Keypair { secret, public })
    }

    /// Serializes the keypair to its 96-byte form.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes = [0u8; KEYPAIR_LENGTH];
        bytes[..SECRET_KEY_LENGTH].copy_from_slice(&self.secret.to_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(&self.public.to_bytes());
        bytes
    }

    /// Signs a message with the secret half.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret.sign(message, &self.public)
    }
}

impl From<&SecretKey> for PublicKey {
    /// Equivalent to calling `secret_key.public_key()`.
    fn from(secret: &SecretKey) -> PublicKey {
        secret.public_key()
    }
}
