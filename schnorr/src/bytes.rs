//! Byte-slice entry points for embedding in hosts that pass raw
//! buffers.
//!
//! These functions mirror the typed API one-to-one but take unsized
//! slices and return fixed-size arrays, so a foreign caller only needs
//! the length conventions: 32-byte seeds and public keys, 64-byte
//! secret keys and signatures, 96-byte keypairs.

use crate::constants::{
    KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH,
};
use crate::errors::SchnorrError;
use crate::keys::{Keypair, PublicKey, SecretKey};
use crate::signatures::Signature;

/// Derives a 96-byte keypair from a 32-byte seed.
pub fn keypair_from_seed(seed: &[u8]) -> Result<[u8; KEYPAIR_LENGTH], SchnorrError> {
    if seed.len() != SEED_LENGTH {
        return Err(SchnorrError::InvalidLength);
    }
    let mut fixed = [0u8; SEED_LENGTH];
    fixed.copy_from_slice(seed);
    Ok(Keypair::from_seed(&fixed).to_bytes())
}

/// Extracts the 64-byte secret key from a 96-byte keypair.
pub fn secret_key_from_keypair(keypair: &[u8]) -> Result<[u8; SECRET_KEY_LENGTH], SchnorrError> {
    if keypair.len() != KEYPAIR_LENGTH {
        return Err(SchnorrError::InvalidLength);
    }
    let mut secret = [0u8; SECRET_KEY_LENGTH];
    secret.copy_from_slice(&keypair[..SECRET_KEY_LENGTH]);
    Ok(secret)
}

/// Extracts the 32-byte public key from a 96-byte keypair.
pub fn public_key_from_keypair(keypair: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], SchnorrError> {
    if keypair.len() != KEYPAIR_LENGTH {
        return Err(SchnorrError::InvalidLength);
    }
    let mut public = [0u8; PUBLIC_KEY_LENGTH];
    public.copy_from_slice(&keypair[SECRET_KEY_LENGTH..]);
    Ok(public)
}

/// Signs a message, returning the 64-byte marked signature.
///
/// The public key must be the canonical encoding matching the secret
/// key; it is committed to the transcript as given.
pub fn sign(
    public_key: &[u8],
    secret_key: &[u8],
    message: &[u8],
) -> Result<[u8; SIGNATURE_LENGTH], SchnorrError> {
    let public = PublicKey::from_bytes(public_key)?;
    let secret = SecretKey::from_bytes(secret_key)?;
    Ok(secret.sign(message, &public).to_bytes())
}

/// Verifies a 64-byte signature over a message under a 32-byte public
/// key.
///
/// Never errors: wrong lengths, a missing scheme marker, undecodable
/// points, and honest verification failure all report `false`.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    let signature = match Signature::from_bytes(signature) {
        Ok(signature) => signature,
        Err(_) => return false,
    };
    let public = match PublicKey::from_bytes(public_key) {
        Ok(public) => public,
        Err(_) => return false,
    };
    public.verify(message, &signature)
}
