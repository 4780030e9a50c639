//! Schnorr signatures over the Ristretto255 group.
//!
//! This library implements an sr25519-style signature engine:
//! - Ristretto255 (a prime-order group over Curve25519) for the group
//!   arithmetic
//! - A STROBE-128 transcript over Keccak-f[1600] for the Fiat-Shamir
//!   challenge, domain-separated by the `bizinikiwi` context label
//! - Deterministic witnesses derived from a per-key nonce seed, so
//!   signing needs no randomness and never reuses a witness
//!
//! # Overview
//!
//! Keys are derived from 32-byte seeds by SHA-512 expansion. A
//! signature is 64 bytes: the compressed commitment point `R` followed
//! by the response scalar `s`, with a scheme marker bit set in the
//! final byte. Verification rebuilds the transcript and checks
//! `R + pk * k == B * s`, folding every failure into plain `false`.
//!
//! # Example
//!
//! ```
//! use schnorr::Keypair;
//!
//! // Derive a keypair from a seed
//! let keypair = Keypair::from_seed(&[42u8; 32]);
//!
//! // Sign a message
//! let message = b"transfer 100 units to alice";
//! let signature = keypair.sign(message);
//!
//! // Verify the signature
//! assert!(keypair.public.verify(message, &signature));
//! assert!(!keypair.public.verify(b"a different message", &signature));
//! ```
//!
//! The same operations are available over raw byte slices for hosts
//! that cannot use the typed API:
//!
//! ```
//! let keypair = schnorr::keypair_from_seed(&[42u8; 32]).expect("seed");
//! let public = schnorr::public_key_from_keypair(&keypair).expect("keypair");
//! let secret = schnorr::secret_key_from_keypair(&keypair).expect("keypair");
//!
//! let signature = schnorr::sign(&public, &secret, b"message").expect("sign");
//! assert!(schnorr::verify(&signature, b"message", &public));
//! ```
//!
//! # Security Considerations
//!
//! - Seeds must come from a cryptographically secure random source
//! - Secret key material is wiped from memory on drop
//! - Signing is deterministic; identical inputs yield identical
//!   signatures, which is intended
//! - Signatures made under a different context label never verify here

mod bytes;
mod constants;
mod errors;
mod keys;
mod signatures;
mod strobe;
mod transcript;

#[cfg(test)]
mod tests;

pub use bytes::{keypair_from_seed, public_key_from_keypair, secret_key_from_keypair, sign, verify};
pub use constants::{
    KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH,
};
pub use errors::SchnorrError;
pub use keys::{Keypair, PublicKey, SecretKey};
pub use signatures::Signature;
