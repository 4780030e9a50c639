//! Ristretto255 group arithmetic over Curve25519.
//!
//! This crate provides the prime-order Ristretto group, the scalar field
//! of order ℓ, and the underlying GF(2^255 - 19) field and twisted
//! Edwards point arithmetic. All operations on secret data are
//! constant-time; variable-time shortcuts are never taken on scalars or
//! points.

mod constants;
mod edwards;
mod field;
mod ristretto;
mod scalar;

pub use constants::{RISTRETTO_BASEPOINT, RISTRETTO_BASEPOINT_COMPRESSED};
pub use ristretto::{CompressedRistretto, RistrettoPoint};
pub use scalar::Scalar;
