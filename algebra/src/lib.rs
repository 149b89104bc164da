//! Field and curve bindings consumed by the gate components.
//!
//! Every field is wrapped in a newtype implementing [`traits::Scalar`], and
//! every short-Weierstrass curve in a newtype implementing
//! [`traits::CurveGroup`]. The [`traits::Arithmetic`] trait is the shared
//! surface that lets one routine run either over concrete field elements or
//! over symbolic constraint expressions.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_comparisons, bare_trait_objects, unused_must_use)]
#![warn(missing_docs)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
mod macros;

/// Module for the BLS12-381 scalar field.
pub mod bls12_381;

/// Module for the BN254 curve.
pub mod bn254;

/// Module for error handling.
pub mod errors;

/// Module for the secp256k1 curve.
pub mod secp256k1;

/// Module for serialization of scalars and group elements.
pub mod serialization;

/// Module for traits.
pub mod traits;

/// Module for utils.
pub mod utils;

/// Module for test rngs.
pub mod rand_helper;

/// Module for prelude.
#[doc(hidden)]
pub mod prelude;

#[doc(hidden)]
pub use ark_std::{
    borrow, cmp, collections, fmt, hash, io, iter, marker, ops, rand, One, UniformRand, Zero,
};

#[doc(hidden)]
pub use num_bigint::BigUint;

#[doc(hidden)]
pub use {ark_ec, ark_ff, ark_serialize, base64};
