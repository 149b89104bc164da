//! Layout gates around the Keccak-f\[1600\] permutation: conversion of lanes to
//! and from the sparse base-8 form the round function works in, and the
//! padding of a byte message into rate-sized blocks of lanes.

mod pack;
mod padding;

pub use pack::{KeccakPack, KeccakPackInput, KeccakPackResult, PackMode};
pub use padding::{KeccakPadding, KeccakPaddingInput, KeccakPaddingResult};

/// The rate of Keccak-256 in bytes.
pub const RATE_BYTES: usize = 136;
/// The rate of Keccak-256 in 64-bit lanes.
pub const RATE_LANES: usize = RATE_BYTES / 8;
