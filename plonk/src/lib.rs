//! Reusable PLONK gate components.
//!
//! A component encodes a computation as polynomial constraints over a
//! fixed-width table, the native algorithm filling the table, and the copy
//! constraints wiring its inputs in. Components are laid out through the
//! [`layout`] algebra so that the native and symbolic halves agree on every
//! cell address.

#![deny(warnings)]
#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::too_many_arguments)]

#[macro_use]
extern crate serde_derive;

/// The component contract.
pub mod component;
/// The gate components.
pub mod components;
/// Tables, gates and the satisfiability checker.
pub mod constraint_system;
/// The error type.
pub mod errors;
/// Cell addressing and iterative layouts.
pub mod layout;
/// Composite verifier circuits.
pub mod verifiers;
