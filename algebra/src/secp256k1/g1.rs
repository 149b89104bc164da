use crate::secp256k1::{SECP256K1Fq, SECP256K1Scalar};
use ark_secp256k1::Projective;

/// The wrapped struct for `ark_secp256k1::Projective`
#[derive(Copy, Default, Clone, PartialEq, Eq, Hash)]
pub struct SECP256K1G1(pub(crate) Projective);

impl_sw_group!(SECP256K1G1, ark_secp256k1::Config, SECP256K1Scalar, SECP256K1Fq, 33);
