use crate::bn254::{BN254Fq, BN254Scalar};
use ark_bn254::G1Projective;

/// The wrapped struct for `ark_bn254::G1Projective`
#[derive(Copy, Default, Clone, PartialEq, Eq, Hash)]
pub struct BN254G1(pub(crate) G1Projective);

impl_sw_group!(BN254G1, ark_bn254::g1::Config, BN254Scalar, BN254Fq, 32);
