use ark_bn254::Fq;

/// The wrapped struct for `ark_bn254::Fq`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Fq(pub(crate) Fq);

impl_scalar!(BN254Fq, Fq, crate::bn254::BN254_SCALAR_LEN);
