use ark_bn254::Fr;

/// The wrapped struct for `ark_bn254::Fr`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

impl_scalar!(BN254Scalar, Fr, crate::bn254::BN254_SCALAR_LEN);
