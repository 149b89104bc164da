use ark_bls12_381::Fr;

/// The wrapped struct for `ark_bls12_381::Fr`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BLSScalar(pub(crate) Fr);

impl_scalar!(BLSScalar, Fr, crate::bls12_381::BLS12_381_SCALAR_LEN);
