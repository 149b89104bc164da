use ark_secp256k1::Fr;

/// The wrapped struct for `ark_secp256k1::Fr`
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct SECP256K1Scalar(pub(crate) Fr);

impl_scalar!(SECP256K1Scalar, Fr, crate::secp256k1::SECP256K1_SCALAR_LEN);
