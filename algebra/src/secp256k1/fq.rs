use ark_secp256k1::Fq;

/// The wrapped struct for `ark_secp256k1::Fq`, the base field of secp256k1.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct SECP256K1Fq(pub(crate) Fq);

impl_scalar!(SECP256K1Fq, Fq, crate::secp256k1::SECP256K1_SCALAR_LEN);
