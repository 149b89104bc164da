/// The number of bytes for a scalar value over secp256k1
pub const SECP256K1_SCALAR_LEN: usize = 32;

mod fr;
pub use fr::*;

mod fq;
pub use fq::*;

mod g1;
pub use g1::*;

#[cfg(test)]
mod secp256k1_groups_test {
    use crate::{
        prelude::*,
        secp256k1::{SECP256K1Fq, SECP256K1Scalar, SECP256K1G1},
        traits::group_tests::{test_curve_group, test_scalar_operations, test_scalar_serialization},
    };

    #[test]
    fn test_scalar_ops() {
        test_scalar_operations::<SECP256K1Scalar>();
        test_scalar_operations::<SECP256K1Fq>();
    }

    #[test]
    fn scalar_deser() {
        test_scalar_serialization::<SECP256K1Scalar>();
        test_scalar_serialization::<SECP256K1Fq>();
    }

    #[test]
    fn curve_group() {
        test_curve_group::<SECP256K1G1>();
        // y^2 = x^3 + 7
        assert!(SECP256K1G1::curve_a().is_zero());
        assert_eq!(SECP256K1G1::curve_b(), SECP256K1Fq::from(7u32));
    }

    #[test]
    fn base_field_size() {
        // p = 2^256 - 2^32 - 977
        let expected = (BigUint::from(1u32) << 256usize)
            - (BigUint::from(1u32) << 32usize)
            - BigUint::from(977u32);
        assert_eq!(SECP256K1Fq::get_field_size_biguint(), expected);
    }
}
