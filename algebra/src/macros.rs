/// Implement [`crate::traits::Scalar`] and its operator supertraits for a
/// newtype `$t(pub(crate) $inner)` over an arkworks prime field.
macro_rules! impl_scalar {
    ($t:ident, $inner:ty, $len:expr) => {
        impl $t {
            /// Get the raw data.
            #[inline]
            pub fn get_raw(&self) -> $inner {
                self.0
            }

            /// From the raw data.
            #[inline]
            pub fn from_raw(raw: $inner) -> Self {
                Self(raw)
            }
        }

        impl ark_std::fmt::Debug for $t {
            fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
                use ark_ff::PrimeField;
                <num_bigint::BigUint as ark_std::fmt::Debug>::fmt(&self.0.into_bigint().into(), f)
            }
        }

        impl From<$t> for num_bigint::BigUint {
            #[inline]
            fn from(value: $t) -> Self {
                use ark_ff::PrimeField;
                value.0.into_bigint().into()
            }
        }

        impl<'a> From<&'a num_bigint::BigUint> for $t {
            #[inline]
            fn from(src: &num_bigint::BigUint) -> Self {
                Self(<$inner>::from(src.clone()))
            }
        }

        impl $crate::One for $t {
            #[inline]
            fn one() -> Self {
                Self(<$inner as $crate::One>::one())
            }
        }

        impl $crate::Zero for $t {
            #[inline]
            fn zero() -> Self {
                Self(<$inner as $crate::Zero>::zero())
            }

            #[inline]
            fn is_zero(&self) -> bool {
                $crate::Zero::is_zero(&self.0)
            }
        }

        impl core::ops::Add for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl core::ops::Sub for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl core::ops::Mul for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl core::iter::Sum<$t> for $t {
            #[inline]
            fn sum<I: Iterator<Item = $t>>(iter: I) -> Self {
                iter.fold(<Self as $crate::Zero>::zero(), core::ops::Add::add)
            }
        }

        impl<'a> core::ops::Add<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: &Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> core::ops::AddAssign<&'a $t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                self.0 += rhs.0;
            }
        }

        impl<'a> core::ops::Sub<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: &Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl<'a> core::ops::SubAssign<&'a $t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: &Self) {
                self.0 -= rhs.0;
            }
        }

        impl<'a> core::ops::Mul<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: &Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl<'a> core::ops::MulAssign<&'a $t> for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: &Self) {
                self.0 *= rhs.0;
            }
        }

        impl<'a> core::iter::Sum<&'a $t> for $t {
            #[inline]
            fn sum<I: Iterator<Item = &'a $t>>(iter: I) -> Self {
                iter.fold(<Self as $crate::Zero>::zero(), core::ops::Add::add)
            }
        }

        impl core::ops::Neg for $t {
            type Output = $t;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl From<u32> for $t {
            #[inline]
            fn from(value: u32) -> Self {
                Self::from(value as u64)
            }
        }

        impl From<u64> for $t {
            #[inline]
            fn from(value: u64) -> Self {
                Self(<$inner>::from(value))
            }
        }

        impl From<u128> for $t {
            #[inline]
            fn from(value: u128) -> Self {
                Self(<$inner>::from(value))
            }
        }

        impl $crate::traits::Arithmetic<$t> for $t {
            #[inline]
            fn constant(value: $t) -> Self {
                value
            }
        }

        impl $crate::traits::Scalar for $t {
            #[inline]
            fn random<R: $crate::rand::CryptoRng + $crate::rand::RngCore>(rng: &mut R) -> Self {
                Self(<$inner as $crate::UniformRand>::rand(rng))
            }

            #[inline]
            fn multiplicative_generator() -> Self {
                Self(<$inner as ark_ff::FftField>::GENERATOR)
            }

            #[inline]
            fn capacity() -> usize {
                (<$inner as ark_ff::PrimeField>::MODULUS_BIT_SIZE - 1) as usize
            }

            #[inline]
            fn get_field_size_biguint() -> num_bigint::BigUint {
                <$inner as ark_ff::PrimeField>::MODULUS.into()
            }

            #[inline]
            fn get_little_endian_u64(&self) -> ark_std::vec::Vec<u64> {
                use ark_ff::PrimeField;
                self.0.into_bigint().0.to_vec()
            }

            #[inline]
            fn bytes_len() -> usize {
                $len
            }

            #[inline]
            fn to_bytes(&self) -> ark_std::vec::Vec<u8> {
                use ark_ff::{BigInteger, PrimeField};
                self.0.into_bigint().to_bytes_le()
            }

            #[inline]
            fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, $crate::errors::AlgebraError> {
                use ark_ff::PrimeField;
                if bytes.len() > Self::bytes_len() {
                    return Err($crate::errors::AlgebraError::DeserializationError);
                }
                Ok(Self(<$inner>::from_le_bytes_mod_order(bytes)))
            }

            #[inline]
            fn inv(&self) -> core::result::Result<Self, $crate::errors::AlgebraError> {
                use ark_ff::Field;
                self.0
                    .inverse()
                    .map(Self)
                    .ok_or($crate::errors::AlgebraError::GroupInversionError)
            }

            #[inline]
            fn pow(&self, exponent: &[u64]) -> Self {
                use ark_ff::Field;
                Self(self.0.pow(exponent))
            }

            #[inline]
            fn square(&self) -> Self {
                use ark_ff::Field;
                Self(self.0.square())
            }

            #[inline]
            fn sqrt(&self) -> Option<Self> {
                use ark_ff::Field;
                self.0.sqrt().map(Self)
            }
        }

        impl $crate::serialization::FromToBytes for $t {
            fn to_serialized_bytes(&self) -> ark_std::vec::Vec<u8> {
                $crate::traits::Scalar::to_bytes(self)
            }

            fn from_serialized_bytes(
                bytes: &[u8],
            ) -> core::result::Result<Self, $crate::errors::AlgebraError> {
                <Self as $crate::traits::Scalar>::from_bytes(bytes)
            }
        }

        $crate::serialize_deserialize!($t);
    };
}

/// Implement [`crate::traits::CurveGroup`] for a newtype `$t(pub(crate) Projective<$config>)`
/// over a prime-order short-Weierstrass curve.
macro_rules! impl_sw_group {
    ($t:ident, $config:ty, $scalar:ident, $base:ident, $compressed_len:expr) => {
        impl $t {
            /// Get the raw data.
            #[inline]
            pub fn get_raw(&self) -> ark_ec::short_weierstrass::Affine<$config> {
                ark_ec::CurveGroup::into_affine(self.0)
            }

            /// From the raw data.
            #[inline]
            pub fn from_raw(raw: ark_ec::short_weierstrass::Affine<$config>) -> Self {
                Self(raw.into())
            }
        }

        impl ark_std::fmt::Debug for $t {
            fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
                ark_std::fmt::Debug::fmt(&self.get_raw(), f)
            }
        }

        impl $crate::traits::Group for $t {
            type ScalarType = $scalar;
            const COMPRESSED_LEN: usize = $compressed_len;

            #[inline]
            fn double(&self) -> Self {
                Self(ark_ec::Group::double(&self.0))
            }

            #[inline]
            fn get_identity() -> Self {
                Self(<ark_ec::short_weierstrass::Projective<$config> as $crate::Zero>::zero())
            }

            #[inline]
            fn get_base() -> Self {
                Self(<ark_ec::short_weierstrass::Projective<$config> as ark_ec::Group>::generator())
            }

            #[inline]
            fn random<R: $crate::rand::CryptoRng + $crate::rand::RngCore>(rng: &mut R) -> Self {
                Self(<ark_ec::short_weierstrass::Projective<$config> as $crate::UniformRand>::rand(rng))
            }

            #[inline]
            fn is_identity(&self) -> bool {
                $crate::Zero::is_zero(&self.0)
            }

            #[inline]
            fn to_compressed_bytes(&self) -> ark_std::vec::Vec<u8> {
                use ark_serialize::CanonicalSerialize;
                let mut buf = ark_std::vec::Vec::with_capacity($compressed_len);
                // writing into a vector cannot fail
                let _ = self.get_raw().serialize_compressed(&mut buf);
                buf
            }

            #[inline]
            fn from_compressed_bytes(
                bytes: &[u8],
            ) -> core::result::Result<Self, $crate::errors::AlgebraError> {
                use ark_serialize::CanonicalDeserialize;
                ark_ec::short_weierstrass::Affine::<$config>::deserialize_compressed(bytes)
                    .map(Self::from_raw)
                    .map_err(|_| $crate::errors::AlgebraError::DeserializationError)
            }
        }

        impl $crate::traits::CurveGroup for $t {
            type BaseType = $base;

            #[inline]
            fn get_x(&self) -> $base {
                let affine = self.get_raw();
                if affine.infinity {
                    <$base as $crate::Zero>::zero()
                } else {
                    $base(affine.x)
                }
            }

            #[inline]
            fn get_y(&self) -> $base {
                let affine = self.get_raw();
                if affine.infinity {
                    <$base as $crate::Zero>::zero()
                } else {
                    $base(affine.y)
                }
            }

            #[inline]
            fn new(x: &$base, y: &$base) -> Self {
                if $crate::Zero::is_zero(x) && $crate::Zero::is_zero(y) {
                    return <Self as $crate::traits::Group>::get_identity();
                }
                Self::from_raw(ark_ec::short_weierstrass::Affine::<$config>::new_unchecked(
                    x.0, y.0,
                ))
            }

            #[inline]
            fn curve_a() -> $base {
                $base(<$config as ark_ec::short_weierstrass::SWCurveConfig>::COEFF_A)
            }

            #[inline]
            fn curve_b() -> $base {
                $base(<$config as ark_ec::short_weierstrass::SWCurveConfig>::COEFF_B)
            }
        }

        impl core::ops::Neg for $t {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl<'a> core::ops::Add<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn add(self, rhs: &Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> core::ops::Sub<&'a $t> for $t {
            type Output = $t;

            #[inline]
            fn sub(self, rhs: &Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl<'a> core::ops::Mul<&'a $scalar> for $t {
            type Output = $t;

            #[inline]
            fn mul(self, rhs: &$scalar) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl<'a> core::ops::AddAssign<&'a $t> for $t {
            #[inline]
            fn add_assign(&mut self, rhs: &'a $t) {
                self.0 += rhs.0
            }
        }

        impl<'a> core::ops::SubAssign<&'a $t> for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: &'a $t) {
                self.0 -= rhs.0
            }
        }

        impl $crate::serialization::FromToBytes for $t {
            fn to_serialized_bytes(&self) -> ark_std::vec::Vec<u8> {
                $crate::traits::Group::to_compressed_bytes(self)
            }

            fn from_serialized_bytes(
                bytes: &[u8],
            ) -> core::result::Result<Self, $crate::errors::AlgebraError> {
                <Self as $crate::traits::Group>::from_compressed_bytes(bytes)
            }
        }

        $crate::serialize_deserialize!($t);
    };
}
