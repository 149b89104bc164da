use crate::prelude::*;
use ark_std::{fmt::Debug, hash::Hash};
use serde::{Deserialize, Serialize};

/// The arithmetic shared by concrete field elements and symbolic expressions.
///
/// Routines written against this trait run the same operation sequence whether
/// they compute a witness value or build the polynomial constraint for it.
pub trait Arithmetic<F>:
    Clone
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Neg<Output = Self>
{
    /// Lift a field constant.
    fn constant(value: F) -> Self;
}

/// The trait for scalars
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialEq
    + Eq
    + Hash
    + Ord
    + Serialize
    + for<'de> Deserialize<'de>
    + Into<BigUint>
    + for<'a> From<&'a BigUint>
    + Clone
    + One
    + Zero
    + Sized
    + Arithmetic<Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Sync
    + Send
{
    /// Return a random scalar
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Return multiplicative generator of order r,
    /// which is also required to be a quadratic nonresidue
    fn multiplicative_generator() -> Self;

    /// Return the capacity.
    fn capacity() -> usize;

    /// Return the field size as a BigUint
    fn get_field_size_biguint() -> BigUint;

    /// Return a representation of the scalar as a vector of u64 in the little-endian order
    fn get_little_endian_u64(&self) -> Vec<u64>;

    /// Return the len of the byte representation
    fn bytes_len() -> usize;

    /// Convert to bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Convert from bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Return the modular inverse of the scalar if it exists
    fn inv(&self) -> Result<Self>;

    /// Return the modular inverse, or zero for the zero element.
    fn inv_or_zero(&self) -> Self {
        self.inv().unwrap_or_else(|_| Self::zero())
    }

    /// Return `self / other`, with division by zero yielding zero.
    fn div_or_zero(&self, other: &Self) -> Self {
        other.inv_or_zero().mul(self)
    }

    /// Return the square of the field element
    fn square(&self) -> Self;

    /// Return the square root.
    fn sqrt(&self) -> Option<Self>;

    /// exponent form: least significant limb first, with u64 limbs
    fn pow(&self, exponent: &[u64]) -> Self {
        let mut base = *self;
        let mut result = Self::one();
        for exp_u64 in exponent {
            let mut e = *exp_u64;
            // we have to square the base for 64 times.
            for _ in 0..64 {
                if e % 2 == 1 {
                    result.mul_assign(&base);
                }
                base = base.mul(&base);
                e >>= 1;
            }
        }
        result
    }

    /// Raise to a big-integer exponent.
    fn pow_biguint(&self, exponent: &BigUint) -> Self {
        self.pow(&exponent.to_u64_digits())
    }

    /// Convert into BigUint, often for debug.
    fn into_biguint(self) -> BigUint {
        self.into()
    }
}

/// The trait for group elements
pub trait Group:
    Debug
    + Default
    + Copy
    + Sized
    + PartialEq
    + Eq
    + Clone
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Serialize
    + Neg<Output = Self>
    + for<'de> Deserialize<'de>
{
    /// The scalar type
    type ScalarType: Scalar;

    /// The number of bytes for a compressed representation of a group element
    const COMPRESSED_LEN: usize;

    /// Return the doubling of the group element
    fn double(&self) -> Self;

    /// Return the identity element (i.e., 0 * G)
    fn get_identity() -> Self;

    /// Return the base element (i.e., 1 * G)
    fn get_base() -> Self;

    /// Return a random element
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Check whether this is the identity element.
    fn is_identity(&self) -> bool {
        *self == Self::get_identity()
    }

    /// Convert to bytes in the compressed representation
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Convert from bytes in the compressed representation
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;
}

/// A prime-order short-Weierstrass curve `y^2 = x^3 + a*x + b`.
///
/// Affine coordinates are exposed with the identity encoded as `(0, 0)`, which
/// is never a curve point since `b != 0`.
pub trait CurveGroup: Group {
    /// The base field type
    type BaseType: Scalar;

    /// Get the x-coordinate, zero for the identity.
    fn get_x(&self) -> Self::BaseType;

    /// Get the y-coordinate, zero for the identity.
    fn get_y(&self) -> Self::BaseType;

    /// Construct from x and y coordinates without checking the curve equation.
    /// `(0, 0)` yields the identity.
    fn new(x: &Self::BaseType, y: &Self::BaseType) -> Self;

    /// Construct from x and y coordinates, checking the curve equation.
    fn from_xy(x: &Self::BaseType, y: &Self::BaseType) -> Result<Self> {
        if x.is_zero() && y.is_zero() {
            return Ok(Self::get_identity());
        }
        let rhs = x.square().mul(x) + Self::curve_a().mul(x) + Self::curve_b();
        if y.square() != rhs {
            return Err(AlgebraError::NotOnCurveError);
        }
        Ok(Self::new(x, y))
    }

    /// The coefficient `a` of the curve equation.
    fn curve_a() -> Self::BaseType;

    /// The coefficient `b` of the curve equation.
    fn curve_b() -> Self::BaseType;
}

#[cfg(test)]
pub(crate) mod group_tests {
    use crate::prelude::*;

    pub(crate) fn test_scalar_operations<S: Scalar>() {
        let a = S::from(40u32);
        let b = S::from(60u32);
        let c = a.add(&b);
        let d = S::from(100u32);
        assert_eq!(c, d);

        let mut c = a;
        c.add_assign(&b);
        assert_eq!(c, d);

        let c = a.mul(&b);
        let d = S::from(2400u32);
        assert_eq!(c, d);

        let c = b.sub(&a);
        let d = S::from(20u32);
        assert_eq!(c, d);

        let c = a.sub(&b);
        let d = S::from(20u32).neg();
        assert_eq!(c, d);

        let c = a.inv().unwrap();
        assert_eq!(c.mul(&a), S::one());
        assert!(S::zero().inv().is_err());

        let b = S::from(1_000u32);
        assert_eq!(a.pow(&[3]), S::from(64_000u32));
        assert_eq!(a.pow_biguint(&BigUint::from(3u32)), S::from(64_000u32));
        assert_eq!(a.div_or_zero(&S::zero()), S::zero());
        assert_eq!(b.div_or_zero(&S::from(8u32)), S::from(125u32));
        assert_eq!(S::zero().inv_or_zero(), S::zero());
        assert_eq!(<S as Arithmetic<S>>::constant(b), b);
    }

    pub(crate) fn test_scalar_serialization<S: Scalar>() {
        let a = S::from(100u32);
        let bytes = a.to_bytes();
        assert_eq!(bytes.len(), S::bytes_len());
        let b = S::from_bytes(bytes.as_slice()).unwrap();
        assert_eq!(a, b);

        let json = serde_json::to_string(&a).unwrap();
        let c: S = serde_json::from_str(&json).unwrap();
        assert_eq!(a, c);
    }

    pub(crate) fn test_curve_group<G: CurveGroup>() {
        let mut prng = test_rng();
        let p = G::random(&mut prng);
        let identity = G::get_identity();
        assert!(identity.is_identity());
        assert!(identity.get_x().is_zero() && identity.get_y().is_zero());
        assert_eq!(G::new(&p.get_x(), &p.get_y()), p);
        assert_eq!(G::from_xy(&p.get_x(), &p.get_y()).unwrap(), p);
        assert_eq!(
            G::from_xy(&G::BaseType::zero(), &G::BaseType::zero()).unwrap(),
            identity
        );
        assert!(G::from_xy(&p.get_x(), &(p.get_y() + G::BaseType::one())).is_err());
        assert_eq!(p.double(), p.add(&p));
        assert!(p.add(&p.neg()).is_identity());

        let bytes = p.to_compressed_bytes();
        assert_eq!(bytes.len(), G::COMPRESSED_LEN);
        assert_eq!(G::from_compressed_bytes(&bytes).unwrap(), p);
    }
}
