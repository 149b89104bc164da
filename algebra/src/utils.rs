use crate::prelude::*;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const BASE64_PADDING_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(&URL_SAFE, BASE64_PADDING_CONFIG);

/// Convert the input into the base64 encoding
pub fn b64enc<T: ?Sized + AsRef<[u8]>>(input: &T) -> String {
    BASE64_ENGINE.encode(input)
}

/// Reconstruct from the base64 encoding
pub fn b64dec<T: ?Sized + AsRef<[u8]>>(input: &T) -> Result<Vec<u8>> {
    BASE64_ENGINE
        .decode(input)
        .map_err(|_| AlgebraError::DeserializationError)
}

/// Return the `n_bits` least significant bits of a little-endian byte string,
/// least significant bit first.
pub fn bytes_to_bits_le(bytes: &[u8], n_bits: usize) -> Vec<bool> {
    (0..n_bits)
        .map(|i| {
            let byte = bytes.get(i / 8).copied().unwrap_or(0);
            (byte >> (i % 8)) & 1 == 1
        })
        .collect()
}

/// Return the bits of a big integer, most significant bit first, without leading zeros.
pub fn biguint_to_bits_be(value: &BigUint) -> Vec<bool> {
    let n_bits = value.bits() as usize;
    let mut bits = bytes_to_bits_le(&value.to_bytes_le(), n_bits);
    bits.reverse();
    bits
}

/// Integer division rounding up.
#[inline]
pub fn ceil_div(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}
