/// Keccak lane packing and padding.
pub mod keccak;
