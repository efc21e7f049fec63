//! Hex and byte conversions for big integers

use num_bigint::BigUint;

/// Parses a hex string as a big-endian unsigned integer.
///
/// Follows the `hex` crate's rules: odd length and non-hex characters are
/// rejected, either case is accepted. The empty string decodes to zero.
pub fn decode_hex_int(s: &str) -> Result<BigUint, hex::FromHexError> {
    let bytes = hex::decode(s)?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Minimal big-endian encoding with no leading zero bytes. Zero encodes to
/// an empty vector.
pub fn encode_int(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return Vec::new();
    }
    value.to_bytes_be()
}

/// Big-endian encoding left-padded to `width` bytes.
///
/// Returns `None` if the value needs more than `width` bytes.
pub fn encode_int_fixed(value: &BigUint, width: usize) -> Option<Vec<u8>> {
    let bytes = encode_int(value);
    if bytes.len() > width {
        return None;
    }

    let mut padded = vec![0u8; width];
    let offset = width - bytes.len();
    padded[offset..].copy_from_slice(&bytes);
    Some(padded)
}
