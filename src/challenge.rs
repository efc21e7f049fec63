//! BIP340 tagged hash and challenge computation
//!
//! The challenge of a signature is
//!
//! ```text
//! e = int(SHA256(tag || tag || R || P || m)) mod n,  tag = SHA256("BIP0340/challenge")
//! ```
//!
//! where the byte layout of `R || P || m` depends on [`ChallengeEncoding`].

use crate::codec::{encode_int, encode_int_fixed};
use crate::config::ChallengeEncoding;
use crate::error::RecoveryError;
use crate::math::CURVE_ORDER;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// `SHA256("BIP0340/challenge")`, hex encoded.
pub const BIP340_CHALLENGE_TAG: &str =
    "7bb52d7a9fef58323eb1bf7a407db382d2f3f2d81bb1224f49fe518f6d48d37c";

/// Width of `R`, `P` and `m` in the BIP340 layout.
pub const FIELD_SIZE: usize = 32;

static CHALLENGE_TAG: LazyLock<[u8; 32]> = LazyLock::new(|| {
    let mut tag = [0u8; 32];
    hex::decode_to_slice(BIP340_CHALLENGE_TAG, &mut tag)
        .expect("BIP340_CHALLENGE_TAG should be 32 bytes of hex");
    tag
});

/// `SHA256(name)`, the pre-hashed form of a tag name.
pub fn tag_digest(name: &str) -> [u8; 32] {
    Sha256::digest(name.as_bytes()).into()
}

/// `SHA256(tag || tag || msg)` for an already pre-hashed `tag`.
pub fn tagged_hash(tag: &[u8], msg: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    hasher.update(tag);
    hasher.update(msg);
    hasher.finalize().into()
}

/// Serializes `R || P || m` for the challenge hash.
pub fn challenge_preimage(
    r: &BigUint,
    pubkey: &BigUint,
    msg: &BigUint,
    encoding: ChallengeEncoding,
) -> Result<Vec<u8>, RecoveryError> {
    let fields = [("R", r), ("public key", pubkey), ("message", msg)];
    let mut preimage = Vec::with_capacity(3 * FIELD_SIZE);

    for (field, value) in fields {
        match encoding {
            ChallengeEncoding::Minimal => preimage.extend_from_slice(&encode_int(value)),
            ChallengeEncoding::FixedWidth => {
                let bytes = encode_int_fixed(value, FIELD_SIZE).ok_or_else(|| {
                    RecoveryError::InvalidLength {
                        field,
                        expected: FIELD_SIZE,
                        actual: encode_int(value).len(),
                    }
                })?;
                preimage.extend_from_slice(&bytes);
            }
        }
    }

    Ok(preimage)
}

/// Challenge scalar `e = H(R || P || m) mod n`.
pub fn challenge(
    r: &BigUint,
    pubkey: &BigUint,
    msg: &BigUint,
    encoding: ChallengeEncoding,
) -> Result<BigUint, RecoveryError> {
    let preimage = challenge_preimage(r, pubkey, msg, encoding)?;
    let digest = tagged_hash(&CHALLENGE_TAG[..], &preimage);
    Ok(BigUint::from_bytes_be(&digest) % &*CURVE_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(hex: &str) -> BigUint {
        BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_challenge_tag_constant() {
        assert_eq!(hex::encode(tag_digest("BIP0340/challenge")), BIP340_CHALLENGE_TAG);
        assert_eq!(*CHALLENGE_TAG, tag_digest("BIP0340/challenge"));
    }

    #[test]
    fn test_tagged_hash_construction() {
        let tag = tag_digest("BIP0340/challenge");
        let data = b"test_data";

        let mut concatenated = Vec::new();
        concatenated.extend_from_slice(&tag);
        concatenated.extend_from_slice(&tag);
        concatenated.extend_from_slice(data);
        let expected: [u8; 32] = Sha256::digest(&concatenated).into();

        assert_eq!(tagged_hash(&tag, data), expected);
    }

    #[test]
    fn test_tagged_hash_deterministic() {
        let tag = tag_digest("BIP0340/challenge");
        assert_eq!(tagged_hash(&tag, b"hello"), tagged_hash(&tag, b"hello"));
    }

    #[test]
    fn test_tagged_hash_sensitive_to_inputs() {
        let tag = tag_digest("BIP0340/challenge");
        let base = tagged_hash(&tag, b"hello");

        assert_ne!(base, tagged_hash(&tag, b"hellp"));
        assert_ne!(base, tagged_hash(&tag, b"jello"));

        let mut other_tag = tag;
        other_tag[31] ^= 1;
        assert_ne!(base, tagged_hash(&other_tag, b"hello"));
        assert_ne!(base, tagged_hash(&tag_digest("BIP0340/aux"), b"hello"));
    }

    #[test]
    fn test_minimal_preimage_drops_leading_zeros() {
        let preimage = challenge_preimage(
            &int("01"),
            &int("00ff"),
            &int("0a0b"),
            ChallengeEncoding::Minimal,
        )
        .unwrap();
        assert_eq!(preimage, vec![0x01, 0xff, 0x0a, 0x0b]);
    }

    #[test]
    fn test_fixed_width_preimage_pads_fields() {
        let preimage = challenge_preimage(
            &int("01"),
            &int("ff"),
            &int("0a0b"),
            ChallengeEncoding::FixedWidth,
        )
        .unwrap();
        assert_eq!(preimage.len(), 96);
        assert_eq!(preimage[31], 0x01);
        assert_eq!(preimage[63], 0xff);
        assert_eq!(&preimage[94..], &[0x0a, 0x0b]);
        assert!(preimage[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fixed_width_rejects_oversized_message() {
        let long = BigUint::from_bytes_be(&[0xab; 33]);
        let err = challenge_preimage(&int("01"), &int("02"), &long, ChallengeEncoding::FixedWidth)
            .unwrap_err();
        assert_eq!(
            err,
            RecoveryError::InvalidLength {
                field: "message",
                expected: 32,
                actual: 33
            }
        );
    }

    #[test]
    fn test_encodings_agree_on_full_width_fields() {
        let r = int("F3F148DBF94B1BCAEE1896306141F319729DCCA9451617D4B529EB22C2FB521A");
        let p = int("463F9E1F3808CEDF5BB282427ECD1BFE8FC759BC6F65A42C90AA197EFC6F9F26");
        let m = int("6368616E63656C6C6F72206F6E20746865206272696E6B206F66207365636F6E");

        let minimal = challenge(&r, &p, &m, ChallengeEncoding::Minimal).unwrap();
        let fixed = challenge(&r, &p, &m, ChallengeEncoding::FixedWidth).unwrap();
        assert_eq!(minimal, fixed);
        assert!(minimal < *CURVE_ORDER);
    }

    #[test]
    fn test_encodings_differ_with_leading_zero() {
        let r = int("F3F148DBF94B1BCAEE1896306141F319729DCCA9451617D4B529EB22C2FB521A");
        let p = int("463F9E1F3808CEDF5BB282427ECD1BFE8FC759BC6F65A42C90AA197EFC6F9F26");
        let m = int("00000000000000000000000000000000000000000000000000000000000000ff");

        let minimal = challenge(&r, &p, &m, ChallengeEncoding::Minimal).unwrap();
        let fixed = challenge(&r, &p, &m, ChallengeEncoding::FixedWidth).unwrap();
        assert_ne!(minimal, fixed);
    }
}
