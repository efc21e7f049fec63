//! Signature data types and grouping logic

use crate::codec::encode_int;
use crate::error::RecoveryError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bit offset of `R` inside the 64-byte signature integer.
pub const R_SHIFT: usize = 256;

/// A signature as supplied by the caller: hex strings for the public key,
/// the message and the 64-byte signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInput {
    pub pubkey: String,
    pub msg: String,
    pub sig: String,
}

/// Decoded byte lengths of the hex fields a signature was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLengths {
    pub pubkey: usize,
    pub msg: usize,
    pub sig: usize,
}

/// A decoded signature split into its nonce commitment and response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchnorrSignature {
    /// Top 256 bits of the signature.
    pub r: BigUint,
    /// Bottom 256 bits of the signature.
    pub resp: BigUint,
    /// The whole signature as one integer.
    pub raw: BigUint,
    pub msg: BigUint,
    pub pubkey: BigUint,
    /// Lowercase hex form of `pubkey`, used for grouping and reporting.
    pub pubkey_hex: String,
    pub lengths: FieldLengths,
}

impl SchnorrSignature {
    /// Builds a signature from decoded integers. The recorded lengths are
    /// the minimal byte lengths of the values.
    pub fn from_parts(pubkey: BigUint, pubkey_hex: String, msg: BigUint, raw: BigUint) -> Self {
        let lengths = FieldLengths {
            pubkey: encode_int(&pubkey).len(),
            msg: encode_int(&msg).len(),
            sig: encode_int(&raw).len(),
        };
        Self::with_lengths(pubkey, pubkey_hex, msg, raw, lengths)
    }

    fn with_lengths(
        pubkey: BigUint,
        pubkey_hex: String,
        msg: BigUint,
        raw: BigUint,
        lengths: FieldLengths,
    ) -> Self {
        let (r, resp) = split_signature(&raw);
        SchnorrSignature {
            r,
            resp,
            raw,
            msg,
            pubkey,
            pubkey_hex,
            lengths,
        }
    }
}

impl TryFrom<SignatureInput> for SchnorrSignature {
    type Error = RecoveryError;

    fn try_from(input: SignatureInput) -> Result<Self, Self::Error> {
        let pubkey = hex::decode(&input.pubkey).map_err(RecoveryError::decode("public key"))?;
        let msg = hex::decode(&input.msg).map_err(RecoveryError::decode("msg"))?;
        let sig = hex::decode(&input.sig).map_err(RecoveryError::decode("sig"))?;

        let lengths = FieldLengths {
            pubkey: pubkey.len(),
            msg: msg.len(),
            sig: sig.len(),
        };
        Ok(SchnorrSignature::with_lengths(
            BigUint::from_bytes_be(&pubkey),
            input.pubkey.to_lowercase(),
            BigUint::from_bytes_be(&msg),
            BigUint::from_bytes_be(&sig),
            lengths,
        ))
    }
}

/// Splits a signature integer into `(R, resp)` at bit 256.
pub fn split_signature(sig: &BigUint) -> (BigUint, BigUint) {
    let r = sig >> R_SHIFT;
    let resp = sig - (&r << R_SHIFT);
    (r, resp)
}

#[derive(Debug, Clone)]
pub struct SignatureGroup {
    pub r: BigUint,
    pub pubkey: String,
    pub signatures: Vec<SchnorrSignature>,
}

impl SignatureGroup {
    pub fn distinct_messages(&self) -> usize {
        let mut msgs: Vec<&BigUint> = self.signatures.iter().map(|s| &s.msg).collect();
        msgs.sort();
        msgs.dedup();
        msgs.len()
    }
}

/// Groups signatures that share both the nonce commitment `R` and the
/// public key. Groups come back ordered by `(R, pubkey)`.
pub fn group_by_r_and_pubkey(sigs: &[SchnorrSignature]) -> Vec<SignatureGroup> {
    let mut groups: BTreeMap<(BigUint, String), Vec<SchnorrSignature>> = BTreeMap::new();

    for sig in sigs {
        groups
            .entry((sig.r.clone(), sig.pubkey_hex.clone()))
            .or_default()
            .push(sig.clone());
    }

    groups
        .into_iter()
        .map(|((r, pubkey), signatures)| SignatureGroup {
            r,
            pubkey,
            signatures,
        })
        .collect()
}
