//! Attack detection and exploitation traits

use crate::codec::{encode_int, encode_int_fixed};
use crate::config::ChallengeEncoding;
use crate::signature::{SchnorrSignature, SignatureGroup};
use num_bigint::BigUint;

pub mod nonce_reuse;
pub use nonce_reuse::NonceReuseAttack;

pub trait Attack: Send + Sync {
    fn name(&self) -> &'static str;
    fn min_signatures(&self) -> usize;
    fn detect(&self, signatures: &[SchnorrSignature]) -> Vec<Vulnerability>;
    fn recover(&self, vuln: &Vulnerability) -> Option<RecoveredKey>;
}

#[derive(Debug, Clone)]
pub struct Vulnerability {
    pub attack_type: String,
    pub group: SignatureGroup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredKey {
    /// Private scalar, reduced mod n.
    pub private_key: BigUint,
    /// Big-endian bytes of the scalar in the configured width.
    pub bytes: Vec<u8>,
    pub pubkey: Option<String>,
}

impl RecoveredKey {
    pub fn new(private_key: BigUint, encoding: ChallengeEncoding) -> Self {
        let bytes = match encoding {
            ChallengeEncoding::Minimal => encode_int(&private_key),
            ChallengeEncoding::FixedWidth => encode_int_fixed(&private_key, 32)
                .unwrap_or_else(|| encode_int(&private_key)),
        };
        RecoveredKey {
            private_key,
            bytes,
            pubkey: None,
        }
    }

    pub fn with_pubkey(mut self, pubkey: impl Into<String>) -> Self {
        self.pubkey = Some(pubkey.into());
        self
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn to_decimal(&self) -> String {
        self.private_key.to_string()
    }
}
