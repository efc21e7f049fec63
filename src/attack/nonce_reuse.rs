//! Nonce reuse attack implementation
//!
//! Two signatures with the same nonce `k` under the same key `p` satisfy
//!
//! ```text
//! resp1 = k + e1*p (mod n)
//! resp2 = k + e2*p (mod n)
//! ```
//!
//! so `p = (resp1 - resp2) / (e1 - e2) (mod n)` whenever `e1 != e2`.

use super::*;
use crate::challenge::challenge;
use crate::codec::decode_hex_int;
use crate::config::RecoveryConfig;
use crate::error::RecoveryError;
use crate::math::{mod_inverse, mod_sub, CURVE_ORDER};
use crate::signature::{group_by_r_and_pubkey, R_SHIFT};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

const PUBKEY_SIZE: usize = 32;
const MSG_SIZE: usize = 32;
const SIG_SIZE: usize = 64;

/// The five hex fields of one recovery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceReuseInput {
    pub public_key: String,
    pub msg1: String,
    pub sig1: String,
    pub msg2: String,
    pub sig2: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonceReuseAttack {
    config: RecoveryConfig,
}

impl NonceReuseAttack {
    pub fn new(config: RecoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    pub fn recover_input(&self, input: &NonceReuseInput) -> Result<RecoveredKey, RecoveryError> {
        let key = recover_key(
            &self.config,
            &input.public_key,
            &input.msg1,
            &input.sig1,
            &input.msg2,
            &input.sig2,
        )?;
        Ok(key.with_pubkey(input.public_key.clone()))
    }
}

impl Attack for NonceReuseAttack {
    fn name(&self) -> &'static str {
        "nonce-reuse"
    }

    fn min_signatures(&self) -> usize {
        2
    }

    fn detect(&self, signatures: &[SchnorrSignature]) -> Vec<Vulnerability> {
        group_by_r_and_pubkey(signatures)
            .into_iter()
            .filter(|g| g.distinct_messages() >= self.min_signatures())
            .map(|group| Vulnerability {
                attack_type: self.name().to_string(),
                group,
            })
            .collect()
    }

    fn recover(&self, vuln: &Vulnerability) -> Option<RecoveredKey> {
        let sigs = &vuln.group.signatures;
        if sigs.len() < 2 {
            return None;
        }

        for i in 0..sigs.len() {
            for j in (i + 1)..sigs.len() {
                if sigs[i].msg == sigs[j].msg {
                    continue;
                }
                match solve_pair(&sigs[i], &sigs[j], &self.config) {
                    Ok(key) => return Some(key.with_pubkey(vuln.group.pubkey.clone())),
                    Err(e) => debug!(pair = ?(i, j), error = %e, "pair not recoverable"),
                }
            }
        }
        None
    }
}

fn solve_pair(
    sig1: &SchnorrSignature,
    sig2: &SchnorrSignature,
    config: &RecoveryConfig,
) -> Result<RecoveredKey, RecoveryError> {
    let width = |size| expected_width(config.encoding, size);
    check_length("public key", sig1.lengths.pubkey, width(PUBKEY_SIZE))?;
    check_length("msg1", sig1.lengths.msg, width(MSG_SIZE))?;
    check_length("sig1", sig1.lengths.sig, width(SIG_SIZE))?;
    check_length("msg2", sig2.lengths.msg, width(MSG_SIZE))?;
    check_length("sig2", sig2.lengths.sig, width(SIG_SIZE))?;

    let p = solve_private_key(
        &sig1.pubkey,
        &sig1.msg,
        &sig1.raw,
        &sig2.msg,
        &sig2.raw,
        config.encoding,
    )?;
    Ok(RecoveredKey::new(p, config.encoding))
}

/// Recovers the private key from two signatures sharing a nonce, using
/// the minimal-width encoding.
///
/// All arguments are hex encoded; the signatures are 64 bytes (`R || resp`).
/// Returns the private key as minimal big-endian bytes.
pub fn recover_private_key(
    public_key: &str,
    msg1: &str,
    sig1: &str,
    msg2: &str,
    sig2: &str,
) -> Result<Vec<u8>, RecoveryError> {
    recover_private_key_with(&RecoveryConfig::default(), public_key, msg1, sig1, msg2, sig2)
}

/// Same as [`recover_private_key`] with an explicit configuration.
pub fn recover_private_key_with(
    config: &RecoveryConfig,
    public_key: &str,
    msg1: &str,
    sig1: &str,
    msg2: &str,
    sig2: &str,
) -> Result<Vec<u8>, RecoveryError> {
    recover_key(config, public_key, msg1, sig1, msg2, sig2).map(|key| key.bytes)
}

fn recover_key(
    config: &RecoveryConfig,
    public_key: &str,
    msg1: &str,
    sig1: &str,
    msg2: &str,
    sig2: &str,
) -> Result<RecoveredKey, RecoveryError> {
    debug!(encoding = ?config.encoding, "recovering private key from reused nonce");

    let width = |size| expected_width(config.encoding, size);
    let pk = decode_field("public key", public_key, width(PUBKEY_SIZE))?;
    let m1 = decode_field("msg1", msg1, width(MSG_SIZE))?;
    let s1 = decode_field("sig1", sig1, width(SIG_SIZE))?;
    let m2 = decode_field("msg2", msg2, width(MSG_SIZE))?;
    let s2 = decode_field("sig2", sig2, width(SIG_SIZE))?;

    let p = solve_private_key(&pk, &m1, &s1, &m2, &s2, config.encoding)?;
    debug!("private key recovered");
    Ok(RecoveredKey::new(p, config.encoding))
}

/// Exact byte length a field must have, if the encoding fixes one.
fn expected_width(encoding: ChallengeEncoding, size: usize) -> Option<usize> {
    match encoding {
        ChallengeEncoding::Minimal => None,
        ChallengeEncoding::FixedWidth => Some(size),
    }
}

fn check_length(
    field: &'static str,
    actual: usize,
    expected: Option<usize>,
) -> Result<(), RecoveryError> {
    match expected {
        Some(expected) if actual != expected => Err(RecoveryError::InvalidLength {
            field,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

fn decode_field(
    field: &'static str,
    s: &str,
    expected: Option<usize>,
) -> Result<BigUint, RecoveryError> {
    let Some(expected) = expected else {
        return decode_hex_int(s).map_err(RecoveryError::decode(field));
    };
    let bytes = hex::decode(s).map_err(RecoveryError::decode(field))?;
    check_length(field, bytes.len(), Some(expected))?;
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Solves `resp1 - resp2 = p * (e1 - e2) (mod n)` for `p`.
///
/// `R` is read from the top 256 bits of `s2` and assumed to be the same in
/// `s1`. If it is not, the result is meaningless.
pub fn solve_private_key(
    pubkey: &BigUint,
    m1: &BigUint,
    s1: &BigUint,
    m2: &BigUint,
    s2: &BigUint,
    encoding: ChallengeEncoding,
) -> Result<BigUint, RecoveryError> {
    let n = &*CURVE_ORDER;

    let r = s2 >> R_SHIFT;
    let r_shifted = BigInt::from(&r << R_SHIFT);
    let resp1 = BigInt::from(s1.clone()) - &r_shifted;
    let resp2 = BigInt::from(s2.clone()) - &r_shifted;
    trace!(r_bits = r.bits(), "extracted nonce commitment");

    let e1 = challenge(&r, pubkey, m1, encoding)?;
    let e2 = challenge(&r, pubkey, m2, encoding)?;

    let i = mod_sub(&resp1, &resp2, n);
    let j = mod_sub(&BigInt::from(e1), &BigInt::from(e2), n);

    let Some(j_inv) = mod_inverse(&j, n) else {
        warn!("challenges coincide modulo n, divisor has no inverse");
        return Err(RecoveryError::NoInverse);
    };

    Ok((i * j_inv) % n)
}
