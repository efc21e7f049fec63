//! Error types for key recovery

use thiserror::Error;

/// Reasons a recovery attempt can fail.
///
/// Only malformed input and a non-invertible divisor are detected. Two
/// signatures that do not actually share a nonce still produce a key.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecoveryError {
    #[error("invalid hex in {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// `gcd(e1 - e2, n) != 1`, which for prime `n` means both challenges
    /// are equal modulo `n`.
    #[error("GCD of divisor mod n is not 1, modular inverse is not defined")]
    NoInverse,

    /// Only raised in fixed-width mode.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl RecoveryError {
    pub(crate) fn decode(field: &'static str) -> impl FnOnce(hex::FromHexError) -> Self {
        move |source| RecoveryError::Decode { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_field() {
        let err = hex::decode("abc")
            .map_err(RecoveryError::decode("sig1"))
            .unwrap_err();
        assert!(matches!(err, RecoveryError::Decode { field: "sig1", .. }));
        assert!(err.to_string().contains("sig1"));
    }

    #[test]
    fn test_no_inverse_message() {
        let msg = RecoveryError::NoInverse.to_string();
        assert!(msg.contains("modular inverse is not defined"));
    }
}
