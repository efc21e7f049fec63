//! Recovery options

use serde::{Deserialize, Serialize};

/// How `R`, `P` and `m` are serialized into the challenge preimage, and how
/// the recovered key is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeEncoding {
    /// Minimal big-endian bytes for every field, leading zero bytes
    /// dropped. The key is returned the same way.
    #[default]
    Minimal,
    /// BIP340 layout: 32-byte `R`, `P` and `m`, and a 32-byte key. Public
    /// keys and messages must be 32 bytes and signatures 64 bytes.
    FixedWidth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default)]
    pub encoding: ChallengeEncoding,
}

impl RecoveryConfig {
    /// Configuration that matches signatures produced by a BIP340 signer.
    pub fn bip340() -> Self {
        Self {
            encoding: ChallengeEncoding::FixedWidth,
        }
    }

    pub fn with_encoding(mut self, encoding: ChallengeEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}
