//! Schnorr signature nonce reuse analysis library
//!
//! Recovers a BIP340-style Schnorr private key from two signatures that
//! share the same secret nonce, by solving the pair of response equations
//! `resp = k + e*p (mod n)` for `p`. The attack works on scalars taken from
//! the signature fields and never touches curve points.
//!
//! ```
//! use schnorr_reuse::recover_private_key;
//!
//! let key = recover_private_key(
//!     "463F9E1F3808CEDF5BB282427ECD1BFE8FC759BC6F65A42C90AA197EFC6F9F26",
//!     "6368616E63656C6C6F72206F6E20746865206272696E6B206F66207365636F6E",
//!     "F3F148DBF94B1BCAEE1896306141F319729DCCA9451617D4B529EB22C2FB521A32A1DB8D2669A00AFE7BE97AF8C355CCF2B49B9938B9E451A5C231A45993D920",
//!     "6974206D69676874206D616B652073656E7365206A75737420746F2067657420",
//!     "F3F148DBF94B1BCAEE1896306141F319729DCCA9451617D4B529EB22C2FB521A974240A9A9403996CA01A06A3BC8F0D7B71D87FB510E897FF3EC5BF347E5C5C1",
//! )
//! .unwrap();
//! assert_eq!(key, b"congratulations you found the sk");
//! ```
//!
//! Both signatures must really share the nonce. When they do not, the
//! returned key is meaningless and no error is raised: telling the two
//! cases apart needs signature verification, which is left to the caller.

pub mod attack;
pub mod challenge;
pub mod codec;
pub mod config;
pub mod error;
pub mod math;
pub mod signature;

pub use attack::nonce_reuse::{recover_private_key, recover_private_key_with, NonceReuseInput};
pub use attack::{Attack, NonceReuseAttack, RecoveredKey};
pub use challenge::{challenge, tagged_hash, BIP340_CHALLENGE_TAG};
pub use config::{ChallengeEncoding, RecoveryConfig};
pub use error::RecoveryError;
pub use math::CURVE_ORDER;
pub use signature::{SchnorrSignature, SignatureInput};
