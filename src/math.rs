//! Modular arithmetic over the secp256k1 group order

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::sync::LazyLock;

/// secp256k1 curve order n in hexadecimal.
pub const SECP256K1_ORDER_HEX: &str =
    "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

/// secp256k1 curve order n.
pub static CURVE_ORDER: LazyLock<BigUint> = LazyLock::new(|| {
    BigUint::parse_bytes(SECP256K1_ORDER_HEX.as_bytes(), 16)
        .expect("SECP256K1_ORDER_HEX should parse as base-16 BigUint")
});

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`. The coefficients
/// are the ones produced by the recursive definition
///
/// ```text
/// egcd(0, b) = (b, 0, 1)
/// egcd(a, b) = (g, y1 - (b / a) * x1, x1)  where (g, x1, y1) = egcd(b % a, a)
/// ```
///
/// evaluated bottom-up from the recorded quotients, so the depth of the
/// computation never touches the call stack.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let mut quotients = Vec::new();
    let (mut a, mut b) = (a.clone(), b.clone());
    while !a.is_zero() {
        let (q, r) = b.div_rem(&a);
        quotients.push(BigInt::from(q));
        b = a;
        a = r;
    }

    let (mut x, mut y) = (BigInt::zero(), BigInt::one());
    for q in quotients.iter().rev() {
        let next_x = &y - q * &x;
        y = x;
        x = next_x;
    }
    (b, x, y)
}

/// Inverse of `j` modulo `n`, or `None` when `gcd(j, n) != 1`.
pub fn mod_inverse(j: &BigUint, n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return None;
    }
    let (g, x, _) = extended_gcd(&(j % n), n);
    if !g.is_one() {
        return None;
    }
    Some(reduce(&x, n))
}

/// Non-negative residue of a signed value modulo `n`.
///
/// `n` must be non-zero.
pub fn reduce(value: &BigInt, n: &BigUint) -> BigUint {
    let modulus = BigInt::from(n.clone());
    value.mod_floor(&modulus).magnitude().clone()
}

/// `(a - b) mod n` for signed operands.
pub fn mod_sub(a: &BigInt, b: &BigInt, n: &BigUint) -> BigUint {
    reduce(&(a - b), n)
}
