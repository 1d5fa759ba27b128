//! little endian 256 bits arithmetic on scalars and the curve point helpers
//! needed by the soft derivation of public keys.
//!
//! None of those functions perform any range check, the derivation relies
//! on the keys being in the range `2^254 .. 2^254 + 2^253` (3rd highest bit
//! cleared at the root) and being multiple of 8.

use cryptoxide::curve25519::{ge_scalarmult_base, GeP3};

use super::DerivationError;

/// `x + y` modulo 2^256, the final carry is discarded.
pub(crate) fn add_256bits(x: &[u8; 32], y: &[u8; 32]) -> [u8; 32] {
    let mut carry: u16 = 0;
    let mut out = [0u8; 32];
    for i in 0..32 {
        let r = (x[i] as u16) + (y[i] as u16) + carry;
        out[i] = r as u8;
        carry = r >> 8;
    }
    out
}

/// `x + 8 * trunc28(y)`: only the 28 lowest bytes of `y` are multiplied and
/// added, the 4 highest bytes of `x` only see the carry.
pub(crate) fn add_28_mul8(x: &[u8; 32], y: &[u8; 32]) -> [u8; 32] {
    let mut carry: u16 = 0;
    let mut out = [0u8; 32];

    for i in 0..28 {
        let r = x[i] as u16 + ((y[i] as u16) << 3) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    for i in 28..32 {
        let r = x[i] as u16 + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

/// the encoded point `(8 * trunc28(sk)) * B`
pub(crate) fn point_of_trunc28_mul8(sk: &[u8; 32]) -> [u8; 32] {
    let scalar = add_28_mul8(&[0u8; 32], sk);
    ge_scalarmult_base(&scalar).to_bytes()
}

/// Edwards addition of two encoded points.
///
/// The decoding available negates the points, the sign bit of the
/// result is flipped back to compensate.
pub(crate) fn point_plus(p1: &[u8; 32], p2: &[u8; 32]) -> Result<[u8; 32], DerivationError> {
    let a = match GeP3::from_bytes_negate_vartime(p1) {
        Some(g) => g,
        None => return Err(DerivationError::InvalidAddition),
    };
    let b = match GeP3::from_bytes_negate_vartime(p2) {
        Some(g) => g,
        None => return Err(DerivationError::InvalidAddition),
    };
    let r = a + b.to_cached();
    let mut r = r.to_p2().to_bytes();
    r[31] ^= 0x80;
    Ok(r)
}
