//! child key derivation functions (CKDpriv and CKDpub)
//!
//! ```text
//! If hardened child:
//!    let Z = HMAC-SHA512(Key = cpar, Data = 0x00 || ser512(kpar) || le32(i)).
//!    let I = HMAC-SHA512(Key = cpar, Data = 0x01 || ser512(kpar) || le32(i)).
//! If normal child:
//!    let Z = HMAC-SHA512(Key = cpar, Data = 0x02 || serP(point(kpar)) || le32(i)).
//!    let I = HMAC-SHA512(Key = cpar, Data = 0x03 || serP(point(kpar)) || le32(i)).
//!
//! kL(child) = kL(par) + 8 * trunc28(ZL)
//! kR(child) = kR(par) + ZR  (mod 2^256)
//! c(child)  = IR
//! ```
use cryptoxide::hmac::Hmac;
use cryptoxide::mac::Mac;
use cryptoxide::sha2::Sha512;
use log::{debug, trace};
use zeroize::Zeroize;

use std::{error, fmt};

use crate::key::{mk_public_key, mk_xprv, mk_xpub, XPrv, XPub, XPRV_SIZE, XPUB_SIZE};

mod arith;

pub(crate) use self::arith::{add_256bits, add_28_mul8};
use self::arith::{point_of_trunc28_mul8, point_plus};

/// Derivation index is a 32 bits number representing
/// a type of derivation and a 31 bits number.
///
/// The highest bit set represent a hard derivation,
/// whereas the bit clear represent soft derivation.
pub type DerivationIndex = u32;

/// first index of the hard derivation range
pub(crate) const HARDENED_OFFSET: DerivationIndex = 0x8000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationType {
    Soft(u32),
    Hard(u32),
}
impl DerivationType {
    pub fn from_index(index: DerivationIndex) -> Self {
        if index >= HARDENED_OFFSET {
            DerivationType::Hard(index)
        } else {
            DerivationType::Soft(index)
        }
    }
}

/// the hardened index of `index`
///
/// ```
/// use bip32_ed25519::harden;
///
/// assert_eq!(harden(1852), 0x8000_073c);
/// ```
pub fn harden(index: u32) -> DerivationIndex {
    index | HARDENED_OFFSET
}

/// Possible errors during the public derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationError {
    /// the public key of the `XPub` (or the derived offset) is not
    /// a valid point of the curve
    InvalidAddition,
}
impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DerivationError::InvalidAddition => f.write_str("invalid point addition"),
        }
    }
}
impl error::Error for DerivationError {}

fn le32(i: u32) -> [u8; 4] {
    [i as u8, (i >> 8) as u8, (i >> 16) as u8, (i >> 24) as u8]
}

fn hmac_sha512(key: &[u8], tag: u8, payload: &[u8], index: &[u8; 4], out: &mut [u8; 64]) {
    let mut mac = Hmac::new(Sha512::new(), key);
    mac.input(&[tag]);
    mac.input(payload);
    mac.input(index);
    mac.raw_result(out);
}

pub(crate) fn private(xprv: &XPrv, index: DerivationIndex) -> XPrv {
    let bytes = xprv.as_ref();
    let mut ekey = [0u8; 64];
    let mut kl = [0u8; 32];
    let mut kr = [0u8; 32];
    ekey.clone_from_slice(&bytes[0..64]);
    kl.clone_from_slice(&bytes[0..32]);
    kr.clone_from_slice(&bytes[32..64]);
    let chaincode = &bytes[64..96];

    let seri = le32(index);
    let mut zout = [0u8; 64];
    let mut iout = [0u8; 64];
    match DerivationType::from_index(index) {
        DerivationType::Soft(_) => {
            trace!("soft private derivation, index {}", index);
            let pk = mk_public_key(&ekey);
            hmac_sha512(chaincode, 0x2, &pk, &seri, &mut zout);
            hmac_sha512(chaincode, 0x3, &pk, &seri, &mut iout);
        }
        DerivationType::Hard(_) => {
            trace!("hard private derivation, index {}", index);
            hmac_sha512(chaincode, 0x0, &ekey, &seri, &mut zout);
            hmac_sha512(chaincode, 0x1, &ekey, &seri, &mut iout);
        }
    };

    let mut zl = [0u8; 32];
    let mut zr = [0u8; 32];
    zl.clone_from_slice(&zout[0..32]);
    zr.clone_from_slice(&zout[32..64]);

    // left = kl + 8 * trunc28(zl)
    let mut left = add_28_mul8(&kl, &zl);
    // right = zr + kr
    let mut right = add_256bits(&kr, &zr);

    // no check for the divisibility by the curve order: keys live in
    // 2^254 .. 2^254 + 2^253 and are multiple of 8, and no multiple of the
    // curve order in that range is a multiple of 8.

    let mut out = [0u8; XPRV_SIZE];
    mk_xprv(&mut out, &left, &right, &iout[32..64]);

    ekey.zeroize();
    kl.zeroize();
    kr.zeroize();
    zout.zeroize();
    zl.zeroize();
    zr.zeroize();
    left.zeroize();
    right.zeroize();

    XPrv::from_bytes(out)
}

pub(crate) fn public(xpub: &XPub, index: DerivationIndex) -> Result<XPub, DerivationError> {
    let index = match DerivationType::from_index(index) {
        DerivationType::Soft(index) => index,
        DerivationType::Hard(index) => {
            debug!(
                "public derivation cannot be hard, index {} folded to {}",
                index,
                index - HARDENED_OFFSET
            );
            index - HARDENED_OFFSET
        }
    };
    trace!("soft public derivation, index {}", index);

    let pk = xpub.public_key();
    let chaincode = xpub.chain_code();

    let seri = le32(index);
    let mut zout = [0u8; 64];
    let mut iout = [0u8; 64];
    hmac_sha512(&chaincode, 0x2, &pk, &seri, &mut zout);
    hmac_sha512(&chaincode, 0x3, &pk, &seri, &mut iout);

    let mut zl = [0u8; 32];
    zl.clone_from_slice(&zout[0..32]);

    // left = A + (8 * trunc28(zl)) B
    let left = point_plus(&pk, &point_of_trunc28_mul8(&zl))?;

    let mut out = [0u8; XPUB_SIZE];
    mk_xpub(&mut out, &left, &iout[32..64]);
    Ok(XPub::from_bytes(out))
}
