use cryptoxide::digest::Digest;
use cryptoxide::ed25519;
use cryptoxide::ed25519::signature_extended;
use cryptoxide::sha2::Sha512;
use cryptoxide::util::fixed_time_eq;
use zeroize::Zeroize;

use std::error::Error;
use std::hash::{Hash, Hasher};
use std::{fmt, str};

use crate::bech32::{self, DEFAULT_HRP};
use crate::derivation::{self, DerivationError, DerivationIndex};
use crate::hex;
use crate::path::DerivationPath;
use crate::pbkdf2;
use crate::signature::Signature;

/// Extended Private key size in bytes
pub const XPRV_SIZE: usize = 96;
/// Ed25519 extended secret key (scalar and nonce) size in bytes
pub const EXTENDED_SECRET_KEY_SIZE: usize = 64;

/// Extended Public key size in bytes
pub const XPUB_SIZE: usize = 64;
pub const PUBLIC_KEY_SIZE: usize = 32;
pub const CHAIN_CODE_SIZE: usize = 32;

/// Possible errors during conversion from bytes
///
/// HighestBitsInvalid and LowestBitsInvalid are errors
/// reported linked to the shape of a normal extended ed25519 key.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKeyError {
    LengthInvalid(usize),
    HighestBitsInvalid,
    LowestBitsInvalid,
}

/// Possible errors during conversion from bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyError {
    LengthInvalid(usize),
}

/// HDWallet extended private key
///
/// Effectively this is an ed25519 extended secret key (64 bytes) followed by a chain code (32 bytes):
///
/// * bytes `0..32`: the scalar `kL`, `0b01xxxxxx` for the last byte and multiple of 8;
/// * bytes `32..64`: the nonce half `kR`;
/// * bytes `64..96`: the chain code.
///
/// The value is immutable, all the derivations return a new `XPrv`, and
/// the bytes are wiped when it is dropped.
pub struct XPrv([u8; XPRV_SIZE]);
impl XPrv {
    /// create the root private key from BIP39 entropy, as Cardano (Icarus)
    /// wallets do: `PBKDF2-HMAC-SHA512(password, entropy, 4096, 96)`
    /// then normalized with `normalize_bytes_force3rd`.
    ///
    /// The password is **not** a spending password, it is the optional
    /// BIP39 passphrase and is, most of the time, empty.
    ///
    /// ```
    /// use bip32_ed25519::XPrv;
    ///
    /// let xprv = XPrv::from_entropy(&[0x1f; 20], b"");
    /// assert!(xprv.is_3rd_highest_bit_clear());
    /// ```
    pub fn from_entropy(entropy: &[u8], password: &[u8]) -> Self {
        let mut bytes = [0u8; XPRV_SIZE];
        pbkdf2::calculate(password, entropy, pbkdf2::ENTROPY_ITERATIONS, &mut bytes);
        Self::normalize_bytes_force3rd(bytes)
    }

    /// same as `from_entropy` but the entropy is given as an hexadecimal
    /// string. The string must only contain hexadecimal digits and have an
    /// even length.
    ///
    /// ```
    /// use bip32_ed25519::XPrv;
    ///
    /// let xprv = XPrv::from_entropy_hex("0ccb74f36b7da1649a8144675522d4d8097c6412", b"");
    /// assert!(xprv.is_ok());
    /// assert!(XPrv::from_entropy_hex("0ccb7", b"").is_err());
    /// ```
    pub fn from_entropy_hex(entropy: &str, password: &[u8]) -> Result<Self, hex::Error> {
        let mut bytes = hex::decode(entropy)?;
        let xprv = Self::from_entropy(&bytes, password);
        bytes.zeroize();
        Ok(xprv)
    }

    /// takes the given raw bytes and perform some modifications to normalize
    /// to a valid Ed25519 extended key, but it does also force
    /// the 3rd highest bit to be cleared too.
    pub fn normalize_bytes_force3rd(mut bytes: [u8; XPRV_SIZE]) -> Self {
        bytes[0] &= 0b1111_1000;
        bytes[31] &= 0b0001_1111;
        bytes[31] |= 0b0100_0000;

        Self::from_bytes(bytes)
    }

    /// Check if the 3rd highest bit is clear as expected from the paper
    pub fn is_3rd_highest_bit_clear(&self) -> bool {
        (self.0[31] & 0b0010_0000) == 0
    }

    /// Clear the 3rd highest bit as expected from the paper setting
    ///
    /// This is the only operation modifying a `XPrv` in place.
    pub fn clear_3rd_highest_bit(&mut self) -> &mut Self {
        self.0[31] &= 0b1101_1111;
        self
    }

    /// Takes a non-extended Ed25519 secret key and hash through SHA512 it in the same way the standard
    /// Ed25519 signature system make extended key, but *also* force clear the 3rd highest bit of the key
    /// instead of returning an error
    pub fn from_nonextended_force(bytes: &[u8; 32], chain_code: &[u8; CHAIN_CODE_SIZE]) -> Self {
        let mut extended_out = [0u8; XPRV_SIZE];
        let mut hasher = Sha512::new();
        hasher.input(bytes);
        hasher.result(&mut extended_out[0..64]);
        hasher.reset();
        extended_out[64..96].clone_from_slice(chain_code);
        Self::normalize_bytes_force3rd(extended_out)
    }

    /// Create a `XPrv` from an already valid extended secret key and a chain code.
    ///
    /// No normalization or check is performed.
    pub fn from_extended_and_chaincode(
        extended: &[u8; EXTENDED_SECRET_KEY_SIZE],
        chain_code: &[u8; CHAIN_CODE_SIZE],
    ) -> Self {
        let mut out = [0u8; XPRV_SIZE];
        mk_xprv(&mut out, &extended[0..32], &extended[32..64], chain_code);
        Self::from_bytes(out)
    }

    /// Create a `XPrv` from its three components: the scalar (`kL`), the
    /// nonce half (`kR`) and the chain code.
    ///
    /// No check is performed on the scalar.
    pub fn from_parts(left: &[u8; 32], right: &[u8; 32], chain_code: &[u8; CHAIN_CODE_SIZE]) -> Self {
        let mut out = [0u8; XPRV_SIZE];
        mk_xprv(&mut out, left, right, chain_code);
        Self::from_bytes(out)
    }

    // Create a XPrv from the given bytes.
    //
    // This function does not perform any validity check and should not be used outside
    // of this crate.
    pub(crate) fn from_bytes(bytes: [u8; XPRV_SIZE]) -> Self {
        XPrv(bytes)
    }

    /// Create a `XPrv` by taking ownership of the given array
    ///
    /// This function may returns an error if it does not have the expected
    /// format.
    ///
    /// This function allow the 3rd highest bit to not be clear (to handle potential derived valid xprv),
    /// but self.is_3rd_highest_bit_clear() can be called to check if the 3rd highest bit
    /// is assumed to be clear or not.
    pub fn from_bytes_verified(bytes: [u8; XPRV_SIZE]) -> Result<Self, PrivateKeyError> {
        let scalar = &bytes[0..32];
        let last = scalar[31];
        let first = scalar[0];

        if (last & 0b1100_0000) != 0b0100_0000 {
            return Err(PrivateKeyError::HighestBitsInvalid);
        }
        if (first & 0b0000_0111) != 0b0000_0000 {
            return Err(PrivateKeyError::LowestBitsInvalid);
        }

        Ok(XPrv(bytes))
    }

    /// Create a `XPrv` from the given slice, the slice is either:
    ///
    /// * `XPRV_SIZE` bytes: an extended private key;
    /// * 64 bytes: a non extended secret key followed by a chain code,
    ///   promoted with `from_nonextended_force`.
    ///
    /// The clamping of the scalar is then verified.
    pub fn from_slice_verified(bytes: &[u8]) -> Result<Self, PrivateKeyError> {
        let buf = match bytes.len() {
            XPRV_SIZE => {
                let mut buf = [0u8; XPRV_SIZE];
                buf[..].clone_from_slice(bytes);
                buf
            }
            64 => {
                let mut secret = [0u8; 32];
                let mut chain_code = [0u8; CHAIN_CODE_SIZE];
                secret.clone_from_slice(&bytes[0..32]);
                chain_code.clone_from_slice(&bytes[32..64]);
                let xprv = Self::from_nonextended_force(&secret, &chain_code);
                secret.zeroize();
                xprv.to_bytes()
            }
            len => return Err(PrivateKeyError::LengthInvalid(len)),
        };
        XPrv::from_bytes_verified(buf)
    }

    // Create a `XPrv` from exactly `XPRV_SIZE` bytes, without checking the
    // scalar. Used by the textual and serde decoders so that every key
    // this crate produces (derived children, `from_parts`) round trips.
    pub(crate) fn from_slice_unverified(bytes: &[u8]) -> Result<Self, PrivateKeyError> {
        if bytes.len() != XPRV_SIZE {
            return Err(PrivateKeyError::LengthInvalid(bytes.len()));
        }
        let mut buf = [0u8; XPRV_SIZE];
        buf[..].clone_from_slice(bytes);
        Ok(Self::from_bytes(buf))
    }

    /// Create a `XPrv` from a bech32 string, whatever its human readable part.
    ///
    /// The payload is always the raw 96 bytes, any other length is
    /// `DataInvalid(LengthInvalid(_))`. The clamping is not verified, use
    /// `from_slice_verified` on the decoded bytes for a strict import.
    pub fn from_bech32(s: &str) -> Result<Self, bech32::Error> {
        let (_, mut bytes) = bech32::decode(s)?;
        let xprv = Self::from_slice_unverified(&bytes);
        bytes.zeroize();
        Ok(xprv?)
    }

    /// encode the raw 96 bytes in bech32 with the given human readable part
    pub fn to_bech32(&self, hrp: &str) -> Result<String, bech32::Error> {
        bech32::encode(hrp, self.as_ref())
    }

    /// encode the raw 96 bytes in bech32 with the `root_xsk` human readable part
    pub fn to_bech32_str(&self) -> String {
        self.to_bech32(DEFAULT_HRP)
            .expect("the default human readable part is valid")
    }

    /// Get the associated `XPub`
    ///
    pub fn public(&self) -> XPub {
        let pk = mk_public_key(&self.extended_secret_key());
        let mut out = [0u8; XPUB_SIZE];
        mk_xpub(&mut out, &pk, &self.0[64..]);
        XPub::from_bytes(out)
    }

    /// sign the given message with the `XPrv`.
    ///
    pub fn sign<T>(&self, message: &[u8]) -> Signature<T> {
        Signature::from_bytes(signature_extended(message, &self.0[0..64]))
    }

    /// verify a given signature
    ///
    pub fn verify<T>(&self, message: &[u8], signature: &Signature<T>) -> bool {
        let xpub = self.public();
        xpub.verify(message, signature)
    }

    /// derive a child `XPrv`, hard if the index is `>= 0x80000000`
    pub fn derive(&self, index: DerivationIndex) -> Self {
        derivation::private(self, index)
    }

    /// derive along every index of the path, in order
    pub fn derive_path(&self, path: &DerivationPath) -> Self {
        path.iter()
            .fold(self.clone(), |xprv, index| xprv.derive(*index))
    }

    /// the ed25519 extended secret key (scalar followed by the nonce half)
    pub fn extended_secret_key(&self) -> [u8; EXTENDED_SECRET_KEY_SIZE] {
        let mut out = [0u8; EXTENDED_SECRET_KEY_SIZE];
        out.clone_from_slice(&self.0[0..64]);
        out
    }

    pub fn chain_code(&self) -> [u8; CHAIN_CODE_SIZE] {
        let mut out = [0u8; CHAIN_CODE_SIZE];
        out.clone_from_slice(&self.0[64..96]);
        out
    }

    /// copy of the raw 96 bytes
    pub fn to_bytes(&self) -> [u8; XPRV_SIZE] {
        self.0
    }
}
impl PartialEq for XPrv {
    fn eq(&self, rhs: &XPrv) -> bool {
        fixed_time_eq(self.as_ref(), rhs.as_ref())
    }
}
impl Eq for XPrv {}
impl Clone for XPrv {
    fn clone(&self) -> Self {
        Self::from_bytes(self.0)
    }
}
impl fmt::Debug for XPrv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Display for XPrv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bech32_str())
    }
}
impl str::FromStr for XPrv {
    type Err = bech32::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}
impl AsRef<[u8]> for XPrv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl From<XPrv> for [u8; XPRV_SIZE] {
    fn from(v: XPrv) -> [u8; XPRV_SIZE] {
        v.0
    }
}
impl Drop for XPrv {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Extended Public Key (Point + ChainCode)
#[derive(Clone, Copy)]
pub struct XPub([u8; XPUB_SIZE]);
impl XPub {
    /// create a `XPub` by taking ownership of the given array
    pub fn from_bytes(bytes: [u8; XPUB_SIZE]) -> Self {
        XPub(bytes)
    }

    /// create a `XPub` from the given slice. This slice must be of size `XPUB_SIZE`
    /// otherwise it will return `Err`.
    ///
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PublicKeyError> {
        if bytes.len() != XPUB_SIZE {
            return Err(PublicKeyError::LengthInvalid(bytes.len()));
        }
        let mut buf = [0u8; XPUB_SIZE];
        buf[..].clone_from_slice(bytes);
        Ok(Self::from_bytes(buf))
    }

    /// create a `XPub` from a given hexadecimal string
    ///
    /// ```
    /// use bip32_ed25519::XPub;
    ///
    /// let xpub = XPub::from_hex("1c0c3ae1825e90b6ddda3f40a122c007e1008e83b2e102c142baefb721d72c1a5d3661deb9064f2d0e03fe85d68070b2fe33b4916059658e28ac7f7f91ca4b12");
    ///
    /// assert!(xpub.is_ok());
    /// ```
    ///
    pub fn from_hex(hex: &str) -> Result<Self, crate::Error> {
        let bytes = hex::decode(hex)?;
        Ok(Self::from_slice(&bytes)?)
    }

    /// verify a signature
    ///
    pub fn verify<T>(&self, message: &[u8], signature: &Signature<T>) -> bool {
        ed25519::verify(message, &self.0[0..32], signature.as_ref())
    }

    /// derive a child `XPub`. Public derivation is always soft: an index
    /// `>= 0x80000000` is reinterpreted as the soft index `index - 0x80000000`.
    pub fn derive(&self, index: DerivationIndex) -> Result<Self, DerivationError> {
        derivation::public(self, index)
    }

    /// derive along every index of the path, in order
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, DerivationError> {
        path.iter()
            .try_fold(*self, |xpub, index| xpub.derive(*index))
    }

    /// the encoded Ed25519 point, without the chain code
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out.clone_from_slice(&self.0[0..32]);
        out
    }

    pub fn chain_code(&self) -> [u8; CHAIN_CODE_SIZE] {
        let mut out = [0u8; CHAIN_CODE_SIZE];
        out.clone_from_slice(&self.0[32..64]);
        out
    }
}
impl PartialEq for XPub {
    fn eq(&self, rhs: &XPub) -> bool {
        fixed_time_eq(self.as_ref(), rhs.as_ref())
    }
}
impl Eq for XPub {}
impl Hash for XPub {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(&self.0)
    }
}
impl fmt::Display for XPub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Debug for XPub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl AsRef<[u8]> for XPub {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl From<XPub> for [u8; XPUB_SIZE] {
    fn from(v: XPub) -> [u8; XPUB_SIZE] {
        v.0
    }
}

impl fmt::Display for PublicKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PublicKeyError::LengthInvalid(length) => write!(
                f,
                "Invalid public key length, expected {} but received {}",
                XPUB_SIZE, length
            ),
        }
    }
}
impl Error for PublicKeyError {}

impl fmt::Display for PrivateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrivateKeyError::LengthInvalid(length) => write!(
                f,
                "Invalid private key length, expected {} (or 64) but received {}",
                XPRV_SIZE, length
            ),
            PrivateKeyError::HighestBitsInvalid => {
                f.write_str("Invalid highest bits, expected 0b01 in the scalar")
            }
            PrivateKeyError::LowestBitsInvalid => {
                f.write_str("Invalid lowest bits, expected 0b000 in the scalar")
            }
        }
    }
}
impl Error for PrivateKeyError {}

pub(crate) fn mk_xprv(out: &mut [u8; XPRV_SIZE], kl: &[u8], kr: &[u8], cc: &[u8]) {
    assert!(kl.len() == 32);
    assert!(kr.len() == 32);
    assert!(cc.len() == CHAIN_CODE_SIZE);

    out[0..32].clone_from_slice(kl);
    out[32..64].clone_from_slice(kr);
    out[64..96].clone_from_slice(cc);
}

pub(crate) fn mk_xpub(out: &mut [u8; XPUB_SIZE], pk: &[u8], cc: &[u8]) {
    assert!(pk.len() == PUBLIC_KEY_SIZE);
    assert!(cc.len() == CHAIN_CODE_SIZE);

    out[0..32].clone_from_slice(pk);
    out[32..64].clone_from_slice(cc);
}

pub(crate) fn mk_public_key(extended_secret: &[u8; EXTENDED_SECRET_KEY_SIZE]) -> [u8; PUBLIC_KEY_SIZE] {
    ed25519::to_public(extended_secret)
}
