//! bech32 encoding of the extended keys
//!
//! Cardano uses bech32 with long payloads (96 bytes for a `XPrv`), the
//! 90 characters limit of BIP173 does not apply.
//!
//! ```
//! use bip32_ed25519::bech32;
//!
//! let encoded = bech32::encode("root_xsk", &[0u8; 96]).unwrap();
//! let (hrp, data) = bech32::decode(&encoded).unwrap();
//! assert_eq!(hrp, "root_xsk");
//! assert_eq!(data, vec![0u8; 96]);
//! ```
use ::bech32::{FromBase32, ToBase32};

use std::{error, fmt, result};

use crate::key::PrivateKeyError;

/// human readable part of the root private keys, as used by the Cardano
/// wallets (CIP-5)
pub const DEFAULT_HRP: &str = "root_xsk";

#[derive(Debug)]
pub enum Error {
    /// the string is not a valid bech32 string
    Bech32Malformed(::bech32::Error),
    /// the payload is not a valid key
    DataInvalid(PrivateKeyError),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bech32Malformed(_) => write!(f, "Failed to parse bech32, invalid data format"),
            Error::DataInvalid(_) => write!(f, "Failed to parse data decoded from bech32"),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Bech32Malformed(source) => Some(source),
            Error::DataInvalid(source) => Some(source),
        }
    }
}
impl From<::bech32::Error> for Error {
    fn from(error: ::bech32::Error) -> Self {
        Error::Bech32Malformed(error)
    }
}
impl From<PrivateKeyError> for Error {
    fn from(error: PrivateKeyError) -> Self {
        Error::DataInvalid(error)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// encode the bytes with the given human readable part
///
/// The human readable part must be made of printable US-ASCII and
/// must not mix upper and lower case.
pub fn encode(hrp: &str, bytes: &[u8]) -> Result<String> {
    Ok(::bech32::encode(hrp, bytes.to_base32())?)
}

/// decode a bech32 string into its human readable part and its payload
pub fn decode(s: &str) -> Result<(String, Vec<u8>)> {
    let (hrp, data) = ::bech32::decode(s)?;
    let bytes = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    const ROOT_XPRV: &str = "f00c561b7a7e9e094e8947449e64b371135a9ddee06da7e2390fe675339b41465b1850e34bc65069860c189d52576dc552a294409315268957abc9cbdb807a7393834e67c17196b5f126849c5f770293f5059e07f9098ec3628f52cc67948892";
    const ROOT_BECH32: &str = "xprv17qx9vxm6060qjn5fgazfue9nwyf448w7upk60c3epln82vumg9r9kxzsud9uv5rfscxp382j2aku254zj3qfx9fx39t6hjwtmwq85uunsd8x0st3j66lzf5yn30hwq5n75zeuplepx8vxc502txx09ygjgx06n0p";

    #[test]
    fn decode_long_payload() {
        let (hrp, data) = decode(ROOT_BECH32).unwrap();
        assert_eq!(hrp, "xprv");
        assert_eq!(hex::encode(&data), ROOT_XPRV);
    }

    #[test]
    fn encode_long_payload() {
        let data = hex::decode(ROOT_XPRV).unwrap();
        assert_eq!(encode("xprv", &data).unwrap(), ROOT_BECH32);
    }

    #[test]
    fn invalid_checksum() {
        let mut s = ROOT_BECH32.to_string();
        s.pop();
        s.push('q');
        match decode(&s) {
            Err(Error::Bech32Malformed(_)) => {}
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn decode_upper_case() {
        let (hrp, data) = decode(&ROOT_BECH32.to_uppercase()).unwrap();
        assert_eq!(hrp, "xprv");
        assert_eq!(hex::encode(&data), ROOT_XPRV);
    }
}
