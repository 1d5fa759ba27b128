//! simple implementation of hexadecimal encoding and decoding
//!
//! The decoding is strict: only hexadecimal digits (lower or upper case)
//! and an even number of them.
//!
//! # Example
//!
//! ```
//! use bip32_ed25519::hex::{encode, decode};
//!
//! let example = b"some bytes";
//!
//! assert!(example.as_ref() == decode(&encode(example)).unwrap().as_slice());
//! ```
//!
use std::{error, fmt, result};

const ALPHABET: &[u8] = b"0123456789abcdef";

/// hexadecimal encoding/decoding potential errors
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// error when a given character is not part of the supported
    /// hexadecimal alphabet. Contains the index of the faulty byte
    UnknownSymbol(usize),
    /// the input has an odd number of symbols. Contains the length of the input
    OddLength(usize),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownSymbol(idx) => write!(f, "Unknown symbol at byte index {}", idx),
            Error::OddLength(len) => write!(f, "Odd number of hexadecimal symbols ({})", len),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// encode bytes into an hexadecimal string
///
///  # Example
///
/// ```
/// use bip32_ed25519::hex::encode;
///
/// let example = b"some bytes";
///
/// assert_eq!("736f6d65206279746573", encode(example));
/// ```
pub fn encode(input: &[u8]) -> String {
    let mut v = String::with_capacity(input.len() * 2);
    for &byte in input.iter() {
        v.push(ALPHABET[(byte >> 4) as usize] as char);
        v.push(ALPHABET[(byte & 0xf) as usize] as char);
    }
    v
}

fn symbol(idx: usize, byte: u8) -> Result<u8> {
    match byte {
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'0'..=b'9' => Ok(byte - b'0'),
        _ => Err(Error::UnknownSymbol(idx)),
    }
}

/// decode the given hexadecimal string
///
///  # Example
///
/// ```
/// use bip32_ed25519::hex::{Error, decode};
///
/// assert_eq!(decode("736f6d65"), Ok(b"some".to_vec()));
/// assert_eq!(decode("736f6d6"), Err(Error::OddLength(7)));
/// assert_eq!(decode("73 f"), Err(Error::UnknownSymbol(2)));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let input = input.as_bytes();
    if input.len() % 2 != 0 {
        return Err(Error::OddLength(input.len()));
    }

    let mut b = Vec::with_capacity(input.len() / 2);
    for (idx, pair) in input.chunks(2).enumerate() {
        let hi = symbol(2 * idx, pair[0])?;
        let lo = symbol(2 * idx + 1, pair[1])?;
        b.push(hi << 4 | lo);
    }
    Ok(b)
}
