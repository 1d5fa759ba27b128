//! derivation paths
//!
//! A path is a list of `DerivationIndex` applied in order from a root key.
//! The textual form follows BIP32: an optional `m` followed by `/`
//! separated indices, a hardened index being written with a `'`
//! (or `h`, `H`) suffix.
//!
//! # Example
//!
//! ```
//! use bip32_ed25519::{harden, DerivationPath};
//!
//! let path: DerivationPath = "m/1852'/1815'/0'/0/0".parse().unwrap();
//! assert_eq!(&path[..], &[harden(1852), harden(1815), harden(0), 0, 0][..]);
//! assert_eq!(path, DerivationPath::cip1852(0, 0, 0).unwrap());
//! assert_eq!(path.to_string(), "m/1852'/1815'/0'/0/0");
//! ```

use std::ops::Deref;
use std::{error, fmt, result, str};

use crate::derivation::{harden, DerivationIndex, DerivationType, HARDENED_OFFSET};

/// the CIP-1852 purpose, used hardened
pub const CIP1852_PURPOSE: u32 = 1852;
/// the ADA coin type (SLIP-44), used hardened
pub const ADA_COIN_TYPE: u32 = 1815;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PathError {
    /// a segment of the path is not a decimal number with an optional
    /// hardened marker. Contains the faulty segment.
    InvalidSegment(String),
    /// the value of a segment marked as hardened is already in the
    /// hardened range
    HardenedOutOfBound(u32),
    /// the account is expected to be a value below `0x80000000`, it is
    /// hardened by the path
    AccountOutOfBound(u32),
    /// the role is expected to be a soft derivation
    RoleOutOfBound(u32),
    /// the address index is expected to be a soft derivation
    IndexOutOfBound(u32),
}
impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathError::InvalidSegment(segment) => {
                write!(f, "Invalid derivation path segment \"{}\"", segment)
            }
            PathError::HardenedOutOfBound(given) => write!(
                f,
                "Hardened marker on an index already hardened: 0x{:x}",
                given
            ),
            PathError::AccountOutOfBound(given) => write!(
                f,
                "Account out of bound, expected a value below 0x{:x} but received 0x{:x}",
                HARDENED_OFFSET, given
            ),
            PathError::RoleOutOfBound(given) => write!(
                f,
                "Role out of bound, should have a soft derivation but received 0x{:x}",
                given
            ),
            PathError::IndexOutOfBound(given) => write!(
                f,
                "Index out of bound, should have a soft derivation but received 0x{:x}",
                given
            ),
        }
    }
}
impl error::Error for PathError {}

pub type Result<T> = result::Result<T, PathError>;

/// a list of derivation indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<DerivationIndex>);
impl DerivationPath {
    pub fn new(indices: Vec<DerivationIndex>) -> Self {
        DerivationPath(indices)
    }

    /// the CIP-1852 path of a Shelley address key:
    /// `m/1852'/1815'/account'/role/index`
    ///
    /// `role` is `0` for the external chain, `1` for the internal
    /// (change) chain and `2` for the staking key.
    pub fn cip1852(account: u32, role: u32, index: u32) -> Result<Self> {
        if account >= HARDENED_OFFSET {
            return Err(PathError::AccountOutOfBound(account));
        }
        if role >= HARDENED_OFFSET {
            return Err(PathError::RoleOutOfBound(role));
        }
        if index >= HARDENED_OFFSET {
            return Err(PathError::IndexOutOfBound(index));
        }
        Ok(DerivationPath(vec![
            harden(CIP1852_PURPOSE),
            harden(ADA_COIN_TYPE),
            harden(account),
            role,
            index,
        ]))
    }

    /// append an index at the end of the path
    pub fn push(&mut self, index: DerivationIndex) {
        self.0.push(index)
    }

    /// a new path made of this one followed by `index`
    pub fn append(&self, index: DerivationIndex) -> Self {
        let mut path = self.clone();
        path.push(index);
        path
    }

    /// true if every index of the path is soft, i.e. the path can be
    /// derived from an `XPub`
    pub fn is_soft(&self) -> bool {
        self.0
            .iter()
            .all(|index| index < &HARDENED_OFFSET)
    }
}
impl Deref for DerivationPath {
    type Target = [DerivationIndex];
    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}
impl AsRef<[DerivationIndex]> for DerivationPath {
    fn as_ref(&self) -> &[DerivationIndex] {
        self.0.as_ref()
    }
}
impl From<Vec<DerivationIndex>> for DerivationPath {
    fn from(indices: Vec<DerivationIndex>) -> Self {
        DerivationPath(indices)
    }
}
impl IntoIterator for DerivationPath {
    type Item = DerivationIndex;
    type IntoIter = ::std::vec::IntoIter<DerivationIndex>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a DerivationIndex;
    type IntoIter = ::std::slice::Iter<'a, DerivationIndex>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn parse_segment(segment: &str) -> Result<DerivationIndex> {
    let (digits, hardened) = match segment.as_bytes().last() {
        Some(b'\'') | Some(b'h') | Some(b'H') => (&segment[..segment.len() - 1], true),
        _ => (segment, false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::InvalidSegment(segment.to_owned()));
    }
    let value: u32 = digits
        .parse()
        .map_err(|_| PathError::InvalidSegment(segment.to_owned()))?;
    if hardened {
        if value >= HARDENED_OFFSET {
            return Err(PathError::HardenedOutOfBound(value));
        }
        Ok(harden(value))
    } else {
        Ok(value)
    }
}

impl str::FromStr for DerivationPath {
    type Err = PathError;
    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.split('/').peekable();
        if let Some(&"m") = segments.peek() {
            segments.next();
        }
        if s.is_empty() {
            return Ok(DerivationPath::default());
        }
        segments
            .map(parse_segment)
            .collect::<Result<Vec<_>>>()
            .map(DerivationPath)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for index in self.0.iter() {
            match DerivationType::from_index(*index) {
                DerivationType::Soft(index) => write!(f, "/{}", index)?,
                DerivationType::Hard(index) => write!(f, "/{}'", index - HARDENED_OFFSET)?,
            }
        }
        Ok(())
    }
}
