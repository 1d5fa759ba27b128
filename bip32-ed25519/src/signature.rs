use cryptoxide::util::fixed_time_eq;

use std::marker::PhantomData;
use std::{error, fmt};

use crate::hex;

pub const SIGNATURE_SIZE: usize = 64;

/// Possible errors during conversion from bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    LengthInvalid(usize),
}
impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignatureError::LengthInvalid(length) => write!(
                f,
                "Invalid signature length, expected {} but received {}",
                SIGNATURE_SIZE, length
            ),
        }
    }
}
impl error::Error for SignatureError {}

/// a signature with an associated type tag
///
/// The tag is the type of the signed object, so a signature of one kind of
/// object is not mistakenly checked against another one.
pub struct Signature<T> {
    bytes: [u8; SIGNATURE_SIZE],
    _phantom: PhantomData<T>,
}
impl<T> Clone for Signature<T> {
    fn clone(&self) -> Self {
        Self::from_bytes(self.bytes)
    }
}
impl<T> Signature<T> {
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Signature {
            bytes,
            _phantom: PhantomData,
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(SignatureError::LengthInvalid(bytes.len()));
        }
        let mut buf = [0u8; SIGNATURE_SIZE];
        buf[..].clone_from_slice(bytes);
        Ok(Self::from_bytes(buf))
    }

    pub fn from_hex(hex: &str) -> Result<Self, crate::Error> {
        let bytes = hex::decode(hex)?;
        Ok(Self::from_slice(&bytes)?)
    }

    /// change the type tag
    pub fn coerce<R>(self) -> Signature<R> {
        Signature::<R>::from_bytes(self.bytes)
    }

    pub fn to_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.bytes
    }
}
impl<T> PartialEq for Signature<T> {
    fn eq(&self, rhs: &Signature<T>) -> bool {
        fixed_time_eq(self.as_ref(), rhs.as_ref())
    }
}
impl<T> Eq for Signature<T> {}
impl<T> fmt::Display for Signature<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl<T> fmt::Debug for Signature<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl<T> AsRef<[u8]> for Signature<T> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
