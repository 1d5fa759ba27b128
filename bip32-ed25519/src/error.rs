use std::{error, fmt, result};

use crate::bech32;
use crate::derivation::DerivationError;
use crate::hex;
use crate::key::{PrivateKeyError, PublicKeyError};
use crate::path::PathError;
use crate::pbkdf2;
use crate::signature::SignatureError;

/// all the errors of the crate, when the operation can fail in more
/// than one way (decoding then validating for example)
#[derive(Debug)]
pub enum Error {
    PrivateKey(PrivateKeyError),
    PublicKey(PublicKeyError),
    Signature(SignatureError),
    Hexadecimal(hex::Error),
    Pbkdf2(pbkdf2::Error),
    Bech32(bech32::Error),
    Derivation(DerivationError),
    Path(PathError),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::PrivateKey(_) => write!(f, "invalid extended private key"),
            Error::PublicKey(_) => write!(f, "invalid extended public key"),
            Error::Signature(_) => write!(f, "invalid signature"),
            Error::Hexadecimal(_) => write!(f, "invalid hexadecimal"),
            Error::Pbkdf2(_) => write!(f, "invalid key stretching parameters"),
            Error::Bech32(_) => write!(f, "invalid bech32"),
            Error::Derivation(_) => write!(f, "derivation failed"),
            Error::Path(_) => write!(f, "invalid derivation path"),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::PrivateKey(err) => Some(err),
            Error::PublicKey(err) => Some(err),
            Error::Signature(err) => Some(err),
            Error::Hexadecimal(err) => Some(err),
            Error::Pbkdf2(err) => Some(err),
            Error::Bech32(err) => Some(err),
            Error::Derivation(err) => Some(err),
            Error::Path(err) => Some(err),
        }
    }
}

impl From<PrivateKeyError> for Error {
    fn from(e: PrivateKeyError) -> Error {
        Error::PrivateKey(e)
    }
}
impl From<PublicKeyError> for Error {
    fn from(e: PublicKeyError) -> Error {
        Error::PublicKey(e)
    }
}
impl From<SignatureError> for Error {
    fn from(e: SignatureError) -> Error {
        Error::Signature(e)
    }
}
impl From<hex::Error> for Error {
    fn from(e: hex::Error) -> Error {
        Error::Hexadecimal(e)
    }
}
impl From<pbkdf2::Error> for Error {
    fn from(e: pbkdf2::Error) -> Error {
        Error::Pbkdf2(e)
    }
}
impl From<bech32::Error> for Error {
    fn from(e: bech32::Error) -> Error {
        Error::Bech32(e)
    }
}
impl From<DerivationError> for Error {
    fn from(e: DerivationError) -> Error {
        Error::Derivation(e)
    }
}
impl From<PathError> for Error {
    fn from(e: PathError) -> Error {
        Error::Path(e)
    }
}

pub type Result<T> = result::Result<T, Error>;
