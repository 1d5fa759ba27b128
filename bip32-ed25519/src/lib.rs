//! Ed25519 extended keys with BIP32 style hierarchical derivation
//!
//! Follow the Ed25519-BIP32 paper (Khovratovich, Law), with the derivation
//! scheme used by Cardano wallets (little endian indices, carry propagating
//! scalar additions).
//!
//! Supports:
//! * Transform BIP39 entropy to a root extended private key (PBKDF2-HMAC-SHA512)
//! * Hard and soft derivation of `XPrv` using 32 bits indices
//! * Soft derivation of `XPub`, without the private key
//! * Signing and verifying with the extended keys
//! * Bech32 serialization of `XPrv`
//!
//! ```
//! use bip32_ed25519::{harden, XPrv};
//!
//! let root = XPrv::from_entropy(&[0u8; 16], b"");
//! let account = root
//!     .derive(harden(1852))
//!     .derive(harden(1815))
//!     .derive(harden(0));
//!
//! // soft derivation commutes with the public projection
//! let xpub = account.public().derive(0).unwrap();
//! assert_eq!(xpub, account.derive(0).public());
//! ```

#![cfg_attr(feature = "with-bench", feature(test))]

#[cfg(test)]
#[cfg(feature = "with-bench")]
extern crate test;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
#[cfg(all(not(test), feature = "property-test-api"))]
extern crate quickcheck;

pub mod bech32;
mod derivation;
mod error;
pub mod hex;
mod key;
pub mod path;
pub mod pbkdf2;
mod signature;

#[cfg(any(test, feature = "property-test-api"))]
pub mod arbitrary;

#[cfg(feature = "generic-serialization")]
mod serde;


#[cfg(test)]
#[cfg(feature = "with-bench")]
mod bench;

pub use derivation::{harden, DerivationError, DerivationIndex, DerivationType};
pub use error::{Error, Result};
pub use key::{
    PrivateKeyError, PublicKeyError, XPrv, XPub, CHAIN_CODE_SIZE, EXTENDED_SECRET_KEY_SIZE,
    PUBLIC_KEY_SIZE, XPRV_SIZE, XPUB_SIZE,
};
pub use path::DerivationPath;
pub use signature::{Signature, SignatureError, SIGNATURE_SIZE};
