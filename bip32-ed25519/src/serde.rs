//! serde serializer and deserializer for the keys and signatures
//!
//! Human readable formats get `XPrv` in bech32 (any prefix accepted,
//! `root_xsk` written) and `XPub` or `Signature` in hexadecimal. Other
//! formats get the raw bytes.

use serde::{
    de::{Deserialize, Deserializer, Error, Visitor},
    ser::{Serialize, Serializer},
};
use std::{fmt, marker::PhantomData};

use crate::bech32::Error as Bech32Error;
use crate::hex;
use crate::key::{PrivateKeyError, PublicKeyError, XPrv, XPub, XPRV_SIZE, XPUB_SIZE};
use crate::signature::{Signature, SignatureError, SIGNATURE_SIZE};

impl Serialize for XPrv {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_bech32_str())
        } else {
            serializer.serialize_bytes(self.as_ref())
        }
    }
}
impl Serialize for XPub {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(self.as_ref()))
        } else {
            serializer.serialize_bytes(self.as_ref())
        }
    }
}
impl<T> Serialize for Signature<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(self.as_ref()))
        } else {
            serializer.serialize_bytes(self.as_ref())
        }
    }
}

impl<'de> Deserialize<'de> for XPrv {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(XPrvVisitor)
        } else {
            deserializer.deserialize_bytes(XPrvVisitor)
        }
    }
}
impl<'de> Deserialize<'de> for XPub {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(XPubVisitor)
        } else {
            deserializer.deserialize_bytes(XPubVisitor)
        }
    }
}
impl<'de, T> Deserialize<'de> for Signature<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor = SignatureVisitor {
            _marker: PhantomData,
        };
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(visitor)
        } else {
            deserializer.deserialize_bytes(visitor)
        }
    }
}

struct XPrvVisitor;
struct XPubVisitor;
struct SignatureVisitor<T> {
    _marker: PhantomData<T>,
}

fn private_key_error<E: Error>(err: PrivateKeyError) -> E {
    match err {
        PrivateKeyError::LengthInvalid(_) => E::custom(format!(
            "Invalid size (expected: {}bytes)",
            XPRV_SIZE
        )),
        err => E::custom(format!("Invalid structure: {}", err)),
    }
}

impl<'de> Visitor<'de> for XPrvVisitor {
    type Value = XPrv;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Expecting an extended private key")
    }

    fn visit_str<'a, E>(self, v: &'a str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match XPrv::from_bech32(v) {
            Err(Bech32Error::DataInvalid(err)) => Err(private_key_error(err)),
            Err(Bech32Error::Bech32Malformed(err)) => {
                Err(E::custom(format!("Invalid bech32: {}", err)))
            }
            Ok(key) => Ok(key),
        }
    }

    fn visit_bytes<'a, E>(self, v: &'a [u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        XPrv::from_slice_unverified(v).map_err(private_key_error)
    }
}

impl<'de> Visitor<'de> for XPubVisitor {
    type Value = XPub;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Expecting an extended public key")
    }

    fn visit_str<'a, E>(self, v: &'a str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let bytes = hex::decode(v).map_err(|err| E::custom(format!("Invalid hex: {}", err)))?;
        self.visit_bytes(&bytes)
    }

    fn visit_bytes<'a, E>(self, v: &'a [u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match XPub::from_slice(v) {
            Err(PublicKeyError::LengthInvalid(_)) => Err(E::custom(format!(
                "Invalid size (expected: {}bytes)",
                XPUB_SIZE
            ))),
            Ok(key) => Ok(key),
        }
    }
}

impl<'de, T> Visitor<'de> for SignatureVisitor<T> {
    type Value = Signature<T>;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Expecting a signature")
    }

    fn visit_str<'a, E>(self, v: &'a str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        let bytes = hex::decode(v).map_err(|err| E::custom(format!("Invalid hex: {}", err)))?;
        self.visit_bytes(&bytes)
    }

    fn visit_bytes<'a, E>(self, v: &'a [u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match Signature::from_slice(v) {
            Err(SignatureError::LengthInvalid(_)) => Err(E::custom(format!(
                "Invalid size (expected: {}bytes)",
                SIGNATURE_SIZE
            ))),
            Ok(signature) => Ok(signature),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use bincode;
    use serde_json;

    quickcheck! {
        fn xprv_encode_decode_bincode(xprv: XPrv) -> bool {
            let encoded = bincode::serialize(&xprv).unwrap();
            let decoded : XPrv = bincode::deserialize(&encoded).unwrap();

            xprv == decoded
        }
        fn xprv_encode_decode_json(xprv: XPrv) -> bool {
            let encoded = serde_json::to_string(&xprv).unwrap();
            let decoded : XPrv = serde_json::from_str(&encoded).unwrap();

            xprv == decoded
        }

        fn xpub_encode_decode_bincode(xpub: XPub) -> bool {
            let encoded = bincode::serialize(&xpub).unwrap();
            let decoded : XPub = bincode::deserialize(&encoded).unwrap();

            xpub == decoded
        }
        fn xpub_encode_decode_json(xpub: XPub) -> bool {
            let encoded = serde_json::to_string(&xpub).unwrap();
            let decoded : XPub = serde_json::from_str(&encoded).unwrap();

            xpub == decoded
        }

        fn signature_encode_decode_bincode(xprv: XPrv, message: Vec<u8>) -> bool {
            let signature : Signature<Vec<u8>> = xprv.sign(&message);
            let encoded = bincode::serialize(&signature).unwrap();
            let decoded : Signature<Vec<u8>> = bincode::deserialize(&encoded).unwrap();

            signature == decoded
        }
        fn signature_encode_decode_json(xprv: XPrv, message: Vec<u8>) -> bool {
            let signature : Signature<Vec<u8>> = xprv.sign(&message);
            let encoded = serde_json::to_string(&signature).unwrap();
            let decoded : Signature<Vec<u8>> = serde_json::from_str(&encoded).unwrap();

            signature == decoded
        }
    }

    #[test]
    fn xprv_json_is_bech32() {
        let xprv = XPrv::from_entropy(&[1; 32], b"");
        let encoded = serde_json::to_string(&xprv).unwrap();
        assert_eq!(encoded, format!("\"{}\"", xprv.to_bech32_str()));
        assert!(encoded.starts_with("\"root_xsk1"));
    }

    #[test]
    fn xpub_json_is_hex() {
        let xpub = XPrv::from_entropy(&[1; 32], b"").public();
        let encoded = serde_json::to_string(&xpub).unwrap();
        assert_eq!(encoded, format!("\"{}\"", xpub));
    }

    #[test]
    fn unclamped_xprv_roundtrip() {
        let xprv = XPrv::from_parts(&[0xff; 32], &[0x22; 32], &[0x33; 32]);

        let encoded = serde_json::to_string(&xprv).unwrap();
        let decoded: XPrv = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, xprv);

        let encoded = bincode::serialize(&xprv).unwrap();
        let decoded: XPrv = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, xprv);
    }

    #[test]
    fn invalid_json() {
        assert!(serde_json::from_str::<XPub>("\"00ff\"").is_err());
        assert!(serde_json::from_str::<XPub>("\"zz\"").is_err());
        assert!(serde_json::from_str::<XPrv>("\"root_xsk1qqqqqq\"").is_err());
        assert!(serde_json::from_str::<Signature<()>>("\"00\"").is_err());
    }
}
