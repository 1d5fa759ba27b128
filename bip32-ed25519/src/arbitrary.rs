//! `quickcheck::Arbitrary` implementations, to write property tests
//! against the keys of this crate.
use quickcheck::{Arbitrary, Gen};

use crate::derivation::{DerivationIndex, HARDENED_OFFSET};
use crate::key::{XPrv, XPub, XPRV_SIZE};
use crate::path::DerivationPath;

fn arbitrary_bytes<G: Gen>(g: &mut G, size: usize) -> Vec<u8> {
    ::std::iter::repeat_with(|| u8::arbitrary(g))
        .take(size)
        .collect()
}

impl Arbitrary for XPrv {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let mut bytes = [0u8; XPRV_SIZE];
        bytes.copy_from_slice(&arbitrary_bytes(g, XPRV_SIZE));
        XPrv::normalize_bytes_force3rd(bytes)
    }
}

impl Arbitrary for XPub {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        XPrv::arbitrary(g).public()
    }
}

/// a soft derivation index, in `0..0x80000000`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftIndex(pub DerivationIndex);
impl Arbitrary for SoftIndex {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        SoftIndex(u32::arbitrary(g) % HARDENED_OFFSET)
    }
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(SoftIndex))
    }
}

/// a hard derivation index, in `0x80000000..=0xffffffff`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardIndex(pub DerivationIndex);
impl Arbitrary for HardIndex {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        HardIndex(u32::arbitrary(g) | HARDENED_OFFSET)
    }
}

/// BIP39 entropy: 16, 20, 24, 28 or 32 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entropy(pub Vec<u8>);
impl Arbitrary for Entropy {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let len = 16 + 4 * (usize::arbitrary(g) % 5);
        Entropy(arbitrary_bytes(g, len))
    }
}

/// a path of up to 5 indices, soft or hard
impl Arbitrary for DerivationPath {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let len = usize::arbitrary(g) % 6;
        let indices = ::std::iter::repeat_with(|| u32::arbitrary(g))
            .take(len)
            .collect();
        DerivationPath::new(indices)
    }
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.to_vec().shrink().map(DerivationPath::new))
    }
}
