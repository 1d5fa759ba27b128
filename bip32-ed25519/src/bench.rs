use crate::*;

fn root() -> XPrv {
    XPrv::from_nonextended_force(&[0; 32], &[0; CHAIN_CODE_SIZE])
}

#[bench]
fn derivate_hard(b: &mut test::Bencher) {
    let sk = root();
    b.iter(|| {
        let _ = sk.derive(harden(0));
    })
}

#[bench]
fn derivate_soft_xprv(b: &mut test::Bencher) {
    let sk = root();
    b.iter(|| {
        let _ = sk.derive(0);
    })
}

#[bench]
fn derivate_soft_xpub(b: &mut test::Bencher) {
    let pk = root().public();
    b.iter(|| {
        let _ = pk.derive(0);
    })
}

#[bench]
fn derivate_cip1852_path(b: &mut test::Bencher) {
    let sk = root();
    let path = DerivationPath::cip1852(0, 0, 0).unwrap();
    b.iter(|| {
        let _ = sk.derive_path(&path);
    })
}

#[bench]
fn from_entropy(b: &mut test::Bencher) {
    b.iter(|| {
        let _ = XPrv::from_entropy(&[0; 16], b"");
    })
}
