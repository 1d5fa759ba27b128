//! PBKDF2 Key Derivation Function (RFC 2898) with HMAC-SHA512 as the
//! pseudo random function, used to stretch BIP39 entropy into a root
//! extended private key.
//!
//! ```
//! use bip32_ed25519::pbkdf2;
//!
//! let key = pbkdf2::derive_key(b"password", b"salt", 1, 10).unwrap();
//! assert_eq!(key, [0x86, 0x7f, 0x70, 0xcf, 0x1a, 0xde, 0x02, 0xcf, 0xf3, 0x75]);
//! ```

use cryptoxide::hmac::Hmac;
use cryptoxide::mac::Mac;
use cryptoxide::sha2::Sha512;
use log::debug;
use zeroize::Zeroize;

use std::{error, fmt, result};

/// number of iterations used to generate a root key from entropy
pub const ENTROPY_ITERATIONS: u32 = 4096;

/// largest output accepted, in bytes
pub const MAX_KEY_LENGTH: usize = (1 << 30) - 1;

/// output size of HMAC-SHA512
const BLOCK_SIZE: usize = 64;

/// invalid PBKDF2 parameters
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// the requested output is larger than `MAX_KEY_LENGTH`
    InvalidKeyLength(usize),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidKeyLength(len) => write!(
                f,
                "Bad key length {}, expected at most {} bytes",
                len, MAX_KEY_LENGTH
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

fn check_parameters(keylen: usize) -> Result<()> {
    if keylen > MAX_KEY_LENGTH {
        return Err(Error::InvalidKeyLength(keylen));
    }
    Ok(())
}

// Calculate one block of the output:
//
// T = U_1 ^ U_2 ^ ... ^ U_c
// U_1 = PRF(password, salt || be32(idx))
// U_j = PRF(password, U_{j-1})
//
// `scratch` holds the U_j, the xor accumulates in `block`.
fn calculate_block(
    mac: &mut Hmac<Sha512>,
    salt: &[u8],
    c: u32,
    idx: u32,
    scratch: &mut [u8; BLOCK_SIZE],
    block: &mut [u8; BLOCK_SIZE],
) {
    mac.input(salt);
    mac.input(&idx.to_be_bytes());
    mac.raw_result(block);
    mac.reset();

    scratch.clone_from_slice(block);
    for _ in 1..c {
        mac.input(&scratch[..]);
        mac.raw_result(scratch);
        mac.reset();
        for (output, &input) in block.iter_mut().zip(scratch.iter()) {
            *output ^= input;
        }
    }
}

// PBKDF2 without the length check, the output must be at most
// `MAX_KEY_LENGTH` bytes. An iteration count of 0 runs a single round.
pub(crate) fn calculate(password: &[u8], salt: &[u8], c: u32, output: &mut [u8]) {
    debug!("pbkdf2-hmac-sha512, {} iterations, {} bytes", c, output.len());

    let mut mac = Hmac::new(Sha512::new(), password);
    let mut scratch = [0u8; BLOCK_SIZE];
    let mut block = [0u8; BLOCK_SIZE];

    // the block index starts at 1
    for (idx, chunk) in (1u32..).zip(output.chunks_mut(BLOCK_SIZE)) {
        calculate_block(&mut mac, salt, c, idx, &mut scratch, &mut block);
        let len = chunk.len();
        chunk.clone_from_slice(&block[..len]);
    }

    scratch.zeroize();
    block.zeroize();
}

/// Execute PBKDF2-HMAC-SHA512, filling the whole `output`.
///
/// # Arguments
/// * password - the key of the HMAC.
/// * salt - the salt value to use.
/// * iterations - the iteration count, `0` is processed as `1`.
/// * output - the buffer to fill with the derived key, at most `MAX_KEY_LENGTH` bytes.
///
pub fn pbkdf2(password: &[u8], salt: &[u8], iterations: u32, output: &mut [u8]) -> Result<()> {
    check_parameters(output.len())?;
    calculate(password, salt, iterations, output);
    Ok(())
}

/// Execute PBKDF2-HMAC-SHA512 and return a newly allocated key of `keylen` bytes.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32, keylen: usize) -> Result<Vec<u8>> {
    check_parameters(keylen)?;
    let mut output = vec![0u8; keylen];
    calculate(password, salt, iterations, &mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    struct TestVector {
        password: &'static [u8],
        salt: &'static [u8],
        c: u32,
        expected: &'static str,
    }

    const TEST_VECTORS: [TestVector; 5] = [
        TestVector {
            password: b"password",
            salt: b"salt",
            c: 1,
            expected: "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce",
        },
        TestVector {
            password: b"password",
            salt: b"salt",
            c: 2,
            expected: "e1d9c16aa681708a45f5c7c4e215ceb66e011a2e9f0040713f18aefdb866d53cf76cab2868a39b9f7840edce4fef5a82be67335c77a6068e04112754f27ccf4e",
        },
        TestVector {
            password: b"password",
            salt: b"salt",
            c: 4096,
            expected: "d197b1b33db0143e018b12f3d1d1479e6cdebdcc97c5c0f87f6902e072f457b5143f30602641b3d55cd335988cb36b84376060ecd532e039b742a239434af2d5",
        },
        TestVector {
            password: b"passwordPASSWORDpassword",
            salt: b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
            c: 4096,
            expected: "8c0511f4c6e597c6ac6315d8f0362e225f3c501495ba23b868c005174dc4ee71115b59f9e60cd9532fa33e0f75aefe30225c583a186cd82bd4daea9724a3d3b8",
        },
        // more than one block, the last one is truncated
        TestVector {
            password: b"password",
            salt: b"salt",
            c: 3,
            expected: "b6b07cb2cebf4ad84468391a543824fccffe0e0769dbe6bddf10a65673c4b648e612d44918f9ce9a19a1294cf5140628084ba994c3b21a4ef4741220b811c633cfc0641fccbcc4164f1bbfcb1f33f595ae9aa4a33ddcce570157775980362c0ee28aa340",
        },
    ];

    #[test]
    fn test_vectors() {
        for (i, test) in TEST_VECTORS.iter().enumerate() {
            let expected = hex::decode(test.expected).unwrap();
            let mut output = vec![0u8; expected.len()];
            pbkdf2(test.password, test.salt, test.c, &mut output).unwrap();
            assert_eq!(hex::encode(&output), test.expected, "test vector {}", i);

            let key = derive_key(test.password, test.salt, test.c, expected.len()).unwrap();
            assert_eq!(key, expected, "test vector {}", i);
        }
    }

    #[test]
    fn truncated_output_is_a_prefix() {
        let long = derive_key(b"password", b"salt", 1, 64).unwrap();
        let short = derive_key(b"password", b"salt", 1, 10).unwrap();
        assert_eq!(&long[..10], &short[..]);
    }

    #[test]
    fn empty_output() {
        assert_eq!(derive_key(b"password", b"salt", 1, 0), Ok(Vec::new()));
    }

    #[test]
    fn zero_iterations_is_a_single_round() {
        let mut output = [0u8; 32];
        pbkdf2(b"password", b"salt", 0, &mut output).unwrap();
        assert_eq!(
            hex::encode(&output),
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252"
        );
        assert_eq!(
            derive_key(b"password", b"salt", 0, 64),
            derive_key(b"password", b"salt", 1, 64)
        );
    }

    #[test]
    fn invalid_key_length() {
        assert_eq!(
            derive_key(b"password", b"salt", 1, MAX_KEY_LENGTH + 1),
            Err(Error::InvalidKeyLength(MAX_KEY_LENGTH + 1))
        );
    }
}
