//! Pairing code sent to a remote to prove the user typed its passcode.
//!
//! The code is one MD5 compression over a single pre-padded block:
//!
//! ```text
//! offset  0..16  pairing id bytes, truncated or zero padded
//! offset 16..24  passcode as UTF-16LE, truncated or zero padded
//! offset 24      0x80
//! offset 56      0xC0 (message length in bits, 24 * 8)
//! ```
//!
//! which makes the result identical to `MD5(pair_id[..16] || utf16le(passcode))`.

use dacp_core::PairingError;

/// Size of the block fed to the compression function.
pub const BLOCK_LEN: usize = 64;

const PAIR_ID_LEN: usize = 16;
const PASSCODE_LEN: usize = 8;

const INITIAL_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const SHIFTS: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Compute the 32-character uppercase hex pairing code.
///
/// `passcode` is the four digits shown on the remote; `pair_id` is the `Pair` TXT
/// property it advertises.
pub fn pairing_code(passcode: &str, pair_id: &str) -> Result<String, PairingError> {
    validate_passcode(passcode)?;
    let block = parameter_block(passcode, pair_id.as_bytes());
    let digest = compress(&block);
    Ok(digest.iter().map(|b| format!("{:02X}", b)).collect())
}

fn validate_passcode(passcode: &str) -> Result<(), PairingError> {
    if passcode.len() == 4 && passcode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PairingError::InvalidPasscode(passcode.to_string()))
    }
}

/// Lay out the padded parameter block.
pub fn parameter_block(passcode: &str, pair_id: &[u8]) -> [u8; BLOCK_LEN] {
    let mut block = [0u8; BLOCK_LEN];

    let id_len = pair_id.len().min(PAIR_ID_LEN);
    block[..id_len].copy_from_slice(&pair_id[..id_len]);

    let code: Vec<u8> = passcode.encode_utf16().flat_map(u16::to_le_bytes).collect();
    let code_len = code.len().min(PASSCODE_LEN);
    block[PAIR_ID_LEN..PAIR_ID_LEN + code_len].copy_from_slice(&code[..code_len]);

    block[PAIR_ID_LEN + PASSCODE_LEN] = 0x80;
    block[56] = 0xc0;
    block
}

/// Run the 64-step compression over `block` from the standard initial state.
///
/// Returns the four state words serialized little-endian.
pub fn compress(block: &[u8; BLOCK_LEN]) -> [u8; 16] {
    let mut words = [0u32; 16];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let [mut a, mut b, mut c, mut d] = INITIAL_STATE;

    for i in 0..64 {
        let round = i / 16;
        let (f, g) = match round {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let rotated = a
            .wrapping_add(f)
            .wrapping_add(K[i])
            .wrapping_add(words[g])
            .rotate_left(SHIFTS[round][i % 4]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    let state = [
        a.wrapping_add(INITIAL_STATE[0]),
        b.wrapping_add(INITIAL_STATE[1]),
        c.wrapping_add(INITIAL_STATE[2]),
        d.wrapping_add(INITIAL_STATE[3]),
    ];

    let mut out = [0u8; 16];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5::{Digest, Md5};

    fn md5_hex(data: &[u8]) -> String {
        let mut hasher = Md5::new();
        hasher.update(data);
        hasher.finalize().iter().map(|b| format!("{:02X}", b)).collect()
    }

    mod vectors {
        use super::*;

        #[test]
        fn known_codes() {
            assert_eq!(
                pairing_code("1234", "0000000000000001").unwrap(),
                "690E6FF61E0D7C747654A42AED17047D"
            );
            assert_eq!(
                pairing_code("8731", "D89F3C2D8E7A4B11").unwrap(),
                "CCE1F1C734D92B88905B2E3AFE9B6D45"
            );
        }

        #[test]
        fn passcode_changes_code() {
            let a = pairing_code("1234", "0000000000000001").unwrap();
            let b = pairing_code("1235", "0000000000000001").unwrap();
            assert_eq!(b, "C7E5851EDDC937CF86EA3B512575B695");
            assert_ne!(a, b);
        }

        #[test]
        fn output_is_uppercase_hex() {
            let code = pairing_code("0000", "ABCDEF0123456789").unwrap();
            assert_eq!(code.len(), 32);
            assert!(code.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }

        #[test]
        fn deterministic() {
            assert_eq!(
                pairing_code("4321", "0123456789ABCDEF").unwrap(),
                pairing_code("4321", "0123456789ABCDEF").unwrap()
            );
        }
    }

    mod block {
        use super::*;

        #[test]
        fn layout() {
            let block = parameter_block("1234", b"0000000000000001");
            assert_eq!(&block[..16], b"0000000000000001");
            assert_eq!(&block[16..24], b"1\x002\x003\x004\x00");
            assert_eq!(block[24], 0x80);
            assert!(block[25..56].iter().all(|&b| b == 0));
            assert_eq!(block[56], 0xc0);
            assert!(block[57..].iter().all(|&b| b == 0));
        }

        #[test]
        fn short_pair_id_is_zero_padded() {
            let block = parameter_block("1234", b"ABC");
            assert_eq!(&block[..3], b"ABC");
            assert!(block[3..16].iter().all(|&b| b == 0));
        }

        #[test]
        fn long_pair_id_is_truncated() {
            let block = parameter_block("1234", b"0123456789ABCDEFXYZ");
            assert_eq!(&block[..16], b"0123456789ABCDEF");
            assert_eq!(block[16], b'1');
        }
    }

    mod md5_equivalence {
        use super::*;

        #[test]
        fn matches_md5_of_id_and_passcode() {
            for (passcode, pair_id) in [
                ("1234", "0000000000000001"),
                ("8731", "D89F3C2D8E7A4B11"),
                ("0000", "FFFFFFFFFFFFFFFF"),
            ] {
                let mut message = pair_id.as_bytes().to_vec();
                message.extend(passcode.encode_utf16().flat_map(u16::to_le_bytes));
                assert_eq!(pairing_code(passcode, pair_id).unwrap(), md5_hex(&message));
            }
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn rejects_non_digit_passcodes() {
            for bad in ["", "123", "12345", "12a4", "１２３４"] {
                assert!(matches!(
                    pairing_code(bad, "0000000000000001"),
                    Err(PairingError::InvalidPasscode(_))
                ));
            }
        }
    }
}
