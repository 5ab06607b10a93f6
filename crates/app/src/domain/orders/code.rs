//! Redemption code generation and normalization.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use serde::Serialize;

/// Number of random bytes behind each redemption code.
pub const REDEMPTION_CODE_BYTES: usize = 20;

const REDEMPTION_CODE_CHARS: usize = REDEMPTION_CODE_BYTES * 8 / 5;
const GROUP_SIZE: usize = 4;

/// Crockford base32 alphabet. Excludes I, L, O, and U to avoid
/// transcription mistakes when codes are read aloud or retyped.
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// A redemption code in its canonical stored form: 32 Crockford base32
/// characters grouped in blocks of four, separated by dashes.
///
/// Generation draws fresh entropy every time; the unique index on
/// `orders.redemption_code` is the only collision guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RedemptionCode(String);

impl RedemptionCode {
    #[must_use]
    pub fn generate() -> Self {
        let mut entropy = [0_u8; REDEMPTION_CODE_BYTES];

        OsRng.fill_bytes(&mut entropy);

        Self(encode_grouped(&entropy))
    }

    /// Canonicalizes user input for lookup: trims, uppercases, and
    /// regroups so dashes and stray whitespace in the input are
    /// irrelevant. Returns `None` when the cleaned input is not 32
    /// characters long.
    #[must_use]
    pub fn normalize(input: &str) -> Option<Self> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if cleaned.len() != REDEMPTION_CODE_CHARS
            || !cleaned.bytes().all(|b| ALPHABET.contains(&b))
        {
            return None;
        }

        let mut grouped = String::with_capacity(grouped_len());

        for (index, c) in cleaned.chars().enumerate() {
            if index > 0 && index % GROUP_SIZE == 0 {
                grouped.push('-');
            }

            grouped.push(c);
        }

        Some(Self(grouped))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RedemptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const fn grouped_len() -> usize {
    REDEMPTION_CODE_CHARS + REDEMPTION_CODE_CHARS / GROUP_SIZE - 1
}

fn encode_grouped(entropy: &[u8; REDEMPTION_CODE_BYTES]) -> String {
    let mut encoded = String::with_capacity(grouped_len());
    let mut buffer: u16 = 0;
    let mut bits: u8 = 0;
    let mut emitted = 0_usize;

    for byte in entropy {
        buffer = (buffer << 8) | u16::from(*byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;

            if emitted > 0 && emitted % GROUP_SIZE == 0 {
                encoded.push('-');
            }

            encoded.push(ALPHABET[usize::from((buffer >> bits) & 0x1f)] as char);
            emitted += 1;
        }
    }

    encoded
}
