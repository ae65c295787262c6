//! Base62 codec mapping store-assigned ids to short codes.
//!
//! The alphabet is `a-z`, then `A-Z`, then `0-9`. Codes are canonical positional
//! numerals: `0` encodes to `"a"`, and no code for a positive id starts with `'a'`.
//!
//! Because of the custom symbol order, lexicographic order of codes does not follow
//! the numeric order of ids (`encode(25) == "z"` sorts after `encode(26) == "A"`).

use thiserror::Error;

/// Symbols in digit order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = ALPHABET.len() as u64;

/// Errors returned by [`decode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("short code is empty")]
    Empty,

    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("short code has a leading zero symbol")]
    NonCanonical,

    #[error("short code does not fit in 64 bits")]
    Overflow,
}

/// Encodes a non-negative integer as a base62 short code.
///
/// The output length is computed up-front and the buffer is filled from the
/// last position backward, so no reversal pass is needed.
///
/// # Examples
///
/// ```
/// use veritas::utils::base62::encode;
///
/// assert_eq!(encode(0), "a");
/// assert_eq!(encode(62), "ba");
/// assert_eq!(encode(7891234), "Hg18");
/// ```
pub fn encode(mut n: u64) -> String {
    let mut buf = vec![ALPHABET[0]; encoded_len(n)];

    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }

    buf.into_iter().map(char::from).collect()
}

/// Decodes a canonical base62 short code back to its integer.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the code is empty, contains a symbol outside the
/// alphabet, has a leading zero symbol (`"aab"`), or overflows `u64`.
pub fn decode(code: &str) -> Result<u64, DecodeError> {
    let bytes = code.as_bytes();

    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    if bytes.len() > 1 && bytes[0] == ALPHABET[0] {
        return Err(DecodeError::NonCanonical);
    }

    bytes.iter().enumerate().try_fold(0u64, |acc, (position, &b)| {
        let digit = digit_value(b).ok_or_else(|| DecodeError::InvalidSymbol {
            symbol: code[position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            position,
        })?;

        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Number of symbols needed for `n`: `floor(log62(n)) + 1`, and 1 for zero.
fn encoded_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= BASE {
        n /= BASE;
        len += 1;
    }
    len
}

fn digit_value(b: u8) -> Option<u64> {
    let value = match b {
        b'a'..=b'z' => b - b'a',
        b'A'..=b'Z' => b - b'A' + 26,
        b'0'..=b'9' => b - b'0' + 52,
        _ => return None,
    };
    Some(u64::from(value))
}
