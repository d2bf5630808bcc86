//! Positional numeral codec for short codes.
//!
//! Maps sequence ids onto short strings over a fixed, shuffled alphabet. The
//! shuffle keeps consecutive ids from producing visibly consecutive codes, and
//! the 65-symbol base keeps codes shorter than their decimal form.
//!
//! The alphabet is part of the public contract of every issued code: changing
//! a single character reassigns the meaning of existing links. Treat it as
//! frozen.

/// Digit alphabet. Index `i` is the symbol for digit value `i`.
pub const ALPHABET: &[u8; 65] = b"L-VC065WZUvXSAzQO8l4TFYBPRoJ1isrhnuqamHyI_29kjtwK7xdGe=gEpMfbN3Dc";

/// Numeral base, equal to the alphabet length.
pub const BASE: u64 = ALPHABET.len() as u64;

/// Encodes a non-negative integer, most significant digit first.
///
/// `encode(0)` is the first alphabet symbol, so the result is never empty.
///
/// # Examples
///
/// ```
/// use shortgate::utils::numeral::{encode, ALPHABET};
///
/// assert_eq!(encode(0), (ALPHABET[0] as char).to_string());
/// assert_eq!(encode(65), "-L");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a code produced by [`encode`].
///
/// Returns `None` for an empty input, a symbol outside [`ALPHABET`], or a value
/// that does not fit in `u64`.
pub fn decode(code: &str) -> Option<u64> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0u64, |acc, byte| {
        let digit = digit_value(byte)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Returns true if every character of `code` is an alphabet symbol.
pub fn is_alphabet_str(code: &str) -> bool {
    code.bytes().all(|b| digit_value(b).is_some())
}

fn digit_value(byte: u8) -> Option<u64> {
    ALPHABET.iter().position(|&c| c == byte).map(|i| i as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_symbols_are_distinct() {
        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), ALPHABET.len());
        assert_eq!(BASE, 65);
    }

    #[test]
    fn test_alphabet_is_path_safe() {
        for &c in ALPHABET.iter() {
            assert!(
                c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b'=',
                "unexpected symbol {}",
                c as char
            );
        }
    }

    #[test]
    fn test_encode_zero_is_first_symbol() {
        assert_eq!(encode(0), "L");
    }

    #[test]
    fn test_encode_single_digits() {
        assert_eq!(encode(1), "-");
        assert_eq!(encode(2), "V");
        assert_eq!(encode(64), "c");
    }

    #[test]
    fn test_encode_carries_into_second_digit() {
        assert_eq!(encode(65), "-L");
        assert_eq!(encode(66), "--");
        assert_eq!(encode(65 * 65 - 1), "cc");
        assert_eq!(encode(65 * 65), "-LL");
    }

    #[test]
    fn test_encode_never_empty() {
        for n in [0, 1, 64, 65, 4_224, 1_000_000, u64::MAX] {
            assert!(!encode(n).is_empty());
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        let samples = [0, 1, 2, 64, 65, 66, 4_225, 274_625, 9_999_999, u64::MAX / 3, u64::MAX];
        for n in samples {
            assert_eq!(decode(&encode(n)), Some(n), "round trip failed for {}", n);
        }
    }

    #[test]
    fn test_encode_is_injective_on_prefix() {
        let codes: HashSet<String> = (0..20_000).map(encode).collect();
        assert_eq!(codes.len(), 20_000);
    }

    #[test]
    fn test_decode_rejects_foreign_symbols() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("ab!"), None);
        assert_eq!(decode("$"), None);
        assert_eq!(decode("with space"), None);
    }

    #[test]
    fn test_decode_rejects_overflow() {
        let too_long = "c".repeat(20);
        assert_eq!(decode(&too_long), None);
    }

    #[test]
    fn test_is_alphabet_str() {
        assert!(is_alphabet_str("Ab-_="));
        assert!(!is_alphabet_str("a.b"));
        assert!(!is_alphabet_str("a/b"));
    }
}
