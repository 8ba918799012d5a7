//! Hex text interchange.
//!
//! Grammar: an optional `-`, optional ASCII whitespace, then one or more
//! hex digits in either case. Nothing may follow the digits, and nothing
//! but the sign may precede the whitespace. A literal whose digits are all
//! zero parses as positive zero. Output is lower-case with no leading
//! zeros.

use lanecarry_core::limb::{limbs_for_hex_digits, HEX_DIGITS_PER_LIMB};
use lanecarry_core::{Limb, ParseError};

/// A validated hex literal, not yet converted to limbs.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct HexLiteral<'a> {
    pub sign: bool,
    digits: &'a [u8],
}

impl<'a> HexLiteral<'a> {
    /// Validate `text` against the grammar above.
    pub fn scan(text: &'a str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }
        let (sign, after_sign) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits = after_sign.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if digits.is_empty() {
            return Err(ParseError::NoDigits);
        }
        let start = text.len() - digits.len();
        if let Some((i, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidDigit {
                found: c,
                position: start + i,
            });
        }
        Ok(Self {
            sign: sign && digits.bytes().any(|d| d != b'0'),
            digits: digits.as_bytes(),
        })
    }

    /// Limbs needed to hold the digits, leading zero digits included.
    pub fn limb_count(&self) -> usize {
        limbs_for_hex_digits(self.digits.len())
    }

    /// Write the magnitude into `out`, least significant limb first.
    ///
    /// `out` must be exactly [`limb_count`](Self::limb_count) long.
    pub fn write_limbs(&self, out: &mut [Limb]) {
        debug_assert_eq!(out.len(), self.limb_count());
        for (limb, chunk) in out
            .iter_mut()
            .zip(self.digits.rchunks(HEX_DIGITS_PER_LIMB))
        {
            *limb = chunk
                .iter()
                .fold(0, |acc, &d| (acc << 4) | Limb::from(nibble(d)));
        }
    }
}

fn nibble(d: u8) -> u8 {
    match d {
        b'0'..=b'9' => d - b'0',
        b'a'..=b'f' => d - b'a' + 10,
        b'A'..=b'F' => d - b'A' + 10,
        _ => 0,
    }
}

/// Render a magnitude with its sign and carry flags.
///
/// A set `carry` becomes a leading `1` above the stored limbs, which are
/// then printed at full width. A zero magnitude without carry renders as
/// `0`, never `-0`.
pub(crate) fn format_limbs(sign: bool, carry: bool, limbs: &[Limb]) -> String {
    let mut out = String::with_capacity(limbs.len() * HEX_DIGITS_PER_LIMB + 2);
    if sign {
        out.push('-');
    }
    let mut top = limbs.iter().rev().skip_while(|&&l| l == 0 && !carry);
    if carry {
        out.push('1');
    } else {
        match top.next() {
            Some(limb) => out.push_str(&format!("{limb:x}")),
            None => return "0".to_string(),
        }
    }
    for limb in top {
        out.push_str(&format!("{limb:016x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<(bool, Vec<Limb>), ParseError> {
        let lit = HexLiteral::scan(text)?;
        let mut limbs = vec![0; lit.limb_count()];
        lit.write_limbs(&mut limbs);
        Ok((lit.sign, limbs))
    }

    #[test]
    fn parses_sign_and_mixed_case() {
        assert_eq!(parse("-FfEe"), Ok((true, vec![0xffee])));
        assert_eq!(parse("0"), Ok((false, vec![0])));
    }

    #[test]
    fn whitespace_only_between_sign_and_digits() {
        assert_eq!(parse("-  \t1f"), Ok((true, vec![0x1f])));
        assert_eq!(parse("  1f"), Ok((false, vec![0x1f])));
        assert_eq!(
            parse("1 f"),
            Err(ParseError::InvalidDigit {
                found: ' ',
                position: 1
            })
        );
        assert_eq!(
            parse(" -1"),
            Err(ParseError::InvalidDigit {
                found: '-',
                position: 1
            })
        );
    }

    #[test]
    fn only_ascii_whitespace_is_skipped() {
        assert_eq!(
            parse("-\u{a0}1"),
            Err(ParseError::InvalidDigit {
                found: '\u{a0}',
                position: 1
            })
        );
        assert_eq!(
            parse("\u{3000}f"),
            Err(ParseError::InvalidDigit {
                found: '\u{3000}',
                position: 0
            })
        );
        assert_eq!(parse("-\n\r 2"), Ok((true, vec![2])));
    }

    #[test]
    fn negative_zero_parses_as_positive_zero() {
        assert_eq!(parse("-0"), Ok((false, vec![0])));
        let (sign, limbs) = parse(&format!("-{}", "0".repeat(20))).unwrap();
        assert!(!sign);
        assert_eq!(limbs, vec![0, 0]);
        assert_eq!(parse("-00010"), Ok((true, vec![0x10])));
    }

    #[test]
    fn empty_and_digitless_inputs() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("-"), Err(ParseError::NoDigits));
        assert_eq!(parse("-   "), Err(ParseError::NoDigits));
    }

    #[test]
    fn invalid_digit_position_is_a_byte_offset() {
        assert_eq!(
            parse("-12g4"),
            Err(ParseError::InvalidDigit {
                found: 'g',
                position: 3
            })
        );
        assert_eq!(
            parse("ab\u{e9}"),
            Err(ParseError::InvalidDigit {
                found: '\u{e9}',
                position: 2
            })
        );
    }

    #[test]
    fn limbs_split_at_sixteen_digits() {
        let (_, limbs) = parse("10000000000000002").unwrap();
        assert_eq!(limbs, vec![2, 1]);
        let (_, limbs) = parse(&"f".repeat(32)).unwrap();
        assert_eq!(limbs, vec![u64::MAX, u64::MAX]);
    }

    #[test]
    fn leading_zero_digits_still_count_toward_size() {
        let (_, limbs) = parse(&"0".repeat(17)).unwrap();
        assert_eq!(limbs.len(), 2);
    }

    #[test]
    fn format_strips_leading_zeros() {
        assert_eq!(format_limbs(false, false, &[0xab, 0, 0]), "ab");
        assert_eq!(format_limbs(false, false, &[1, 1]), "10000000000000001");
        assert_eq!(format_limbs(true, false, &[0x10]), "-10");
    }

    #[test]
    fn format_zero_has_no_sign() {
        assert_eq!(format_limbs(false, false, &[0, 0]), "0");
        assert_eq!(format_limbs(true, false, &[0]), "0");
        assert_eq!(format_limbs(false, false, &[]), "0");
    }

    #[test]
    fn format_carry_prints_full_width() {
        assert_eq!(
            format_limbs(false, true, &[0, 0]),
            format!("1{}", "0".repeat(32))
        );
        assert_eq!(format_limbs(false, true, &[5]), "10000000000000005");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn canonical_text_round_trips(text in "-?[1-9a-f][0-9a-f]{0,80}") {
                let (sign, limbs) = parse(&text).unwrap();
                prop_assert_eq!(format_limbs(sign, false, &limbs), text);
            }

            #[test]
            fn upper_case_parses_like_lower(text in "[0-9a-fA-F]{1,60}") {
                prop_assert_eq!(parse(&text), parse(&text.to_ascii_lowercase()));
            }
        }
    }
}
