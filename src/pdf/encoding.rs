//! WinAnsi text encoding for the base-14 fonts.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Byte written for characters with no WinAnsi form.
pub const REPLACEMENT: u8 = b'?';

/// Code points of the 0x80..=0x9F block, where WinAnsi departs from Latin-1.
const HIGH_BLOCK: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Map a single character to its WinAnsi byte, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u32 as u8),
        _ => HIGH_BLOCK
            .iter()
            .find_map(|&(ch, byte)| (ch == c).then_some(byte)),
    }
}

/// Encode text as WinAnsi bytes.
///
/// Control whitespace becomes a space. Characters outside the encoding are
/// decomposed (NFKD) and their combining marks dropped; anything still
/// unmappable becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() && c.is_control() {
            out.push(b' ');
            continue;
        }
        if let Some(byte) = win_ansi_byte(c) {
            out.push(byte);
            continue;
        }

        let mut mapped = false;
        for d in std::iter::once(c).nfkd() {
            if is_combining_mark(d) {
                continue;
            }
            match win_ansi_byte(d) {
                Some(byte) => {
                    out.push(byte);
                    mapped = true;
                }
                None => break,
            }
        }
        if !mapped {
            out.push(REPLACEMENT);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Flight AL 123"), b"Flight AL 123".to_vec());
    }

    #[test]
    fn test_latin1_and_high_block() {
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
        assert_eq!(encode_win_ansi("–"), vec![0x96]);
    }

    #[test]
    fn test_decomposed_fallback() {
        // U+0141 has no decomposition; U+0107 decomposes to c + acute.
        assert_eq!(encode_win_ansi("\u{0107}"), b"c".to_vec());
        assert_eq!(encode_win_ansi("\u{FB01}"), b"fi".to_vec());
    }

    #[test]
    fn test_unmappable_replaced() {
        assert_eq!(encode_win_ansi("\u{2708}"), vec![REPLACEMENT]);
        assert_eq!(encode_win_ansi("東京"), vec![REPLACEMENT, REPLACEMENT]);
    }

    #[test]
    fn test_control_whitespace() {
        assert_eq!(encode_win_ansi("a\tb\nc"), b"a b c".to_vec());
    }
}
