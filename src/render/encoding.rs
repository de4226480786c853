//! WinAnsi text encoding for the base-14 fonts.

use unicode_normalization::UnicodeNormalization;

/// Byte used for characters WinAnsi cannot represent.
const REPLACEMENT: u8 = b'?';

/// Encode text as WinAnsi after NFC normalization.
///
/// Returns the encoded bytes and the number of characters that had to be
/// replaced with `?`.
pub fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut replaced = 0;
    let bytes = text
        .nfc()
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                replaced += 1;
                REPLACEMENT
            })
        })
        .collect();
    (bytes, replaced)
}

/// WinAnsi code for a character, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        0x09 => Some(b' '),
        _ => match c {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(encode_win_ansi("Page 3"), (b"Page 3".to_vec(), 0));
    }

    #[test]
    fn test_special_glyphs() {
        let (bytes, replaced) = encode_win_ansi("\u{2022} caf\u{e9} \u{2014}");
        assert_eq!(bytes, vec![0x95, b' ', b'c', b'a', b'f', 0xE9, b' ', 0x97]);
        assert_eq!(replaced, 0);
    }

    #[test]
    fn test_decomposed_is_composed_first() {
        // "e" + combining acute accent
        let (bytes, replaced) = encode_win_ansi("e\u{301}");
        assert_eq!(bytes, vec![0xE9]);
        assert_eq!(replaced, 0);
    }

    #[test]
    fn test_unencodable_replaced() {
        let (bytes, replaced) = encode_win_ansi("\u{1F4DD} notes");
        assert_eq!(bytes, b"? notes".to_vec());
        assert_eq!(replaced, 1);
    }
}
