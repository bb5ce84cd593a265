/*!
UTF-8 encoding of single codepoints into the fixed-size `Utf8Char` records the
generated header stores.

No surrogate or range checks are done here, callers pass scalar values taken
from a parsed [`MappingTable`](crate::case_folding::MappingTable).
*/
use std::fmt;

/// A codepoint's UTF-8 bytes plus their length, laid out like the C++
/// `Utf8Char { u8 data[4]; u32 size; }`.
///
/// Unused trailing bytes are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf8Char {
    pub data: [u8; 4],
    pub size: u32,
}

impl Utf8Char {
    /// The encoded bytes, without the zero padding.
    ///
    /// A `size` above 4 is clamped to the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.size.min(4) as usize]
    }
}

impl From<u32> for Utf8Char {
    fn from(cp: u32) -> Self {
        encode(cp)
    }
}

/// Formats as the aggregate initializer used in the header:
/// `{ { 0xC2, 0x80, 0x00, 0x00 }, 2 }`.
impl fmt::Display for Utf8Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2, b3] = self.data;
        write!(
            f,
            "{{ {{ 0x{b0:02X}, 0x{b1:02X}, 0x{b2:02X}, 0x{b3:02X} }}, {} }}",
            self.size
        )
    }
}

/// Number of bytes `cp` takes in UTF-8.
#[inline]
pub const fn encoded_len(cp: u32) -> u32 {
    if cp <= 0x7F {
        1
    } else if cp <= 0x7FF {
        2
    } else if cp <= 0xFFFF {
        3
    } else {
        4
    }
}

/// Encodes one codepoint.
///
/// ## Example
/// ```
/// use unicode_table_gen::utf8::encode;
///
/// assert_eq!(encode(0x41).as_bytes(), b"A");
/// assert_eq!(encode(0x3A3).as_bytes(), "Σ".as_bytes());
/// assert_eq!(encode(0x3A3).data, [0xCE, 0xA3, 0, 0]);
/// ```
pub const fn encode(cp: u32) -> Utf8Char {
    let mut data = [0u8; 4];
    let size = encoded_len(cp);
    match size {
        1 => {
            data[0] = cp as u8;
        }
        2 => {
            data[0] = 0xC0 | ((cp >> 6) & 0x1F) as u8;
            data[1] = 0x80 | (cp & 0x3F) as u8;
        }
        3 => {
            data[0] = 0xE0 | ((cp >> 12) & 0x0F) as u8;
            data[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            data[2] = 0x80 | (cp & 0x3F) as u8;
        }
        _ => {
            data[0] = 0xF0 | ((cp >> 18) & 0x07) as u8;
            data[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            data[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            data[3] = 0x80 | (cp & 0x3F) as u8;
        }
    }
    Utf8Char { data, size }
}

/// Inverse of [`encode()`].
///
/// Only meaningful for values produced by [`encode()`]; continuation bytes are
/// not validated. A `size` outside `1..=4` decodes to 0.
pub const fn decode(c: &Utf8Char) -> u32 {
    let [b0, b1, b2, b3] = c.data;
    let (b0, b1, b2, b3) = (b0 as u32, b1 as u32, b2 as u32, b3 as u32);
    match c.size {
        1 => b0,
        2 => ((b0 & 0x1F) << 6) | (b1 & 0x3F),
        3 => ((b0 & 0x0F) << 12) | ((b1 & 0x3F) << 6) | (b2 & 0x3F),
        4 => ((b0 & 0x07) << 18) | ((b1 & 0x3F) << 12) | ((b2 & 0x3F) << 6) | (b3 & 0x3F),
        _ => 0,
    }
}
