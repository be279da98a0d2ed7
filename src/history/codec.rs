//! Byte-safe decoding of filesystem path bytes for display
//!
//! Filesystem names are arbitrary bytes. Valid UTF-8 runs are kept as-is;
//! every byte of an invalid run becomes a private-use escape character
//! (`U+EF00 + byte`), so nothing is dropped and [`encode`] can rebuild the
//! original bytes.

/// Base of the escape range. Invalid bytes are always >= 0x80, so escapes
/// land in U+EF80..=U+EFFF.
pub const ESCAPE_BASE: u32 = 0xEF00;

/// Decode path bytes into display text. Never fails.
pub fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        out.extend(chunk.invalid().iter().map(|&b| escape_char(b)));
    }
    out
}

/// Inverse of [`decode`]: escape characters turn back into their byte
///
/// Text that already contained U+EF80..=U+EFFF before decoding cannot be
/// told apart from an escape and comes back as the single byte.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        match escaped_byte(c) {
            Some(b) => out.push(b),
            None => out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
        }
    }
    out
}

/// The original byte behind an escape character, if `c` is one
pub fn escaped_byte(c: char) -> Option<u8> {
    let offset = u32::from(c).checked_sub(ESCAPE_BASE)?;
    if (0x80..=0xFF).contains(&offset) {
        u8::try_from(offset).ok()
    } else {
        None
    }
}

/// Printable form of decoded text
///
/// Escape characters show as `\xNN` of the byte they stand for, control
/// characters as `\n`, `\r`, `\t` or `\xNN`. A literal backslash is
/// doubled so it cannot be mistaken for either.
pub fn display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_display(&mut out, text, None);
    out
}

/// Append the printable form of `text`, also backslash-escaping `quote`
pub(crate) fn push_display(out: &mut String, text: &str, quote: Option<char>) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if Some(c) == quote => {
                out.push('\\');
                out.push(c);
            }
            c => match escaped_byte(c) {
                Some(b) => out.push_str(&format!("\\x{:02x}", b)),
                None if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
                None => out.push(c),
            },
        }
    }
}

fn escape_char(byte: u8) -> char {
    char::from_u32(ESCAPE_BASE + u32::from(byte)).unwrap_or(char::REPLACEMENT_CHARACTER)
}
