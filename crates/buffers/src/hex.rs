//! Hex rendering helpers for diagnostics.

use std::fmt::Write;

/// Formats a byte slice as a one-line hex preview.
///
/// At most `max` bytes are shown; the remainder is summarized.
///
/// # Example
///
/// ```
/// use ledgerwire_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x01, 0x02, 0x0a, 0xff], 16), "01 02 0a ff");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut result = String::new();
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let _ = write!(result, "{:02x}", byte);
    }
    if octets.len() > max {
        let _ = write!(result, "... ({} more)", octets.len() - max);
    }
    result
}

const ROW_WIDTH: usize = 16;

/// Renders a byte range as a fixed-width hex/ASCII table.
///
/// Each row shows a hex offset, sixteen hex octets split into two groups of
/// eight, and an ASCII gutter where non-printable bytes render as `.`. The
/// output is deterministic for a given input.
///
/// # Example
///
/// ```
/// use ledgerwire_buffers::hex_table;
///
/// let row = hex_table(b"abc");
/// assert!(row.starts_with("00000000  61 62 63"));
/// assert!(row.ends_with("|abc|"));
/// ```
pub fn hex_table(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(ROW_WIDTH).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:08x}  ", row * ROW_WIDTH);
        for i in 0..ROW_WIDTH {
            match chunk.get(i) {
                Some(byte) => {
                    let _ = write!(out, "{:02x} ", byte);
                }
                None => out.push_str("   "),
            }
            if i == ROW_WIDTH / 2 - 1 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push('|');
        for &byte in chunk {
            if (0x20..0x7f).contains(&byte) {
                out.push(byte as char);
            } else {
                out.push('.');
            }
        }
        out.push('|');
    }
    out
}
