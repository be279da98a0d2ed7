//! Bounding display text to a fixed character budget
//!
//! Every user-visible string in the history table passes through
//! [`shorten`]. Overlong text keeps its start and its end, joined by a
//! single ellipsis, with most of the budget spent on the end because that
//! is where a path keeps the file's own name.

use super::codec;
use crate::model::RawPath;

/// Marker placed where text was cut
pub const ELLIPSIS: char = '…';

/// Share of the remaining budget given to the prefix, as a fraction
const PREFIX_SHARE: (usize, usize) = (2, 5);

/// Shorten `text` to at most `max_width` characters
///
/// Text that already fits is returned unchanged. Otherwise the result is
/// exactly `max_width` characters: `<prefix>…<suffix>`, the prefix taking
/// at most 40% of the budget left after the ellipsis (rounded down). Widths
/// below 2 leave no room for context, so only the ellipsis (or nothing) is
/// returned.
///
/// # Examples
///
/// ```
/// use pathtrail::history::shorten::shorten;
///
/// assert_eq!(shorten("/var/log/syslog", 20), "/var/log/syslog");
/// assert_eq!(shorten("/very/long/directory/name.txt", 11), "/ver…me.txt");
/// ```
pub fn shorten(text: &str, max_width: usize) -> String {
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width < 2 {
        return ELLIPSIS.to_string().chars().take(max_width).collect();
    }

    let budget = max_width - 1;
    let prefix_len = budget * PREFIX_SHARE.0 / PREFIX_SHARE.1;
    let suffix_len = budget - prefix_len;

    let mut out = String::with_capacity(max_width * 4);
    out.extend(text.chars().take(prefix_len));
    out.push(ELLIPSIS);
    out.extend(text.chars().skip(len - suffix_len));
    out
}

/// Decode path bytes into printable text and shorten it
pub fn shorten_path(path: &RawPath, max_width: usize) -> String {
    shorten(&codec::display(&codec::decode(path.as_bytes())), max_width)
}
