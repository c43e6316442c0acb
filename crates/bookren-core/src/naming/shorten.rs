//! Byte-width shortening for file name components.

/// Appended when text had to be clipped.
pub const CLIP_MARKER: &str = "_";

/// Shortens `text` so that it fits in `width` bytes of UTF-8.
///
/// Whitespace runs are collapsed first. While the text plus one marker would
/// not fit, the last character is dropped and trailing whitespace trimmed; a
/// clipped result ends in [`CLIP_MARKER`]. `width` below the marker length is
/// raised to it. Text that is not clipped still has to leave room for the
/// marker, so the result is always at most `width` bytes.
pub fn shorten_to_byte_width(text: &str, width: usize) -> String {
    let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let width = width.max(CLIP_MARKER.len());

    let mut clipped = false;
    while text.len() + CLIP_MARKER.len() > width {
        clipped = true;
        text.pop();
        let kept = text.trim_end().len();
        text.truncate(kept);
    }

    if clipped {
        text.push_str(CLIP_MARKER);
    }
    text
}
