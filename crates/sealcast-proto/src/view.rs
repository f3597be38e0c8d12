//! Borrowed message views.

/// Resolve `buffer[offset..offset + length]`.
///
/// Returns `None` if the range overflows or falls outside `buffer`. This is
/// the single bounds rule shared by publishers, encoders and transports, so
/// every layer agrees on which `(offset, length)` pairs are valid.
#[must_use]
pub fn message_range(buffer: &[u8], offset: usize, length: usize) -> Option<&[u8]> {
    let end = offset.checked_add(length)?;
    buffer.get(offset..end)
}
