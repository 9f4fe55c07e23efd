// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character-offset slicing over UTF-8 text.
//!
//! All offsets here count Unicode scalar values. Out-of-range offsets clamp to
//! the end of the string instead of panicking: a highlight that points past
//! the stored text is an index/registry mismatch, not a reason to crash.

use crate::types::Position;

/// Number of characters in `text`.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `chars`-th character, clamped to `text.len()`.
#[inline]
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Characters `[start, end)` of `text`.
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end.max(start));
    &text[from..to]
}

/// The first `count` characters.
#[inline]
pub fn head(text: &str, count: usize) -> &str {
    &text[..byte_offset(text, count)]
}

/// Everything from character `start` on.
#[inline]
pub fn from(text: &str, start: usize) -> &str {
    &text[byte_offset(text, start)..]
}

/// The last `count` characters.
pub fn tail(text: &str, count: usize) -> &str {
    let len = char_len(text);
    from(text, len.saturating_sub(count))
}

/// Cut `text` into `(before, content, after)` around `position`.
pub fn split_at_position(text: &str, position: Position) -> (&str, &str, &str) {
    let start = byte_offset(text, position.start);
    let end = byte_offset(text, position.end.max(position.start));
    (&text[..start], &text[start..end], &text[end..])
}
