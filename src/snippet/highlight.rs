// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Moving positions into excerpt coordinates and wrapping them in markers.

use crate::types::Position;
use crate::util::text::{char_len, split_at_position};

/// Shift `positions` left by `delta` characters into a window of `len` characters.
///
/// Positions that start before the window or at/after its end are dropped;
/// ends are clamped to the window. Empty results are dropped too, there is
/// nothing to highlight in them.
pub fn remap(delta: isize, positions: &[Position], len: usize) -> Vec<Position> {
    positions
        .iter()
        .filter_map(|position| {
            let start = position.start as isize - delta;
            let end = position.end as isize - delta;
            if start < 0 || start as usize >= len {
                return None;
            }
            let start = start as usize;
            let end = (end.max(0) as usize).min(len);
            (end > start).then_some(Position { start, end })
        })
        .collect()
}

/// Wrap every position of `text` in `<span class="{mark}">`.
///
/// Positions are applied right to left so the markup added for one position
/// never shifts the offsets of the ones still to come. A position that would
/// cut into markup already placed (overlapping a later one) is skipped.
pub fn highlight(mark: &str, text: &str, positions: &[Position]) -> String {
    let len = char_len(text);
    let mut ordered: Vec<Position> = positions
        .iter()
        .copied()
        .filter(|position| !position.is_empty() && position.start < len)
        .collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut result = text.to_string();
    let mut limit = usize::MAX;

    for position in ordered {
        if position.end > limit {
            continue;
        }
        let (before, content, after) = split_at_position(&result, position);
        result = format!(
            "{}<span class=\"{}\">{}</span>{}",
            before, mark, content, after
        );
        limit = position.start;
    }

    result
}
