// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cutting a bounded window out of a field around its best match.
//!
//! Two shapes:
//!
//! ```text
//!   short:  "...<20 chars before>" + <anchor> + <tail up to 200 total>
//!   long:   whole lines grown outward from the first highlight,
//!           one line before, one line after, until 200 chars
//! ```
//!
//! Both return the window text plus the field's highlight positions moved
//! into window coordinates. Positions that fall outside the window are gone.

use super::highlight::remap;
use crate::scoring::Score;
use crate::types::Position;
use crate::util::text::{self, char_len, split_at_position};
use std::collections::VecDeque;

/// Excerpt length budget, in characters.
pub const MAX_LENGTH: usize = 200;

/// Characters of leading context in a short excerpt.
pub const SHORT_HEAD: usize = 20;

/// Prefix for a truncated short-excerpt head.
pub const ELLIPSIS: &str = "...";

/// Window text and the highlights inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub positions: Vec<Position>,
}

impl Excerpt {
    fn empty() -> Self {
        Excerpt {
            text: String::new(),
            positions: Vec::new(),
        }
    }
}

/// Which window to cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Compact, for suggestion lists.
    Short,
    /// Line-aware, for result pages.
    Long,
}

impl Style {
    pub fn excerpt(self, text: &str, score: &Score) -> Excerpt {
        match self {
            Style::Short => short(text, score),
            Style::Long => long(text, score),
        }
    }
}

/// Anchor-centred excerpt: a little context before, the anchor, then as much
/// trailing text as the budget allows.
pub fn short(text: &str, score: &Score) -> Excerpt {
    if text.is_empty() {
        return Excerpt::empty();
    }

    let (before, content, after) = split_at_position(text, score.anchor);
    let before_len = char_len(before);

    let truncated = before_len > SHORT_HEAD;
    let head = if truncated {
        format!("{}{}", ELLIPSIS, text::tail(before, SHORT_HEAD))
    } else {
        before.to_string()
    };
    let head_len = char_len(&head);
    // The ellipsis stands in for cut text; nothing may be highlighted in it.
    let kept_from = if truncated { char_len(ELLIPSIS) } else { 0 };

    let content = text::head(content, MAX_LENGTH.saturating_sub(head_len));
    let content_len = char_len(content);
    let tail = text::head(after, MAX_LENGTH.saturating_sub(head_len + content_len));

    let excerpt = format!("{}{}{}", head, content, tail);
    let len = char_len(&excerpt);
    let delta = before_len as isize - head_len as isize;

    let positions = remap(delta, &score.positions, len)
        .into_iter()
        .filter(|position| position.start >= kept_from)
        .collect();

    Excerpt {
        positions,
        text: excerpt,
    }
}

/// Line-aware excerpt grown around the first highlight.
///
/// Text that already fits is returned whole. An anchor longer than the budget
/// is cut to the budget and highlighted as a block.
pub fn long(text: &str, score: &Score) -> Excerpt {
    let length = char_len(text);
    if length <= MAX_LENGTH {
        return Excerpt {
            text: text.to_string(),
            positions: remap(0, &score.positions, length),
        };
    }

    let Some(&first) = score.positions.first() else {
        return Excerpt {
            text: text::head(text, MAX_LENGTH).to_string(),
            positions: Vec::new(),
        };
    };

    let (before, content, after) = split_at_position(text, first);
    if char_len(content) >= MAX_LENGTH {
        return Excerpt {
            text: text::head(content, MAX_LENGTH).to_string(),
            positions: vec![Position::new(0, MAX_LENGTH)],
        };
    }

    let mut window = Window::new(before, content, after);
    window.grow();

    let origin = char_len(before) as isize - window.head as isize;
    let text = window.text.trim_start();
    let trimmed = window.len - char_len(text);
    let len = window.len - trimmed;

    Excerpt {
        positions: remap(origin + trimmed as isize, &score.positions, len),
        text: text.to_string(),
    }
}

/// Growth state for a long excerpt.
struct Window<'a> {
    before: Vec<&'a str>,
    after: VecDeque<&'a str>,
    text: String,
    /// Characters in `text`.
    len: usize,
    /// Characters prepended in front of the anchor.
    head: usize,
}

#[derive(Clone, Copy)]
enum Side {
    Before,
    After,
}

impl<'a> Window<'a> {
    fn new(before: &'a str, content: &str, after: &'a str) -> Self {
        Window {
            before: before.split('\n').collect(),
            after: after.split('\n').collect(),
            text: content.to_string(),
            len: char_len(content),
            head: 0,
        }
    }

    fn exhausted(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Alternate prepend/append until the budget is met or both sides run dry.
    fn grow(&mut self) {
        let mut side = Side::Before;
        while self.len < MAX_LENGTH && !self.exhausted() {
            side = match side {
                Side::Before => {
                    self.prepend();
                    Side::After
                }
                Side::After => {
                    self.append();
                    Side::Before
                }
            };
        }
    }

    /// Put the previous line (its last `MAX_LENGTH` chars at most) in front.
    fn prepend(&mut self) {
        let Some(part) = self.before.pop() else {
            return;
        };
        let part_len = char_len(part);
        let overage = part_len.saturating_sub(MAX_LENGTH);
        let kept = text::from(part, overage);

        let mut grown = String::with_capacity(1 + kept.len() + self.text.len());
        grown.push('\n');
        grown.push_str(kept);
        grown.push_str(&self.text);

        let added = part_len - overage + 1;
        self.text = grown;
        self.len += added;
        self.head += added;
    }

    /// Add as much of the next line as still fits.
    fn append(&mut self) {
        let Some(part) = self.after.pop_front() else {
            return;
        };
        let kept = text::head(part, MAX_LENGTH.saturating_sub(self.len));
        self.text.push_str(kept);
        self.len += char_len(kept);

        if self.len < MAX_LENGTH {
            self.text.push('\n');
            self.len += 1;
        }
    }
}
