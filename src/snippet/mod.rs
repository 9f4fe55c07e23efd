// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Display-ready results.
//!
//! Scored documents go in, page items come out: a link, a title with its
//! matches marked, and a description cut from the content around the best
//! span. Only the `title` and `content` fields are rendered; other fields
//! (keywords) count for ranking but never show up in the output.

pub mod excerpt;
pub mod highlight;

pub use excerpt::{long, short, Excerpt, Style, MAX_LENGTH, SHORT_HEAD};
pub use highlight::{highlight, remap};

use crate::config::EngineConfig;
use crate::scoring::ScoredResult;
use crate::types::{Registry, RegistryEntry};
use crate::util::text;
use serde::Serialize;
use tracing::warn;

/// Field rendered as the item title.
pub const TITLE_FIELD: &str = "title";

/// Field rendered as the item description.
pub const CONTENT_FIELD: &str = "content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Page,
}

/// One formatted result, as handed to a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub link: String,
    pub title: String,
    pub description: String,
}

/// Format `results` in order. References missing from the registry are skipped.
pub fn format(
    config: &EngineConfig,
    results: &[ScoredResult],
    registry: &Registry,
    style: Style,
) -> Vec<PageItem> {
    results
        .iter()
        .filter_map(|result| match registry.get(&result.reference) {
            Some(entry) => Some(page_item(config, result, entry, style)),
            None => {
                warn!(reference = %result.reference, "result missing from registry, skipped");
                None
            }
        })
        .collect()
}

/// Format one result against its registry entry.
pub fn page_item(
    config: &EngineConfig,
    result: &ScoredResult,
    entry: &RegistryEntry,
    style: Style,
) -> PageItem {
    let mut item = PageItem {
        kind: ItemKind::Page,
        link: config.link(&result.reference),
        title: entry.title.clone(),
        description: text::head(&entry.content, MAX_LENGTH).to_string(),
    };

    if let Some(score) = result.scores.get(TITLE_FIELD) {
        let positions = remap(0, &score.positions, text::char_len(&entry.title));
        item.title = highlight(&config.mark, &entry.title, &positions);
    }

    if let Some(score) = result.scores.get(CONTENT_FIELD) {
        let excerpt = style.excerpt(&entry.content, score);
        item.description = highlight(&config.mark, &excerpt.text, &excerpt.positions);
    }

    item
}
