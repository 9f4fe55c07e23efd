// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term pipeline: what a query term goes through before exact lookup.
//!
//! Accent folding and lowercasing always run. A language pack adds a stop-word
//! filter on top. Wildcard clauses skip the pipeline entirely - they are
//! matched against the vocabulary exactly as typed.

use serde::Deserialize;
use std::collections::HashSet;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a term: strip diacritics and lowercase.
///
/// - "café" → "cafe"
/// - "Naïve" → "naive"
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Lightweight normalization without the unicode tables: lowercase only.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Combining marks (Unicode category Mn) that NFD splits off base letters.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Language augmentation payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePack {
    pub language: String,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

/// The query-side term pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    language: Option<String>,
    stop_words: HashSet<String>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language pack. Replaces any earlier one.
    pub fn with_language(mut self, pack: LanguagePack) -> Self {
        self.stop_words = pack.stop_words.iter().map(|word| normalize(word)).collect();
        self.language = Some(pack.language);
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Normalize, trim non-alphanumeric edges, then drop stop words.
    pub fn run(&self, term: &str) -> Option<String> {
        let normalized = normalize(term);
        let trimmed = normalized.trim_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() || self.stop_words.contains(trimmed) {
            return None;
        }
        Some(trimmed.to_string())
    }
}
