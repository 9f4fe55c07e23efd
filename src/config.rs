// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Hosts hand over a JSON object; anything missing falls back to the defaults
//! below. Keys are camelCase so the same object works from JavaScript and
//! from a config file passed to the CLI.

use serde::{Deserialize, Serialize};

/// Default relaxation ceiling: precise, trailing and both-sided wildcards.
pub const DEFAULT_TOLERANCE: u32 = 2;

/// Default CSS class wrapped around highlighted matches.
pub const DEFAULT_MARK: &str = "search-highlight";

/// Which scorer ranks the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Phrase-aware span scoring.
    #[default]
    Phrased,
    /// The index's own relevance number, no merging.
    Sparsed,
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "phrased" => Ok(Confidence::Phrased),
            "sparsed" => Ok(Confidence::Sparsed),
            other => Err(format!("unknown confidence '{}'", other)),
        }
    }
}

/// Payload locations, resolved by the engine's resource source.
///
/// A location ending in `.br` is brotli-compressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub index: String,
    pub registry: String,
    pub language: Option<String>,
}

/// Engine options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Relaxation ceiling: 0 = precise only, 1 = + trailing wildcard, 2+ = + both.
    pub tolerance: u32,
    pub confidence: Confidence,
    /// Prefix for result links.
    pub base: String,
    /// Class name of the highlight marker.
    pub mark: String,
    pub resources: Resources,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            confidence: Confidence::Phrased,
            base: String::new(),
            mark: DEFAULT_MARK.to_string(),
            resources: Resources::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config, filling unspecified options with defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Link for a document reference.
    pub fn link(&self, reference: &str) -> String {
        if self.base.is_empty() {
            reference.to_string()
        } else {
            format!(
                "{}/{}",
                self.base.trim_end_matches('/'),
                reference.trim_start_matches('/')
            )
        }
    }
}
