// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the glean command-line interface.
//!
//! Three subcommands: `suggest` for typeahead-style results, `search` for a
//! page of full results, `inspect` to look inside an index payload. Payload
//! paths are plain file paths; a `.br` suffix means brotli-compressed.

pub mod display;

use clap::{Args, Parser, Subcommand};
use glean::Confidence;

#[derive(Parser)]
#[command(
    name = "glean",
    about = "Rank and excerpt documents from a prebuilt search index",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Payload locations.
#[derive(Args, Debug, Clone)]
pub struct ResourceArgs {
    /// Index payload (JSON, optionally .br)
    #[arg(short, long)]
    pub index: String,

    /// Registry payload: reference → {title, content, keywords}
    #[arg(short, long)]
    pub registry: String,

    /// Language pack with stop words
    #[arg(long)]
    pub language: Option<String>,
}

/// Engine options. Flags override values from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON config file (same shape a worker host passes to `init`)
    #[arg(long)]
    pub config: Option<String>,

    /// Relaxation ceiling: 0 precise only, 1 + trailing wildcard, 2 + both sides
    #[arg(long)]
    pub tolerance: Option<u32>,

    /// Scoring mode
    #[arg(long, value_parser = parse_confidence)]
    pub confidence: Option<Confidence>,

    /// Highlight class name
    #[arg(long)]
    pub mark: Option<String>,

    /// Link prefix
    #[arg(long)]
    pub base: Option<String>,

    /// Print page items as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_confidence(value: &str) -> Result<Confidence, String> {
    value.parse()
}

#[derive(Subcommand)]
pub enum Commands {
    /// Typeahead suggestions (last word may be incomplete)
    Suggest {
        #[command(flatten)]
        resources: ResourceArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Search query
        query: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// One page of full search results
    Search {
        #[command(flatten)]
        resources: ResourceArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Search query
        query: String,

        /// Results per page
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show fields, documents and vocabulary of an index payload
    Inspect {
        /// Index payload (JSON, optionally .br)
        index: String,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
