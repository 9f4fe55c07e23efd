// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing.
//!
//! Positions coming out of the index are character offsets, while Rust strings
//! are indexed by byte. Everything that cuts text by a `Position` goes through
//! `text` so that a stray multi-byte character never lands us mid-codepoint.

pub mod text;
