// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query text → clauses.
//!
//! The syntax is deliberately small:
//!
//! | Input          | Clause                                       |
//! |----------------|----------------------------------------------|
//! | `fox`          | optional term over all fields                |
//! | `+fox` `-fox`  | required / prohibited                        |
//! | `title:fox`    | scoped to one field                          |
//! | `fox*` `*fox`  | trailing / leading wildcard (pipeline off)   |
//! | `fox^3`        | boosted                                      |
//!
//! Hyphens inside a word split it into several clauses that share the word's
//! presence and field: `-foo-bar` prohibits both. Edit distance (`fox~1`) is
//! rejected rather than silently ignored - there is no fuzzy matching here.

use crate::error::{Result, SearchError};
use crate::types::{Clause, Presence, Wildcard};

/// Parse `text` against the index's field list.
///
/// Empty or whitespace-only text yields no clauses.
pub fn parse(text: &str, fields: &[String]) -> Result<Vec<Clause>> {
    let mut clauses = Vec::new();

    for word in text.split_whitespace() {
        parse_word(text, word, fields, &mut clauses)?;
    }

    Ok(clauses)
}

fn parse_word(query: &str, word: &str, fields: &[String], out: &mut Vec<Clause>) -> Result<()> {
    let (presence, rest) = match word.chars().next() {
        Some('+') => (Presence::Required, &word[1..]),
        Some('-') => (Presence::Prohibited, &word[1..]),
        _ => (Presence::Optional, word),
    };

    let (field, rest) = match rest.split_once(':') {
        Some((name, term)) => {
            let name = name.to_lowercase();
            if name.is_empty() {
                return Err(SearchError::query_parse(query, "expected a field name before ':'"));
            }
            if !fields.iter().any(|field| *field == name) {
                return Err(SearchError::query_parse(
                    query,
                    format!(
                        "unrecognised field '{}', possible fields: {}",
                        name,
                        fields.join(", ")
                    ),
                ));
            }
            (Some(name), term)
        }
        None => (None, rest),
    };

    let (body, boost) = split_modifiers(query, rest)?;

    let mut produced = 0;
    for piece in body.split('-').filter(|piece| !piece.is_empty()) {
        let (term, wildcard) = split_wildcard(query, piece)?;

        let mut clause = Clause::new(term.to_lowercase())
            .with_presence(presence)
            .with_wildcard(wildcard);
        clause.field = field.clone();
        clause.boost = boost;
        out.push(clause);
        produced += 1;
    }

    if produced == 0 {
        return Err(SearchError::query_parse(
            query,
            format!("expected a term after '{}'", word),
        ));
    }

    Ok(())
}

/// Peel `^boost` and `~distance` off the end of a term.
fn split_modifiers<'a>(query: &str, text: &'a str) -> Result<(&'a str, f64)> {
    if let Some(at) = text.find('~') {
        return Err(SearchError::query_parse(
            query,
            format!("edit distance '{}' is not supported", &text[at..]),
        ));
    }

    match text.split_once('^') {
        Some((body, raw)) => {
            let boost: f64 = raw.parse().map_err(|_| {
                SearchError::query_parse(query, format!("boost must be numeric, found '{}'", raw))
            })?;
            if !boost.is_finite() || boost <= 0.0 {
                return Err(SearchError::query_parse(
                    query,
                    format!("boost must be positive, found '{}'", raw),
                ));
            }
            Ok((body, boost))
        }
        None => Ok((text, 1.0)),
    }
}

/// Strip `*` edges into a wildcard mode. A `*` in the middle is an error.
fn split_wildcard<'a>(query: &str, piece: &'a str) -> Result<(&'a str, Wildcard)> {
    let leading = piece.starts_with('*');
    let trimmed = piece.trim_start_matches('*');
    let trailing = trimmed.ends_with('*');
    let term = trimmed.trim_end_matches('*');

    if term.is_empty() {
        return Err(SearchError::query_parse(
            query,
            "a wildcard needs at least one literal character",
        ));
    }
    if term.contains('*') {
        return Err(SearchError::query_parse(
            query,
            format!("wildcards are only allowed at term edges, found '{}'", piece),
        ));
    }

    Ok((term, Wildcard::from_edges(leading, trailing)))
}
