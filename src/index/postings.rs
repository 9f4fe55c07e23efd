// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional postings index loaded from a JSON payload.
//!
//! The payload is produced at site-build time and arrives here read-only:
//!
//! ```text
//! {
//!   "version": 1,
//!   "fields": [{"name": "title", "boost": 3}, {"name": "content", "boost": 1}],
//!   "documents": ["guide/start.html", ...],
//!   "postings": { term: { field: { ref: [[start, length], ...] } } }
//! }
//! ```
//!
//! Offsets are *character* offsets into the registry's stored text for that
//! field. The loader checks every reference against `fields` and `documents`
//! up front so that query evaluation can index straight into vectors.
//!
//! # Query model
//!
//! | Presence   | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | Required   | every required clause must match                         |
//! | Prohibited | no prohibited clause may match                           |
//! | Optional   | at least one must match, unless required clauses exist   |
//!
//! A query of only prohibited clauses matches every other document.

use super::pipeline::Pipeline;
use super::FullTextIndex;
use crate::error::{Result, SearchError};
use crate::types::{Clause, IndexMatch, Position, Presence, TermPositions, Wildcard};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Payload format version understood by this loader.
pub const PAYLOAD_VERSION: u32 = 1;

/// BM25-style term-frequency saturation.
const TF_SATURATION: f64 = 1.2;

fn default_boost() -> f64 {
    1.0
}

/// An indexed field and its weight in the base score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default = "default_boost")]
    pub boost: f64,
}

/// The serialized index, as written by the site build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexPayload {
    pub version: u32,
    pub fields: Vec<FieldSpec>,
    pub documents: Vec<String>,
    /// term → field → document → `(start, length)` pairs.
    pub postings: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<(usize, usize)>>>>,
}

/// Occurrences of one term in one field of one document.
#[derive(Debug, Clone)]
struct Posting {
    field: usize,
    doc: usize,
    positions: Vec<Position>,
}

/// Everything stored for one vocabulary term.
#[derive(Debug, Clone)]
struct TermEntry {
    /// Number of distinct documents containing the term.
    doc_freq: usize,
    postings: Vec<Posting>,
}

/// Summary numbers for `glean inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub fields: Vec<FieldSpec>,
    pub documents: usize,
    pub vocabulary: usize,
    pub postings: usize,
    pub occurrences: usize,
}

/// The loaded, immutable index.
#[derive(Debug, Clone)]
pub struct PostingsIndex {
    specs: Vec<FieldSpec>,
    field_names: Vec<String>,
    documents: Vec<String>,
    /// Sorted so trailing wildcards become a range scan.
    vocabulary: BTreeMap<String, TermEntry>,
    pipeline: Pipeline,
}

/// One clause resolved against the vocabulary.
struct ResolvedClause<'a> {
    clause: &'a Clause,
    field: Option<usize>,
    terms: Vec<(&'a str, &'a TermEntry)>,
}

impl ResolvedClause<'_> {
    fn postings(&self) -> impl Iterator<Item = (&str, &Posting)> + '_ {
        self.terms.iter().flat_map(move |(term, entry)| {
            entry
                .postings
                .iter()
                .filter(move |posting| self.field.map_or(true, |field| posting.field == field))
                .map(move |posting| (*term, posting))
        })
    }

    fn docs(&self) -> BTreeSet<usize> {
        self.postings().map(|(_, posting)| posting.doc).collect()
    }
}

impl PostingsIndex {
    /// Decode a JSON payload.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let payload: IndexPayload =
            serde_json::from_slice(bytes).map_err(|e| SearchError::resource_load("index", e))?;
        Self::from_payload(payload)
    }

    /// Validate a decoded payload and build the lookup structures.
    pub fn from_payload(payload: IndexPayload) -> Result<Self> {
        if payload.version != PAYLOAD_VERSION {
            return Err(SearchError::resource_load(
                "index",
                format!(
                    "unsupported payload version {} (expected {})",
                    payload.version, PAYLOAD_VERSION
                ),
            ));
        }

        let field_ids: HashMap<&str, usize> = payload
            .fields
            .iter()
            .enumerate()
            .map(|(id, spec)| (spec.name.as_str(), id))
            .collect();
        let doc_ids: HashMap<&str, usize> = payload
            .documents
            .iter()
            .enumerate()
            .map(|(id, reference)| (reference.as_str(), id))
            .collect();

        let mut vocabulary = BTreeMap::new();
        for (term, fields) in &payload.postings {
            let mut postings = Vec::new();
            let mut docs = BTreeSet::new();

            for (field, documents) in fields {
                let field_id = *field_ids.get(field.as_str()).ok_or_else(|| {
                    SearchError::resource_load(
                        "index",
                        format!("term '{}' references undeclared field '{}'", term, field),
                    )
                })?;

                for (reference, spans) in documents {
                    let doc_id = *doc_ids.get(reference.as_str()).ok_or_else(|| {
                        SearchError::resource_load(
                            "index",
                            format!("term '{}' references unknown document '{}'", term, reference),
                        )
                    })?;

                    let mut positions: Vec<Position> = spans
                        .iter()
                        .map(|&(start, length)| Position::from_span(start, length))
                        .collect();
                    positions.sort();
                    docs.insert(doc_id);
                    postings.push(Posting {
                        field: field_id,
                        doc: doc_id,
                        positions,
                    });
                }
            }

            vocabulary.insert(
                term.clone(),
                TermEntry {
                    doc_freq: docs.len(),
                    postings,
                },
            );
        }

        Ok(PostingsIndex {
            field_names: payload.fields.iter().map(|spec| spec.name.clone()).collect(),
            specs: payload.fields,
            documents: payload.documents,
            vocabulary,
            pipeline: Pipeline::new(),
        })
    }

    /// Replace the term pipeline (e.g. after a language pack is loaded).
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn stats(&self) -> IndexStats {
        let postings = self.vocabulary.values().map(|entry| entry.postings.len()).sum();
        let occurrences = self
            .vocabulary
            .values()
            .flat_map(|entry| entry.postings.iter())
            .map(|posting| posting.positions.len())
            .sum();

        IndexStats {
            fields: self.specs.clone(),
            documents: self.documents.len(),
            vocabulary: self.vocabulary.len(),
            postings,
            occurrences,
        }
    }

    /// Inverse document frequency, smoothed so it stays positive.
    fn idf(&self, doc_freq: usize) -> f64 {
        let n = self.documents.len() as f64;
        let df = doc_freq as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Vocabulary terms a clause can match.
    ///
    /// `None` means the clause drops out of the query entirely (its term was
    /// filtered by the pipeline), as opposed to an empty expansion, which
    /// matches nothing.
    fn expand<'a>(&'a self, clause: &'a Clause) -> Option<Vec<(&'a str, &'a TermEntry)>> {
        let term = match clause.wildcard {
            Wildcard::None if clause.use_pipeline => self.pipeline.run(&clause.term)?,
            _ => clause.term.clone(),
        };

        let matches = match clause.wildcard {
            Wildcard::None => self
                .vocabulary
                .get_key_value(term.as_str())
                .map(|(key, entry)| (key.as_str(), entry))
                .into_iter()
                .collect(),
            Wildcard::Trailing => self
                .vocabulary
                .range(term.clone()..)
                .take_while(|(key, _)| key.starts_with(term.as_str()))
                .map(|(key, entry)| (key.as_str(), entry))
                .collect(),
            Wildcard::Leading => self
                .vocabulary
                .iter()
                .filter(|(key, _)| key.ends_with(term.as_str()))
                .map(|(key, entry)| (key.as_str(), entry))
                .collect(),
            Wildcard::Both => self
                .vocabulary
                .iter()
                .filter(|(key, _)| key.contains(term.as_str()))
                .map(|(key, entry)| (key.as_str(), entry))
                .collect(),
        };

        Some(matches)
    }

    fn resolve<'a>(&'a self, clause: &'a Clause) -> Option<ResolvedClause<'a>> {
        let terms = self.expand(clause)?;
        let field = match &clause.field {
            Some(name) => match self.field_names.iter().position(|f| f == name) {
                Some(id) => Some(id),
                // Unknown field: the clause stays in the query but matches nothing.
                None => {
                    return Some(ResolvedClause {
                        clause,
                        field: None,
                        terms: Vec::new(),
                    })
                }
            },
            None => None,
        };

        Some(ResolvedClause { clause, field, terms })
    }
}

impl FullTextIndex for PostingsIndex {
    fn fields(&self) -> &[String] {
        &self.field_names
    }

    fn process_term(&self, term: &str) -> Option<String> {
        self.pipeline.run(term)
    }

    fn query(&self, clauses: &[Clause]) -> Vec<IndexMatch> {
        let resolved: Vec<ResolvedClause<'_>> =
            clauses.iter().filter_map(|clause| self.resolve(clause)).collect();
        if resolved.is_empty() {
            return Vec::new();
        }

        let by_presence = |presence: Presence| {
            resolved
                .iter()
                .filter(move |r| r.clause.presence == presence)
                .collect::<Vec<_>>()
        };
        let required = by_presence(Presence::Required);
        let optional = by_presence(Presence::Optional);
        let prohibited = by_presence(Presence::Prohibited);

        let mut candidates: BTreeSet<usize> = if !required.is_empty() {
            let mut sets = required.iter().map(|r| r.docs());
            let first = sets.next().unwrap_or_default();
            sets.fold(first, |acc, docs| acc.intersection(&docs).copied().collect())
        } else if !optional.is_empty() {
            optional.iter().flat_map(|r| r.docs()).collect()
        } else {
            (0..self.documents.len()).collect()
        };

        for clause in &prohibited {
            for doc in clause.docs() {
                candidates.remove(&doc);
            }
        }

        let mut matches: Vec<(usize, f64, TermPositions)> = candidates
            .into_iter()
            .map(|doc| {
                let mut score = 0.0;
                let mut terms = TermPositions::new();

                for clause in required.iter().chain(optional.iter()) {
                    let clause_boost = clause.clause.boost;
                    for (term, posting) in clause.postings().filter(|(_, p)| p.doc == doc) {
                        let tf = posting.positions.len() as f64;
                        let doc_freq = self.vocabulary.get(term).map_or(1, |e| e.doc_freq);
                        score += self.specs[posting.field].boost
                            * clause_boost
                            * self.idf(doc_freq)
                            * tf
                            / (tf + TF_SATURATION);

                        terms
                            .entry(term.to_string())
                            .or_default()
                            .entry(self.field_names[posting.field].clone())
                            .or_insert_with(|| posting.positions.clone());
                    }
                }

                (doc, score, terms)
            })
            .collect();

        // Stable: equal scores keep payload document order.
        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        matches
            .into_iter()
            .map(|(doc, base_score, terms)| IndexMatch {
                reference: self.documents[doc].clone(),
                base_score,
                terms,
            })
            .collect()
    }
}
