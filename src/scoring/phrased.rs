// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Phrase-aware span scoring.
//!
//! Tokens of one field arrive sorted by start offset. The scorer walks them
//! once, growing a span while consecutive tokens sit within `MERGE_TOLERANCE`
//! of each other and closing it when they don't. Each token adds a weight to
//! its span; the weight jumps when the text of the span so far (matched words
//! joined by spaces) is still a substring of the query phrase.
//!
//! ```text
//!   query "brown fox"      field "quick brown fox jumps"
//!
//!   brown [6,11)  → opens span            +2   (first token, exact)
//!   fox   [12,15) → gap 1, "brown fox" ⊂ query
//!                                         +10  (exact, phrase)
//!   ───────────────────────────────────────────
//!   span [6,15) score 12
//! ```
//!
//! The walk is an explicit state machine over a token queue. Overlapping
//! spans are collapsed afterwards by `dedupe_spans`.

use super::core::{
    QueryTerms, Score, Token, EXACT_PHRASE_WEIGHT, EXACT_WEIGHT, MERGE_TOLERANCE,
    WILDCARD_PHRASE_WEIGHT, WILDCARD_WEIGHT,
};
use crate::types::Position;
use std::collections::VecDeque;

/// A closed, scored run of tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub score: f64,
    pub position: Position,
}

/// The span currently being grown.
#[derive(Debug)]
struct OpenSpan {
    score: f64,
    position: Position,
    /// Matched token texts so far, joined by spaces.
    phrase: String,
    /// Position of the previous token (not the span end - gaps are token to token).
    last: Position,
}

#[derive(Debug)]
enum Step {
    /// Take the first token and open a span.
    Start,
    /// Pull the next token off the queue.
    Next,
    /// Merge `Token` into the open span or close it and start over.
    Match(Token),
    /// Queue exhausted: close the open span.
    Flush,
}

/// Runs the walk for one field.
struct SpanMachine<'q> {
    query: &'q QueryTerms,
    queue: VecDeque<Token>,
    open: Option<OpenSpan>,
    spans: Vec<Span>,
}

impl<'q> SpanMachine<'q> {
    fn new(query: &'q QueryTerms, tokens: Vec<Token>) -> Self {
        SpanMachine {
            query,
            queue: tokens.into(),
            open: None,
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Span> {
        let mut step = Some(Step::Start);
        while let Some(current) = step {
            step = self.step(current);
        }
        self.spans
    }

    fn step(&mut self, step: Step) -> Option<Step> {
        match step {
            Step::Start => {
                let token = self.queue.pop_front()?;
                self.open = Some(self.open_span(token));
                Some(Step::Next)
            }
            Step::Next => match self.queue.pop_front() {
                Some(token) => Some(Step::Match(token)),
                None => Some(Step::Flush),
            },
            Step::Match(token) => {
                let merged = match self.open.as_mut() {
                    Some(open) if open.last.gap_to(&token.position) <= MERGE_TOLERANCE => {
                        Self::merge(self.query, open, &token);
                        true
                    }
                    _ => false,
                };
                if !merged {
                    self.close();
                    self.open = Some(self.open_span(token));
                }
                Some(Step::Next)
            }
            Step::Flush => {
                self.close();
                None
            }
        }
    }

    /// First token of a span: no predecessor, so the base weight applies.
    fn open_span(&self, token: Token) -> OpenSpan {
        let score = if self.query.is_exact(&token.text) {
            EXACT_WEIGHT
        } else {
            WILDCARD_WEIGHT
        };
        OpenSpan {
            score,
            position: token.position,
            last: token.position,
            phrase: token.text,
        }
    }

    fn merge(query: &QueryTerms, open: &mut OpenSpan, token: &Token) {
        open.phrase.push(' ');
        open.phrase.push_str(&token.text);

        let in_phrase = query.phrase.contains(open.phrase.as_str());
        open.score += match (query.is_exact(&token.text), in_phrase) {
            (true, true) => EXACT_PHRASE_WEIGHT,
            (true, false) => EXACT_WEIGHT,
            (false, true) => WILDCARD_PHRASE_WEIGHT,
            (false, false) => WILDCARD_WEIGHT,
        };
        open.position.end = open.position.end.max(token.position.end);
        open.last = token.position;
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.spans.push(Span {
                score: open.score,
                position: open.position,
            });
        }
    }
}

/// Walk `tokens` (sorted by start) into scored spans.
pub fn spans(query: &QueryTerms, tokens: Vec<Token>) -> Vec<Span> {
    SpanMachine::new(query, tokens).run()
}

/// Collapse spans that touch or overlap, left to right.
///
/// Of two colliding spans the higher score survives; on a tie the earlier one
/// stays. Idempotent on its own output.
pub fn dedupe_spans(spans: Vec<Span>) -> Vec<Span> {
    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match kept.last_mut() {
            Some(last) if last.position.touches(&span.position) => {
                if span.score > last.score {
                    *last = span;
                }
            }
            _ => kept.push(span),
        }
    }
    kept
}

/// The highest-scoring span. Ties keep the first one encountered.
pub fn best_span(spans: &[Span]) -> Option<&Span> {
    spans
        .iter()
        .reduce(|best, span| if best.score >= span.score { best } else { span })
}

/// Phrased score of one field. `None` when the field had no tokens.
pub fn score_field(query: &QueryTerms, tokens: Vec<Token>) -> Option<Score> {
    let spans = dedupe_spans(spans(query, tokens));
    let best = best_span(&spans)?;

    Some(Score {
        score: best.score,
        anchor: best.position,
        positions: spans.iter().map(|span| span.position).collect(),
    })
}
