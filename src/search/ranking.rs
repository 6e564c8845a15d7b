//! Result ranking: how raw hits get ordered and filtered.
//!
//! Ordering is a cascade of stages. Each stage either settles the pair
//! (`Some(ordering)`, where `Some(Equal)` settles it as a tie) or defers to
//! the next stage (`None`). Stages, in order:
//!
//! 1. **Kind** - types before members, unless the member only matched in docs
//! 2. **Name** - name matches first, earlier term position within the name wins
//! 3. **Terms** - more distinct matched terms wins
//! 4. **Fields** - more matched fields wins
//! 5. **Display name** - locale-style alphabetical order
//! 6. **Arguments** - earlier term position within the argument string wins
//!
//! The cascade is not guaranteed to be transitive, so hits are ordered with
//! a stable merge sort that never inspects the comparator for consistency.

use super::hit::{Hit, HitKind, MatchedField};
use super::normalize::strip_namespace_colons;
use super::query::Query;
use std::cmp::Ordering;

/// A hit with its sort keys computed once.
#[derive(Debug)]
struct Candidate {
    hit: Hit,
    /// Lowercased prefix + name (full name for types).
    label: String,
    distinct_terms: usize,
}

impl Candidate {
    fn new(hit: Hit) -> Self {
        Self {
            label: hit.ranking_label(),
            distinct_terms: hit.distinct_term_count(),
            hit,
        }
    }
}

/// Query-derived inputs shared by all stages.
#[derive(Debug)]
struct RankContext<'q> {
    /// Normalized terms with namespace colons trimmed, for name positions.
    name_terms: Vec<&'q str>,
    /// Terms as typed, for argument-string positions.
    raw_terms: &'q [String],
}

impl<'q> RankContext<'q> {
    fn new(query: &'q Query) -> Self {
        Self {
            name_terms: query
                .normalized_terms()
                .iter()
                .map(|t| strip_namespace_colons(t))
                .collect(),
            raw_terms: query.terms(),
        }
    }
}

type Stage = fn(&Candidate, &Candidate, &RankContext<'_>) -> Option<Ordering>;

const STAGES: [Stage; 6] = [
    by_kind,
    by_name_match,
    by_distinct_terms,
    by_field_count,
    by_display_name,
    by_argument_position,
];

fn compare(a: &Candidate, b: &Candidate, ctx: &RankContext<'_>) -> Ordering {
    STAGES
        .iter()
        .find_map(|stage| stage(a, b, ctx))
        .unwrap_or(Ordering::Equal)
}

fn by_kind(a: &Candidate, b: &Candidate, _: &RankContext<'_>) -> Option<Ordering> {
    let a_type = a.hit.kind == HitKind::Type;
    let b_type = b.hit.kind == HitKind::Type;

    if a_type && !b_type && !b.hit.matched_only_doc() {
        Some(Ordering::Less)
    } else if b_type && !a_type && !a.hit.matched_only_doc() {
        Some(Ordering::Greater)
    } else {
        None
    }
}

/// Compare where each term first occurs in two strings.
///
/// The first term that occurs at different positions, or in only one string,
/// decides; `None` when no term does.
fn first_position_difference<'t>(
    a: &str,
    b: &str,
    terms: impl IntoIterator<Item = &'t str>,
) -> Option<Ordering> {
    terms
        .into_iter()
        .find_map(|term| match (a.find(term), b.find(term)) {
            (Some(x), Some(y)) if x != y => Some(x.cmp(&y)),
            (Some(_), None) => Some(Ordering::Less),
            (None, Some(_)) => Some(Ordering::Greater),
            _ => None,
        })
}

fn by_name_match(a: &Candidate, b: &Candidate, ctx: &RankContext<'_>) -> Option<Ordering> {
    match (
        a.hit.has_field(MatchedField::Name),
        b.hit.has_field(MatchedField::Name),
    ) {
        (true, true) => {
            first_position_difference(&a.label, &b.label, ctx.name_terms.iter().copied())
        }
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => None,
    }
}

/// Term counts settle the pair when they differ, or when only one side matched docs.
fn by_distinct_terms(a: &Candidate, b: &Candidate, _: &RankContext<'_>) -> Option<Ordering> {
    let a_docs = a.hit.has_field(MatchedField::Doc);
    let b_docs = b.hit.has_field(MatchedField::Doc);

    (a.distinct_terms != b.distinct_terms || a_docs != b_docs)
        .then(|| b.distinct_terms.cmp(&a.distinct_terms))
}

fn by_field_count(a: &Candidate, b: &Candidate, _: &RankContext<'_>) -> Option<Ordering> {
    let ord = b.hit.matched_fields.len().cmp(&a.hit.matched_fields.len());
    ord.is_ne().then_some(ord)
}

fn by_display_name(a: &Candidate, b: &Candidate, _: &RankContext<'_>) -> Option<Ordering> {
    let ord = locale_compare(&a.hit.name, &b.hit.name);
    ord.is_ne().then_some(ord)
}

fn by_argument_position(a: &Candidate, b: &Candidate, ctx: &RankContext<'_>) -> Option<Ordering> {
    if !(a.hit.has_field(MatchedField::Args) && b.hit.has_field(MatchedField::Args)) {
        return None;
    }
    first_position_difference(
        a.hit.args_string.as_deref().unwrap_or(""),
        b.hit.args_string.as_deref().unwrap_or(""),
        ctx.raw_terms.iter().map(String::as_str),
    )
}

/// Alphabetical order that ignores case first, then puts lowercase before uppercase.
///
/// Only approximates browser `localeCompare`: punctuation and accented
/// letters sort by code point here, not by collation weight.
pub(crate) fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Stable merge sort; equal elements keep their input order.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        if compare(r, l) == Ordering::Less {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Order hits for display and drop those that match far fewer terms than the best.
///
/// After sorting, when more than one hit remains, only hits whose distinct
/// matched-term count is at least the first hit's count minus one are kept.
pub fn rank_hits(hits: Vec<Hit>, query: &Query) -> Vec<Hit> {
    let ctx = RankContext::new(query);
    let candidates = hits.into_iter().map(Candidate::new).collect();
    let mut ranked = merge_sort(candidates, &mut |a, b| compare(a, b, &ctx));

    if ranked.len() > 1 {
        let best = ranked[0].distinct_terms;
        let before = ranked.len();
        ranked.retain(|c| c.distinct_terms + 1 >= best);
        if ranked.len() < before {
            tracing::trace!(
                "Dropped {} hits matching fewer than {} distinct terms",
                before - ranked.len(),
                best.saturating_sub(1)
            );
        }
    }

    ranked.into_iter().map(|c| c.hit).collect()
}
