//! Query matching and ranking over a documentation catalog.
//!
//! A search runs in three steps: [`Query::parse`] splits and normalizes the
//! input, [`collect_hits`] walks the catalog tree applying the query's
//! predicates, and [`rank_hits`] orders the hits and drops weak ones.

pub(crate) mod hit;
pub(crate) mod normalize;
pub(crate) mod query;
pub(crate) mod ranking;
pub(crate) mod walker;

pub use hit::{Hit, HitKind, MatchedField};
pub use normalize::{SCOPE_MODIFIERS, normalize, strip_leading_modifier};
pub use query::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, Query};
pub use ranking::rank_hits;
pub use walker::collect_hits;
