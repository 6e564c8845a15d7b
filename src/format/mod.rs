//! Result formatting: ranked hits to display records.

mod record;

pub use record::DisplayRecord;

use crate::search::{Hit, HitKind, Query};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Default number of records shown for one query.
pub const MAX_RESULTS_DISPLAY: usize = 140;

/// Maps a hit's stored link to a navigable address.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, href: &str) -> String;
}

/// Resolves links by prefixing a fixed base path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(pub String);

impl BasePath {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }
}

impl LinkResolver for BasePath {
    fn resolve(&self, href: &str) -> String {
        format!("{}{}", self.0, href)
    }
}

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Remove every markup tag except `<code>` and `</code>`.
pub fn sanitize(html: &str) -> String {
    MARKUP_TAG
        .replace_all(html, |caps: &Captures<'_>| {
            let tag = &caps[0];
            let inner = &tag[1..];
            if inner.starts_with("code") || inner.starts_with("/code") {
                tag.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Turn one ranked hit into a display record.
pub fn format_hit(hit: &Hit, query: &Query, links: &dyn LinkResolver) -> DisplayRecord {
    let is_type = hit.kind == HitKind::Type;
    let title = if is_type { &hit.full_name } else { &hit.name };

    DisplayRecord {
        kind: hit.kind,
        prefix: hit.kind.prefix(),
        title: query.highlight(Some(title)),
        args: hit
            .args_string
            .as_deref()
            .filter(|args| !args.is_empty())
            .map(|args| query.highlight(Some(args))),
        owner: hit
            .owner
            .as_deref()
            .filter(|_| !is_type)
            .map(|owner| query.highlight(Some(owner))),
        summary: hit
            .summary
            .as_deref()
            .filter(|summary| !summary.is_empty())
            .map(|summary| query.highlight(Some(&sanitize(summary)))),
        url: links.resolve(&hit.href),
        full_name: hit.full_name.clone(),
        type_kind: hit.type_kind.clone(),
        value: hit.value.clone(),
    }
}

/// Format the first `max_results` ranked hits.
pub fn format_records(
    hits: &[Hit],
    query: &Query,
    max_results: usize,
    links: &dyn LinkResolver,
) -> Vec<DisplayRecord> {
    hits.iter()
        .take(max_results)
        .map(|hit| format_hit(hit, query, links))
        .collect()
}

/// Render records as numbered plain-text entries.
pub fn render_text(records: &[DisplayRecord]) -> String {
    let mut output = String::new();
    for (idx, record) in records.iter().enumerate() {
        output.push_str(&format!("{}. ", idx + 1));
        // Writing into a String cannot fail.
        let _ = record.write_text(&mut output);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::hit::tests::hit;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("<p>Hello <em>world</em></p>", "Hello world")]
    #[case("Use <code>map</code> here", "Use <code>map</code> here")]
    #[case("<code class=\"x\">a</code><br/>", "<code class=\"x\">a</code>")]
    #[case("<a href=\"#x\">link</a>", "link")]
    #[case("a < b", "a < b")]
    fn sanitize_keeps_only_code_tags(#[case] input: &str, #[case] expected: &str) {
        check!(sanitize(input) == expected);
    }

    #[test]
    fn base_path_prefixes_links() {
        check!(BasePath::new("../").resolve("Array.html#map") == "../Array.html#map");
        check!(BasePath::default().resolve("Array.html") == "Array.html");
    }

    #[test]
    fn method_records_carry_owner_and_args() {
        let mut h = hit(HitKind::ClassMethod, "new");
        h.full_name = "Array#new".into();
        h.owner = Some("Array".into());
        h.href = "Array.html#new-class-method".into();
        h.args_string = Some("(size : Int)".into());
        h.summary = Some("<p>Creates a new <code>Array</code>.</p>".into());

        let query = Query::parse("array");
        let record = format_hit(&h, &query, &BasePath::new("/docs/"));
        check!(record.prefix == Some("."));
        check!(record.title == "new");
        check!(record.args.as_deref() == Some("(size : Int)"));
        check!(record.owner.as_deref() == Some("<mark>Array</mark>"));
        check!(
            record.summary.as_deref() == Some("Creates a new <code><mark>Array</mark></code>.")
        );
        check!(record.url == "/docs/Array.html#new-class-method");
    }

    #[test]
    fn type_records_use_full_name_and_no_owner() {
        let mut h = hit(HitKind::Type, "Client");
        h.full_name = "HTTP::Client".into();
        h.type_kind = Some("class".into());
        let record = format_hit(&h, &Query::parse("client"), &BasePath::default());
        check!(record.prefix.is_none());
        check!(record.title == "HTTP::<mark>Client</mark>");
        check!(record.owner.is_none());
        check!(record.summary.is_none());
    }

    #[test]
    fn records_are_capped() {
        let hits: Vec<_> = (0..10)
            .map(|i| hit(HitKind::Constant, &format!("C{i}")))
            .collect();
        let records = format_records(&hits, &Query::parse("c"), 3, &BasePath::default());
        check!(records.len() == 3);
        check!(records[2].full_name == "C2");
    }

    #[test]
    fn text_rendering_numbers_entries() {
        let hits = vec![hit(HitKind::Constant, "MAX"), hit(HitKind::Constant, "MIN")];
        let records = format_records(&hits, &Query::parse("m"), 10, &BasePath::default());
        let text = render_text(&records);
        check!(text.starts_with("1. MAX\n"));
        check!(text.contains("2. MIN\n"));
    }
}
