mod common;

use assert2::{check, let_assert};
use catalog_search::{Catalog, HitKind, Query, SearchConfig, SearchEngine};
use common::{engine, full_names};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn exact_name_ranks_before_longer_names(engine: SearchEngine) {
    check!(full_names(&engine, "map") == vec!["Array#map", "Array#flat_map"]);
}

#[rstest]
#[case("#each", &["Array#each"])]
#[case(".new", &["Array#new", "Array#new_array"])]
#[case(".build", &["Array#build"])]
#[case("#build", &[])]
fn scoped_terms_select_method_kinds(
    engine: SearchEngine,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    check!(full_names(&engine, query) == expected);
}

#[rstest]
fn instance_and_class_scopes_split_same_named_methods(engine: SearchEngine) {
    let instance_hits = engine.search("#get");
    let_assert!([instance] = instance_hits.as_slice());
    check!(instance.kind == HitKind::InstanceMethod);
    check!(instance.url == "HTTP/Client.html#get(path)-instance-method");

    let class_hits = engine.search("Client.get");
    let_assert!([class] = class_hits.as_slice());
    check!(class.kind == HitKind::ClassMethod);
    check!(class.args.as_deref() == Some("(url : String)"));
}

#[rstest]
fn owner_scope_must_appear_in_owner_name(engine: SearchEngine) {
    check!(full_names(&engine, "Array#get").is_empty());
    check!(full_names(&engine, "client#get") == vec!["HTTP::Client#get"]);
}

#[rstest]
fn qualified_name_matches_namespace_prefix(engine: SearchEngine) {
    let names = full_names(&engine, "HTTP::Client");
    check!(names == vec!["HTTP::Client", "HTTP::ClientError"]);
    check!(!names.contains(&"HTTPClient".to_string()));
}

#[rstest]
fn trailing_colon_matches_whole_segment_start(engine: SearchEngine) {
    let names = full_names(&engine, "Client:");
    check!(names.contains(&"HTTP::Client".to_string()));
    check!(!names.contains(&"HTTPClient".to_string()));
}

#[rstest]
#[case("map")]
#[case("http client requests")]
#[case(".new array")]
#[case("HTTP::Client get")]
#[case("index default")]
fn every_hit_matched_a_query_term(engine: SearchEngine, #[case] query: &str) {
    let normalized = Query::parse(query).normalized_terms().to_vec();
    let hits = engine.ranked_hits(query);
    check!(!hits.is_empty());
    for hit in &hits {
        check!(!hit.matched_fields.is_empty());
        check!(hit.matched_terms.iter().all(|term| normalized.contains(term)));
    }
}

#[rstest]
fn argument_names_are_searchable(engine: SearchEngine) {
    let fetch_hits = engine.search("default");
    let_assert!([fetch] = fetch_hits.as_slice());
    check!(fetch.full_name == "Array#fetch");
    check!(fetch.args.as_deref() == Some("(index : Int, <mark>default</mark>)"));
}

#[rstest]
fn constants_show_value_and_owner(engine: SearchEngine) {
    let constant_hits = engine.search("header");
    let_assert!([constant] = constant_hits.as_slice());
    check!(constant.kind == HitKind::Constant);
    check!(constant.value.as_deref() == Some("16384"));
    check!(constant.owner.as_deref() == Some("HTTP"));
    check!(constant.url == "HTTP.html#MAX_HEADER_SIZE");
    check!(
        constant.summary.as_deref()
            == Some("Maximum permitted <mark>header</mark> size in bytes.")
    );
}

#[rstest]
fn titles_and_summaries_are_highlighted(engine: SearchEngine) {
    let records = engine.search("array new");
    let_assert!(Some(array) = records.iter().find(|r| r.full_name == "Array"));
    check!(array.title == "<mark>Array</mark>");
    check!(array.owner.is_none());
    check!(array.type_kind.as_deref() == Some("class"));
    // Paragraph tags are stripped from summaries.
    check!(
        array.summary.as_deref() == Some("An ordered, integer-indexed collection of elements.")
    );

    let_assert!(Some(ctor) = records.iter().find(|r| r.full_name == "Array#new"));
    check!(ctor.owner.as_deref() == Some("<mark>Array</mark>"));
    check!(ctor.title_html().starts_with("<strong><b>.</b><mark>new</mark></strong>"));
}

#[rstest]
fn repeated_search_is_identical(engine: SearchEngine) {
    check!(engine.search("http client") == engine.search("http client"));
    check!(engine.search("#each") == engine.search("#each"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("# . :")]
fn blank_queries_return_nothing(engine: SearchEngine, #[case] query: &str) {
    check!(engine.search(query).is_empty());
}

#[rstest]
#[case("::")]
#[case(":::")]
#[case("#")]
#[case("a#b.c::d")]
#[case("(.*)[")]
#[case("\u{1F600}:")]
fn malformed_queries_do_not_fail(engine: SearchEngine, #[case] query: &str) {
    let _ = engine.search(query);
}

#[test]
fn hits_far_below_the_best_are_dropped() {
    let catalog = Catalog::from_json_str(
        r#"{"program": {"full_name": "Top Level Namespace", "types": [
            {"full_name": "Gadget", "path": "Gadget.html", "doc": "Works quickly."},
            {"full_name": "Sprite", "path": "Sprite.html", "doc": "Renders quickly."},
            {"full_name": "Widget", "path": "Widget.html", "doc": "Renders frames quickly."},
            {"full_name": "WidgetRenderer", "path": "WidgetRenderer.html"}
        ]}}"#,
    )
    .unwrap();
    let engine = SearchEngine::new(Arc::new(catalog), &SearchConfig::default());

    let names: Vec<_> = engine
        .search("widget renders quickly")
        .into_iter()
        .map(|r| r.full_name)
        .collect();
    check!(names == vec!["Widget", "Sprite"]);
}

#[test]
fn display_cap_is_configurable() {
    let types = (0..30)
        .map(|i| format!(r#"{{"full_name": "Node{i}", "path": "Node{i}.html"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    let json = format!(r#"{{"program": {{"full_name": "Top Level Namespace", "types": [{types}]}}}}"#);
    let catalog = Arc::new(Catalog::from_json_str(&json).unwrap());

    let capped = SearchEngine::new(
        catalog.clone(),
        &SearchConfig {
            max_results: 10,
            ..SearchConfig::default()
        },
    );
    check!(capped.search("node").len() == 10);
    check!(SearchEngine::new(catalog, &SearchConfig::default()).search("node").len() == 30);
}
