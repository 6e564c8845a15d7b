//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_catalog`: a small catalog modelled on a standard library, with
//!   nested namespaces, every method kind and documented constants
//! - `engine`: a `SearchEngine` over `sample_catalog` with default settings
//! - `catalog_dir`: a [`TempCatalogDir`] holding the sample catalog in both
//!   serialized forms
//!
//! Integration test crates use different subsets, hence the `dead_code` allowances.

#![allow(dead_code)]

use catalog_search::{Catalog, SearchConfig, SearchEngine};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const SAMPLE_CATALOG: &str = r#"{
  "repository_name": "stdlib-sample",
  "program": {
    "html_id": "stdlib-sample/toplevel",
    "path": "toplevel.html",
    "kind": "module",
    "full_name": "Top Level Namespace",
    "name": "Top Level Namespace",
    "types": [
      {
        "html_id": "stdlib-sample/Array",
        "path": "Array.html",
        "kind": "class",
        "full_name": "Array",
        "name": "Array",
        "doc": "An ordered, integer-indexed collection of elements.",
        "summary": "<p>An ordered, integer-indexed collection of elements.</p>",
        "constructors": [
          {"html_id": "new(initial_capacity:Int)-class-method", "name": "new",
           "summary": "<p>Creates a new empty <code>Array</code>.</p>",
           "args": [{"name": "initial_capacity", "external_name": "initial_capacity", "restriction": "Int"}],
           "args_string": "(initial_capacity : Int)"}
        ],
        "class_methods": [
          {"html_id": "build(capacity:Int,&)-class-method", "name": "build",
           "args": [{"name": "capacity", "external_name": "capacity", "restriction": "Int"}],
           "args_string": "(capacity : Int, &)"}
        ],
        "instance_methods": [
          {"html_id": "each(&)-instance-method", "name": "each",
           "summary": "<p>Calls the given block once for each element.</p>",
           "args": [], "args_string": "(&)"},
          {"html_id": "flat_map(&)-instance-method", "name": "flat_map",
           "summary": "<p>Maps and flattens.</p>", "args": [], "args_string": "(&)"},
          {"html_id": "map(&)-instance-method", "name": "map",
           "summary": "<p>Returns a new array with the results of the block.</p>",
           "args": [], "args_string": "(&)"},
          {"html_id": "fetch(index:Int,default)-instance-method", "name": "fetch",
           "args": [{"name": "index", "external_name": "index", "restriction": "Int"},
                    {"name": "default", "external_name": "default", "restriction": ""}],
           "args_string": "(index : Int, default)"}
        ],
        "macros": [
          {"html_id": "new_array-macro", "name": "new_array", "args": [], "args_string": null}
        ],
        "constants": [],
        "types": []
      },
      {
        "html_id": "stdlib-sample/HTTP",
        "path": "HTTP.html",
        "kind": "module",
        "full_name": "HTTP",
        "name": "HTTP",
        "doc": null,
        "summary": null,
        "constants": [
          {"id": "MAX_HEADER_SIZE", "name": "MAX_HEADER_SIZE", "value": "16384",
           "doc": "Maximum permitted header size in bytes.",
           "summary": "<p>Maximum permitted header size in bytes.</p>"}
        ],
        "types": [
          {
            "html_id": "stdlib-sample/HTTP/Client",
            "path": "HTTP/Client.html",
            "kind": "class",
            "full_name": "HTTP::Client",
            "name": "Client",
            "doc": "An HTTP client for sending requests.",
            "summary": "<p>An HTTP client for sending requests.</p>",
            "class_methods": [
              {"html_id": "get(url:String)-class-method", "name": "get",
               "args": [{"name": "url", "external_name": "url", "restriction": "String"}],
               "args_string": "(url : String)"}
            ],
            "instance_methods": [
              {"html_id": "get(path)-instance-method", "name": "get",
               "args": [{"name": "path", "external_name": "path", "restriction": ""}],
               "args_string": "(path)"}
            ]
          },
          {
            "html_id": "stdlib-sample/HTTP/ClientError",
            "path": "HTTP/ClientError.html",
            "kind": "class",
            "full_name": "HTTP::ClientError",
            "name": "ClientError"
          }
        ]
      },
      {
        "html_id": "stdlib-sample/HTTPClient",
        "path": "HTTPClient.html",
        "kind": "class",
        "full_name": "HTTPClient",
        "name": "HTTPClient"
      }
    ]
  }
}"#;

#[fixture]
pub fn sample_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(SAMPLE_CATALOG).expect("sample catalog parses"))
}

#[fixture]
pub fn engine(sample_catalog: Arc<Catalog>) -> SearchEngine {
    SearchEngine::new(sample_catalog, &SearchConfig::default())
}

/// Full names of the records a query returns, best first.
pub fn full_names(engine: &SearchEngine, query: &str) -> Vec<String> {
    engine
        .search(query)
        .into_iter()
        .map(|record| record.full_name)
        .collect()
}

/// A temporary directory holding catalog files, removed when dropped.
pub struct TempCatalogDir {
    _temp: TempDir,
    root: PathBuf,
}

impl TempCatalogDir {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes a file relative to the directory root and returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Path of the sample catalog as `index.json`.
    pub fn json_index(&self) -> PathBuf {
        self.root.join("index.json")
    }

    /// Path of the sample catalog in script form.
    pub fn script_index(&self) -> PathBuf {
        self.root.join("js/search-index.js")
    }
}

#[fixture]
pub fn catalog_dir() -> TempCatalogDir {
    let dir = TempCatalogDir::new();
    dir.write("index.json", SAMPLE_CATALOG);
    dir.write(
        "js/search-index.js",
        &format!("crystal_doc_search_index_callback({});\n", SAMPLE_CATALOG),
    );
    dir
}
